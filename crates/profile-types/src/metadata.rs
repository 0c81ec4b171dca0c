//! Profile metadata document.
//!
//! The JSON document is uploaded to content-addressable storage and its
//! URI is passed to the profile contract's `mint` function.

use serde::{Deserialize, Serialize};

/// Metadata describing a profile, in the common NFT metadata layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
	/// Display name of the profile.
	pub name: String,
	/// Free-form description.
	#[serde(default)]
	pub description: String,
	/// URI of the profile image, usually `ipfs://<cid>`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// Link to an external page for the profile.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub external_url: Option<String>,
	/// Additional trait attributes.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub attributes: Vec<MetadataAttribute>,
}

/// A single `trait_type` / `value` attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttribute {
	pub trait_type: String,
	pub value: serde_json::Value,
}

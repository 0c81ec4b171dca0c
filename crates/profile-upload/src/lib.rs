//! Upload module for profile metadata and files.
//!
//! Metadata JSON and profile images are stored on a content-addressable
//! network through an HTTP upload service. The returned content identifier
//! becomes the metadata URI passed to the profile contract.

use async_trait::async_trait;
use profile_types::ProfileMetadata;
use serde::Serialize;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod http;
}

/// Errors that can occur during upload operations.
#[derive(Debug, Error)]
pub enum UploadError {
	/// The service answered with a non-success status.
	#[error("Upload service returned: {0}")]
	Status(String),
	/// The service answered with a body that could not be parsed.
	#[error("Failed to parse JSON response")]
	JsonParse,
	/// The JSON upload request could not be sent.
	#[error("Failed to upload JSON: {0}")]
	JsonUpload(String),
	/// The JSON download request could not be sent.
	#[error("Failed to download JSON: {0}")]
	JsonDownload(String),
	/// The file upload request could not be sent.
	#[error("Failed to upload file: {0}")]
	FileUpload(String),
	/// The client could not be constructed.
	#[error("Invalid upload configuration: {0}")]
	Configuration(String),
}

/// Content identifier of an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
	pub cid: String,
}

impl UploadReceipt {
	/// Returns the `ipfs://` URI for this content.
	pub fn metadata_uri(&self) -> String {
		format!("ipfs://{}", self.cid)
	}

	/// Returns an HTTP link to this content through `gateway_url`.
	pub fn gateway_link(&self, gateway_url: &str) -> String {
		format!("{}/{}", gateway_url.trim_end_matches('/'), self.cid)
	}
}

/// Parses the body returned by an upload endpoint.
///
/// Accepts `{"CID": "<cid>"}`, `{"CID": {"/": "<cid>"}}` (a serialized CID
/// object) and `{"IpfsHash": "<cid>"}` (pinning service responses).
pub fn parse_receipt(body: &str) -> Result<UploadReceipt, UploadError> {
	let value: serde_json::Value = serde_json::from_str(body).map_err(|_| UploadError::JsonParse)?;

	let cid = ["CID", "IpfsHash"]
		.iter()
		.find_map(|key| value.get(key))
		.and_then(|cid| match cid {
			serde_json::Value::String(s) => Some(s.clone()),
			serde_json::Value::Object(link) => link.get("/").and_then(|s| s.as_str()).map(String::from),
			_ => None,
		})
		.filter(|cid| !cid.is_empty())
		.ok_or(UploadError::JsonParse)?;

	Ok(UploadReceipt { cid })
}

/// Trait defining the interface for upload implementations.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UploadInterface: Send + Sync {
	/// Uploads a metadata document and returns its content identifier.
	async fn upload_json(&self, metadata: &ProfileMetadata) -> Result<UploadReceipt, UploadError>;

	/// Fetches a previously uploaded metadata document by URI.
	async fn download_json(&self, uri: &str) -> Result<ProfileMetadata, UploadError>;

	/// Uploads a file and returns its content identifier.
	async fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<UploadReceipt, UploadError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_receipt_string_cid() {
		let receipt = parse_receipt(r#"{"CID": "bafybeigdyr"}"#).unwrap();
		assert_eq!(receipt.cid, "bafybeigdyr");
		assert_eq!(receipt.metadata_uri(), "ipfs://bafybeigdyr");
	}

	#[test]
	fn test_parse_receipt_cid_link_object() {
		let receipt = parse_receipt(r#"{"CID": {"/": "bafybeigdyr"}}"#).unwrap();
		assert_eq!(receipt.cid, "bafybeigdyr");
	}

	#[test]
	fn test_parse_receipt_pin_response() {
		let receipt =
			parse_receipt(r#"{"IpfsHash": "QmHash", "PinSize": 12, "Timestamp": "2024-01-01"}"#)
				.unwrap();
		assert_eq!(receipt.cid, "QmHash");
	}

	#[test]
	fn test_parse_receipt_rejects_bad_bodies() {
		assert!(matches!(parse_receipt("not json"), Err(UploadError::JsonParse)));
		assert!(matches!(parse_receipt("{}"), Err(UploadError::JsonParse)));
		assert!(matches!(
			parse_receipt(r#"{"CID": ""}"#),
			Err(UploadError::JsonParse)
		));
		assert!(matches!(
			parse_receipt(r#"{"CID": 42}"#),
			Err(UploadError::JsonParse)
		));
		assert!(matches!(
			parse_receipt(r#"{"cid": "bafy"}"#),
			Err(UploadError::JsonParse)
		));
	}

	#[test]
	fn test_gateway_link() {
		let receipt = UploadReceipt {
			cid: "bafy".to_string(),
		};
		assert_eq!(
			receipt.gateway_link("https://w3s.link/ipfs/"),
			"https://w3s.link/ipfs/bafy"
		);
	}
}

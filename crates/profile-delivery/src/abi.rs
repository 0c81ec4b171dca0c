//! Contract ABI loading and revert decoding.
//!
//! Revert names are resolved against whatever ABI the client was built
//! with, so they cannot be enumerated ahead of time.

use crate::DeliveryError;
use alloy_json_abi::JsonAbi;
use alloy_primitives::FixedBytes;
use alloy_sol_types::{Panic, Revert, SolError};

/// ABI of the profile contract: `mint(string)` and its custom errors.
pub const PROFILE_ABI: &str = r#"[
	{
		"type": "function",
		"name": "mint",
		"inputs": [{ "name": "metadataUri", "type": "string", "internalType": "string" }],
		"outputs": [],
		"stateMutability": "nonpayable"
	},
	{
		"type": "function",
		"name": "tokenURI",
		"inputs": [{ "name": "tokenId", "type": "uint256", "internalType": "uint256" }],
		"outputs": [{ "name": "", "type": "string", "internalType": "string" }],
		"stateMutability": "view"
	},
	{
		"type": "error",
		"name": "AlreadyMinted",
		"inputs": []
	},
	{
		"type": "error",
		"name": "EmptyMetadataUri",
		"inputs": []
	}
]"#;

/// Parses the built-in profile contract ABI.
///
/// # Returns
///
/// The parsed ABI, or [`DeliveryError::InvalidAbi`] if the embedded JSON is
/// malformed.
pub fn profile_abi() -> Result<JsonAbi, DeliveryError> {
	serde_json::from_str(PROFILE_ABI)
		.map_err(|e| DeliveryError::InvalidAbi(format!("Built-in profile ABI: {}", e)))
}

/// Parses ABI JSON.
///
/// # Arguments
///
/// * `content` - Either a bare ABI array or a compiler artifact object with
///   an `abi` field
///
/// # Returns
///
/// The parsed ABI, or [`DeliveryError::InvalidAbi`] when the JSON is invalid
/// or an artifact carries no `abi` field.
pub fn parse_abi(content: &str) -> Result<JsonAbi, DeliveryError> {
	let value: serde_json::Value = serde_json::from_str(content)
		.map_err(|e| DeliveryError::InvalidAbi(format!("Invalid JSON: {}", e)))?;

	let abi_value = match value {
		serde_json::Value::Object(mut artifact) => artifact
			.remove("abi")
			.ok_or_else(|| DeliveryError::InvalidAbi("Artifact has no abi field".to_string()))?,
		other => other,
	};

	serde_json::from_value(abi_value).map_err(|e| DeliveryError::InvalidAbi(e.to_string()))
}

/// Resolves the error name encoded in revert data.
///
/// The 4-byte selector is matched against the built-in `Error(string)` and
/// `Panic(uint256)` errors and then against the custom errors in `abi`.
///
/// # Arguments
///
/// * `abi` - ABI whose custom errors are searched
/// * `data` - Raw revert data, selector first
///
/// # Returns
///
/// The error name (`"Error"`, `"Panic"` or a custom error name), or `None`
/// for data shorter than a selector or a selector the ABI does not know.
pub fn decode_revert_name(abi: &JsonAbi, data: &[u8]) -> Option<String> {
	if data.len() < 4 {
		return None;
	}
	let selector = FixedBytes::<4>::from_slice(&data[..4]);

	if selector.0 == Revert::SELECTOR {
		return Some("Error".to_string());
	}
	if selector.0 == Panic::SELECTOR {
		return Some("Panic".to_string());
	}

	abi.errors()
		.find(|error| error.selector() == selector)
		.map(|error| error.name.clone())
}

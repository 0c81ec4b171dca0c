//! Transaction types for profile contract interactions.
//!
//! A [`ContractCall`] describes the intent to call a contract function,
//! simulation turns it into a [`SimulatedRequest`], and submission of
//! that request yields a [`TransactionHash`].

use crate::utils::{with_0x_prefix, without_0x_prefix};
use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use std::fmt;
use std::str::FromStr;

/// Blockchain transaction hash representation.
///
/// Stores the hash as raw bytes; an empty hash carries no transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl TransactionHash {
	/// Returns true if no hash bytes are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl FromStr for TransactionHash {
	type Err = hex::FromHexError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		hex::decode(without_0x_prefix(s)).map(TransactionHash)
	}
}

impl From<alloy_primitives::B256> for TransactionHash {
	fn from(hash: alloy_primitives::B256) -> Self {
		TransactionHash(hash.0.to_vec())
	}
}

/// A contract function call to be simulated.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
	/// Account the call is simulated from and later signed by.
	pub account: Address,
	/// Target contract address.
	pub address: Address,
	/// Name of the ABI function to call.
	pub function_name: String,
	/// Function arguments, in ABI order.
	pub args: Vec<DynSolValue>,
}

impl ContractCall {
	/// Builds the `mint(string)` call used to create a profile.
	pub fn mint(account: Address, profile_address: Address, metadata_uri: &str) -> Self {
		Self {
			account,
			address: profile_address,
			function_name: "mint".to_string(),
			args: vec![DynSolValue::String(metadata_uri.to_string())],
		}
	}
}

/// A request that simulated successfully and is ready to be signed and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRequest {
	/// Signer account.
	pub from: Address,
	/// Target contract address.
	pub to: Address,
	/// Function name, kept for logging.
	pub function_name: String,
	/// ABI-encoded calldata.
	pub input: Bytes,
}

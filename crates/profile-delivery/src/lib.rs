//! Chain client module for the profile toolkit.
//!
//! This module defines the read and write client interfaces the transaction
//! submitter depends on, the structured [`ChainError`] those clients report,
//! and an Alloy-backed EVM implementation of both.

use alloy_primitives::{Address, Bytes};
use async_trait::async_trait;
use profile_types::{ContractCall, SimulatedRequest, TransactionHash};
use thiserror::Error;

/// Contract ABI loading and revert decoding.
pub mod abi;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur while constructing chain clients.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs when the RPC endpoint cannot be used.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a signer key is malformed.
	#[error("Invalid signer: {0}")]
	InvalidSigner(String),
	/// Error that occurs when a contract ABI cannot be loaded.
	#[error("Invalid ABI: {0}")]
	InvalidAbi(String),
}

/// A decoded contract revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractRevert {
	/// Name of the ABI error the revert data matched, if any.
	pub error_name: Option<String>,
	/// Raw revert data returned by the node.
	pub data: Option<Bytes>,
}

/// Structured failure reported by a chain client.
///
/// Errors form a chain of causes: a [`ChainError::Context`] wraps the error
/// that caused it. Use [`ChainError::walk`] to visit every link.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The contract rejected the call.
	#[error("Execution reverted: {}", .0.error_name.as_deref().unwrap_or("<undecoded>"))]
	Reverted(ContractRevert),
	/// Transport or node failure unrelated to contract execution.
	#[error("Network error: {0}")]
	Network(String),
	/// The call could not be ABI-encoded.
	#[error("Encoding error: {0}")]
	Encoding(String),
	/// A higher-level description wrapping the underlying cause.
	#[error("{context}")]
	Context {
		context: String,
		#[source]
		source: Box<ChainError>,
	},
}

impl ChainError {
	/// Wraps this error with a higher-level description.
	pub fn context(self, context: impl Into<String>) -> Self {
		ChainError::Context {
			context: context.into(),
			source: Box::new(self),
		}
	}

	/// Iterates over this error and each of its causes, outermost first.
	pub fn walk(&self) -> impl Iterator<Item = &ChainError> {
		std::iter::successors(Some(self), |error| match *error {
			ChainError::Context { source, .. } => Some(&**source),
			_ => None,
		})
	}

	/// Returns the first revert found in the cause chain.
	pub fn find_revert(&self) -> Option<&ContractRevert> {
		self.walk().find_map(|error| match error {
			ChainError::Reverted(revert) => Some(revert),
			_ => None,
		})
	}

	/// Renders the full cause chain as a single message.
	pub fn chain_message(&self) -> String {
		self.walk()
			.map(|error| error.to_string())
			.collect::<Vec<_>>()
			.join(": ")
	}
}

/// Read-only chain access used to dry-run contract calls.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ReadClient: Send + Sync {
	/// Simulates a contract call against current chain state.
	///
	/// Returns the request to submit if the call would succeed, or a
	/// [`ChainError`] whose cause chain carries the revert if it would not.
	async fn simulate_contract(&self, call: &ContractCall) -> Result<SimulatedRequest, ChainError>;
}

/// Signing chain access used to submit transactions.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait WriteClient: Send + Sync {
	/// Lists the accounts this client can sign for.
	async fn get_addresses(&self) -> Result<Vec<Address>, ChainError>;

	/// Signs and submits a simulated request.
	///
	/// Returns `None` if the node accepted the request without reporting a hash.
	async fn write_contract(
		&self,
		request: SimulatedRequest,
	) -> Result<Option<TransactionHash>, ChainError>;
}

#[cfg(test)]
mod tests {
	use super::*;

	fn revert(name: Option<&str>) -> ChainError {
		ChainError::Reverted(ContractRevert {
			error_name: name.map(str::to_string),
			data: None,
		})
	}

	#[test]
	fn test_walk_visits_every_cause() {
		let error = revert(Some("AlreadyMinted"))
			.context("eth_call failed")
			.context("Simulation of mint failed");

		let messages: Vec<String> = error.walk().map(|e| e.to_string()).collect();
		assert_eq!(
			messages,
			vec![
				"Simulation of mint failed",
				"eth_call failed",
				"Execution reverted: AlreadyMinted",
			]
		);
	}

	#[test]
	fn test_find_revert_in_nested_chain() {
		let error = revert(Some("AlreadyMinted")).context("outer");
		let found = error.find_revert().unwrap();
		assert_eq!(found.error_name.as_deref(), Some("AlreadyMinted"));
	}

	#[test]
	fn test_find_revert_absent() {
		let error = ChainError::Network("connection refused".to_string()).context("outer");
		assert!(error.find_revert().is_none());
		assert_eq!(
			error.chain_message(),
			"outer: Network error: connection refused"
		);
	}

	#[test]
	fn test_undecoded_revert_display() {
		assert_eq!(revert(None).to_string(), "Execution reverted: <undecoded>");
	}
}

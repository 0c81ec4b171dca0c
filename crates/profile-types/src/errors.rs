//! Error kinds surfaced by profile creation.
//!
//! Precondition failures are closed enumerations. Decoded contract
//! reverts are carried as raw names because they depend on whichever
//! ABI the read client has loaded.

use thiserror::Error;

/// Errors raised when the client bundle is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// No read (simulation) client was supplied.
	#[error("Read client is missing from the configuration")]
	ReadClientMissing,
	/// No write (signing) client was supplied.
	#[error("Write client is missing from the configuration")]
	WriteClientMissing,
}

/// Errors raised when an address fails format validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
	/// The profile contract address is not `0x` + 40 hex characters.
	#[error("Profile address is invalid")]
	ProfileAddressInvalid,
}

/// Errors raised while resolving the signer, simulating or submitting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
	/// Submission completed without yielding a transaction hash.
	#[error("Transaction hash is undefined")]
	TransactionHashUndefined,
	/// The write client exposes no accounts to sign with.
	#[error("Write client has no signer account")]
	NoSignerAccount,
	/// The write client failed to list its accounts.
	#[error("Failed to resolve signer account: {0}")]
	AccountLookupFailed(String),
	/// Simulation failed for a reason other than a contract revert.
	#[error("Simulation failed: {0}")]
	SimulationFailed(String),
	/// Submission failed for a reason other than a contract revert.
	#[error("Submission failed: {0}")]
	SubmissionFailed(String),
}

/// Failure payload of a profile creation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateProfileError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error(transparent)]
	Address(#[from] AddressError),
	#[error(transparent)]
	Transaction(#[from] TransactionError),
	/// Decoded revert error name; empty when the revert could not be decoded.
	#[error("Contract reverted: {0}")]
	Reverted(String),
}

impl CreateProfileError {
	/// Returns the decoded revert name if this failure came from a revert.
	pub fn revert_name(&self) -> Option<&str> {
		match self {
			CreateProfileError::Reverted(name) => Some(name),
			_ => None,
		}
	}
}

//! Common types module for the profile toolkit.
//!
//! This module defines the core data types shared by the chain clients,
//! the transaction submitter, the upload client and the command line.

/// Address format validation.
pub mod address;
/// Contract call and transaction hash types for chain interactions.
pub mod delivery;
/// Closed error kinds returned by the profile submitter.
pub mod errors;
/// Profile metadata document uploaded before minting.
pub mod metadata;
/// Secure string type for handling sensitive data.
pub mod secret_string;
/// Utility functions for hex formatting.
pub mod utils;

pub use address::{is_valid_address, parse_profile_address};
pub use delivery::{ContractCall, SimulatedRequest, TransactionHash};
pub use errors::{AddressError, ConfigError, CreateProfileError, TransactionError};
pub use metadata::{MetadataAttribute, ProfileMetadata};
pub use secret_string::SecretString;
pub use utils::{with_0x_prefix, without_0x_prefix};

//! Core profile creation pipeline.
//!
//! This crate verifies that a client bundle is usable and then drives a
//! profile mint through simulation and submission, reporting every
//! expected failure as a typed [`CreateProfileError`] value.

pub mod config;
pub mod profile;

pub use config::{verify_config, Config, VerifiedConfig};
pub use profile::create::{create_profile, CreateProfileArgs};
pub use profile_types::{
	AddressError, ConfigError, CreateProfileError, TransactionError, TransactionHash,
};

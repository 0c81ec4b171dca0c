//! Profile creation through the profile contract's `mint` function.
//!
//! The call is simulated before it is submitted so a call known to revert
//! never spends gas. Every expected failure is returned as a
//! [`CreateProfileError`]; nothing panics past this boundary.

use crate::config::{verify_config, Config};
use profile_delivery::ChainError;
use profile_types::{
	parse_profile_address, ContractCall, CreateProfileError, TransactionError, TransactionHash,
};

/// Arguments for [`create_profile`].
#[derive(Debug, Clone)]
pub struct CreateProfileArgs<'a> {
	/// Client bundle to verify and use.
	pub config: &'a Config,
	/// Profile contract address, `0x` + 40 hex characters.
	pub profile_address: &'a str,
	/// URI of the profile metadata passed to `mint`.
	pub metadata_uri: &'a str,
}

/// Mints a profile pointing at `metadata_uri`.
///
/// Steps, stopping at the first failure:
/// 1. verify the client bundle;
/// 2. validate the profile address;
/// 3. take the first account of the write client;
/// 4. simulate `mint(metadata_uri)` with the read client;
/// 5. submit the simulated request with the write client.
///
/// A revert during simulation or submission is reported as
/// [`CreateProfileError::Reverted`] with the decoded error name, or an
/// empty string when the name could not be decoded.
pub async fn create_profile(
	args: CreateProfileArgs<'_>,
) -> Result<TransactionHash, CreateProfileError> {
	let verified = verify_config(args.config)?;

	let profile_address = parse_profile_address(args.profile_address)?;

	let account = verified
		.write_client
		.get_addresses()
		.await
		.map_err(|e| TransactionError::AccountLookupFailed(e.chain_message()))?
		.into_iter()
		.next()
		.ok_or(TransactionError::NoSignerAccount)?;

	let call = ContractCall::mint(account, profile_address, args.metadata_uri);

	let request = verified
		.read_client
		.simulate_contract(&call)
		.await
		.map_err(|e| revert_or(e, TransactionError::SimulationFailed))?;

	let tx_hash = verified
		.write_client
		.write_contract(request)
		.await
		.map_err(|e| revert_or(e, TransactionError::SubmissionFailed))?;

	match tx_hash {
		Some(hash) if !hash.is_empty() => Ok(hash),
		_ => Err(TransactionError::TransactionHashUndefined.into()),
	}
}

/// Maps a chain error to its revert name if the cause chain holds a
/// revert, otherwise to the given transaction error kind.
fn revert_or(error: ChainError, otherwise: fn(String) -> TransactionError) -> CreateProfileError {
	match error.find_revert() {
		Some(revert) => CreateProfileError::Reverted(revert.error_name.clone().unwrap_or_default()),
		None => otherwise(error.chain_message()).into(),
	}
}

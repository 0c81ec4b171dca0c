//! Command handlers.
//!
//! Handlers take already-built clients so the upload and mint flows can be
//! exercised against mocks.

use alloy_json_abi::JsonAbi;
use anyhow::{Context, Result};
use profile_config::Settings;
use profile_core::{create_profile, Config, CreateProfileArgs, CreateProfileError, TransactionHash};
use profile_delivery::abi::{parse_abi, profile_abi};
use profile_delivery::implementations::evm::alloy::create_clients;
use profile_types::ProfileMetadata;
use profile_upload::implementations::http::HttpUploader;
use profile_upload::{UploadInterface, UploadReceipt};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Loads the contract ABI named by `contract.abi_path`, or the built-in
/// profile ABI when none is configured.
pub async fn load_contract_abi(settings: &Settings) -> Result<JsonAbi> {
	match &settings.contract.abi_path {
		Some(path) => {
			let content = tokio::fs::read_to_string(path)
				.await
				.with_context(|| format!("Failed to read ABI {}", path.display()))?;
			debug!(path = %path.display(), "Loaded contract ABI");
			Ok(parse_abi(&content)?)
		},
		None => Ok(profile_abi()?),
	}
}

/// Builds the chain client bundle from settings.
pub async fn build_config(settings: &Settings) -> Result<Config> {
	let abi = load_contract_abi(settings).await?;

	let (read_client, write_client) = create_clients(
		&settings.network.rpc_url,
		settings.network.chain_id,
		&settings.account.private_key,
		abi,
	)?;

	info!(
		chain_id = settings.network.chain_id,
		signer = %write_client.signer_address(),
		"Chain clients ready"
	);

	Ok(Config::new(Arc::new(read_client), Arc::new(write_client)))
}

/// Builds the upload client; requires a `[storage]` section.
pub fn build_uploader(settings: &Settings) -> Result<HttpUploader> {
	let storage = settings.storage()?;
	Ok(HttpUploader::new(
		&storage.api_url,
		Duration::from_secs(storage.timeout_seconds),
	)?)
}

/// Renders a command failure for the terminal.
///
/// Contract reverts are named; a revert whose error could not be decoded
/// says so instead of printing an empty name.
pub fn describe_error(error: &anyhow::Error) -> String {
	match error
		.downcast_ref::<CreateProfileError>()
		.and_then(CreateProfileError::revert_name)
	{
		Some("") => "Contract reverted with an error that is not in the contract ABI".to_string(),
		Some(name) => format!("Contract reverted with {}", name),
		None => format!("{:#}", error),
	}
}

pub async fn read_metadata(path: &Path) -> Result<ProfileMetadata> {
	let content = tokio::fs::read_to_string(path)
		.await
		.with_context(|| format!("Failed to read {}", path.display()))?;
	serde_json::from_str(&content)
		.with_context(|| format!("{} is not a valid metadata document", path.display()))
}

#[instrument(skip(config))]
pub async fn mint(config: &Config, profile_address: &str, metadata_uri: &str) -> Result<TransactionHash> {
	let hash = create_profile(CreateProfileArgs {
		config,
		profile_address,
		metadata_uri,
	})
	.await?;

	info!(tx_hash = %hash, "Profile minted");
	Ok(hash)
}

#[instrument(skip(uploader, metadata), fields(name = %metadata.name))]
pub async fn upload_json(
	uploader: &dyn UploadInterface,
	metadata: &ProfileMetadata,
) -> Result<UploadReceipt> {
	let receipt = uploader.upload_json(metadata).await?;
	info!(cid = %receipt.cid, "Metadata uploaded");
	Ok(receipt)
}

#[instrument(skip(uploader, bytes), fields(size = bytes.len()))]
pub async fn upload_file(
	uploader: &dyn UploadInterface,
	name: &str,
	bytes: Vec<u8>,
) -> Result<UploadReceipt> {
	let receipt = uploader.upload_file(name, bytes).await?;
	info!(cid = %receipt.cid, "File uploaded");
	Ok(receipt)
}

/// Uploads `metadata` and mints a profile pointing at its `ipfs://` URI.
///
/// Nothing is sent to the chain when the upload fails.
pub async fn create(
	config: &Config,
	uploader: &dyn UploadInterface,
	profile_address: &str,
	metadata: &ProfileMetadata,
) -> Result<(UploadReceipt, TransactionHash)> {
	let receipt = upload_json(uploader, metadata).await?;
	let metadata_uri = receipt.metadata_uri();
	debug!(%metadata_uri, "Minting with uploaded metadata");

	let hash = mint(config, profile_address, &metadata_uri).await?;
	Ok((receipt, hash))
}

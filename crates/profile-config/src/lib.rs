//! Settings module for the profile toolkit.
//!
//! Settings are loaded from a TOML file. Values may reference environment
//! variables as `${VAR}` or `${VAR:-default}`; these are resolved before
//! parsing and the result is validated.

use profile_types::SecretString;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for SettingsError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		SettingsError::Parse(err.message().to_string())
	}
}

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
	/// Chain connection.
	pub network: NetworkSettings,
	/// Signing account.
	pub account: AccountSettings,
	/// Profile contract ABI source.
	#[serde(default)]
	pub contract: ContractSettings,
	/// Upload service; required only by upload commands.
	#[serde(default)]
	pub storage: Option<StorageSettings>,
}

/// Chain connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkSettings {
	/// EIP-155 chain id used for signing.
	pub chain_id: u64,
	/// HTTP JSON-RPC endpoint.
	pub rpc_url: String,
}

/// Signing account settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
	/// Hex-encoded private key.
	pub private_key: SecretString,
}

/// Profile contract settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractSettings {
	/// Path to an ABI JSON file or compiler artifact. The built-in profile
	/// ABI is used when absent. Relative paths are resolved against the
	/// settings file's directory.
	pub abi_path: Option<PathBuf>,
}

/// Upload service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
	/// Base URL of the upload API.
	pub api_url: String,
	/// Gateway used to turn content identifiers into HTTP links.
	#[serde(default)]
	pub gateway_url: Option<String>,
	/// Request timeout in seconds.
	#[serde(default = "default_timeout_seconds")]
	pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
	30
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, SettingsError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(SettingsError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| SettingsError::Parse(format!("Regex error: {e}")))?;

	let mut result = String::with_capacity(input.len());
	let mut last_end = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(SettingsError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				},
			},
		};

		result.push_str(&input[last_end..full_match.start()]);
		result.push_str(&value);
		last_end = full_match.end();
	}
	result.push_str(&input[last_end..]);

	Ok(result)
}

impl Settings {
	/// Loads settings from a file.
	///
	/// A relative `contract.abi_path` is resolved against the file's directory.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await?;
		let mut settings: Settings = content.parse()?;

		if let Some(abi_path) = settings.contract.abi_path.as_mut() {
			if abi_path.is_relative() {
				let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
				*abi_path = base_dir.join(&*abi_path);
			}
		}

		tracing::debug!(path = %path.display(), chain_id = settings.network.chain_id, "Loaded settings");
		Ok(settings)
	}

	/// Returns the storage settings, or an error naming the missing section.
	pub fn storage(&self) -> Result<&StorageSettings, SettingsError> {
		self.storage
			.as_ref()
			.ok_or_else(|| SettingsError::Validation("Missing [storage] section".into()))
	}

	fn validate(&self) -> Result<(), SettingsError> {
		if self.network.chain_id == 0 {
			return Err(SettingsError::Validation(
				"network.chain_id must be greater than 0".into(),
			));
		}

		if self.network.rpc_url.trim().is_empty() {
			return Err(SettingsError::Validation(
				"network.rpc_url cannot be empty".into(),
			));
		}
		url::Url::parse(&self.network.rpc_url).map_err(|e| {
			SettingsError::Validation(format!("network.rpc_url is not a valid URL: {e}"))
		})?;

		if self.account.private_key.is_empty() {
			return Err(SettingsError::Validation(
				"account.private_key cannot be empty".into(),
			));
		}

		if let Some(storage) = &self.storage {
			url::Url::parse(&storage.api_url).map_err(|e| {
				SettingsError::Validation(format!("storage.api_url is not a valid URL: {e}"))
			})?;
			if let Some(gateway) = &storage.gateway_url {
				url::Url::parse(gateway).map_err(|e| {
					SettingsError::Validation(format!(
						"storage.gateway_url is not a valid URL: {e}"
					))
				})?;
			}
			if storage.timeout_seconds == 0 {
				return Err(SettingsError::Validation(
					"storage.timeout_seconds must be greater than 0".into(),
				));
			}
		}

		Ok(())
	}
}

/// Parses settings from a TOML string, resolving environment variables
/// and validating the result.
impl FromStr for Settings {
	type Err = SettingsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let settings: Settings = toml::from_str(&resolved)?;
		settings.validate()?;
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const VALID: &str = r#"
[network]
chain_id = 31337
rpc_url = "http://localhost:8545"

[account]
private_key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
"#;

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("PROFILE_TEST_HOST", "localhost");
		std::env::set_var("PROFILE_TEST_PORT", "8545");

		let input = "url = \"http://${PROFILE_TEST_HOST}:${PROFILE_TEST_PORT}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "url = \"http://localhost:8545\"");

		std::env::remove_var("PROFILE_TEST_HOST");
		std::env::remove_var("PROFILE_TEST_PORT");
	}

	#[test]
	fn test_env_var_with_default() {
		let input = "value = \"${PROFILE_MISSING_VAR:-default_value}\"";
		let result = resolve_env_vars(input).unwrap();
		assert_eq!(result, "value = \"default_value\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let input = "value = \"${PROFILE_MISSING_VAR}\"";
		let result = resolve_env_vars(input);
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("PROFILE_MISSING_VAR"));
	}

	#[test]
	fn test_parse_minimal_settings() {
		let settings: Settings = VALID.parse().unwrap();
		assert_eq!(settings.network.chain_id, 31337);
		assert_eq!(settings.network.rpc_url, "http://localhost:8545");
		assert!(settings.contract.abi_path.is_none());
		assert!(settings.storage.is_none());
		assert!(settings.storage().is_err());
	}

	#[test]
	fn test_parse_storage_defaults() {
		let input = format!(
			"{VALID}\n[storage]\napi_url = \"http://localhost:3000\"\n"
		);
		let settings: Settings = input.parse().unwrap();
		let storage = settings.storage().unwrap();
		assert_eq!(storage.api_url, "http://localhost:3000");
		assert_eq!(storage.timeout_seconds, 30);
		assert!(storage.gateway_url.is_none());
	}

	#[test]
	fn test_private_key_from_env() {
		std::env::set_var("PROFILE_TEST_PRIVATE_KEY", "0x01");
		let input = r#"
[network]
chain_id = 1
rpc_url = "http://localhost:8545"

[account]
private_key = "${PROFILE_TEST_PRIVATE_KEY}"
"#;
		let settings: Settings = input.parse().unwrap();
		assert_eq!(settings.account.private_key.with_exposed(|k| k.to_string()), "0x01");
		std::env::remove_var("PROFILE_TEST_PRIVATE_KEY");
	}

	#[test]
	fn test_zero_chain_id_rejected() {
		let input = VALID.replace("31337", "0");
		let result = input.parse::<Settings>();
		assert!(matches!(result, Err(SettingsError::Validation(msg)) if msg.contains("chain_id")));
	}

	#[test]
	fn test_invalid_rpc_url_rejected() {
		let input = VALID.replace("http://localhost:8545", "not a url");
		let result = input.parse::<Settings>();
		assert!(matches!(result, Err(SettingsError::Validation(msg)) if msg.contains("rpc_url")));
	}

	#[test]
	fn test_empty_private_key_rejected() {
		let input = r#"
[network]
chain_id = 1
rpc_url = "http://localhost:8545"

[account]
private_key = ""
"#;
		let result = input.parse::<Settings>();
		assert!(matches!(result, Err(SettingsError::Validation(msg)) if msg.contains("private_key")));
	}

	#[test]
	fn test_missing_section_is_parse_error() {
		let result = "[network]\nchain_id = 1\nrpc_url = \"http://x\"\n".parse::<Settings>();
		assert!(matches!(result, Err(SettingsError::Parse(_))));
	}

	#[tokio::test]
	async fn test_from_file_resolves_abi_path() {
		let dir = std::env::temp_dir().join(format!("profile-config-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		let path = dir.join("profile.toml");
		std::fs::write(
			&path,
			format!("{VALID}\n[contract]\nabi_path = \"abi/Profile.json\"\n"),
		)
		.unwrap();

		let settings = Settings::from_file(&path).await.unwrap();
		assert_eq!(
			settings.contract.abi_path,
			Some(dir.join("abi/Profile.json"))
		);

		std::fs::remove_dir_all(&dir).unwrap();
	}

	#[tokio::test]
	async fn test_from_file_missing() {
		let result = Settings::from_file("/nonexistent/profile.toml").await;
		assert!(matches!(result, Err(SettingsError::Io(_))));
	}
}

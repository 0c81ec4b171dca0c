//! Client bundle and its verification.

use profile_delivery::{ReadClient, WriteClient};
use profile_types::ConfigError;
use std::sync::Arc;

/// Bundle of chain clients handed to profile operations.
///
/// Either client may be absent; [`verify_config`] rejects such bundles
/// before any chain interaction.
#[derive(Clone, Default)]
pub struct Config {
	pub read_client: Option<Arc<dyn ReadClient>>,
	pub write_client: Option<Arc<dyn WriteClient>>,
}

impl Config {
	/// Creates a bundle with both clients present.
	pub fn new(read_client: Arc<dyn ReadClient>, write_client: Arc<dyn WriteClient>) -> Self {
		Self {
			read_client: Some(read_client),
			write_client: Some(write_client),
		}
	}
}

impl std::fmt::Debug for Config {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Config")
			.field("read_client", &self.read_client.is_some())
			.field("write_client", &self.write_client.is_some())
			.finish()
	}
}

/// Clients unwrapped from a [`Config`] that passed verification.
#[derive(Clone)]
pub struct VerifiedConfig {
	pub read_client: Arc<dyn ReadClient>,
	pub write_client: Arc<dyn WriteClient>,
}

/// Checks that both clients are present.
///
/// Performs no I/O. The read client is checked first.
pub fn verify_config(config: &Config) -> Result<VerifiedConfig, ConfigError> {
	let read_client = config
		.read_client
		.clone()
		.ok_or(ConfigError::ReadClientMissing)?;
	let write_client = config
		.write_client
		.clone()
		.ok_or(ConfigError::WriteClientMissing)?;

	Ok(VerifiedConfig {
		read_client,
		write_client,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use profile_delivery::{MockReadClient, MockWriteClient};

	#[test]
	fn test_verify_complete_config() {
		let config = Config::new(
			Arc::new(MockReadClient::new()),
			Arc::new(MockWriteClient::new()),
		);
		assert!(verify_config(&config).is_ok());
	}

	#[test]
	fn test_verify_missing_read_client() {
		let config = Config {
			read_client: None,
			write_client: Some(Arc::new(MockWriteClient::new())),
		};
		assert!(matches!(
			verify_config(&config),
			Err(ConfigError::ReadClientMissing)
		));
	}

	#[test]
	fn test_verify_missing_write_client() {
		let config = Config {
			read_client: Some(Arc::new(MockReadClient::new())),
			write_client: None,
		};
		assert!(matches!(
			verify_config(&config),
			Err(ConfigError::WriteClientMissing)
		));
	}

	#[test]
	fn test_verify_empty_config_reports_read_first() {
		assert!(matches!(
			verify_config(&Config::default()),
			Err(ConfigError::ReadClientMissing)
		));
	}

	#[test]
	fn test_config_debug_hides_clients() {
		let config = Config {
			read_client: Some(Arc::new(MockReadClient::new())),
			write_client: None,
		};
		assert_eq!(
			format!("{:?}", config),
			"Config { read_client: true, write_client: false }"
		);
	}
}

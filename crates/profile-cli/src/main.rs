//! Entry point for the `profile` command line.
//!
//! Loads `.env` and the settings file, initialises logging and dispatches
//! to the command handlers.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{output::Display, Cli, Commands};
use profile_config::Settings;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_logging(cli.debug);

	if let Err(error) = run(cli).await {
		Display::error(&commands::describe_error(&error));
		std::process::exit(1);
	}
}

/// Initialises the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise this crate logs at info (debug
/// with `--debug`) and everything else at warn.
fn init_logging(debug: bool) {
	use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

	let default_filter = if debug {
		"profile=debug,warn"
	} else {
		"profile=info,warn"
	};
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(true)
				.with_thread_ids(false)
				.with_file(false)
				.with_line_number(false)
				.compact(),
		)
		.with(env_filter)
		.init();
}

async fn run(cli: Cli) -> Result<()> {
	let settings = Settings::from_file(&cli.config)
		.await
		.with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

	match cli.command {
		Commands::Mint {
			profile_address,
			metadata_uri,
		} => {
			let config = commands::build_config(&settings).await?;
			let hash = commands::mint(&config, &profile_address, &metadata_uri).await?;

			Display::header("Profile Minted");
			Display::results(&[
				("Metadata URI", metadata_uri),
				("Transaction", hash.to_string()),
			]);
		},

		Commands::UploadJson { file } => {
			let uploader = commands::build_uploader(&settings)?;
			let metadata = commands::read_metadata(&file).await?;
			let receipt = commands::upload_json(&uploader, &metadata).await?;

			Display::success("Metadata uploaded");
			print_receipt(&settings, &receipt);
		},

		Commands::DownloadJson { uri } => {
			let uploader = commands::build_uploader(&settings)?;
			let metadata = profile_upload::UploadInterface::download_json(&uploader, &uri).await?;
			println!("{}", serde_json::to_string_pretty(&metadata)?);
		},

		Commands::UploadFile { path, name } => {
			let uploader = commands::build_uploader(&settings)?;
			let name = match name {
				Some(name) => name,
				None => path
					.file_name()
					.and_then(|n| n.to_str())
					.map(String::from)
					.with_context(|| format!("Cannot derive a file name from {}", path.display()))?,
			};
			let bytes = tokio::fs::read(&path)
				.await
				.with_context(|| format!("Failed to read {}", path.display()))?;
			let receipt = commands::upload_file(&uploader, &name, bytes).await?;

			Display::success(&format!("Uploaded {}", name));
			print_receipt(&settings, &receipt);
		},

		Commands::Create {
			profile_address,
			metadata,
		} => {
			let config = commands::build_config(&settings).await?;
			let uploader = commands::build_uploader(&settings)?;
			let metadata = commands::read_metadata(&metadata).await?;
			let (receipt, hash) =
				commands::create(&config, &uploader, &profile_address, &metadata).await?;

			Display::header("Profile Created");
			Display::results(&[
				("Metadata URI", receipt.metadata_uri()),
				("Transaction", hash.to_string()),
			]);
		},
	}

	Ok(())
}

fn print_receipt(settings: &Settings, receipt: &profile_upload::UploadReceipt) {
	let mut rows = vec![("CID", receipt.cid.clone()), ("URI", receipt.metadata_uri())];
	if let Some(gateway) = settings.storage.as_ref().and_then(|s| s.gateway_url.as_deref()) {
		rows.push(("Gateway", receipt.gateway_link(gateway)));
	}
	Display::results(&rows);
}

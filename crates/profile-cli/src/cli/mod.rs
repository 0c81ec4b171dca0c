//! Command-line interface definitions and parsing.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Profile toolkit: upload profile metadata and mint profiles.
#[derive(Parser, Debug)]
#[command(name = "profile")]
#[command(about = "Upload profile metadata and mint profile NFTs")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,

	/// Enable debug logging
	#[arg(global = true, long, env = "PROFILE_DEBUG")]
	pub debug: bool,

	/// Settings file path
	#[arg(
		global = true,
		long,
		env = "PROFILE_CONFIG",
		default_value = "config/profile.toml"
	)]
	pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Mint a profile pointing at an existing metadata URI
	Mint {
		/// Profile contract address
		#[arg(long)]
		profile_address: String,
		/// Metadata URI passed to mint
		#[arg(long)]
		metadata_uri: String,
	},

	/// Upload a metadata JSON file
	UploadJson {
		/// Path to the metadata document
		#[arg(long)]
		file: PathBuf,
	},

	/// Download a metadata JSON document by URI
	DownloadJson {
		/// Metadata URI, e.g. ipfs://<cid>
		#[arg(long)]
		uri: String,
	},

	/// Upload a file such as a profile image
	UploadFile {
		/// Path to the file
		#[arg(long)]
		path: PathBuf,
		/// Name to store the file under; defaults to the file name
		#[arg(long)]
		name: Option<String>,
	},

	/// Upload metadata and mint a profile pointing at it
	Create {
		/// Profile contract address
		#[arg(long)]
		profile_address: String,
		/// Path to the metadata document
		#[arg(long)]
		metadata: PathBuf,
	},
}

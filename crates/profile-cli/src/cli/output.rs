//! Terminal output helpers.
//!
//! Status lines go through colored markers; errors go to stderr so they do
//! not mix with printed documents.

use colored::Colorize;

/// Terminal display utilities for command results.
pub struct Display;

impl Display {
	/// Displays a section header with an underline.
	///
	/// # Arguments
	/// * `text` - Header text to display
	pub fn header(text: &str) {
		println!("\n{}", text.bold().cyan());
		println!("{}", "─".repeat(text.chars().count()).cyan());
	}

	/// Displays a success message with a green checkmark.
	///
	/// # Arguments
	/// * `message` - Success message to display
	pub fn success(message: &str) {
		println!("{} {}", "✓".green().bold(), message);
	}

	/// Displays an error message on stderr with a red cross.
	///
	/// # Arguments
	/// * `message` - Error message to display
	pub fn error(message: &str) {
		eprintln!("{} {}", "✗".red().bold(), message.red());
	}

	/// Displays key/value rows with keys padded to a common width.
	///
	/// # Arguments
	/// * `rows` - Pairs of label and value, printed in order
	pub fn results(rows: &[(&str, String)]) {
		let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
		for (key, value) in rows {
			println!("  {}  {}", format!("{:width$}", key).dimmed(), value);
		}
	}
}

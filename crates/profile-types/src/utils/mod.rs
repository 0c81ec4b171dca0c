//! Utility functions for common string transformations.

pub mod formatting;

pub use formatting::{with_0x_prefix, without_0x_prefix};

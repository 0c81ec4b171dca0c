//! Profile contract operations.

pub mod create;

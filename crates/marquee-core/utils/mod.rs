//! Shared utilities: error types used across the crate

pub mod errors;

pub use errors::{CoreError, ErrorCategory, Result, CATALOG_ERROR_MESSAGE};

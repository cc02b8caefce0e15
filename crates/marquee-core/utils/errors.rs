//! Core error type for marquee operations
//!
//! Provides the `CoreError` enum shared by every module in the crate along
//! with an `ErrorCategory` used to group failures for reporting.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling
//! - Keep technical detail for logs, and show only curated text to viewers
//! - Unknown tags are rendered, never reported as errors
//!
//! # Examples
//!
//! ```rust
//! use marquee_core::utils::errors::{CoreError, ErrorCategory};
//!
//! let err = CoreError::catalog_unavailable("connection refused");
//! assert_eq!(err.category(), ErrorCategory::Io);
//! assert_eq!(err.user_message(), "Error loading script data.");
//! ```

use core::fmt;
use thiserror::Error;

/// Curated message shown when the catalog cannot be fetched or decoded
pub const CATALOG_ERROR_MESSAGE: &str = "Error loading script data.";

/// Main error type for marquee core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The script catalog could not be fetched or decoded
    #[error("Script catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// No line exists for the requested selection
    #[error("No script found for {character} ({language}) [{subcategory}]")]
    SelectionNotFound {
        character: String,
        language: String,
        subcategory: String,
    },

    /// A tag name was registered twice
    #[error("Tag '{0}' already registered")]
    DuplicateTag(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broad grouping of [`CoreError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Fetching or decoding external data
    Io,
    /// Catalog lookups
    Lookup,
    /// Tag registry construction
    Registry,
    /// Launch parameters and tuning
    Config,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Io => "io",
            Self::Lookup => "lookup",
            Self::Registry => "registry",
            Self::Config => "config",
        };
        f.write_str(name)
    }
}

impl CoreError {
    /// Create catalog error from any displayable cause
    pub fn catalog_unavailable<T: fmt::Display>(cause: T) -> Self {
        Self::CatalogUnavailable(format!("{cause}"))
    }

    /// Create not-found error carrying the requested selection
    pub fn selection_not_found(character: &str, language: &str, subcategory: &str) -> Self {
        Self::SelectionNotFound {
            character: character.to_string(),
            language: language.to_string(),
            subcategory: subcategory.to_string(),
        }
    }

    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(format!("{message}"))
    }

    /// Category this error belongs to
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::CatalogUnavailable(_) => ErrorCategory::Io,
            Self::SelectionNotFound { .. } => ErrorCategory::Lookup,
            Self::DuplicateTag(_) => ErrorCategory::Registry,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Text safe to show in place of the marquee
    ///
    /// Only the two load failures have curated messages. Other variants are
    /// developer errors and fall back to their `Display` form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::CatalogUnavailable(_) => CATALOG_ERROR_MESSAGE.to_string(),
            Self::SelectionNotFound {
                character,
                language,
                subcategory,
            } => format!("No script found for {character} ({language}) [{subcategory}]."),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::catalog_unavailable(err)
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        Self::catalog_unavailable(err)
    }
}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;

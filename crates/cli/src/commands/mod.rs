//! CLI command implementations.
//!
//! Commands write to any `io::Write` so they can be tested without a
//! terminal.

pub mod catalog;
pub mod order;

use std::path::{Path, PathBuf};

use thiserror::Error;
use vitrina_storefront::catalog::{Catalog, CatalogError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Catalog could not be loaded or serialized.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("Failed to write {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A price could not be computed.
    #[error("Price error: {0}")]
    Price(#[from] vitrina_core::PriceError),
}

impl CommandError {
    /// Wrap an I/O error on standard output.
    pub(crate) fn stdout(source: std::io::Error) -> Self {
        Self::Io {
            target: "stdout".to_string(),
            source,
        }
    }

    /// Wrap an I/O error on a file.
    pub(crate) fn file(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            target: path.display().to_string(),
            source,
        }
    }
}

/// Load the catalog from `path`, or the built-in mock data when `None`.
///
/// # Errors
///
/// Returns `CommandError::Catalog` if the file cannot be read or parsed.
pub fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog, CommandError> {
    match path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Ok(Catalog::from_json_file(path)?)
        }
        None => {
            tracing::debug!("Using built-in mock catalog");
            Ok(Catalog::mock())
        }
    }
}

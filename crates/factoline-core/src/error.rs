// ── Core error types ──
//
// Everything here comes from the catalog provider boundary or from a
// lookup by product id. Filtering itself is total: an empty result is a
// listing state, never an error.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Catalog loading ──────────────────────────────────────────────
    #[error("Failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {origin}: {message}")]
    CatalogParse { origin: String, message: String },

    #[error("Unsupported catalog format: {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    // ── Lookups ──────────────────────────────────────────────────────
    #[error("Product not found: {identifier}")]
    ProductNotFound { identifier: String },
}

impl CoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }
}

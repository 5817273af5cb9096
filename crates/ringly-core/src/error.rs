// ── Core error types ──
//
// Transport failures pass through untouched (`Api`). Everything else is a
// lookup or shape problem found while reading a snapshot.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Failure reported by the transport, unchanged.
    #[error(transparent)]
    Api(#[from] ringly_api::Error),

    // ── Lookup errors ────────────────────────────────────────────────
    /// A snapshot slice was read before its first refresh.
    #[error("{snapshot} not loaded yet -- call the matching update first")]
    NotLoaded { snapshot: &'static str },

    /// The ID is not present in the current snapshot.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The record exists but lacks a field (or has it with the wrong type).
    #[error("{resource} {id} has no usable field '{field}'")]
    MissingField {
        resource: String,
        id: String,
        field: String,
    },

    // ── Shape errors ─────────────────────────────────────────────────
    /// A response body did not have the structure the index expects.
    #[error("Unexpected response shape for {context}: {message}")]
    UnexpectedShape {
        context: &'static str,
        message: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl CoreError {
    /// Returns `true` for snapshot lookups that found nothing.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::NotLoaded { .. } | Self::NotFound { .. })
    }

    pub(crate) fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }
}

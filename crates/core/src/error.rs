//! Error types for the AquaData domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Two outcomes deliberately do NOT appear here:
//! - an empty question is rejected at the caller boundary before the
//!   pipeline runs, so it never becomes an error value;
//! - an out-of-domain question is a designed terminal outcome
//!   (`Outcome::Refused`), not a failure.

use std::path::PathBuf;
use thiserror::Error;

/// The top-level error type for all AquaData operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Upstream model call failures ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Dataset failures (before any question runs) ---
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of the external model call. Surfaced verbatim to the
/// presentation layer; never converted to a refusal or an empty answer.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Failures reading the record source. These occur at startup, before
/// the pipeline runs — a precondition for the whole session.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Failed to parse dataset at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Region column '{column}' not found in dataset")]
    MissingRegionColumn { column: String },

    #[error("Dataset at {path} contains no records")]
    Empty { path: PathBuf },
}

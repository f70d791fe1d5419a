//! Error types for branding reconciliation.
//!
//! Local input problems, remote service failures and reconciliation failures
//! are kept apart so callers can tell "fix your files" from "the service said no".

use std::path::PathBuf;

/// Errors raised while loading local inputs, before any remote call is made.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The referenced file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The file is larger than the allowed payload size.
    #[error("File {} exceeds {max} bytes (got {size})", path.display())]
    TooLarge {
        /// Path of the oversized file.
        path: PathBuf,
        /// Actual size on disk.
        size: u64,
        /// Maximum accepted size.
        max: u64,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not valid JSON.
    #[error("Invalid JSON in {}", path.display())]
    Malformed {
        /// Path of the malformed file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The assets document does not describe assets the service can accept.
    #[error("Invalid assets file: {message}")]
    InvalidAssets { message: String },

    /// A structured input document (e.g. the stdin query) is malformed.
    #[error("Invalid input document: {message}")]
    InvalidDocument {
        /// What was wrong with it.
        message: String,
    },
}

impl InputError {
    /// Creates a new `InvalidDocument` error.
    #[must_use]
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidAssets` error.
    #[must_use]
    pub fn invalid_assets(message: impl Into<String>) -> Self {
        Self::InvalidAssets {
            message: message.into(),
        }
    }
}

/// Errors reported by a [`BrandingService`](crate::BrandingService).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The pool, client or branding record does not exist.
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// A branding record already exists for the client.
    #[error("Branding already exists: {message}")]
    AlreadyExists { message: String },

    /// Any other failure. Always fatal.
    #[error("{}", format_other(code.as_deref(), message))]
    Other {
        /// Service error code, when the service supplied one.
        code: Option<String>,
        message: String,
    },
}

fn format_other(code: Option<&str>, message: &str) -> String {
    match code {
        Some(code) => format!("{code}: {message}"),
        None => message.to_string(),
    }
}

impl ServiceError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a new `AlreadyExists` error.
    #[must_use]
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: message.into(),
        }
    }

    /// Creates a new `Other` error.
    #[must_use]
    pub fn other(code: Option<String>, message: impl Into<String>) -> Self {
        Self::Other {
            code,
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an already exists error.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Errors that abort a reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Error describing branding")]
    Lookup(#[source] ServiceError),

    #[error("Error creating branding")]
    Create(#[source] ServiceError),

    #[error("Error updating branding")]
    Update(#[source] ServiceError),

    /// Create reported a conflict but the follow-up lookup found nothing.
    #[error("Failed to find existing branding ID for client {client_id} in pool {pool_id}")]
    RecoveryFailed { pool_id: String, client_id: String },

    /// The service accepted a create but returned no branding id.
    #[error("Service returned no branding ID for client {client_id}")]
    MissingBrandingId { client_id: String },
}

impl ReconcileError {
    /// Returns `true` if the run failed on local input, before any remote call.
    #[must_use]
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

pub type Result<T, E = ReconcileError> = std::result::Result<T, E>;

//! Branding request model and local payload loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InputError;

/// Largest settings or assets file accepted from disk (2 MiB).
pub const MAX_PAYLOAD_BYTES: u64 = 2 * 1024 * 1024;

/// The user pool client whose branding is being managed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingTarget {
    pub pool_id: String,
    pub client_id: String,
}

impl BrandingTarget {
    pub fn new(pool_id: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            pool_id: pool_id.into(),
            client_id: client_id.into(),
        }
    }
}

/// Desired branding state. Settings and assets pass through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrandingPayload {
    pub settings: Value,
    pub assets: Value,
    /// Let the service fill style values the settings leave out.
    #[serde(default)]
    pub use_cognito_provided_values: bool,
}

impl BrandingPayload {
    pub fn new(settings: Value, assets: Value) -> Self {
        Self {
            settings,
            assets,
            use_cognito_provided_values: false,
        }
    }

    /// Loads settings and assets from disk, enforcing [`MAX_PAYLOAD_BYTES`].
    pub fn from_files(
        settings_path: impl AsRef<Path>,
        assets_path: impl AsRef<Path>,
    ) -> Result<Self, InputError> {
        let settings = load_json(settings_path, MAX_PAYLOAD_BYTES)?;
        let assets = load_json(assets_path, MAX_PAYLOAD_BYTES)?;
        Ok(Self::new(settings, assets))
    }
}

/// Everything needed for one reconciliation run.
#[derive(Debug, Clone, PartialEq)]
pub struct BrandingRequest {
    pub pool_id: String,
    pub client_id: String,
    pub region: String,
    pub settings: Value,
    pub assets: Value,
    pub use_cognito_provided_values: bool,
    /// Display name used in status messages.
    pub app_name: Option<String>,
}

impl BrandingRequest {
    pub fn target(&self) -> BrandingTarget {
        BrandingTarget::new(&self.pool_id, &self.client_id)
    }

    pub fn payload(&self) -> BrandingPayload {
        BrandingPayload {
            settings: self.settings.clone(),
            assets: self.assets.clone(),
            use_cognito_provided_values: self.use_cognito_provided_values,
        }
    }

    /// Name shown to the user; falls back to the client id.
    pub fn display_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(&self.client_id)
    }
}

/// Reads a JSON document from `path`, rejecting files larger than `max_bytes`.
///
/// Size is checked from metadata before the file is read.
pub fn load_json(path: impl AsRef<Path>, max_bytes: u64) -> Result<Value, InputError> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InputError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(InputError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let size = metadata.len();
    if size > max_bytes {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            max: max_bytes,
        });
    }

    let content = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), size, "loaded payload file");

    serde_json::from_str(&content).map_err(|source| InputError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

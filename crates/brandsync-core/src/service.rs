//! The remote branding service seam.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, ServiceError};
use crate::request::BrandingPayload;

/// A branding record as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingRecord {
    pub branding_id: String,
    pub pool_id: String,
    /// Client the record is attached to, when the service reports it.
    pub client_id: Option<String>,
}

impl BrandingRecord {
    pub fn new(
        branding_id: impl Into<String>,
        pool_id: impl Into<String>,
        client_id: Option<String>,
    ) -> Self {
        Self {
            branding_id: branding_id.into(),
            pool_id: pool_id.into(),
            client_id,
        }
    }
}

/// Remote control-plane operations for managed login branding.
#[async_trait]
pub trait BrandingService: Send + Sync {
    /// Rejects payloads this service could never accept. Runs before any
    /// remote call.
    fn check_payload(&self, _payload: &BrandingPayload) -> Result<(), InputError> {
        Ok(())
    }

    /// Branding attached to `client_id`, or `None`.
    ///
    /// Implementations may also surface absence as [`ServiceError::NotFound`].
    async fn describe_by_client(
        &self,
        pool_id: &str,
        client_id: &str,
    ) -> Result<Option<BrandingRecord>, ServiceError>;

    /// Every branding record in the pool.
    async fn list_for_pool(&self, pool_id: &str) -> Result<Vec<BrandingRecord>, ServiceError>;

    /// Create branding for a client.
    ///
    /// `Ok(None)` means the service accepted the request but reported no
    /// branding id.
    async fn create(
        &self,
        pool_id: &str,
        client_id: &str,
        payload: &BrandingPayload,
    ) -> Result<Option<BrandingRecord>, ServiceError>;

    /// Replace the settings and assets of an existing record.
    async fn update(
        &self,
        pool_id: &str,
        branding_id: &str,
        client_id: &str,
        payload: &BrandingPayload,
    ) -> Result<BrandingRecord, ServiceError>;
}

/// How the reconciler finds an existing record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupStrategy {
    /// Ask the service for the client's record directly.
    #[default]
    ByClient,
    /// List the pool's records and match on client id.
    Enumerate,
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByClient => f.write_str("by-client"),
            Self::Enumerate => f.write_str("enumerate"),
        }
    }
}

impl FromStr for LookupStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by-client" | "by_client" | "client" => Ok(Self::ByClient),
            "enumerate" | "list" => Ok(Self::Enumerate),
            other => Err(format!(
                "unknown lookup strategy '{other}' (expected by-client or enumerate)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_strategy_parse() {
        assert_eq!("by-client".parse::<LookupStrategy>(), Ok(LookupStrategy::ByClient));
        assert_eq!("Enumerate".parse::<LookupStrategy>(), Ok(LookupStrategy::Enumerate));
        assert!("sideways".parse::<LookupStrategy>().is_err());
        assert_eq!(LookupStrategy::default().to_string(), "by-client");
    }
}

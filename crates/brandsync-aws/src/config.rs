use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use serde::{Deserialize, Serialize};

/// Where and as whom to reach the Cognito control plane.
///
/// Passed explicitly into [`AwsBrandingService`](crate::AwsBrandingService);
/// credentials still come from the default provider chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub region: Option<String>,
    /// Override for the service endpoint, e.g. a local emulator.
    pub endpoint_url: Option<String>,
    /// Named profile from the shared AWS config files.
    pub profile: Option<String>,
}

impl RemoteConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile.filter(|p| !p.trim().is_empty());
        self
    }

    /// Explicit region, or `None` to defer to the environment.
    fn region(&self) -> Option<Region> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| Region::new(r.to_owned()))
    }

    /// Resolves the SDK configuration.
    pub async fn load(&self) -> SdkConfig {
        let region_provider = RegionProviderChain::first_try(self.region()).or_default_provider();

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region_provider);
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        tracing::debug!(
            region = ?self.region,
            endpoint_url = ?self.endpoint_url,
            profile = ?self.profile,
            "loading AWS configuration"
        );
        loader.load().await
    }
}

use brandsync_aws::{AwsBrandingService, RemoteConfig};
use brandsync_core::{BrandingReconciler, BrandingRequest, LookupStrategy, ReconcileOutcome, Result};
use tracing::info;

/// Runs one reconciliation of `request` against Cognito.
pub async fn sync_branding(
    request: &BrandingRequest,
    remote: &RemoteConfig,
    lookup: LookupStrategy,
) -> Result<ReconcileOutcome> {
    let service = AwsBrandingService::from_config(remote).await;
    info!(
        pool_id = %request.pool_id,
        client_id = %request.client_id,
        app = request.display_name(),
        %lookup,
        "reconciling managed login branding"
    );
    BrandingReconciler::new(&service)
        .with_strategy(lookup)
        .reconcile(&request.target(), &request.payload())
        .await
}

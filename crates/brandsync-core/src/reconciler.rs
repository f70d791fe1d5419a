//! Create-or-update reconciliation of a client's branding.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReconcileError, Result};
use crate::request::{BrandingPayload, BrandingTarget};
use crate::service::{BrandingService, LookupStrategy};

/// What a reconciliation run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileAction {
    Created,
    Updated,
    /// Create hit an existing record; it was found again and updated.
    Recovered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub branding_id: String,
    pub action: ReconcileAction,
}

/// Drives one lookup followed by a create or an update.
pub struct BrandingReconciler<'a, S: BrandingService + ?Sized> {
    service: &'a S,
    strategy: LookupStrategy,
}

impl<'a, S: BrandingService + ?Sized> BrandingReconciler<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            strategy: LookupStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: LookupStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> LookupStrategy {
        self.strategy
    }

    /// Finds the branding id attached to the target client.
    ///
    /// Not-found from the service means "no record"; any other error is fatal.
    pub async fn lookup(&self, target: &BrandingTarget) -> Result<Option<String>> {
        let found = match self.strategy {
            LookupStrategy::ByClient => self
                .service
                .describe_by_client(&target.pool_id, &target.client_id)
                .await
                .map(|record| record.map(|r| r.branding_id)),
            LookupStrategy::Enumerate => {
                self.service
                    .list_for_pool(&target.pool_id)
                    .await
                    .map(|records| {
                        records
                            .into_iter()
                            .find(|r| r.client_id.as_deref() == Some(target.client_id.as_str()))
                            .map(|r| r.branding_id)
                    })
            }
        };

        match found {
            Ok(id) => {
                debug!(
                    pool_id = %target.pool_id,
                    client_id = %target.client_id,
                    strategy = %self.strategy,
                    branding_id = ?id,
                    "describe finished"
                );
                Ok(id)
            }
            Err(e) if e.is_not_found() => {
                debug!(error = %e, "describe reported not found");
                Ok(None)
            }
            Err(e) => Err(ReconcileError::Lookup(e)),
        }
    }

    /// Brings the target client's branding to `payload`.
    pub async fn reconcile(
        &self,
        target: &BrandingTarget,
        payload: &BrandingPayload,
    ) -> Result<ReconcileOutcome> {
        self.service.check_payload(payload)?;

        if let Some(branding_id) = self.lookup(target).await? {
            info!(%branding_id, "branding exists, updating");
            self.update(target, &branding_id, payload).await?;
            return Ok(ReconcileOutcome {
                branding_id,
                action: ReconcileAction::Updated,
            });
        }

        info!(client_id = %target.client_id, "no branding found, creating");
        match self
            .service
            .create(&target.pool_id, &target.client_id, payload)
            .await
        {
            Ok(None) => Err(ReconcileError::MissingBrandingId {
                client_id: target.client_id.clone(),
            }),
            Ok(Some(record)) => {
                debug!(branding_id = %record.branding_id, "created branding");
                Ok(ReconcileOutcome {
                    branding_id: record.branding_id,
                    action: ReconcileAction::Created,
                })
            }
            Err(e) if e.is_already_exists() => {
                warn!(error = %e, "create conflicted with an existing record, looking it up again");
                let Some(branding_id) = self.lookup(target).await? else {
                    return Err(ReconcileError::RecoveryFailed {
                        pool_id: target.pool_id.clone(),
                        client_id: target.client_id.clone(),
                    });
                };
                debug!(%branding_id, "found existing branding");
                self.update(target, &branding_id, payload).await?;
                Ok(ReconcileOutcome {
                    branding_id,
                    action: ReconcileAction::Recovered,
                })
            }
            Err(e) => Err(ReconcileError::Create(e)),
        }
    }

    async fn update(
        &self,
        target: &BrandingTarget,
        branding_id: &str,
        payload: &BrandingPayload,
    ) -> Result<()> {
        self.service
            .update(&target.pool_id, branding_id, &target.client_id, payload)
            .await
            .map_err(ReconcileError::Update)?;
        debug!(%branding_id, "branding update successful");
        Ok(())
    }
}

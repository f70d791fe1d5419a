//! In-memory [`BrandingService`] for tests.
//!
//! Records calls so tests can assert exactly which remote operations ran, and
//! supports injecting the failure modes the reconciler has to handle.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{InputError, ServiceError};
use crate::request::BrandingPayload;
use crate::service::{BrandingRecord, BrandingService};

/// Per-operation call counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub describe: usize,
    pub list: usize,
    pub create: usize,
    pub update: usize,
}

impl CallCounts {
    /// Number of mutating calls (create + update), successful or not.
    pub fn mutations(&self) -> usize {
        self.create + self.update
    }
}

#[derive(Debug, Clone)]
struct StoredBranding {
    record: BrandingRecord,
    payload: Option<BrandingPayload>,
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<StoredBranding>,
    next_id: u64,
    next_branding_id: Option<String>,
    payload_rejection: Option<String>,
    lookup_failure: Option<ServiceError>,
    create_conflict: Option<Option<String>>,
    create_failure: Option<ServiceError>,
    create_without_record: bool,
    update_failure: Option<ServiceError>,
    absence_as_not_found: bool,
    calls: CallCounts,
    updated_ids: Vec<String>,
}

#[derive(Debug, Default)]
pub struct InMemoryBrandingService {
    state: Mutex<MemoryState>,
}

impl InMemoryBrandingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an existing record.
    pub fn with_record(
        self,
        pool_id: impl Into<String>,
        client_id: impl Into<String>,
        branding_id: impl Into<String>,
    ) -> Self {
        self.lock().records.push(StoredBranding {
            record: BrandingRecord::new(branding_id, pool_id, Some(client_id.into())),
            payload: None,
        });
        self
    }

    /// Id handed out by the next successful create.
    pub fn with_next_branding_id(self, branding_id: impl Into<String>) -> Self {
        self.lock().next_branding_id = Some(branding_id.into());
        self
    }

    /// Every payload is rejected as invalid assets.
    pub fn with_payload_rejection(self, message: impl Into<String>) -> Self {
        self.lock().payload_rejection = Some(message.into());
        self
    }

    /// Every describe/list call fails with `error`.
    pub fn with_lookup_failure(self, error: ServiceError) -> Self {
        self.lock().lookup_failure = Some(error);
        self
    }

    /// The next create fails with already-exists. When `racing_id` is set, a
    /// record with that id appears for the client, as if another writer won.
    pub fn with_create_conflict(self, racing_id: Option<String>) -> Self {
        self.lock().create_conflict = Some(racing_id);
        self
    }

    /// Every create fails with `error`.
    pub fn with_create_failure(self, error: ServiceError) -> Self {
        self.lock().create_failure = Some(error);
        self
    }

    /// Creates succeed but report no record.
    pub fn with_create_without_record(self) -> Self {
        self.lock().create_without_record = true;
        self
    }

    /// Every update fails with `error`.
    pub fn with_update_failure(self, error: ServiceError) -> Self {
        self.lock().update_failure = Some(error);
        self
    }

    /// Report a missing record as [`ServiceError::NotFound`] rather than `None`.
    pub fn with_absence_as_not_found(self) -> Self {
        self.lock().absence_as_not_found = true;
        self
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Branding ids passed to update, in call order.
    pub fn updated_ids(&self) -> Vec<String> {
        self.lock().updated_ids.clone()
    }

    /// Last payload written for a client.
    pub fn payload_for(&self, pool_id: &str, client_id: &str) -> Option<BrandingPayload> {
        self.lock()
            .records
            .iter()
            .find(|s| s.record.pool_id == pool_id && s.record.client_id.as_deref() == Some(client_id))
            .and_then(|s| s.payload.clone())
    }

    pub fn record_count(&self) -> usize {
        self.lock().records.len()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MemoryState {
    fn find(&self, pool_id: &str, client_id: &str) -> Option<&StoredBranding> {
        self.records
            .iter()
            .find(|s| s.record.pool_id == pool_id && s.record.client_id.as_deref() == Some(client_id))
    }

    fn allocate_id(&mut self) -> String {
        if let Some(id) = self.next_branding_id.take() {
            return id;
        }
        self.next_id += 1;
        format!("branding-{:04}", self.next_id)
    }
}

#[async_trait]
impl BrandingService for InMemoryBrandingService {
    fn check_payload(&self, _payload: &BrandingPayload) -> Result<(), InputError> {
        match &self.lock().payload_rejection {
            Some(message) => Err(InputError::invalid_assets(message.clone())),
            None => Ok(()),
        }
    }

    async fn describe_by_client(
        &self,
        pool_id: &str,
        client_id: &str,
    ) -> Result<Option<BrandingRecord>, ServiceError> {
        let mut state = self.lock();
        state.calls.describe += 1;
        if let Some(err) = &state.lookup_failure {
            return Err(err.clone());
        }
        match state.find(pool_id, client_id) {
            Some(stored) => Ok(Some(stored.record.clone())),
            None if state.absence_as_not_found => Err(ServiceError::not_found(format!(
                "no managed login branding for client {client_id}"
            ))),
            None => Ok(None),
        }
    }

    async fn list_for_pool(&self, pool_id: &str) -> Result<Vec<BrandingRecord>, ServiceError> {
        let mut state = self.lock();
        state.calls.list += 1;
        if let Some(err) = &state.lookup_failure {
            return Err(err.clone());
        }
        let records: Vec<BrandingRecord> = state
            .records
            .iter()
            .filter(|s| s.record.pool_id == pool_id)
            .map(|s| s.record.clone())
            .collect();
        if records.is_empty() && state.absence_as_not_found {
            return Err(ServiceError::not_found(format!("no managed login branding in {pool_id}")));
        }
        Ok(records)
    }

    async fn create(
        &self,
        pool_id: &str,
        client_id: &str,
        payload: &BrandingPayload,
    ) -> Result<Option<BrandingRecord>, ServiceError> {
        let mut state = self.lock();
        state.calls.create += 1;
        if let Some(err) = &state.create_failure {
            return Err(err.clone());
        }

        if let Some(racing_id) = state.create_conflict.take() {
            if let Some(id) = racing_id {
                state.records.push(StoredBranding {
                    record: BrandingRecord::new(id, pool_id, Some(client_id.to_string())),
                    payload: None,
                });
            }
            return Err(ServiceError::already_exists(format!(
                "managed login branding already exists for client {client_id}"
            )));
        }

        if state.find(pool_id, client_id).is_some() {
            return Err(ServiceError::already_exists(format!(
                "managed login branding already exists for client {client_id}"
            )));
        }

        let record = BrandingRecord::new(state.allocate_id(), pool_id, Some(client_id.to_string()));
        state.records.push(StoredBranding {
            record: record.clone(),
            payload: Some(payload.clone()),
        });
        Ok((!state.create_without_record).then_some(record))
    }

    async fn update(
        &self,
        pool_id: &str,
        branding_id: &str,
        _client_id: &str,
        payload: &BrandingPayload,
    ) -> Result<BrandingRecord, ServiceError> {
        let mut state = self.lock();
        state.calls.update += 1;
        state.updated_ids.push(branding_id.to_string());
        if let Some(err) = &state.update_failure {
            return Err(err.clone());
        }

        let stored = state
            .records
            .iter_mut()
            .find(|s| s.record.pool_id == pool_id && s.record.branding_id == branding_id)
            .ok_or_else(|| ServiceError::not_found(format!("branding {branding_id}")))?;
        stored.payload = Some(payload.clone());
        Ok(stored.record.clone())
    }
}

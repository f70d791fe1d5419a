//! Core of brandsync: reconciles a Cognito user pool client's managed login
//! branding against settings and assets described in local JSON files.
//!
//! The remote service sits behind [`BrandingService`]; [`BrandingReconciler`]
//! runs the lookup followed by exactly one create or update.

pub mod error;
pub mod memory;
pub mod reconciler;
pub mod request;
pub mod service;

pub use error::{InputError, ReconcileError, Result, ServiceError};
pub use memory::{CallCounts, InMemoryBrandingService};
pub use reconciler::{BrandingReconciler, ReconcileAction, ReconcileOutcome};
pub use request::{
    BrandingPayload, BrandingRequest, BrandingTarget, MAX_PAYLOAD_BYTES, load_json,
};
pub use service::{BrandingRecord, BrandingService, LookupStrategy};

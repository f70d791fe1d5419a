use std::error::Error as StdError;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::Client;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::types::{AssetType, ManagedLoginBrandingType};
use aws_smithy_types::Document;
use brandsync_core::{BrandingPayload, BrandingRecord, BrandingService, InputError, ServiceError};
use tracing::debug;

use crate::config::RemoteConfig;
use crate::convert;

const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
const BRANDING_EXISTS: &str = "ManagedLoginBrandingExistsException";

/// Largest page `ListUserPoolClients` accepts.
const CLIENT_PAGE_SIZE: i32 = 60;

/// [`BrandingService`] backed by the Cognito user pools API.
#[derive(Debug, Clone)]
pub struct AwsBrandingService {
    client: Client,
}

impl AwsBrandingService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &RemoteConfig) -> Self {
        let sdk_config = config.load().await;
        Self::new(Client::new(&sdk_config))
    }

    fn request_parts(
        payload: &BrandingPayload,
    ) -> Result<(Option<Document>, Option<Vec<AssetType>>), ServiceError> {
        let assets = convert::to_assets(&payload.assets)
            .map_err(|e| ServiceError::other(Some("InvalidAssets".into()), e.to_string()))?;
        Ok((convert::settings_document(&payload.settings), assets))
    }
}

fn record_from(
    branding: Option<&ManagedLoginBrandingType>,
    pool_id: &str,
    client_id: &str,
) -> Option<BrandingRecord> {
    branding
        .and_then(|b| b.managed_login_branding_id())
        .filter(|id| !id.is_empty())
        .map(|id| BrandingRecord::new(id, pool_id, Some(client_id.to_string())))
}

/// Sorts a service error code into the categories the reconciler acts on.
pub(crate) fn classify(code: Option<&str>, text: String) -> ServiceError {
    match code {
        Some(RESOURCE_NOT_FOUND) => ServiceError::not_found(text),
        Some(BRANDING_EXISTS) => ServiceError::already_exists(text),
        code => ServiceError::other(code.map(str::to_string), text),
    }
}

fn service_error<E, R>(err: SdkError<E, R>) -> ServiceError
where
    E: ProvideErrorMetadata + StdError + 'static,
    R: Debug,
{
    let code = err.code().map(str::to_string);
    classify(code.as_deref(), DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl BrandingService for AwsBrandingService {
    fn check_payload(&self, payload: &BrandingPayload) -> Result<(), InputError> {
        convert::to_assets(&payload.assets)
            .map(drop)
            .map_err(|e| InputError::invalid_assets(e.to_string()))
    }

    async fn describe_by_client(
        &self,
        pool_id: &str,
        client_id: &str,
    ) -> Result<Option<BrandingRecord>, ServiceError> {
        let resp = self
            .client
            .describe_managed_login_branding_by_client()
            .user_pool_id(pool_id)
            .client_id(client_id)
            .send()
            .await
            .map_err(service_error)?;
        let record = record_from(resp.managed_login_branding(), pool_id, client_id);
        debug!(
            pool_id,
            client_id,
            branding_id = record.as_ref().map(|r| r.branding_id.as_str()),
            "describe response"
        );
        Ok(record)
    }

    async fn list_for_pool(&self, pool_id: &str) -> Result<Vec<BrandingRecord>, ServiceError> {
        let clients = self
            .client
            .list_user_pool_clients()
            .user_pool_id(pool_id)
            .max_results(CLIENT_PAGE_SIZE)
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(service_error)?;
        debug!(pool_id, clients = clients.len(), "listed user pool clients");

        let mut records = Vec::new();
        for client_id in clients.iter().filter_map(|c| c.client_id()) {
            match self.describe_by_client(pool_id, client_id).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }

    async fn create(
        &self,
        pool_id: &str,
        client_id: &str,
        payload: &BrandingPayload,
    ) -> Result<Option<BrandingRecord>, ServiceError> {
        let (settings, assets) = Self::request_parts(payload)?;
        let resp = self
            .client
            .create_managed_login_branding()
            .user_pool_id(pool_id)
            .client_id(client_id)
            .use_cognito_provided_values(payload.use_cognito_provided_values)
            .set_settings(settings)
            .set_assets(assets)
            .send()
            .await
            .map_err(service_error)?;
        Ok(record_from(resp.managed_login_branding(), pool_id, client_id))
    }

    async fn update(
        &self,
        pool_id: &str,
        branding_id: &str,
        client_id: &str,
        payload: &BrandingPayload,
    ) -> Result<BrandingRecord, ServiceError> {
        let (settings, assets) = Self::request_parts(payload)?;
        // UpdateManagedLoginBranding is keyed by branding id only.
        debug!(branding_id, client_id, "updating managed login branding");
        self.client
            .update_managed_login_branding()
            .user_pool_id(pool_id)
            .managed_login_branding_id(branding_id)
            .use_cognito_provided_values(payload.use_cognito_provided_values)
            .set_settings(settings)
            .set_assets(assets)
            .send()
            .await
            .map_err(service_error)?;
        Ok(BrandingRecord::new(
            branding_id,
            pool_id,
            Some(client_id.to_string()),
        ))
    }
}

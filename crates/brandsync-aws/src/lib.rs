//! Amazon Cognito backend for brandsync.

pub mod config;
pub mod convert;
mod service;

pub use config::RemoteConfig;
pub use convert::ConvertError;
pub use service::AwsBrandingService;

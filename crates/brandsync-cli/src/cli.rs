use std::path::PathBuf;

use brandsync_aws::RemoteConfig;
use brandsync_core::LookupStrategy;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::config::FileConfig;

#[derive(Parser, Debug)]
#[command(name = "brandsync")]
#[command(about = "Create or update managed login branding for a Cognito app client")]
#[command(version)]
pub struct Cli {
    /// User pool ID (e.g. us-east-1_AbCdEf123)
    pub pool_id: String,
    /// App client ID
    pub client_id: String,
    /// AWS region of the user pool
    pub region: String,
    /// Path to the branding settings JSON file
    pub settings_file: PathBuf,
    /// Path to the branding assets JSON file
    pub assets_file: PathBuf,
    /// Application name used in status messages
    pub app_name: String,

    /// Cognito endpoint override (e.g. a local emulator)
    #[arg(long, env = "BRANDSYNC_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Named AWS profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// How to find an existing branding record
    #[arg(long, env = "BRANDSYNC_LOOKUP")]
    pub lookup: Option<LookupArg>,

    /// Let Cognito fill style values the settings leave out
    #[arg(long)]
    pub use_cognito_provided_values: bool,

    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Config file with defaults
    #[arg(long, env = "BRANDSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Pipe form: the query arrives on stdin.
#[derive(Parser, Debug)]
#[command(name = "brandsync-external")]
#[command(about = "Terraform external data source: reads a JSON query on stdin, prints {\"branding_id\"}")]
#[command(version)]
pub struct ExternalCli {
    /// Config file with defaults
    #[arg(long, env = "BRANDSYNC_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum LookupArg {
    /// Describe the client's branding directly
    ByClient,
    /// List the pool's branding and match the client
    Enumerate,
}

impl From<LookupArg> for LookupStrategy {
    fn from(arg: LookupArg) -> Self {
        match arg {
            LookupArg::ByClient => LookupStrategy::ByClient,
            LookupArg::Enumerate => LookupStrategy::Enumerate,
        }
    }
}

/// Settings after merging flags/env with the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub remote: RemoteConfig,
    pub lookup: LookupStrategy,
    pub format: OutputFormat,
}

impl Cli {
    /// Flags and env win over the file; the file wins over built-in defaults.
    pub fn resolve(&self, file: &FileConfig) -> ResolvedOptions {
        let remote = RemoteConfig::new(&self.region)
            .with_endpoint_url(self.endpoint_url.clone().or_else(|| file.endpoint_url.clone()))
            .with_profile(self.profile.clone().or_else(|| file.profile.clone()));
        ResolvedOptions {
            remote,
            lookup: self
                .lookup
                .map(LookupStrategy::from)
                .or(file.lookup)
                .unwrap_or_default(),
            format: self.format.or(file.format).unwrap_or_default(),
        }
    }
}

/// Parses arguments; usage errors exit with status 1, help/version with 0.
pub fn parse_or_exit<P: Parser>() -> P {
    P::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let _ = e.print();
            std::process::exit(1);
        }
    })
}

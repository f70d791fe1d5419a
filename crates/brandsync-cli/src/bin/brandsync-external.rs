use std::io;

use anyhow::{Context, Result};
use brandsync_aws::RemoteConfig;
use brandsync_cli::cli::{ExternalCli, parse_or_exit};
use brandsync_cli::external::{ExternalQuery, ExternalResult};
use brandsync_cli::output::print_error;
use brandsync_cli::{config, observability, sync};
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli: ExternalCli = parse_or_exit();
    observability::init_tracing(observability::EXTERNAL_DEFAULT_FILTER);

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: ExternalCli) -> Result<()> {
    let file_config = config::load(cli.config.as_deref())?;

    let query = ExternalQuery::read_from(io::stdin().lock()).context("Error reading query")?;
    let lookup = query
        .lookup_strategy()?
        .or(file_config.lookup)
        .unwrap_or_default();
    let remote = RemoteConfig::new(&query.region)
        .with_endpoint_url(query.endpoint_url.clone().or(file_config.endpoint_url))
        .with_profile(file_config.profile);

    let request = query.into_request().context("Error reading JSON files")?;
    debug!(client_id = %request.client_id, "loaded settings and assets");

    let outcome = sync::sync_branding(&request, &remote, lookup).await?;
    println!(
        "{}",
        serde_json::to_string(&ExternalResult {
            branding_id: &outcome.branding_id,
        })?
    );
    Ok(())
}

use anyhow::{Context, Result};
use brandsync_cli::cli::{Cli, parse_or_exit};
use brandsync_cli::output::{print_error, print_outcome};
use brandsync_cli::{config, observability, sync};
use brandsync_core::{BrandingPayload, BrandingRequest};

#[tokio::main]
async fn main() {
    let cli: Cli = parse_or_exit();
    observability::init_tracing(observability::cli_default_filter(cli.verbose));

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let file_config = config::load(cli.config.as_deref())?;
    let options = cli.resolve(&file_config);

    let payload = BrandingPayload::from_files(&cli.settings_file, &cli.assets_file)
        .context("Error loading files")?;

    let request = BrandingRequest {
        pool_id: cli.pool_id,
        client_id: cli.client_id,
        region: cli.region,
        settings: payload.settings,
        assets: payload.assets,
        use_cognito_provided_values: cli.use_cognito_provided_values,
        app_name: Some(cli.app_name),
    };

    let outcome = sync::sync_branding(&request, &options.remote, options.lookup)
        .await
        .map_err(|e| {
            let context = if e.is_input() { "Error loading files" } else { "AWS Error" };
            anyhow::Error::new(e).context(context)
        })?;
    print_outcome(&outcome, request.display_name(), options.format);
    Ok(())
}

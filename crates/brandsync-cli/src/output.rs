use brandsync_core::{ReconcileAction, ReconcileOutcome};
use colored::Colorize;
use serde_json::json;

use crate::cli::OutputFormat;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Status line for a finished run.
pub fn outcome_message(outcome: &ReconcileOutcome, app_name: &str) -> String {
    match outcome.action {
        ReconcileAction::Created => format!(
            "Branding created for {} (ID: {})",
            app_name,
            outcome.branding_id
        ),
        ReconcileAction::Updated => format!(
            "Branding updated for {} (ID: {})",
            app_name,
            outcome.branding_id
        ),
        ReconcileAction::Recovered => format!(
            "Branding updated for {} (ID: {}, found after create conflict)",
            app_name,
            outcome.branding_id
        ),
    }
}

pub fn outcome_json(outcome: &ReconcileOutcome, app_name: &str) -> serde_json::Value {
    json!({
        "branding_id": outcome.branding_id,
        "action": outcome.action,
        "app_name": app_name,
    })
}

pub fn print_outcome(outcome: &ReconcileOutcome, app_name: &str, format: OutputFormat) {
    match format {
        OutputFormat::Text => print_success(&outcome_message(outcome, app_name)),
        OutputFormat::Json => println!("{}", outcome_json(outcome, app_name)),
    }
}

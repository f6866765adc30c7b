// sitelink CLI - one-shot plan-to-site linkage repair

mod exit_codes;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_CONFIG_MISSING, EXIT_STORE_UNAVAILABLE, EXIT_SUCCESS};
use sitelink_recon::{engine, Outcome, Predicate, RunReport};
use sitelink_store::{RestStore, StoreConfig};

struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

#[derive(Parser)]
#[command(name = "sitelink")]
#[command(about = "Repairs weekly-plan links to construction sites and backfills empty site fields")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one reconciliation pass and print a summary
    #[command(after_help = "\
Connection comes from the environment: SUPABASE_URL and SUPABASE_ANON_KEY.
Only empty fields are ever written; user-entered values are never touched.
Safe to re-run: a second pass over repaired data issues no writes.

Examples:
  sitelink run")]
    Run,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => cmd_run(),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn cmd_run() -> Result<(), CliError> {
    let config = StoreConfig::from_env().map_err(|e| CliError {
        code: EXIT_CONFIG_MISSING,
        message: e.to_string(),
        hint: Some("export SUPABASE_URL and SUPABASE_ANON_KEY".into()),
    })?;

    let store = RestStore::new(config);

    let report = engine::run(&store, &Predicate::CodePresent).map_err(|e| CliError {
        code: EXIT_STORE_UNAVAILABLE,
        message: e.to_string(),
        hint: None,
    })?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    for event in &report.events {
        eprintln!(
            "  plan {} [{}]: {}",
            event.plan_id,
            event.cms_code,
            describe(&event.outcome),
        );
    }

    eprintln!(
        "linkage run: {} scanned, {} updated, {} skipped, {} unmatched, {} errors",
        report.scanned, report.updated, report.skipped, report.unmatched, report.errors,
    );
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Updated { fields } => format!("filled {}", fields.join(", ")),
        Outcome::Skipped => "no updates needed".into(),
        Outcome::Unmatched => "no matching site".into(),
        Outcome::Ambiguous { candidates, chosen_site } => {
            format!("warning: {candidates} sites share this code, using site {chosen_site}")
        }
        Outcome::Error { message } => format!("error: {message}"),
    }
}

//! Evaluates a governance module against case contexts read from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use governance_sdk::config;
use governance_sdk::policy::{
    ApprovalTally, EvaluationContext, GovernanceThresholdsModulePayload, can_participate,
    check_progress, evaluate_exception_policy, evaluate_governance, is_exception_required,
};
use governance_sdk::primitives::RoleId;
use governance_sdk::telemetry::{TelemetryConfig, init_tracing};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "governance")]
#[command(about = "Evaluate governance approval tiers, exceptions and conflicts")]
#[command(long_about = None)]
#[command(version)]
struct Cli {
    /// Governance module JSON file
    #[arg(short, long, env = "GOVERNANCE_MODULE_PATH")]
    module: PathBuf,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate approval tiers and the hard-breach gate for a case
    Evaluate {
        /// Evaluation context JSON file (`actionType`, `case`, `exception`, ...)
        #[arg(short, long)]
        context: PathBuf,
        /// Optional tally of votes and sign-offs collected so far
        #[arg(short, long)]
        tally: Option<PathBuf>,
    },
    /// Classify an exception by severity
    Exception {
        /// Exception attributes JSON file
        #[arg(short, long)]
        exception: PathBuf,
    },
    /// Check whether a participant may vote or sign off
    Participation {
        /// Roles held by the participant
        #[arg(short, long = "role", required = true)]
        roles: Vec<String>,
        /// The participant owns the case
        #[arg(long)]
        case_owner: bool,
    },
    /// Validate the module and print its findings
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TelemetryConfig::default().with_filter(cli.log.as_str()))?;

    match cli.command {
        Command::Validate => {
            let json = fs::read_to_string(&cli.module)
                .with_context(|| format!("reading {}", cli.module.display()))?;
            let module: GovernanceThresholdsModulePayload = serde_json::from_str(&json)?;
            let issues = config::validate(&module);
            info!(issues = issues.len(), "validation finished");
            print_json(&issues)
        }
        Command::Evaluate { context, tally } => {
            let module = config::from_path(&cli.module)?;
            let context: EvaluationContext = read_json(&context)?;
            let result = evaluate_governance(&context, &module);
            if result.is_blocked() {
                warn!(reasons = ?result.reasons(), "decision blocked");
            }
            if let Some(case) = context.case() {
                info!(
                    exception_required = is_exception_required(case),
                    "case inspected"
                );
            }

            match tally {
                Some(path) => {
                    let tally: ApprovalTally = read_json(&path)?;
                    let progress = check_progress(result.requirements(), &tally);
                    print_json(&serde_json::json!({
                        "evaluation": result,
                        "progress": progress,
                    }))
                }
                None => print_json(&result),
            }
        }
        Command::Exception { exception } => {
            let module = config::from_path(&cli.module)?;
            let exception: Value = read_json(&exception)?;
            print_json(&evaluate_exception_policy(&exception, &module))
        }
        Command::Participation { roles, case_owner } => {
            let module = config::from_path(&cli.module)?;
            let roles = roles
                .into_iter()
                .map(RoleId::new)
                .collect::<governance_sdk::primitives::Result<Vec<_>>>()?;
            print_json(&can_participate(&module, &roles, case_owner))
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

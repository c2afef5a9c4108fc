//! Triage CLI: SSVC vector decoding and advisory workflow checks.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use manifest::TriageManifest;

#[derive(Parser)]
#[command(name = "triage", version, about = "SSVC scoring and advisory workflow checks")]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with SSVC decision trees and vectors
    Ssvc {
        #[command(subcommand)]
        action: SsvcAction,
    },
    /// Check workflow permissions
    Workflow {
        #[command(subcommand)]
        action: WorkflowAction,
    },
}

#[derive(Subcommand)]
enum SsvcAction {
    /// List the main decision steps of a tree
    Steps {
        /// Decision tree JSON (default: from triage.toml, else the bundled tree)
        #[arg(long)]
        tree: Option<PathBuf>,
    },
    /// Show the outcome recorded in a vector
    Decode {
        /// Vector, e.g. SSVCv2/E:A/A:Y/T:T/M:H/D:C/2024-01-01T00:00:00Z/
        vector: String,
        /// Decision tree JSON
        #[arg(long)]
        tree: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a vector from KEY:OPTION choices
    Encode {
        /// Choices in walk order, e.g. E:A A:Y
        choices: Vec<String>,
        /// Scheme marker (default: from triage.toml, else SSVCv2)
        #[arg(long)]
        scheme: Option<String>,
        /// Decision time in RFC 3339 (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Print the current time in vector timestamp format
    Timestamp,
}

#[derive(Subcommand)]
enum WorkflowAction {
    /// Check whether a transition is allowed (exit status 1 if not)
    Check {
        /// Role token held by the principal (repeatable)
        #[arg(long = "role", short = 'r')]
        roles: Vec<String>,
        /// Current state
        from: String,
        /// Requested state
        to: String,
    },
    /// List the states reachable from the current one
    List {
        /// Role token held by the principal (repeatable)
        #[arg(long = "role", short = 'r')]
        roles: Vec<String>,
        /// Current state
        from: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether commenting is allowed (exit status 1 if not)
    Comment {
        /// Role token held by the principal (repeatable)
        #[arg(long = "role", short = 'r')]
        roles: Vec<String>,
        /// Current state
        state: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Runs a command. `Ok(false)` means the request was denied.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let cwd = std::env::current_dir()?;
    let (manifest, manifest_dir) = load_manifest_optional(&cwd)?;
    let manifest = manifest.unwrap_or_default();

    match cli.command {
        Commands::Ssvc { action } => {
            match action {
                SsvcAction::Steps { tree } => {
                    let tree = tree_path(tree, &manifest, manifest_dir.as_deref());
                    commands::ssvc::steps(tree.as_deref())?
                }
                SsvcAction::Decode { vector, tree, json } => {
                    let tree = tree_path(tree, &manifest, manifest_dir.as_deref());
                    commands::ssvc::decode_vector(tree.as_deref(), &vector, json)?
                }
                SsvcAction::Encode {
                    choices,
                    scheme,
                    at,
                } => {
                    let scheme = scheme.unwrap_or_else(|| manifest.ssvc.scheme.clone());
                    commands::ssvc::encode(&scheme, &choices, at.as_deref())?
                }
                SsvcAction::Timestamp => commands::ssvc::timestamp()?,
            }
            Ok(true)
        }

        Commands::Workflow { action } => match action {
            WorkflowAction::Check { roles, from, to } => {
                commands::workflow::check(&manifest.roles, &roles, &from, &to)
            }
            WorkflowAction::List { roles, from, json } => {
                commands::workflow::list(&manifest.roles, &roles, &from, json)?;
                Ok(true)
            }
            WorkflowAction::Comment { roles, state } => {
                commands::workflow::comment(&manifest.roles, &roles, &state)
            }
        },
    }
}

/// Pick the decision tree: explicit flag first, then `triage.toml`.
fn tree_path(
    flag: Option<PathBuf>,
    manifest: &TriageManifest,
    manifest_dir: Option<&Path>,
) -> Option<PathBuf> {
    flag.or_else(|| manifest_dir.and_then(|dir| manifest.tree_path(dir)))
}

/// Try to load a manifest from the current directory upward. Returns (None, None) if not found.
fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<TriageManifest>, Option<PathBuf>)> {
    match TriageManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

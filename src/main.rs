//! autograder: Grade CI builds from their quality signals
//!
//! Turns static analysis, test, coverage and mutation results into one score.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use autograder::{
    cli::{self, GradeConfig},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "autograder")]
#[command(version)]
#[command(
    about = "Grade CI builds from static analysis, test, coverage and mutation results",
    long_about = None
)]
#[command(after_help = "EXIT CODES:
    0  Grading completed (and met --min-score)
    1  Score below --min-score
    2  Grading aborted (enabled category without results)
    3  Error occurred

EXAMPLES:
    # Grade with a discovered .autograding.yaml
    autograder grade --snapshots build/snapshots.json

    # Inline configuration, as passed by a CI step
    autograder grade --snapshots snapshots.yaml \\
        --config-json '{\"tests\":{\"maxScore\":100,\"failureImpact\":-5}}'

    # Markdown report for a pull request comment
    autograder grade --snapshots snapshots.json -o markdown -O score.md")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "AUTOGRADER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `grade` subcommand
#[derive(Parser)]
struct GradeArgs {
    /// Snapshot file with the recorded counts (JSON or YAML)
    #[arg(short, long)]
    snapshots: PathBuf,

    /// Inline JSON configuration, overrides --config
    #[arg(long, env = "AUTOGRADER_CONFIG_JSON")]
    config_json: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file (default: stdout)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Fail with exit code 1 if the total score is below this value
    #[arg(long)]
    min_score: Option<i64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade recorded build results
    Grade(GradeArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .autograding.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(exit_codes::SUCCESS) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Grade(args) => cli::run_grade(GradeConfig {
            snapshots_path: args.snapshots,
            config_path: cli.config,
            config_json: args.config_json,
            output: args.output,
            output_file: args.output_file,
            min_score: args.min_score,
            no_color: cli.no_color,
            quiet: cli.quiet,
        }),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "autograder", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = autograder::config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => print!("{}", cli::config_show(cli.config.as_deref())?),
                ConfigAction::Path => eprint!("{}", cli::config_path(cli.config.as_deref())?),
                ConfigAction::Init => {
                    let cwd =
                        std::env::current_dir().context("cannot determine current directory")?;
                    let target = cli::config_init(&cwd)?;
                    eprintln!("Created {}", target.display());
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

//! smoke-harness CLI
//!
//! Scenario runner for example verification smoke tests.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smoke_harness::commands;
use smoke_harness::{suites, Environment, HarnessConfig};

#[derive(Parser)]
#[command(name = "smoke-harness")]
#[command(about = "Scenario runner for example verification smoke tests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and run scenarios
    Run {
        /// Path to config file (default: ./smoke.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only run this project
        #[arg(long)]
        project: Option<String>,

        /// Only run scenarios whose name contains this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Run every project in this environment
        #[arg(long, value_enum)]
        environment: Option<Environment>,

        /// Replace every project's include globs (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Collect coverage and run the configured reporters
        #[arg(long)]
        coverage: bool,

        /// Scenarios to run at once
        #[arg(long, default_value = "1")]
        jobs: usize,

        /// Write a JSON run report to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// List the scenarios a run would execute
    List {
        /// Path to config file (default: ./smoke.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only list this project
        #[arg(long)]
        project: Option<String>,
    },
    /// Write a config file with the defaults
    Init {
        /// Output path (default: ./smoke.toml)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<HarnessConfig> {
    let path = match path {
        Some(path) => path,
        None => HarnessConfig::default_path()?,
    };
    HarnessConfig::load(&path)
}

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            project,
            filter,
            environment,
            include,
            coverage,
            jobs,
            json,
        } => {
            let config = load_config(config)?;
            let options = commands::run::RunOptions {
                project,
                filter,
                environment,
                include,
                coverage,
                jobs,
                json,
            };

            let outcome = commands::run::run(&suites::builtin(), &config, &options)?;

            print!("{}", outcome.report.render());
            if let Some(coverage) = outcome.coverage {
                if let Some(text) = coverage.text {
                    println!("\n--- Coverage ---");
                    print!("{}", text);
                }
                for path in &coverage.written {
                    println!("  Wrote: {}", path.display());
                }
            }

            if !outcome.report.success() {
                std::process::exit(outcome.report.exit_code());
            }
            Ok(())
        }
        Commands::List { config, project } => {
            let config = load_config(config)?;
            for line in commands::list::list(&suites::builtin(), &config, project.as_deref())? {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Init { output, force } => {
            let output = match output {
                Some(output) => output,
                None => HarnessConfig::default_path()?,
            };
            commands::init::init(&output, force)?;
            println!("Wrote config to: {}", output.display());
            Ok(())
        }
    }
}

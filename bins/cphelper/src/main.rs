mod commands;
mod compiler;
mod discovery;
mod engine;
mod evaluator;
mod executor;
mod executor_tests;
mod generator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cphelper_common::Config;
use std::path::PathBuf;
use tracing::debug;

/// Parsed invocation; built once and never mutated
#[derive(Parser)]
#[command(name = "cphelper")]
#[command(about = "cphelper - Scaffold, compile and test competitive programming solutions", long_about = None)]
struct Cli {
    /// Root directory holding one fixture directory per problem
    #[arg(long, global = true)]
    tests_dir: Option<PathBuf>,

    /// Kill the program and report TIMEOUT after this many milliseconds per fixture
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a source file from the template for its extension (cpp, py, java)
    New {
        /// File to create (e.g., add.cpp)
        filename: String,

        /// Language hint (informational; the extension selects the template)
        language: Option<String>,
    },

    /// Compile a source file (g++ for cpp, javac for java)
    Compile {
        /// Source file to compile
        filename: String,
    },

    /// Run a source file against the fixtures in <tests-dir>/<base_name>/
    Test {
        /// Source file to test
        filename: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.tests_dir {
        config.test_root = dir;
    }
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }
    debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::New { filename, language } => {
            commands::handle_new(&filename, language.as_deref(), &config).await?;
        }
        Commands::Compile { filename } => {
            commands::handle_compile(&filename, &config).await?;
        }
        Commands::Test { filename } => {
            commands::handle_test(&filename, &config).await?;
        }
    }

    Ok(())
}

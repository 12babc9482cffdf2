// Handlers for the new / compile / test operations
//
// Operation-level failures (unsupported extension, missing fixture directory,
// unwritable target) are printed to stderr and leave the exit status at 0.
// I/O failures while running fixtures are returned to main.
use anyhow::{Context, Result};
use cphelper_common::types::SourceFile;
use cphelper_common::{Config, HelperError};
use std::io;
use tracing::{debug, info};

use crate::compiler::{self, CompileOutcome};
use crate::executor;
use crate::generator;

/// Create `filename` from the template for its extension
pub async fn handle_new(filename: &str, language: Option<&str>, config: &Config) -> Result<()> {
    let source = SourceFile::parse(filename);
    if let Some(hint) = language {
        debug!(hint, "Language hint given; extension decides the template");
    }

    let content = match generator::template_for(&source.extension, &config.template_dir) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(());
        }
    };

    match generator::write(&source.path, &content) {
        Ok(()) => {
            info!(file = %source.path.display(), "Template written");
            println!("Created {}", source.path.display());
        }
        Err(e) => {
            eprintln!("Error creating file: {}: {}", source.path.display(), e);
        }
    }

    Ok(())
}

/// Build `filename` with its extension-specific compiler
pub async fn handle_compile(filename: &str, config: &Config) -> Result<()> {
    let source = SourceFile::parse(filename);

    match compiler::compile(&source, &config.cxx) {
        Ok(CompileOutcome::Success) => println!("Compilation successful"),
        Ok(CompileOutcome::Failure { .. }) => eprintln!("Compilation failed!"),
        Ok(CompileOutcome::NoActionNeeded) => println!("No compilation needed"),
        Err(e) => eprintln!("{}", e),
    }

    Ok(())
}

/// Run `filename` against every fixture in `<test_root>/<base_name>/`
pub async fn handle_test(filename: &str, config: &Config) -> Result<()> {
    let source = SourceFile::parse(filename);
    let mut stdout = io::stdout();

    match executor::run_tests(&source, config, &mut stdout).await {
        Ok(results) => {
            debug!(fixtures = results.len(), "Test run finished");
        }
        Err(HelperError::Io(e)) => {
            return Err(e)
                .with_context(|| format!("Failed to run fixtures for {}", source.path.display()));
        }
        Err(e) => eprintln!("{}", e),
    }

    Ok(())
}

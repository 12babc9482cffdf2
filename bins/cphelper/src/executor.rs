/// Test Executor - High-Level Orchestration
///
/// Coordinates discovery, the execution engine and the evaluator for one
/// source file. Fixtures run strictly one after another in discovery order,
/// and each report block is written as soon as its fixture finishes.

use crate::discovery;
use crate::engine::{self, RunCommand};
use crate::evaluator;
use cphelper_common::types::{ExecutionResult, FixturePair, SourceFile};
use cphelper_common::{Config, HelperError};
use std::fs;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Run every eligible fixture of `source` and stream the report to `out`
pub async fn run_tests<W: Write>(
    source: &SourceFile,
    config: &Config,
    out: &mut W,
) -> Result<Vec<ExecutionResult>, HelperError> {
    let dir = discovery::fixture_dir(&config.test_root, source);
    if !dir.is_dir() {
        return Err(HelperError::FixtureDirNotFound(dir));
    }

    let cmd = engine::run_command(source)?;
    let fixtures = discovery::discover_fixtures(&dir)?;

    info!(
        file = %source.path.display(),
        fixture_dir = %dir.display(),
        fixtures = fixtures.len(),
        program = %cmd.program,
        "Running fixtures"
    );

    run_fixtures(&fixtures, &cmd, config.timeout(), out).await
}

/// Execute `fixtures` in order against `cmd`
pub async fn run_fixtures<W: Write>(
    fixtures: &[FixturePair],
    cmd: &RunCommand,
    timeout: Option<Duration>,
    out: &mut W,
) -> Result<Vec<ExecutionResult>, HelperError> {
    let mut results = Vec::with_capacity(fixtures.len());

    for fixture in fixtures {
        // Discovery checked readability; a file vanishing since then is skipped the same way
        let (input, expected) = match (fs::read(&fixture.input), fs::read(&fixture.expected)) {
            (Ok(input), Ok(expected)) => (input, String::from_utf8_lossy(&expected).into_owned()),
            _ => {
                debug!(fixture = %fixture.id, "Fixture became unreadable, skipping");
                continue;
            }
        };

        let output = engine::execute(cmd, &input, timeout).await;
        let result = evaluator::evaluate_test(&fixture.id, output, expected);

        debug!(
            fixture = %result.fixture_id,
            verdict = %result.verdict,
            exit_code = ?result.exit_code,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "Fixture finished"
        );

        evaluator::write_report(out, &result)?;
        results.push(result);
    }

    Ok(results)
}

/// Test Evaluator - Language-Agnostic Verdict Logic
///
/// **Core Responsibility:**
/// Compare raw execution output against the expected-output file and render
/// the per-fixture report block.
///
/// **Critical Properties:**
/// - Knows nothing about process spawning
/// - Knows nothing about language runtimes
/// - Pure function: (execution output, expected text) → verdict
///
/// **Normalization Rules:**
/// - Every `\n` is removed, not only trailing ones
/// - Everything else is kept: spaces, `\r`, case
///
/// **Verdict Priority:**
/// 1. Launch failure → ERROR
/// 2. Timeout → TIMEOUT
/// 3. Normalized equality → PASS / FAIL

use crate::engine::{ExecutionOutcome, TestExecutionOutput};
use cphelper_common::types::{ExecutionResult, Verdict};
use std::io::{self, Write};

pub const SEPARATOR_WIDTH: usize = 40;

/// Strip every newline character from `output`
pub fn normalize_output(output: &str) -> String {
    output.replace('\n', "")
}

/// PASS iff both sides are equal after normalization
pub fn compare(actual: &str, expected: &str) -> Verdict {
    if normalize_output(actual) == normalize_output(expected) {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

/// Turn a raw execution output into a fixture result
pub fn evaluate_test(fixture_id: &str, output: TestExecutionOutput, expected: String) -> ExecutionResult {
    let (verdict, actual, exit_code, error) = match output.outcome {
        ExecutionOutcome::LaunchFailed { reason } => {
            (Verdict::Error, String::new(), None, Some(reason))
        }
        ExecutionOutcome::TimedOut => (Verdict::Timeout, String::new(), None, None),
        ExecutionOutcome::Completed { stdout, exit_code } => {
            (compare(&stdout, &expected), stdout, exit_code, None)
        }
    };

    ExecutionResult {
        fixture_id: fixture_id.to_string(),
        verdict,
        elapsed: output.elapsed,
        actual,
        expected,
        exit_code,
        error,
    }
}

/// Write the report block for one fixture
///
/// Expected and Actual are only shown on FAIL, both normalized.
pub fn write_report<W: Write>(out: &mut W, result: &ExecutionResult) -> io::Result<()> {
    writeln!(out, "Test Case: {}", result.fixture_id)?;
    writeln!(out, "Status: {}", result.verdict)?;
    writeln!(out, "Time: {}ms", result.elapsed.as_millis())?;

    match result.verdict {
        Verdict::Fail => {
            writeln!(out, "Expected:\n{}", normalize_output(&result.expected))?;
            writeln!(out, "Actual:\n{}", normalize_output(&result.actual))?;
        }
        Verdict::Error => {
            if let Some(reason) = &result.error {
                writeln!(out, "Error: {}", reason)?;
            }
        }
        Verdict::Pass | Verdict::Timeout => {}
    }

    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
    out.flush()
}

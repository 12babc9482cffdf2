/// Execution Engine - runs the program under test for one fixture
///
/// **Responsibility:**
/// Spawn the program, feed the fixture input on stdin, capture stdout and
/// measure wall-clock time.
///
/// **Boundary:**
/// - Engine knows HOW to run a language (argument vector per extension)
/// - Engine does NOT compare output or decide verdicts (evaluator's job)
///
/// **Process rules:**
/// - The command is an argument vector, never a shell string
/// - Input goes through the child's stdin handle from a separate task so a
///   program that writes before reading cannot deadlock on a full pipe
/// - stderr is inherited and stays visible to the user
/// - With a timeout configured, an overrunning child is killed; without one
///   a hanging program blocks the run

use cphelper_common::types::{Language, SourceFile};
use cphelper_common::HelperError;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Program and argument vector used to run a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl RunCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// How to run `source` once it has been built
///
/// - cpp: the artifact next to the source (`./<base_name>`)
/// - py: `python3 <file>`
/// - java: `java -cp <dir> <class>`, dir being the source's directory
pub fn run_command(source: &SourceFile) -> Result<RunCommand, HelperError> {
    let command = match source.language()? {
        Language::Cpp => RunCommand {
            program: Path::new(".")
                .join(&source.base_name)
                .to_string_lossy()
                .into_owned(),
            args: Vec::new(),
        },
        Language::Python => RunCommand::new("python3", &[source.path.to_string_lossy().as_ref()]),
        Language::Java => {
            let class_path = source
                .path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let class_name = source
                .base_name
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            RunCommand::new("java", &["-cp", class_path.to_string_lossy().as_ref(), class_name.as_str()])
        }
    };

    Ok(command)
}

/// What happened when the program ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Completed {
        stdout: String,
        exit_code: Option<i32>,
    },
    TimedOut,
    LaunchFailed {
        reason: String,
    },
}

/// Raw result of one execution, consumed by the evaluator
#[derive(Debug, Clone)]
pub struct TestExecutionOutput {
    pub outcome: ExecutionOutcome,
    pub elapsed: Duration,
}

/// Run `cmd` with `input` on stdin and capture everything it writes to stdout
pub async fn execute(cmd: &RunCommand, input: &[u8], timeout: Option<Duration>) -> TestExecutionOutput {
    let start_time = Instant::now();

    let spawned = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            warn!(program = %cmd.program, error = %e, "Failed to launch program");
            return TestExecutionOutput {
                outcome: ExecutionOutcome::LaunchFailed {
                    reason: e.to_string(),
                },
                elapsed: start_time.elapsed(),
            };
        }
    };

    let stdin = child.stdin.take();
    let input = input.to_vec();
    let writer = tokio::spawn(async move {
        if let Some(mut stdin) = stdin {
            // Programs may exit without draining stdin; a broken pipe is not an error here
            if let Err(e) = stdin.write_all(&input).await {
                debug!(error = %e, "stdin closed before all input was written");
            }
        }
    });

    // The child moves into this future; dropping it on timeout kills the process
    let run = child.wait_with_output();
    let finished = match timeout {
        Some(limit) => tokio::time::timeout(limit, run).await.ok(),
        None => Some(run.await),
    };

    let elapsed = start_time.elapsed();
    writer.abort();

    let outcome = match finished {
        Some(Ok(output)) => {
            if !output.status.success() {
                debug!(exit_code = ?output.status.code(), "Program exited unsuccessfully");
            }
            ExecutionOutcome::Completed {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                exit_code: output.status.code(),
            }
        }
        Some(Err(e)) => {
            warn!(program = %cmd.program, error = %e, "Failed to collect program output");
            ExecutionOutcome::LaunchFailed {
                reason: e.to_string(),
            }
        }
        None => {
            warn!(
                program = %cmd.program,
                timeout = ?timeout,
                "Execution timed out, program killed"
            );
            ExecutionOutcome::TimedOut
        }
    };

    TestExecutionOutput { outcome, elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_cpp() {
        let cmd = run_command(&SourceFile::parse("add.cpp")).unwrap();
        assert_eq!(cmd, RunCommand::new("./add", &[]));

        let cmd = run_command(&SourceFile::parse("contest/a.cpp")).unwrap();
        assert_eq!(cmd.program, "./contest/a");
    }

    #[test]
    fn test_run_command_python() {
        let cmd = run_command(&SourceFile::parse("sol.py")).unwrap();
        assert_eq!(cmd, RunCommand::new("python3", &["sol.py"]));
    }

    #[test]
    fn test_run_command_java() {
        let cmd = run_command(&SourceFile::parse("Main.java")).unwrap();
        assert_eq!(cmd, RunCommand::new("java", &["-cp", ".", "Main"]));

        let cmd = run_command(&SourceFile::parse("round2/Main.java")).unwrap();
        assert_eq!(cmd, RunCommand::new("java", &["-cp", "round2", "Main"]));
    }

    #[test]
    fn test_run_command_unsupported() {
        assert!(matches!(
            run_command(&SourceFile::parse("main.go")),
            Err(HelperError::UnsupportedFileType(ext)) if ext == "go"
        ));
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let cmd = RunCommand::new("./cphelper-no-such-binary-xyz", &[]);
        let output = execute(&cmd, b"1 2", None).await;

        assert!(matches!(output.outcome, ExecutionOutcome::LaunchFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdin_is_piped() {
        let cmd = RunCommand::new("cat", &[]);
        let output = execute(&cmd, b"3 4\n", None).await;

        assert_eq!(
            output.outcome,
            ExecutionOutcome::Completed {
                stdout: "3 4\n".to_string(),
                exit_code: Some(0),
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_large_input_does_not_deadlock() {
        let input = vec![b'x'; 1024 * 1024];
        let cmd = RunCommand::new("wc", &["-c"]);
        let output = execute(&cmd, &input, Some(Duration::from_secs(10))).await;

        match output.outcome {
            ExecutionOutcome::Completed { stdout, .. } => {
                assert_eq!(stdout.trim(), "1048576");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills() {
        let cmd = RunCommand::new("sleep", &["5"]);
        let output = execute(&cmd, b"", Some(Duration::from_millis(100))).await;

        assert_eq!(output.outcome, ExecutionOutcome::TimedOut);
        assert!(output.elapsed < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_still_completes() {
        let cmd = RunCommand::new("sh", &["-c", "echo partial; exit 3"]);
        let output = execute(&cmd, b"", None).await;

        assert_eq!(
            output.outcome,
            ExecutionOutcome::Completed {
                stdout: "partial\n".to_string(),
                exit_code: Some(3),
            }
        );
    }
}

/// Compiler Invoker
///
/// Maps a source file to its extension-specific build command and runs it
/// with inherited stdio. Only the exit status is inspected; diagnostics go
/// straight to the user's terminal.

use cphelper_common::types::{Language, SourceFile};
use cphelper_common::HelperError;
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOutcome {
    Success,
    Failure { exit_code: Option<i32> },
    NoActionNeeded,
}

/// Program and argument vector for one compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Build command for `source`, or `None` when the language runs from source
pub fn build_command(source: &SourceFile, cxx: &str) -> Result<Option<BuildCommand>, HelperError> {
    let language = source.language()?;
    if !language.needs_build() {
        return Ok(None);
    }
    let path = source.path.to_string_lossy().into_owned();

    let command = match language {
        Language::Cpp => Some(BuildCommand {
            program: cxx.to_string(),
            args: vec![
                "-O2".to_string(),
                "-Wall".to_string(),
                path,
                "-o".to_string(),
                source.base_name.to_string_lossy().into_owned(),
            ],
        }),
        Language::Java => Some(BuildCommand {
            program: "javac".to_string(),
            args: vec![path],
        }),
        Language::Python => None,
    };

    Ok(command)
}

/// Compile `source`; a compiler that cannot be spawned counts as a failed build
pub fn compile(source: &SourceFile, cxx: &str) -> Result<CompileOutcome, HelperError> {
    let Some(cmd) = build_command(source, cxx)? else {
        debug!(file = %source.path.display(), "No build step for this language");
        return Ok(CompileOutcome::NoActionNeeded);
    };

    info!(program = %cmd.program, args = ?cmd.args, "Running compiler");

    let status = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    match status {
        Ok(status) if status.success() => Ok(CompileOutcome::Success),
        Ok(status) => {
            warn!(exit_code = ?status.code(), "Compiler exited unsuccessfully");
            Ok(CompileOutcome::Failure {
                exit_code: status.code(),
            })
        }
        Err(e) => {
            warn!(program = %cmd.program, error = %e, "Failed to start compiler");
            Ok(CompileOutcome::Failure { exit_code: None })
        }
    }
}

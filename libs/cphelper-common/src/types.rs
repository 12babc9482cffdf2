use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::HelperError;

/// Languages cphelper knows how to scaffold, build and run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Python,
    Java,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Cpp, Language::Python, Language::Java];

    /// Look up a language by file extension (without the leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "cpp" => Some(Language::Cpp),
            "py" => Some(Language::Python),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Python => "py",
            Language::Java => "java",
        }
    }

    /// Whether the source must be compiled before it can run
    pub fn needs_build(&self) -> bool {
        !matches!(self, Language::Python)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Cpp => write!(f, "cpp"),
            Language::Python => write!(f, "python"),
            Language::Java => write!(f, "java"),
        }
    }
}

/// A source filename split into the parts every operation keys off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Filename with its final extension removed, directories kept
    pub base_name: PathBuf,
    /// Final extension; the whole filename when there is no dot
    pub extension: String,
}

impl SourceFile {
    pub fn parse(filename: impl AsRef<Path>) -> Self {
        let path = filename.as_ref().to_path_buf();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let base_name = if path.extension().is_some() {
            path.with_extension("")
        } else {
            path.clone()
        };

        Self {
            path,
            base_name,
            extension,
        }
    }

    pub fn language(&self) -> Result<Language, HelperError> {
        Language::from_extension(&self.extension)
            .ok_or_else(|| HelperError::UnsupportedFileType(self.extension.clone()))
    }
}

/// An input file and the expected-output file it pairs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePair {
    /// Input artifact's filename, used as the case identifier in reports
    pub id: String,
    pub input: PathBuf,
    pub expected: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    Timeout,
    /// The program under test could not be started
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Timeout => "TIMEOUT",
            Verdict::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Outcome of running one fixture pair
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub fixture_id: String,
    pub verdict: Verdict,
    pub elapsed: Duration,
    /// Raw captured stdout
    pub actual: String,
    /// Raw expected-output file content
    pub expected: String,
    /// Exit code of a program that ran to completion
    pub exit_code: Option<i32>,
    /// Launch failure reason when `verdict` is `Error`
    pub error: Option<String>,
}

// Runtime configuration for cphelper
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::HelperError;

/// Directory under `$HOME` holding user configuration and templates
pub const HOME_DIR_NAME: &str = ".cp_helper";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_TEST_ROOT: &str = "tests";
pub const DEFAULT_CXX: &str = "g++-14";

pub const ENV_TESTS_DIR: &str = "CPH_TESTS_DIR";
pub const ENV_TIMEOUT_MS: &str = "CPH_TIMEOUT_MS";
pub const ENV_CXX: &str = "CPH_CXX";

/// Resolved configuration, built once at startup and passed to each operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Where user template overrides live (`template.<ext>`)
    pub template_dir: PathBuf,
    /// Root under which `<base_name>/` fixture directories are looked up
    pub test_root: PathBuf,
    /// Per-fixture limit; `None` waits for the program indefinitely
    pub timeout_ms: Option<u64>,
    /// C++ compiler executable
    pub cxx: String,
}

/// On-disk shape of `config.json`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    template_dir: Option<PathBuf>,
    test_root: Option<PathBuf>,
    timeout_ms: Option<u64>,
    cxx: Option<String>,
}

impl Config {
    /// Built-in defaults for a given home directory
    pub fn with_home(home: &Path) -> Self {
        Self {
            template_dir: home.join(HOME_DIR_NAME).join("templates"),
            test_root: PathBuf::from(DEFAULT_TEST_ROOT),
            timeout_ms: None,
            cxx: DEFAULT_CXX.to_string(),
        }
    }

    /// Defaults overlaid with `<home>/.cp_helper/config.json` when present
    pub fn load(home: &Path) -> Result<Self, HelperError> {
        let mut config = Self::with_home(home);
        let config_path = home.join(HOME_DIR_NAME).join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let file: ConfigFile =
            serde_json::from_str(&content).map_err(|source| HelperError::InvalidConfig {
                path: config_path.clone(),
                source,
            })?;

        if let Some(dir) = file.template_dir {
            config.template_dir = dir;
        }
        if let Some(root) = file.test_root {
            config.test_root = root;
        }
        if file.timeout_ms.is_some() {
            config.timeout_ms = file.timeout_ms;
        }
        if let Some(cxx) = file.cxx {
            config.cxx = cxx;
        }

        debug!(path = %config_path.display(), "Loaded config file");
        Ok(config)
    }

    /// Overlay `CPH_*` variables read through `lookup`
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, HelperError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_TESTS_DIR) {
            self.test_root = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|_| HelperError::InvalidEnv {
                key: ENV_TIMEOUT_MS.to_string(),
                value: raw.clone(),
            })?;
            self.timeout_ms = Some(ms);
        }
        if let Some(cxx) = lookup(ENV_CXX) {
            self.cxx = cxx;
        }
        Ok(self)
    }

    /// Resolve from the process environment: `$HOME`, config file, then `CPH_*`
    pub fn from_env() -> Result<Self, HelperError> {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::load(Path::new(&home))?.apply_env(|key| std::env::var(key).ok())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

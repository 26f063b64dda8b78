//! Project-local configuration and model-credential resolution.
//!
//! Config lives in `.pasithea/config.toml` next to the board's replica blob.
//! A missing file yields defaults; a file that exists but does not parse is a
//! real error surfaced with context.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ErrorCode;

/// Directory holding all per-project state.
pub const PROJECT_DIR: &str = ".pasithea";

/// File name of the persisted replica blob inside [`PROJECT_DIR`].
pub const REPLICA_FILE: &str = "replica.json";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_project_name")]
    pub project_name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
        }
    }
}

fn default_project_name() -> String {
    "Pasithea".to_string()
}

/// Path to the project config file under `root`.
#[must_use]
pub fn config_path(root: &Path) -> PathBuf {
    root.join(PROJECT_DIR).join(CONFIG_FILE)
}

/// Path to the persisted replica blob under `root`.
#[must_use]
pub fn replica_path(root: &Path) -> PathBuf {
    root.join(PROJECT_DIR).join(REPLICA_FILE)
}

pub fn load_project_config(root: &Path) -> Result<ProjectConfig> {
    let path = config_path(root);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content).with_context(|| {
        format!(
            "[{}] Failed to parse {}",
            ErrorCode::ConfigParseError.code(),
            path.display()
        )
    })
}

/// Write `config` to `.pasithea/config.toml` under `root`.
pub fn save_project_config(root: &Path, config: &ProjectConfig) -> Result<()> {
    let path = config_path(root);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to encode config")?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))
}

// -- model credential -------------------------------------------------------

/// Error returned when no model credential can be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CredentialError {
    /// Human-readable description.
    pub message: String,
    /// Machine error code.
    pub code: &'static str,
}

/// Environment reader trait for dependency injection in tests.
trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

struct RealEnv;

impl EnvReader for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }
}

fn resolve_model_token_with(env: &dyn EnvReader) -> Option<String> {
    env.get("PASITHEA_MODEL_TOKEN")
        .or_else(|| env.get("MODEL_TOKEN"))
}

/// Resolve the text-generation backend credential:
/// `PASITHEA_MODEL_TOKEN` > `MODEL_TOKEN`. Empty values are ignored.
#[must_use]
pub fn resolve_model_token() -> Option<String> {
    resolve_model_token_with(&RealEnv)
}

/// Resolve the credential, or fail the way an agent host should at startup.
pub fn require_model_token() -> Result<String, CredentialError> {
    resolve_model_token().ok_or_else(|| CredentialError {
        message: format!(
            "[{}] Model credential not found. \
             Set PASITHEA_MODEL_TOKEN or MODEL_TOKEN in the environment.",
            ErrorCode::MissingCredential.code()
        ),
        code: "missing_credential",
    })
}

#[cfg(test)]
mod tests {
    use super::{
        load_project_config, replica_path, resolve_model_token_with, save_project_config,
        CredentialError, EnvReader, ProjectConfig,
    };
    use std::collections::HashMap;

    struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        fn var(mut self, key: &str, val: &str) -> Self {
            self.vars.insert(key.to_string(), val.to_string());
            self
        }
    }

    impl EnvReader for MockEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.vars.get(key).filter(|v| !v.is_empty()).cloned()
        }
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_project_config(dir.path()).unwrap();
        assert_eq!(config.board.project_name, "Pasithea");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.board.project_name = "Orchard".to_string();
        save_project_config(dir.path(), &config).unwrap();

        let loaded = load_project_config(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn bad_toml_is_a_real_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = super::config_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "board = nonsense").unwrap();
        assert!(load_project_config(dir.path()).is_err());
    }

    #[test]
    fn replica_path_lives_under_project_dir() {
        let path = replica_path(std::path::Path::new("/work"));
        assert_eq!(path, std::path::Path::new("/work/.pasithea/replica.json"));
    }

    #[test]
    fn token_chain_prefers_pasithea_var() {
        let env = MockEnv::new()
            .var("PASITHEA_MODEL_TOKEN", "primary")
            .var("MODEL_TOKEN", "fallback");
        assert_eq!(resolve_model_token_with(&env).as_deref(), Some("primary"));
    }

    #[test]
    fn token_chain_falls_back_and_ignores_empty() {
        let env = MockEnv::new()
            .var("PASITHEA_MODEL_TOKEN", "")
            .var("MODEL_TOKEN", "fallback");
        assert_eq!(resolve_model_token_with(&env).as_deref(), Some("fallback"));

        let env = MockEnv::new();
        assert_eq!(resolve_model_token_with(&env), None);
    }

    #[test]
    fn credential_error_is_descriptive() {
        let err = CredentialError {
            message: "[E1003] Model credential not found.".to_string(),
            code: "missing_credential",
        };
        assert_eq!(err.code, "missing_credential");
        assert!(format!("{err}").contains("E1003"));
    }
}

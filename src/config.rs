use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Mirror queried when none is configured
pub const DEFAULT_MIRROR_URL: &str = "https://releases.hashicorp.com/terraform";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every mirror request
pub const DEFAULT_USER_AGENT: &str = "mirror-version";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application configuration, read from `config.json`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the mirror's directory listing
    pub mirror_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Optional file that receives a copy of the log output
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mirror_url: DEFAULT_MIRROR_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the path to the config directory for mirror-version.
/// Uses $XDG_CONFIG_HOME/mirror-version if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/mirror-version,
/// or ./mirror-version if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("mirror-version")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn app_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "mirrorUrl": "https://mirror.example/terraform"
        }))
        .unwrap();

        assert_eq!(result.mirror_url, "https://mirror.example/terraform");
        assert_eq!(result.timeout_ms, FETCH_TIMEOUT_MS);
        assert_eq!(result.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(result.log_file, None);
    }

    #[test]
    fn app_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<AppConfig>(json!({
            "mirrorUrl": "https://mirror.example/terraform/",
            "timeoutMs": 5000,
            "userAgent": "ci-bot",
            "logFile": "/tmp/mirror-version.log"
        }))
        .unwrap();

        assert_eq!(
            result,
            AppConfig {
                mirror_url: "https://mirror.example/terraform/".to_string(),
                timeout_ms: 5000,
                user_agent: "ci-bot".to_string(),
                log_file: Some(PathBuf::from("/tmp/mirror-version.log")),
            }
        );
    }

    #[test]
    fn load_returns_defaults_when_file_is_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = AppConfig::load(&temp_dir.path().join("config.json")).unwrap();

        assert_eq!(result, AppConfig::default());
    }

    #[test]
    fn load_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "timeoutMs": 1000 }"#).unwrap();

        let result = AppConfig::load(&path).unwrap();

        assert_eq!(result.timeout_ms, 1000);
        assert_eq!(result.mirror_url, DEFAULT_MIRROR_URL);
    }

    #[test]
    fn load_reports_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = AppConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/mirror-version"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/mirror-version"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./mirror-version"));
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use appkit_api::ApiConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix of environment overrides, e.g. `APPKIT__API__BASE_URL`.
pub const ENV_PREFIX: &str = "APPKIT__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Where the profile snapshot lives. Defaults to `<data dir>/appkit`.
    pub dir: Option<PathBuf>,
}

impl StorageConfig {
    /// # Errors
    /// Fails when no directory is configured and the platform has no data dir.
    pub fn resolved_dir(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join("appkit"))
                .context("no platform data directory; set storage.dir"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// One JSON object per line instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            json: false,
        }
    }
}

/// Overrides taken from command-line flags.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl AppConfig {
    /// Layered load: defaults, then the YAML file if given, then `APPKIT__*`
    /// environment variables (`__` separates nested keys).
    ///
    /// # Errors
    /// Fails if the file does not exist or a layer does not match the schema.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
        if let Some(token) = overrides.token {
            self.api.token = Some(appkit_utils::SecretString::new(token));
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::time::Duration;

    const ENV_KEYS: [&str; 4] = [
        "APPKIT__API__BASE_URL",
        "APPKIT__API__TIMEOUT",
        "APPKIT__LOGGING__JSON",
        "APPKIT__STORAGE__DIR",
    ];

    fn without_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars(ENV_KEYS.map(|k| (k, None::<&str>)), f)
    }

    #[test]
    fn defaults_without_file_or_env() {
        let config = without_env(|| AppConfig::load(None)).unwrap();

        assert_eq!(config.api.base_url, "https://localhost:8000");
        assert_eq!(config.api.timeout, Duration::from_secs(30));
        assert!(config.api.token.is_none());
        assert_eq!(config.logging.level, "warn");
        assert!(config.storage.dir.is_none());
    }

    #[test]
    fn yaml_then_env_then_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appkit.yaml");
        std::fs::write(
            &path,
            "api:\n  base_url: https://file.example.com\n  token: from-file\n  timeout: 5s\nlogging:\n  level: info\n",
        )
        .unwrap();

        let mut config = without_env(|| {
            temp_env::with_vars(
                [
                    ("APPKIT__API__TIMEOUT", Some("2s")),
                    ("APPKIT__LOGGING__JSON", Some("true")),
                ],
                || AppConfig::load(Some(&path)),
            )
        })
        .unwrap();

        assert_eq!(config.api.base_url, "https://file.example.com");
        assert_eq!(config.api.timeout, Duration::from_secs(2));
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.json);

        config.apply_cli_overrides(CliOverrides {
            base_url: Some("https://flag.example.com".to_owned()),
            token: None,
        });
        assert_eq!(config.api.base_url, "https://flag.example.com");
        assert_eq!(
            config.api.token.as_ref().map(appkit_utils::SecretString::expose),
            Some("from-file")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn unknown_yaml_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appkit.yaml");
        std::fs::write(&path, "api:\n  base_uri: https://typo.example.com\n").unwrap();

        assert!(without_env(|| AppConfig::load(Some(&path))).is_err());
    }

    #[test]
    fn storage_dir_prefers_configured_path() {
        let config = StorageConfig {
            dir: Some(PathBuf::from("/tmp/appkit-test")),
        };
        assert_eq!(
            config.resolved_dir().unwrap(),
            PathBuf::from("/tmp/appkit-test")
        );
    }
}

// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{Result, ScannerError};
use config::{Config, Environment, File, Map};
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini credential.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. `GOOGLE_API_KEY` (highest, for the credential only)
    /// 2. Environment variables (prefix: INTELLISCAN_, nesting: `__`)
    /// 3. Config file (`config_path`, or `~/.intelliscan/config.toml` if present)
    /// 4. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::build(config_path, None, std::env::var(API_KEY_ENV).ok())
    }

    /// `env` replaces the process environment for the `INTELLISCAN_` layer
    /// when given.
    fn build(
        config_path: Option<&Path>,
        env: Option<Map<String, String>>,
        api_key: Option<String>,
    ) -> Result<Self> {
        // An explicitly requested file must exist; the default one is optional.
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("INTELLISCAN")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .set_override_option("gemini.api_key", api_key)?
            .build()
            .map_err(|e| ScannerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ScannerError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".intelliscan")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
            [server]
            port = 9100

            [gemini]
            model = "gemini-1.5-pro"
            "#,
        );

        let config = AppConfig::build(Some(file.path()), Some(Map::new()), None).unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_api_key_override_wins_over_file() {
        let file = write_config(
            r#"
            [gemini]
            api_key = "from-file"
            "#,
        );

        let config = AppConfig::build(Some(file.path()), Some(Map::new()), Some("from-env".to_string())).unwrap();
        assert_eq!(config.gemini.usable_api_key().unwrap().expose(), "from-env");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = write_config(
            r#"
            [server]
            port = 9100
            host = "127.0.0.1"

            [gemini]
            model = "gemini-1.5-pro"
            "#,
        );
        let env = Map::from([
            ("INTELLISCAN_SERVER__PORT".to_string(), "9200".to_string()),
            ("INTELLISCAN_LOGGING__LEVEL".to_string(), "debug".to_string()),
            ("UNRELATED_SERVER__PORT".to_string(), "9300".to_string()),
        ]);

        let config = AppConfig::build(Some(file.path()), Some(env), None).unwrap();
        // env > file
        assert_eq!(config.server.port, 9200);
        assert_eq!(config.logging.level, "debug");
        // file > defaults
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        // defaults
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_environment_cannot_override_credential_override() {
        let env = Map::from([(
            "INTELLISCAN_GEMINI__API_KEY".to_string(),
            "from-prefixed-env".to_string(),
        )]);
        let file = write_config("");

        let config =
            AppConfig::build(Some(file.path()), Some(env), Some("from-google-env".to_string()))
                .unwrap();
        assert_eq!(config.gemini.usable_api_key().unwrap().expose(), "from-google-env");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::build(Some(Path::new("/nonexistent/intelliscan.toml")), Some(Map::new()), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert_eq!(config.logging.level, "info");
        assert!(config.gemini.timeout_seconds.is_none());
    }
}

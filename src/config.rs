//! Configuration handling for the TUI

use crate::order::{DocumentNumberFormat, FormVariant, StepGates, DEFAULT_DOCUMENT_YEAR_SUFFIX};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the submission endpoint
pub const ENDPOINT_ENV: &str = "TRANSPORT_ORDER_ENDPOINT";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/send-email";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const LOG_FILE_NAME: &str = "transport-order-tui.log";

/// Deployment configuration for the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL the finished order is POSTed to
    pub endpoint: String,
    /// Which step gates and fields are in use
    pub form_variant: FormVariant,
    /// Year token at the end of a WZ number
    pub document_year_suffix: String,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            form_variant: FormVariant::default(),
            document_year_suffix: DEFAULT_DOCUMENT_YEAR_SUFFIX.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("pl", "grupaeltron", "transport-order-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file path
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
    }

    /// Open the log file for appending, creating its directory
    pub fn open_log_file(path: &Path) -> Result<fs::File> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(file)
    }

    /// Load configuration from the user config dir, then apply the environment
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
        Ok(config)
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Write the defaults on first run so there is a file to edit
    pub fn init_file() -> Result<Option<PathBuf>> {
        let Some(path) = Self::config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(Some(path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Blank overrides are ignored
    pub fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::debug!(%endpoint, "endpoint overridden from environment");
            self.endpoint = endpoint;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn step_gates(&self) -> StepGates {
        StepGates::new(
            self.form_variant,
            DocumentNumberFormat::with_year_suffix(&self.document_year_suffix),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("transport-order-tui-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:3000/api/send-email");
        assert_eq!(config.form_variant, FormVariant::Full);
        assert_eq!(config.document_year_suffix, "24");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"form_variant": "basic", "document_year_suffix": "25"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.form_variant, FormVariant::Basic);
        assert_eq!(parsed.document_year_suffix, "25");
        assert_eq!(parsed.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        let json = r#"{"request_timeout_secs": 5, "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.request_timeout_secs, 5);
    }

    #[test]
    fn test_unknown_variant_is_an_error() {
        let json = r#"{"form_variant": "extended"}"#;
        assert!(serde_json::from_str::<AppConfig>(json).is_err());
    }

    #[test]
    fn test_config_path_returns_option() {
        let _path = AppConfig::config_path();
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let path = temp_config_path("missing");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_config_path("roundtrip");
        let config = AppConfig {
            endpoint: "https://logistics.example.com/api/send-email".to_string(),
            form_variant: FormVariant::Basic,
            document_year_suffix: "26".to_string(),
            request_timeout_secs: 10,
        };
        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_log_path_is_beside_project_data() {
        if let Some(path) = AppConfig::log_path() {
            assert_eq!(path.file_name().unwrap(), LOG_FILE_NAME);
        }
    }

    #[test]
    fn test_open_log_file_appends() {
        let path = temp_config_path("log").with_file_name(LOG_FILE_NAME);
        for line in ["first\n", "second\n"] {
            let mut file = AppConfig::open_log_file(&path).unwrap();
            std::io::Write::write_all(&mut file, line.as_bytes()).unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_from_invalid_json_fails() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    mod endpoint_override {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_override_replaces_endpoint() {
            let mut config = AppConfig::default();
            config.apply_endpoint_override(Some("http://10.0.0.5/api/send-email".to_string()));
            assert_eq!(config.endpoint, "http://10.0.0.5/api/send-email");
        }

        #[test]
        fn test_blank_override_is_ignored() {
            let mut config = AppConfig::default();
            config.apply_endpoint_override(Some("   ".to_string()));
            config.apply_endpoint_override(None);
            assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        }
    }

    #[test]
    fn test_step_gates_follow_config() {
        let config = AppConfig {
            form_variant: FormVariant::Basic,
            document_year_suffix: "25".to_string(),
            ..AppConfig::default()
        };
        let gates = config.step_gates();
        assert_eq!(gates.variant, FormVariant::Basic);
        assert!(gates.document_format.is_valid("WZ/00001/01/ABC/25"));
        assert!(!gates.document_format.is_valid("WZ/00001/01/ABC/24"));
    }
}

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use facility_core::{EntityId, StalePolicy, ALL_BUCKET};
use facility_engine::{CatalogSettings, DEFAULT_API_BASE};
use facility_logging::{facility_info, parse_level};
use log::LevelFilter;
use serde::Deserialize;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "facility.ron";
pub const CONFIG_PATH_ENV: &str = "FACILITY_CONFIG";
pub const API_BASE_ENV: &str = "FACILITY_API_BASE";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum StaleSetting {
    #[default]
    LastWriteWins,
    DiscardStale,
}

impl From<StaleSetting> for StalePolicy {
    fn from(setting: StaleSetting) -> Self {
        match setting {
            StaleSetting::LastWriteWins => StalePolicy::LastWriteWins,
            StaleSetting::DiscardStale => StalePolicy::DiscardStale,
        }
    }
}

/// Startup settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api_base: String,
    pub request_timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub stale_policy: StaleSetting,
    pub log_level: String,
    pub log_destination: LogDestination,
    /// Category to show instead of the first one.
    pub category_id: Option<String>,
    /// Subcategory to show instead of the first one; `"all"` clears the filter.
    pub subcategory_id: Option<String>,
    pub settle_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: None,
            connect_timeout_ms: None,
            stale_policy: StaleSetting::default(),
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
            category_id: None,
            subcategory_id: None,
            settle_timeout_ms: 30_000,
        }
    }
}

impl AppConfig {
    /// Reads `$FACILITY_CONFIG` (which must exist) or `./facility.ron` (which
    /// may not), then applies `$FACILITY_API_BASE`.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_PATH_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                read_config(&path)?.ok_or(ConfigError::Read {
                    path,
                    source: std::io::ErrorKind::NotFound.into(),
                })?
            }
            None => read_config(Path::new(CONFIG_FILENAME))?.unwrap_or_default(),
        };
        config.override_api_base(env::var(API_BASE_ENV).ok());
        Ok(config)
    }

    /// Blank overrides are ignored.
    pub fn override_api_base(&mut self, value: Option<String>) {
        if let Some(value) = value {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                self.api_base = trimmed.to_string();
            }
        }
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            api_base: self.api_base.clone(),
            connect_timeout: self.connect_timeout_ms.map(Duration::from_millis),
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
            ..CatalogSettings::default()
        }
    }

    pub fn stale_policy(&self) -> StalePolicy {
        self.stale_policy.into()
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.log_level).ok_or_else(|| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }

    pub fn preferred_category(&self) -> Option<EntityId> {
        non_blank(self.category_id.as_deref()).map(EntityId::new)
    }

    /// `None`: keep the automatic choice. `Some(None)`: the "All" chip.
    pub fn preferred_subcategory(&self) -> Option<Option<EntityId>> {
        let raw = non_blank(self.subcategory_id.as_deref())?;
        if raw.eq_ignore_ascii_case(ALL_BUCKET) {
            Some(None)
        } else {
            Some(Some(EntityId::new(raw)))
        }
    }
}

/// `Ok(None)` when the file does not exist.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    facility_info!("Loaded config from {:?}", path);
    Ok(Some(config))
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_struct_yields_defaults() {
        let file = write_config("()");
        let config = read_config(file.path()).unwrap().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.stale_policy(), StalePolicy::LastWriteWins);
        assert_eq!(config.log_level().unwrap(), LevelFilter::Info);
        assert_eq!(config.catalog_settings().request_timeout, None);
    }

    #[test]
    fn file_fields_are_applied() {
        let file = write_config(
            r#"(
                api_base: "http://localhost:8000",
                request_timeout_ms: Some(2500),
                stale_policy: DiscardStale,
                log_level: "debug",
                log_destination: Both,
                category_id: Some("3"),
                subcategory_id: Some("all"),
                settle_timeout_ms: 1000,
            )"#,
        );
        let config = read_config(file.path()).unwrap().unwrap();

        let settings = config.catalog_settings();
        assert_eq!(settings.api_base, "http://localhost:8000");
        assert_eq!(settings.request_timeout, Some(Duration::from_millis(2500)));
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(config.stale_policy(), StalePolicy::DiscardStale);
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.preferred_category(), Some(EntityId::new("3")));
        assert_eq!(config.preferred_subcategory(), Some(None));
        assert_eq!(config.settle_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("(api_base: 12, unknown_field: true)");
        let err = read_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.log_level(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn api_base_override_ignores_blank_values() {
        let mut config = AppConfig::default();
        config.override_api_base(Some("   ".to_string()));
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        config.override_api_base(None);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        config.override_api_base(Some(" https://staging.example.com ".to_string()));
        assert_eq!(config.api_base, "https://staging.example.com");
    }

    #[test]
    fn preferred_ids_ignore_blanks() {
        let config = AppConfig {
            category_id: Some("  ".to_string()),
            subcategory_id: Some(" 7 ".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(config.preferred_category(), None);
        assert_eq!(config.preferred_subcategory(), Some(Some(EntityId::new("7"))));
    }
}

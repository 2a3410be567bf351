//! Configuration loading and resolution
//!
//! Every setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: a warning is logged and the
//! remaining tiers still apply.

use crate::jobs::UserRole;
use crate::sections::DEFAULT_SECTION_LIMIT;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Path of the TOML config file
pub const ENV_CONFIG: &str = "ANCHOR_CONFIG";
/// Replacement musician seed file
pub const ENV_CATALOG: &str = "ANCHOR_CATALOG";
/// Replacement job seed file
pub const ENV_JOBS: &str = "ANCHOR_JOBS";
pub const ENV_SECTION_LIMIT: &str = "ANCHOR_SECTION_LIMIT";
pub const ENV_LOG_LEVEL: &str = "ANCHOR_LOG_LEVEL";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub catalog_path: Option<PathBuf>,
    pub jobs_path: Option<PathBuf>,
    pub section_limit: Option<usize>,
    pub log_level: Option<String>,
    pub role: Option<UserRole>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Fallback values when no other tier sets a key
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDefaults {
    pub section_limit: usize,
    pub log_level: String,
    pub role: UserRole,
    pub user_id: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            section_limit: DEFAULT_SECTION_LIMIT,
            log_level: "info".to_string(),
            role: UserRole::Client,
            user_id: "client-1".to_string(),
        }
    }
}

/// Values given on the command line (tier 1)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub jobs_path: Option<PathBuf>,
    pub section_limit: Option<usize>,
    pub log_level: Option<String>,
    pub role: Option<UserRole>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// Fully resolved settings for a browse session
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseConfig {
    /// `None` means the built-in seed catalog
    pub catalog_path: Option<PathBuf>,
    /// `None` means the built-in seed jobs
    pub jobs_path: Option<PathBuf>,
    pub section_limit: usize,
    pub log_level: String,
    pub role: UserRole,
    pub user_id: String,
    /// Client name shown on postings; `None` falls back to the user id
    pub user_name: Option<String>,
}

/// Default config file location: `<config_dir>/anchor/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("anchor").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Resolves [`BrowseConfig`] across the four tiers
pub struct ConfigResolver {
    overrides: ConfigOverrides,
    defaults: CompiledDefaults,
}

impl ConfigResolver {
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self {
            overrides,
            defaults: CompiledDefaults::default(),
        }
    }

    /// Config file to read: CLI path, then `ANCHOR_CONFIG`, then the default location
    pub fn config_path(&self) -> Option<PathBuf> {
        self.overrides
            .config_path
            .clone()
            .or_else(|| env_path(ENV_CONFIG))
            .or_else(default_config_path)
    }

    /// Read the config file, degrading to an empty config when it is missing
    fn load_file_tier(&self) -> Result<TomlConfig> {
        let Some(path) = self.config_path() else {
            debug!("No config directory on this platform, using defaults");
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            warn!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Ok(TomlConfig::default());
        }

        let config = load_toml_config(&path).map_err(|e| match e {
            Error::Toml(err) => Error::Config(format!("{}: {}", path.display(), err)),
            other => other,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn resolve(&self) -> Result<BrowseConfig> {
        let file = self.load_file_tier()?;
        let cli = &self.overrides;

        let section_limit = match cli.section_limit {
            Some(limit) => limit,
            None => match env_value(ENV_SECTION_LIMIT) {
                Some(raw) => raw.parse::<usize>().map_err(|_| {
                    Error::Config(format!("{} must be a positive integer, got '{}'", ENV_SECTION_LIMIT, raw))
                })?,
                None => file.section_limit.unwrap_or(self.defaults.section_limit),
            },
        };
        if section_limit == 0 {
            return Err(Error::Config("section_limit must be at least 1".to_string()));
        }

        let config = BrowseConfig {
            catalog_path: cli
                .catalog_path
                .clone()
                .or_else(|| env_path(ENV_CATALOG))
                .or(file.catalog_path),
            jobs_path: cli
                .jobs_path
                .clone()
                .or_else(|| env_path(ENV_JOBS))
                .or(file.jobs_path),
            section_limit,
            log_level: cli
                .log_level
                .clone()
                .or_else(|| env_value(ENV_LOG_LEVEL))
                .or(file.log_level)
                .unwrap_or_else(|| self.defaults.log_level.clone()),
            role: cli.role.or(file.role).unwrap_or(self.defaults.role),
            user_id: cli
                .user_id
                .clone()
                .or(file.user_id)
                .unwrap_or_else(|| self.defaults.user_id.clone()),
            user_name: cli.user_name.clone().or(file.user_name),
        };

        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

/// Non-empty environment variable
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env_value(name).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::default();
        assert_eq!(defaults.section_limit, 6);
        assert_eq!(defaults.log_level, "info");
        assert_eq!(defaults.role, UserRole::Client);
    }

    #[test]
    fn test_toml_parses_all_keys() {
        let config: TomlConfig = toml::from_str(
            r#"
            catalog_path = "/srv/anchor/musicians.json"
            section_limit = 4
            log_level = "debug"
            role = "musician"
            user_id = "m-001"
            user_name = "Tolu Adebayo"
            "#,
        )
        .unwrap();
        assert_eq!(config.section_limit, Some(4));
        assert_eq!(config.role, Some(UserRole::Musician));
        assert_eq!(config.user_name.as_deref(), Some("Tolu Adebayo"));
        assert!(config.jobs_path.is_none());
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let result: std::result::Result<TomlConfig, _> = toml::from_str("sectoin_limit = 3");
        assert!(result.is_err());
    }
}

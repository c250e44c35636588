use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use leadline_core::followup::DEFAULT_FOLLOWUP_TIME;
use leadline_core::rules::{validate_upcoming_days, DEFAULT_UPCOMING_DAYS};
use leadline_core::time::parse_civil_time;
use leadline_core::timezone::{find_zone, DEFAULT_ZONE};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadline";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Zone given to new leads that name neither a zone nor a state.
    pub default_timezone: String,
    pub followups: FollowupsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowupsConfig {
    pub default_time: NaiveTime,
    pub upcoming_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_timezone: DEFAULT_ZONE.to_string(),
            followups: FollowupsConfig {
                default_time: DEFAULT_FOLLOWUP_TIME,
                upcoming_days: DEFAULT_UPCOMING_DAYS,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid default_timezone value: {0}")]
    InvalidTimezone(String),
    #[error("invalid followups.default_time value: {0}")]
    InvalidDefaultTime(String),
    #[error("invalid followups.upcoming_days value: {0}")]
    InvalidUpcomingDays(i64),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_timezone: Option<String>,
    followups: Option<FollowupsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FollowupsFile {
    default_time: Option<String>,
    upcoming_days: Option<i64>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(zone) = parsed.default_timezone {
        // Only the zones leads can be assigned from the picker.
        if find_zone(&zone).is_none() {
            return Err(ConfigError::InvalidTimezone(zone));
        }
        config.default_timezone = zone.trim().to_string();
    }

    if let Some(followups) = parsed.followups {
        if let Some(raw) = followups.default_time {
            config.followups.default_time =
                parse_civil_time(&raw).map_err(|_| ConfigError::InvalidDefaultTime(raw))?;
        }
        if let Some(days) = followups.upcoming_days {
            config.followups.upcoming_days =
                validate_upcoming_days(days).map_err(|_| ConfigError::InvalidUpcomingDays(days))?;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

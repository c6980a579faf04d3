//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.synergetics/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::state::DEFAULT_PAGE_SIZE;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATABASE_PATH: &str = "data/synergetics_dictionary.db";
pub const DEFAULT_LOG_FILE: &str = "synergetics.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const ENV_DATABASE: &str = "SYNERGETICS_DB";
pub const ENV_LOG_LEVEL: &str = "SYNERGETICS_LOG_LEVEL";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub database_path: PathBuf,
    pub page_size: usize,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Settings that were rejected and replaced by defaults. Resolution runs
    /// before the logger exists, so the caller logs these afterwards.
    pub warnings: Vec<String>,
}

/// Values that come from outside the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub env_database: Option<String>,
    pub env_log_level: Option<String>,
    pub cli_database: Option<PathBuf>,
}

impl Overrides {
    /// Reads the environment and combines it with CLI flags.
    pub fn from_env(cli_database: Option<PathBuf>) -> Self {
        Self {
            env_database: std::env::var(ENV_DATABASE).ok(),
            env_log_level: std::env::var(ENV_LOG_LEVEL).ok(),
            cli_database,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.synergetics/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".synergetics").join("config.toml"))
}

/// Load config from `~/.synergetics/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BrowserConfig::default()`.
pub fn load_config() -> Result<BrowserConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(BrowserConfig::default());
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<BrowserConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(BrowserConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: BrowserConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Synergetics Dictionary browser configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [database]
# path = "data/synergetics_dictionary.db"   # Or set SYNERGETICS_DB, or pass --db

# [display]
# page_size = 20

# [logging]
# level = "info"                 # "off", "error", "warn", "info", "debug", "trace"
# file = "synergetics.log"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse defaults → config file → env vars → CLI into concrete values.
pub fn resolve(config: &BrowserConfig, overrides: &Overrides) -> ResolvedConfig {
    let mut warnings = Vec::new();

    // Database: CLI → env → config → default
    let database_path = overrides
        .cli_database
        .clone()
        .or_else(|| overrides.env_database.as_ref().map(PathBuf::from))
        .or_else(|| config.database.path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

    let page_size = match config.display.page_size {
        Some(0) => {
            warnings.push(format!("page_size must be positive, using {DEFAULT_PAGE_SIZE}"));
            DEFAULT_PAGE_SIZE
        }
        Some(n) => n,
        None => DEFAULT_PAGE_SIZE,
    };

    // Log level: env → config → default
    let log_level = overrides
        .env_log_level
        .as_deref()
        .or(config.logging.level.as_deref())
        .map(|raw| {
            raw.trim().parse::<LevelFilter>().unwrap_or_else(|_| {
                warnings.push(format!("Unknown log level {raw:?}, using {DEFAULT_LOG_LEVEL}"));
                DEFAULT_LOG_LEVEL
            })
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        database_path,
        page_size,
        log_level,
        log_file,
        warnings,
    }
}

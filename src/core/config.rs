//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.fiddle/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::runner::ShellRunner;

// ============================================================================
// Config Struct (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FiddleConfig {
    pub theme: Option<String>,
    pub shell: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_THEME: &str = "ocean";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub theme: String,
    pub shell: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.fiddle/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".fiddle").join("config.toml"))
}

/// Load config from `~/.fiddle/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FiddleConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FiddleConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FiddleConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FiddleConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FiddleConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Fiddle Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# theme = "ocean"    # Run with an unknown theme name to list the options
# shell = "sh"       # Shell used to evaluate the composed command
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

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_theme` and `cli_shell` are from CLI flags (None = not specified).
pub fn resolve(
    config: &FiddleConfig,
    cli_theme: Option<&str>,
    cli_shell: Option<&str>,
) -> ResolvedConfig {
    // Theme: CLI → env → config → default
    let theme = cli_theme
        .map(|s| s.to_string())
        .or_else(|| std::env::var("FIDDLE_THEME").ok())
        .or_else(|| config.theme.clone())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    // Shell: CLI → env → config → platform default
    let shell = cli_shell
        .map(|s| s.to_string())
        .or_else(|| std::env::var("FIDDLE_SHELL").ok())
        .or_else(|| config.shell.clone())
        .unwrap_or_else(|| ShellRunner::default_shell().to_string());

    ResolvedConfig { theme, shell }
}

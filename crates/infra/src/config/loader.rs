//! Settings loader
//!
//! Loads `CacheSettings` from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for settings files
//! 4. Supports JSON and TOML formats
//! 5. With neither source present, the defaults apply
//!
//! ## Environment Variables
//! - `FRAGCACHE_MAX_WEIGHT`: Weight budget of the in-process store
//! - `FRAGCACHE_MAX_AGE_MS`: Fixed time-to-live in milliseconds
//! - `FRAGCACHE_MAX_AGE_JITTER_BASE_MS`: Base of the TTL jitter window
//! - `FRAGCACHE_DEBUG`: Track hit counters (true/false)
//!
//! Unset variables keep their default as long as at least one is set.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./fragcache.json` or `./fragcache.toml` (current working directory)
//! 2. `../fragcache.json` or `../fragcache.toml` (parent directory)
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use fragcache_domain::constants::{
    ENV_DEBUG, ENV_MAX_AGE_JITTER_BASE_MS, ENV_MAX_AGE_MS, ENV_MAX_WEIGHT,
};
use fragcache_domain::{CacheError, CacheSettings, Result};

const FILE_STEMS: [&str; 2] = ["fragcache.json", "fragcache.toml"];

/// Load settings with automatic fallback strategy
///
/// # Errors
/// Returns `CacheError::Config` if a variable or file is present but
/// invalid. Missing sources are not an error.
pub fn load() -> Result<CacheSettings> {
    if let Some(settings) = read_env()? {
        tracing::info!("Cache settings loaded from environment variables");
        return Ok(settings);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::debug!("No cache settings found, using defaults");
            Ok(CacheSettings::default())
        }
    }
}

/// Load settings from environment variables
///
/// # Errors
/// Returns `CacheError::Config` if no `FRAGCACHE_*` variable is set or a
/// set variable has an invalid value.
pub fn load_from_env() -> Result<CacheSettings> {
    read_env()?.ok_or_else(|| {
        CacheError::config("environment", "no FRAGCACHE_* variables are set")
    })
}

/// Load settings from a file
///
/// If `path` is `None`, probes multiple locations for settings files.
/// Format is detected by file extension.
///
/// # Errors
/// Returns `CacheError::Config` if:
/// - File not found (when path is specified)
/// - No settings file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<CacheSettings> {
    let settings_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CacheError::config(
                    "path",
                    format!("Settings file not found: {}", p.display()),
                ));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CacheError::config("path", "No settings file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %settings_path.display(), "Loading cache settings from file");

    let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
        CacheError::config("path", format!("Failed to read settings file: {}", e))
    })?;

    parse_settings(&contents, &settings_path)
}

/// Parse settings from string content, format chosen by extension
fn parse_settings(contents: &str, path: &Path) -> Result<CacheSettings> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CacheError::config("format", format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CacheError::config("format", format!("Invalid JSON format: {}", e))),
        _ => Err(CacheError::config(
            "format",
            format!("Unsupported settings format: {}", extension),
        )),
    }
}

/// Probe multiple paths for settings files
///
/// # Returns
/// The first settings file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .into_iter()
        .flat_map(|root| FILE_STEMS.map(|name| root.join(name)))
        .find(|path| path.exists())
}

/// Settings from the environment, or `None` if no variable is set
fn read_env() -> Result<Option<CacheSettings>> {
    let max_weight = env_u64(ENV_MAX_WEIGHT)?;
    let max_age_ms = env_u64(ENV_MAX_AGE_MS)?;
    let jitter_base_ms = env_u64(ENV_MAX_AGE_JITTER_BASE_MS)?;
    let debug = env_bool(ENV_DEBUG)?;

    if max_weight.is_none() && max_age_ms.is_none() && jitter_base_ms.is_none() && debug.is_none()
    {
        return Ok(None);
    }

    let defaults = CacheSettings::default();
    Ok(Some(CacheSettings {
        max_weight: max_weight.unwrap_or(defaults.max_weight),
        max_age_ms: max_age_ms.or(defaults.max_age_ms),
        max_age_jitter_base_ms: jitter_base_ms.unwrap_or(defaults.max_age_jitter_base_ms),
        debug: debug.unwrap_or(defaults.debug),
    }))
}

/// Parse an optional numeric environment variable
///
/// # Errors
/// Returns `CacheError::Config` naming the variable if it is set but not a
/// non-negative integer.
fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| CacheError::config(key, format!("Invalid number '{}': {}", raw, e))),
        Err(_) => Ok(None),
    }
}

/// Parse an optional boolean environment variable
///
/// # Errors
/// Returns `CacheError::Config` naming the variable if it is set to an
/// unrecognised token.
fn env_bool(key: &str) -> Result<Option<bool>> {
    match std::env::var(key) {
        Ok(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| CacheError::config(key, format!("Invalid boolean '{}'", raw))),
        Err(_) => Ok(None),
    }
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Configuration loading.
//!
//! The configuration is a TOML file with camelCase keys. Every key is
//! optional; see [`HygieneConfig`] for defaults.

mod error;
mod hygiene;

pub use error::ConfigError;
pub use hygiene::{
    HygieneConfig, DEFAULT_CREDENTIALS_ID, DEFAULT_FILE_COUNT_LIMIT, DEFAULT_GITHUB_API_URL,
    DEFAULT_LINE_COUNT_LIMIT,
};

use hygiene::RawConfig;
use std::path::Path;
use tracing::{debug, info};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".pr-hygiene.toml";

/// Loads and validates a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if `path` does not exist, and
/// [`ConfigError::TomlError`] / [`ConfigError::ValidationError`] if its
/// contents are invalid.
pub fn load_config(path: &Path) -> Result<HygieneConfig, ConfigError> {
    debug!(path = %path.display(), "Loading configuration");

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_config(&contents, &path.display().to_string())
}

/// Loads `path` if given, otherwise [`DEFAULT_CONFIG_FILE`] in `working_dir`
/// when present, otherwise the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] if the chosen file is missing or invalid.
pub fn resolve_config(
    path: Option<&Path>,
    working_dir: &Path,
) -> Result<HygieneConfig, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load_config(&default_path);
    }

    info!("No configuration file found, using defaults");
    Ok(HygieneConfig::default())
}

/// Parses and validates configuration text.
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns [`ConfigError::TomlError`] if the text is not valid TOML or has
/// unknown keys, and [`ConfigError::ValidationError`] if a value is invalid.
pub fn parse_config(contents: &str, origin: &str) -> Result<HygieneConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(contents).map_err(|e| ConfigError::TomlError {
        path: origin.to_string(),
        source: e,
    })?;

    let config = raw.validate(origin)?;
    debug!(
        disabled = config.disable_status_check(),
        file_limit = config.changed_file_count_limit(),
        line_limit = config.changed_line_count_limit(),
        ignored = config.ignore_set().len(),
        "Loaded configuration"
    );
    Ok(config)
}

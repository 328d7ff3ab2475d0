//! Hygiene config loading errors.
//!
//! Every variant carries the config origin (a file path, or a label for
//! in-memory text) so the CLI can point at the offending source.

use thiserror::Error;

/// Why a hygiene config could not be used. Any of these ends the CLI with
/// exit code 2 before a run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Cannot read hygiene config '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML, an unknown key, or a value of the wrong type.
    #[error("Hygiene config '{path}' is not valid: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A key parsed but its value was rejected by validation.
    #[error("Hygiene config '{path}' has an invalid value: {message}")]
    ValidationError { path: String, message: String },

    /// An explicitly requested config file does not exist.
    #[error("Hygiene config file '{path}' does not exist")]
    MissingFile { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_config_origin() {
        let missing = ConfigError::MissingFile {
            path: "ci/.pr-hygiene.toml".to_string(),
        };
        assert_eq!(
            missing.to_string(),
            "Hygiene config file 'ci/.pr-hygiene.toml' does not exist"
        );

        let invalid = ConfigError::ValidationError {
            path: "inline".to_string(),
            message: "githubCredentialsId must not be blank".to_string(),
        };
        assert!(invalid.to_string().starts_with("Hygiene config 'inline'"));
    }
}

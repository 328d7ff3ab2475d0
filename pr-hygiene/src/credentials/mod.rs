//! Credential acquisition for GitHub API calls.
//!
//! A [`Credential`] is acquired once per run from a [`CredentialProvider`]
//! and handed to both the files fetch and the status publish. It is dropped
//! when the run ends.

mod error;

pub use error::CredentialError;

use std::fmt;
use tracing::debug;

/// Environment variable consulted when no credential-specific variable is set.
pub const FALLBACK_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// A token resolved for a credential id.
#[derive(Clone)]
pub struct Credential {
    id: String,
    token: String,
}

impl Credential {
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
        }
    }

    /// The credential id this token was resolved for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Resolves credential ids to tokens.
pub trait CredentialProvider: Send + Sync {
    /// Acquires the credential for `credentials_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotFound`] if no token is available.
    fn acquire(&self, credentials_id: &str) -> Result<Credential, CredentialError>;
}

/// Reads tokens from environment variables.
///
/// A credential id maps to the variable named after it, upper-cased with
/// `-` and `.` replaced by `_` (`github-credentials` reads
/// `GITHUB_CREDENTIALS`). [`FALLBACK_TOKEN_ENV`] is tried next. Empty values
/// count as unset.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn acquire(&self, credentials_id: &str) -> Result<Credential, CredentialError> {
        let searched = vec![env_var_name(credentials_id), FALLBACK_TOKEN_ENV.to_string()];

        for name in &searched {
            if let Some(token) = std::env::var(name).ok().filter(|v| !v.trim().is_empty()) {
                debug!(credentials_id, env = %name, "Resolved credential from environment");
                return Ok(Credential::new(credentials_id, token));
            }
        }

        Err(CredentialError::NotFound {
            id: credentials_id.to_string(),
            searched,
        })
    }
}

/// Environment variable name for a credential id.
pub fn env_var_name(credentials_id: &str) -> String {
    credentials_id
        .chars()
        .map(|c| match c {
            '-' | '.' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

//! Credential error types.

use thiserror::Error;

/// Errors that can occur while acquiring a credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No token is available for the credential id.
    #[error("No token found for credential '{id}' (looked up {})", .searched.join(", "))]
    NotFound { id: String, searched: Vec<String> },
}

use thiserror::Error;

use crate::error::GatehouseError;

/// Errors returned by `login`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credential validation failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The pending login was cancelled or superseded by a newer one.
    #[error("Login cancelled")]
    Cancelled,

    /// The durable slot could not be written.
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl From<GatehouseError> for AuthError {
    fn from(err: GatehouseError) -> Self {
        Self::Storage(err.to_string())
    }
}

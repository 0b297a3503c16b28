//! API Module
//!
//! HTTP client for the Vault-inator backend.

pub mod client;
pub mod models;

use thiserror::Error;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Reduce the error to the single line shown in the status bar.
    ///
    /// Server error bodies are surfaced verbatim; everything else falls
    /// back to the operation's generic failure text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// Re-exports
pub use client::{HttpVaultApi, VaultApi};
pub use models::{AuthStatus, CredentialRecord, NewRecord};

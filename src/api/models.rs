//! API Models
//!
//! Wire types for the Vault-inator backend.

use serde::{Deserialize, Deserializer, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{ApiError, ApiResult};

/// Stored credential as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(alias = "ID")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CredentialRecord {
    pub fn url_or_empty(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

/// Body of `POST /api/passwords`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct NewRecord {
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
}

/// Body of `GET /api/auth/status`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub initialized: bool,
}

#[derive(Serialize)]
pub struct PasswordRequest<'a> {
    pub password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Decode the body of `GET /api/passwords`.
///
/// An empty body or a JSON `null` is an empty list. Anything that is not an
/// array of records is a `Decode` error.
pub fn parse_record_list(body: &str) -> ApiResult<Vec<CredentialRecord>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Option<Vec<CredentialRecord>>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Extract the user-facing message from an error response body.
///
/// The backend writes plain text; JSON `{"error": ..}` or `{"message": ..}`
/// bodies are unwrapped as well.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    serde_json::from_str::<ErrorBody>(trimmed)
        .map(|b| b.error.trim().to_string())
        .unwrap_or_else(|_| trimmed.to_string())
}

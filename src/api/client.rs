//! API Client
//!
//! Blocking HTTP transport for the backend routes.

use std::time::Duration;

use ureq::http::Response;
use ureq::{Agent, Body};

use super::models::{
    error_message, parse_record_list, AuthStatus, ChangePasswordRequest, CredentialRecord,
    NewRecord, PasswordRequest,
};
use super::{ApiError, ApiResult};

/// Operations the client needs from the backend
pub trait VaultApi {
    fn status(&self) -> ApiResult<AuthStatus>;
    fn initialize(&self, password: &str) -> ApiResult<()>;
    fn verify(&self, password: &str) -> ApiResult<()>;
    fn change_master_password(&self, current: &str, new: &str) -> ApiResult<()>;
    fn list_records(&self) -> ApiResult<Vec<CredentialRecord>>;
    fn get_record(&self, id: &str) -> ApiResult<CredentialRecord>;
    fn add_record(&self, record: &NewRecord) -> ApiResult<()>;
    fn delete_record(&self, id: &str) -> ApiResult<()>;
}

/// `VaultApi` over HTTP/JSON
pub struct HttpVaultApi {
    agent: Agent,
    base_url: String,
}

impl HttpVaultApi {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();

        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> ApiResult<String> {
        tracing::debug!(path, "GET");
        let result = self.agent.get(&self.url(path)).header("User-Agent", user_agent()).call();
        read_body(path, result)
    }

    fn post(&self, path: &str, body: impl serde::Serialize) -> ApiResult<String> {
        tracing::debug!(path, "POST");
        let result = self
            .agent
            .post(&self.url(path))
            .header("User-Agent", user_agent())
            .send_json(body);
        read_body(path, result)
    }

    fn delete(&self, path: &str) -> ApiResult<String> {
        tracing::debug!(path, "DELETE");
        let result = self.agent.delete(&self.url(path)).header("User-Agent", user_agent()).call();
        read_body(path, result)
    }
}

impl VaultApi for HttpVaultApi {
    fn status(&self) -> ApiResult<AuthStatus> {
        let body = self.get("/api/auth/status")?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn initialize(&self, password: &str) -> ApiResult<()> {
        self.post("/api/auth/initialize", PasswordRequest { password })?;
        Ok(())
    }

    fn verify(&self, password: &str) -> ApiResult<()> {
        self.post("/api/auth/verify", PasswordRequest { password })?;
        Ok(())
    }

    fn change_master_password(&self, current: &str, new: &str) -> ApiResult<()> {
        let req = ChangePasswordRequest { current_password: current, new_password: new };
        self.post("/api/auth/change", req)?;
        Ok(())
    }

    fn list_records(&self) -> ApiResult<Vec<CredentialRecord>> {
        let body = self.get("/api/passwords")?;
        parse_record_list(&body)
    }

    fn get_record(&self, id: &str) -> ApiResult<CredentialRecord> {
        let body = self.get(&record_path(id))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn add_record(&self, record: &NewRecord) -> ApiResult<()> {
        self.post("/api/passwords", record)?;
        Ok(())
    }

    fn delete_record(&self, id: &str) -> ApiResult<()> {
        self.delete(&record_path(id))?;
        Ok(())
    }
}

fn user_agent() -> String {
    format!("vaultinator/{}", env!("CARGO_PKG_VERSION"))
}

fn record_path(id: &str) -> String {
    format!("/api/passwords/{}", urlencoding::encode(id))
}

fn read_body(path: &str, result: Result<Response<Body>, ureq::Error>) -> ApiResult<String> {
    let mut response = result.inspect_err(|e| tracing::warn!(path, error = %e, "request failed"))?;
    let status = response.status();
    let bytes = match response.body_mut().read_to_vec() {
        Ok(bytes) => bytes,
        Err(ureq::Error::BodyExceedsLimit(limit)) => {
            tracing::warn!(path, limit, "response body too large");
            return Err(ApiError::Decode(format!("response body exceeds {} bytes", limit)));
        }
        Err(e) => return Err(e.into()),
    };
    // Invalid UTF-8 is left for the JSON decoder to reject.
    let body = String::from_utf8_lossy(&bytes).into_owned();

    if !status.is_success() {
        tracing::warn!(path, status = status.as_u16(), "backend rejected request");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(body)
}

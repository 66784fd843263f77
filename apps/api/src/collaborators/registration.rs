//! Registration proxy — forwards enrollment sign-ups to the external
//! self-enrollment service. Single attempt; no retries.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("registration API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Proxy responded with {status} {message}")]
    Upstream { status: u16, message: String },
}

#[derive(Clone)]
pub struct RegistrationClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl RegistrationClient {
    pub fn new(url: String, api_key: Option<String>) -> Result<Self, RegistrationError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            url,
            api_key,
        })
    }

    /// POSTs `payload` as JSON with the `x-api-key` header and returns the upstream JSON body.
    pub async fn forward(&self, payload: &Value) -> Result<Value, RegistrationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(RegistrationError::MissingApiKey)?;

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", api_key)
            .header("accept", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = status.canonical_reason().unwrap_or("").to_string();
            warn!("Registration upstream returned {status}");
            return Err(RegistrationError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        debug!("Registration forwarded to {}", self.url);
        Ok(body)
    }
}

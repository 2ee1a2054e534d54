/**
 * Mailing-List Client
 *
 * Thin client for the external mailing-list service the subscribe endpoint
 * forwards to. One bearer-authenticated POST per subscription; no retries.
 * The provider's response payload is passed through to the caller.
 */

use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailingError {
    #[error("mailing service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mailing service answered with status {status}")]
    Upstream { status: u16 },
}

pub struct MailingClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl MailingClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Register a subscriber with the mailing provider.
    pub async fn subscribe(&self, name: &str, email: &str) -> Result<Value, MailingError> {
        let url = format!(
            "{}/api/subscribers",
            self.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "mailing service rejected subscriber");
            return Err(MailingError::Upstream {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

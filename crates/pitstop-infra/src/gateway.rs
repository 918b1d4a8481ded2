//! Max messenger gateway -- concrete [`MessageGateway`] implementation.
//!
//! Sends messages through the platform's `POST /messages` endpoint with
//! the bot token in the `Authorization` header. The token is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use pitstop_core::gateway::MessageGateway;
use pitstop_types::error::GatewayError;
use pitstop_types::wire::{OutboundMessage, Reply};

/// Default Max platform API endpoint.
const DEFAULT_BASE_URL: &str = "https://platform-api.max.ru";

/// HTTP client for the Max messenger platform.
pub struct MaxGateway {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
}

impl MaxGateway {
    /// Create a new gateway with the given bot token.
    pub fn new(token: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl MessageGateway for MaxGateway {
    async fn send(&self, chat_id: i64, reply: &Reply) -> Result<(), GatewayError> {
        let message = OutboundMessage::from_reply(chat_id, reply);
        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(chat_id, "message delivered");
        Ok(())
    }
}

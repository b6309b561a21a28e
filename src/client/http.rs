use crate::models::{DreamResponse, PromptRequest};
use crate::{Error, Result};
use reqwest::Client;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080";

/// HTTP client for the Dream Service's `POST /dream`.
pub struct DreamClient {
    client: Client,
    base_url: String,
}

impl DreamClient {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send one prompt and return the image reference, untouched.
    pub async fn submit_prompt(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/dream", self.base_url);
        tracing::debug!("Submitting prompt to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&PromptRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach dream service: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            tracing::error!("Dream service error (status {}): {}", status, message);
            return Err(Error::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let DreamResponse { image } = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse dream response: {}\nBody: {}", e, body);
            e
        })?;

        Ok(image)
    }
}

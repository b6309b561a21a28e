use super::client::OpenAiHttpClient;
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use crate::ai::{mime, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiImageClient {
    http: OpenAiHttpClient,
    model: String,
    size: String,
}

impl OpenAiImageClient {
    pub fn new(api_key: String, model: String, size: String) -> Self {
        Self::new_with_client(
            api_key,
            model,
            size,
            Duration::from_secs(60),
            reqwest::Client::new(),
        )
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        size: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, timeout, client),
            model,
            size,
        }
    }

    /// Point the client at a different API host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for OpenAiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: self.size.clone(),
        };

        tracing::debug!("Sending image generation request to OpenAI (model: {})", self.model);
        let response: ImageGenerationResponse =
            self.http.post("/v1/images/generations", &request).await?;

        let image_data = response
            .data
            .first()
            .ok_or_else(|| Error::AiProvider("No image data in OpenAI response".to_string()))?;

        if let Some(url) = &image_data.url {
            Ok(url.clone())
        } else if let Some(b64_json) = &image_data.b64_json {
            mime::data_reference(b64_json, None)
        } else {
            Err(Error::AiProvider(
                "No image data (neither URL nor base64) in response".to_string(),
            ))
        }
    }
}

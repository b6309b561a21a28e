use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::{mime, provider_error, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini image generation over the `generateContent` REST endpoint.
pub struct GeminiImageClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Duration::from_secs(120), reqwest::Client::new())
    }

    /// `model` may be given bare (`gemini-2.5-flash-image`) or as `models/...`.
    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        let model = model.trim_start_matches("models/").to_string();
        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn send(&self, request: &ImageRequest) -> Result<GenerateContentResponse> {
        let response = self
            .client
            .post(self.endpoint())
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .inspect_err(|e| tracing::error!("Gemini image request failed to send: {}", e))?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(provider_error("Gemini", status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unreadable Gemini image reply: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let request = ImageRequest {
            contents: vec![Content {
                role: None,
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                }),
            },
        };

        tracing::debug!(
            "Sending image generation request to Gemini (model: {})",
            self.model
        );
        let gemini_response = self.send(&request).await?;

        let image_data = gemini_response
            .candidates
            .first()
            .and_then(|c| {
                c.content.parts.iter().find_map(|p| match p {
                    Part::InlineData { inline_data } => Some(inline_data),
                    _ => None,
                })
            })
            .ok_or_else(|| Error::AiProvider("No image data in Gemini response".to_string()))?;

        tracing::debug!(
            "Gemini returned image with mime_type: {}",
            image_data.mime_type
        );

        mime::data_reference(&image_data.data, Some(&image_data.mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
    const GENERATE_CONTENT_PATH_REGEX: &str = r"^/v1beta/models/[^/]+:generateContent$";

    fn make_client(server: &MockServer) -> GeminiImageClient {
        GeminiImageClient::new("key".to_string(), DEFAULT_MODEL.to_string())
            .with_base_url(server.uri())
    }

    #[test]
    fn test_endpoint_uses_bare_model_id() {
        let client = GeminiImageClient::new(
            "key".to_string(),
            "models/gemini-2.5-flash-image".to_string(),
        )
        .with_base_url("http://localhost:9999/".to_string());

        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_image_returns_data_reference() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .and(header("x-goog-api-key", "key"))
            .and(body_string_contains("\"aspectRatio\":\"1:1\""))
            .and(body_string_contains("a cat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "Here is your cat" },
                            { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
                        ]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = make_client(&server).generate_image("a cat").await.unwrap();
        assert_eq!(image, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": { "code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" }
            })))
            .mount(&server)
            .await;

        let err = make_client(&server).generate_image("a dream").await.unwrap_err();
        assert_eq!(err.provider_message(), Some("quota exceeded"));
    }

    #[tokio::test]
    async fn test_generate_image_rejects_missing_inline_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(GENERATE_CONTENT_PATH_REGEX))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "no image here" }] }
                }]
            })))
            .mount(&server)
            .await;

        let err = make_client(&server).generate_image("a dream").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}

//! Image-generation provider integration
//!
//! The Dream Service only needs one capability from a provider: turn a prompt
//! into an image reference. OpenAI and Gemini implement it over HTTP; the mock
//! backs dry runs and tests.

pub mod gemini;
pub mod mime;
pub mod mock;
pub mod openai;

pub use gemini::GeminiImageClient;
pub use mock::MockImageGenerationClient;
pub use openai::OpenAiImageClient;

use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Returns a URL or `data:` reference for the generated image.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

/// `{"error": {"message": ...}}` envelope shared by OpenAI and Gemini.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pull the human-readable message out of a provider error body, if any.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
}

/// Map a non-2xx provider response onto the crate error.
pub(crate) fn provider_error(
    provider: &str,
    status: reqwest::StatusCode,
    body: &str,
) -> crate::Error {
    tracing::error!("{} API error (status {}): {}", provider, status, body);
    match extract_error_message(body) {
        Some(message) => crate::Error::ProviderRejected {
            status: status.as_u16(),
            message,
        },
        None => crate::Error::AiProvider(format!(
            "{} API error (status {}): {}",
            provider, status, body
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_openai_style_message() {
        let body = r#"{"error":{"message":"Billing hard limit has been reached","type":"invalid_request_error"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Billing hard limit has been reached")
        );
    }

    #[test]
    fn test_extract_gemini_style_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Resource has been exhausted")
        );
    }

    #[test]
    fn test_extract_none_for_plain_text() {
        assert_eq!(extract_error_message("upstream connect error"), None);
        assert_eq!(extract_error_message(r#"{"error":{}}"#), None);
        assert_eq!(extract_error_message(r#"{"error":{"message":""}}"#), None);
    }

    #[test]
    fn test_provider_error_variants() {
        let err = provider_error(
            "OpenAI",
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"rate limited"}}"#,
        );
        assert_eq!(err.provider_message(), Some("rate limited"));

        let err = provider_error("OpenAI", reqwest::StatusCode::BAD_GATEWAY, "bad gateway");
        assert!(matches!(err, crate::Error::AiProvider(_)));
    }
}

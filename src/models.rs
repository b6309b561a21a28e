//! Data models and structures
//!
//! Defines the `/dream` wire payloads shared by the service and the client,
//! plus the process configuration loaded from the environment.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Body of `POST /dream`.
///
/// An absent `prompt` reads as empty and is left for the provider to judge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: String,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Successful reply from `POST /dream`. `image` is a URL or a `data:` reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DreamResponse {
    pub image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    OpenAi,
    Gemini,
}

impl FromStr for AiProvider {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "gemini" => Ok(AiProvider::Gemini),
            other => Err(crate::Error::Config(format!(
                "Unknown IMAGE_PROVIDER '{}'. Expected 'openai' or 'gemini'",
                other
            ))),
        }
    }
}

impl AiProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            AiProvider::OpenAi => "dall-e-2",
            AiProvider::Gemini => "gemini-2.5-flash-image",
        }
    }
}

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub image_provider: AiProvider,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub image_model: String,
    pub image_size: String,
    pub provider_timeout: Duration,
    pub dry_run: bool,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a closure over a fixed map.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let image_provider = match var("IMAGE_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => AiProvider::OpenAi,
        };

        let dry_run = var("DRY_RUN")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let openai_api_key = var("OPENAI_API_KEY").or_else(|| var("OPENAI"));
        let gemini_api_key = var("GEMINI_API_KEY");

        if !dry_run {
            match image_provider {
                AiProvider::OpenAi if openai_api_key.is_none() => {
                    return Err(crate::Error::Config(
                        "OPENAI_API_KEY not set (IMAGE_PROVIDER=openai)".to_string(),
                    ));
                }
                AiProvider::Gemini if gemini_api_key.is_none() => {
                    return Err(crate::Error::Config(
                        "GEMINI_API_KEY not set (IMAGE_PROVIDER=gemini)".to_string(),
                    ));
                }
                _ => {}
            }
        }

        let provider_timeout_secs = match var("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                crate::Error::Config(format!("Invalid PROVIDER_TIMEOUT_SECS '{}'", raw))
            })?,
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| crate::Error::Config(format!("Invalid PORT '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            image_provider,
            openai_api_key,
            gemini_api_key,
            image_model: var("IMAGE_MODEL")
                .unwrap_or_else(|| image_provider.default_model().to_string()),
            image_size: var("IMAGE_SIZE").unwrap_or_else(|| DEFAULT_IMAGE_SIZE.to_string()),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            dry_run,
            port,
        })
    }
}

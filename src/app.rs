//! Application wiring: build the provider from configuration and serve `/dream`.

use crate::ai::{
    GeminiImageClient, ImageGenerationService, MockImageGenerationClient, OpenAiImageClient,
};
use crate::models::{AiProvider, Config};
use crate::server::{self, AppState};
use crate::{Error, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The Dream Service process: one provider, one port.
pub struct App {
    state: AppState,
    port: u16,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub image_gen: Arc<dyn ImageGenerationService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses that
    /// need to inject mocks.
    pub fn with_services(services: AppServices, port: u16) -> Self {
        Self {
            state: AppState::new(services.image_gen),
            port,
        }
    }

    fn api_key_for_provider(config: &Config, provider: AiProvider) -> Result<String> {
        let (key, name) = match provider {
            AiProvider::OpenAi => (&config.openai_api_key, "OPENAI_API_KEY"),
            AiProvider::Gemini => (&config.gemini_api_key, "GEMINI_API_KEY"),
        };
        key.clone()
            .ok_or_else(|| Error::Config(format!("{} not set", name)))
    }

    fn build_image_client(config: &Config) -> Result<Arc<dyn ImageGenerationService>> {
        if config.dry_run {
            info!("DRY_RUN enabled, images come from the mock provider");
            return Ok(Arc::new(MockImageGenerationClient::new()));
        }

        let api_key = Self::api_key_for_provider(config, config.image_provider)?;
        let http_client = reqwest::Client::new();

        let client: Arc<dyn ImageGenerationService> = match config.image_provider {
            AiProvider::OpenAi => {
                info!("Image provider: OpenAI (model: {})", config.image_model);
                Arc::new(OpenAiImageClient::new_with_client(
                    api_key,
                    config.image_model.clone(),
                    config.image_size.clone(),
                    config.provider_timeout,
                    http_client,
                ))
            }
            AiProvider::Gemini => {
                info!("Image provider: Gemini (model: {})", config.image_model);
                Arc::new(GeminiImageClient::new_with_client(
                    api_key,
                    config.image_model.clone(),
                    config.provider_timeout,
                    http_client,
                ))
            }
        };

        Ok(client)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let image_gen = Self::build_image_client(&config)?;
        Ok(Self::with_services(AppServices { image_gen }, config.port))
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    /// Bind the configured port on all interfaces and serve until the process stops.
    pub async fn run(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let port = listener.local_addr()?.port();
        let app = self.router();

        info!("listening on port {}", port);
        axum::serve(listener, app).await?;
        Ok(())
    }
}

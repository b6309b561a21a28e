use super::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const DEFAULT_IMAGE_URL: &str = "https://mock-images.example.com/dream.png";

/// Scripted outcome for one mock call.
#[derive(Debug, Clone)]
enum MockOutcome {
    Image(String),
    /// `Some` reproduces a provider error envelope, `None` an opaque failure.
    Failure(Option<String>),
}

#[derive(Clone)]
pub struct MockImageGenerationClient {
    outcomes: Arc<Mutex<Vec<MockOutcome>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, image: String) -> Self {
        self.outcomes.lock().unwrap().push(MockOutcome::Image(image));
        self
    }

    /// Fail like a provider that returned an error envelope with `message`.
    pub fn with_failure(self, message: String) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(MockOutcome::Failure(Some(message)));
        self
    }

    /// Fail without any message the caller could surface.
    pub fn with_opaque_failure(self) -> Self {
        self.outcomes.lock().unwrap().push(MockOutcome::Failure(None));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return Ok(DEFAULT_IMAGE_URL.to_string());
        }

        // Cycle through scripted outcomes
        match &outcomes[(*count - 1) % outcomes.len()] {
            MockOutcome::Image(image) => Ok(image.clone()),
            MockOutcome::Failure(Some(message)) => Err(Error::ProviderRejected {
                status: 400,
                message: message.clone(),
            }),
            MockOutcome::Failure(None) => {
                Err(Error::AiProvider("Mock provider failure".to_string()))
            }
        }
    }
}

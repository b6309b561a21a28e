//! Client side of the `/dream` contract
//!
//! Mirrors the browser page: a form with an `Idle`/`Busy`/`Failed` submit
//! state machine, an HTTP client for the Dream Service, and a session that
//! drives one through the other.

pub mod form;
pub mod http;

pub use form::{render_image, DreamForm, SubmitButton, SubmitState};
pub use http::DreamClient;

use crate::Error;
use tracing::warn;

/// A form bound to a Dream Service.
pub struct DreamSession {
    client: DreamClient,
    form: DreamForm,
}

impl DreamSession {
    pub fn new(client: DreamClient) -> Self {
        Self {
            client,
            form: DreamForm::new(),
        }
    }

    pub fn form(&self) -> &DreamForm {
        &self.form
    }

    /// Run one submission to completion and return the settled state.
    ///
    /// A submission made while another is in flight is dropped without a request.
    pub async fn submit(&mut self, prompt: &str) -> &SubmitState {
        if !self.form.begin_submit() {
            warn!("Ignoring submission: a dream is already in progress");
            return self.form.state();
        }

        match self.client.submit_prompt(prompt).await {
            Ok(image) => self.form.complete(&image),
            Err(e) => self.form.fail(failure_message(&e)),
        }

        self.form.state()
    }
}

/// Message shown to the user when a submission fails.
pub fn failure_message(err: &Error) -> String {
    match err {
        Error::Service { message, .. } if !message.trim().is_empty() => message.clone(),
        Error::Service { status, .. } => format!("Dream service error (status {})", status),
        Error::Http(e) if e.is_connect() => "Could not reach the dream service".to_string(),
        other => other.to_string(),
    }
}

pub const IDLE_LABEL: &str = "Dream";
pub const BUSY_LABEL: &str = "Dreaming... <span class=\"spinner\">🧠</span>";
pub const IMAGE_WIDTH: u32 = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Busy,
    /// Last submission failed; holds the message shown to the user.
    Failed(String),
}

/// Rendered state of the submit control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: &'static str,
}

/// The prompt form: submit state plus the markup of the result region.
#[derive(Debug, Clone)]
pub struct DreamForm {
    state: SubmitState,
    result_html: String,
}

impl Default for DreamForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DreamForm {
    pub fn new() -> Self {
        Self {
            state: SubmitState::Idle,
            result_html: String::new(),
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn result_html(&self) -> &str {
        &self.result_html
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn button(&self) -> SubmitButton {
        match self.state {
            SubmitState::Busy => SubmitButton {
                disabled: true,
                label: BUSY_LABEL,
            },
            SubmitState::Idle | SubmitState::Failed(_) => SubmitButton {
                disabled: false,
                label: IDLE_LABEL,
            },
        }
    }

    /// `Idle`/`Failed` -> `Busy`. Returns `false`, changing nothing, while a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.state == SubmitState::Busy {
            return false;
        }
        self.state = SubmitState::Busy;
        true
    }

    /// `Busy` -> `Idle`, rendering `image` into the result region.
    pub fn complete(&mut self, image: &str) {
        if self.state != SubmitState::Busy {
            tracing::warn!("Completion received while not busy; ignoring");
            return;
        }
        self.result_html = render_image(image);
        self.state = SubmitState::Idle;
    }

    /// `Busy` -> `Failed`. The previous result stays on screen.
    pub fn fail(&mut self, message: String) {
        if self.state != SubmitState::Busy {
            tracing::warn!("Failure received while not busy; ignoring");
            return;
        }
        self.state = SubmitState::Failed(message);
    }
}

/// Markup for the result region.
///
/// The reference is attribute-escaped only, so the parsed `src` is exactly `image`.
pub fn render_image(image: &str) -> String {
    format!(
        r#"<img src="{}" width="{}" />"#,
        escape_attribute(image),
        IMAGE_WIDTH
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Presentation state for a formatting front end.
//!
//! The front end renders purely from a [`ViewState`]; every change goes
//! through [`ViewState::apply`]. [`FormatSession`] drives one user action
//! from submit to completion.

use tracing::info;

use crate::client::MessageFormatter;
use crate::error::{FormatError, EMPTY_INPUT_MESSAGE};
use crate::options::FormattingOptions;

/// Label on the submit control while idle.
pub const BUTTON_IDLE_LABEL: &str = "Format Message";

/// Label on the submit control while a request is in flight.
pub const BUTTON_LOADING_LABEL: &str = "Formatting...";

/// What the front end currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Formatted markdown ready to render.
    Success(String),
    /// User-facing failure message.
    Error(String),
}

/// Inputs to the state machine.
#[derive(Debug)]
pub enum ViewEvent {
    /// The user triggered a format action.
    Submitted,
    /// The in-flight request finished.
    Completed(Result<String, FormatError>),
    /// The user asked to show a validation message without sending.
    Rejected(String),
    /// Back to the initial state.
    Reset,
}

impl ViewState {
    /// Single transition entry point.
    ///
    /// Submitting while `Loading` and completions outside `Loading` are
    /// ignored, which keeps at most one request in flight.
    #[must_use]
    pub fn apply(self, event: ViewEvent) -> Self {
        match (self, event) {
            (_, ViewEvent::Submitted) => Self::Loading,
            (Self::Loading, ViewEvent::Completed(Ok(text))) => Self::Success(text),
            (Self::Loading, ViewEvent::Completed(Err(e))) => Self::Error(e.user_message().to_owned()),
            (state, ViewEvent::Completed(_)) => state,
            (Self::Loading, ViewEvent::Rejected(_)) => Self::Loading,
            (_, ViewEvent::Rejected(message)) => Self::Error(message),
            (_, ViewEvent::Reset) => Self::Idle,
        }
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the submit control accepts input for the given text.
    pub fn button_enabled(&self, input: &str) -> bool {
        !self.is_loading() && !input.trim().is_empty()
    }

    /// Label for the submit control.
    pub fn button_label(&self) -> &'static str {
        if self.is_loading() {
            BUTTON_LOADING_LABEL
        } else {
            BUTTON_IDLE_LABEL
        }
    }

    /// Whether the spinner is shown.
    pub fn loader_visible(&self) -> bool {
        self.is_loading()
    }

    /// Error text to show, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Markdown to render, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Success(text) => Some(text),
            _ => None,
        }
    }
}

/// Runs format actions against a formatter and tracks the view state.
pub struct FormatSession<'a> {
    formatter: &'a dyn MessageFormatter,
    state: ViewState,
}

impl<'a> FormatSession<'a> {
    /// New idle session.
    pub fn new(formatter: &'a dyn MessageFormatter) -> Self {
        Self {
            formatter,
            state: ViewState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    fn transition(&mut self, event: ViewEvent) {
        let previous = std::mem::take(&mut self.state);
        self.state = previous.apply(event);
    }

    /// Handle one submit of `input` with `options`.
    ///
    /// Blank input produces an error state without calling the formatter.
    /// `on_loading` runs once the session has entered `Loading`, so the
    /// caller can update its presentation before the request goes out.
    pub async fn submit(
        &mut self,
        input: &str,
        options: &FormattingOptions,
        on_loading: impl FnOnce(&ViewState),
    ) -> &ViewState {
        if self.state.is_loading() {
            return &self.state;
        }

        let raw = input.trim();
        if raw.is_empty() {
            self.transition(ViewEvent::Rejected(EMPTY_INPUT_MESSAGE.to_owned()));
            return &self.state;
        }

        self.transition(ViewEvent::Submitted);
        on_loading(&self.state);

        let result = self.formatter.format(raw, options).await;
        if let Ok(text) = &result {
            info!(chars = text.chars().count(), "message formatted");
        }
        self.transition(ViewEvent::Completed(result));
        &self.state
    }
}

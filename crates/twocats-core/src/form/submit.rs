use std::time::Duration;

use thiserror::Error;
use tracing::info;

use super::validation::FieldValues;

/// Why an acknowledgment did not come back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("the server rejected the message: {0}")]
    Rejected(String),

    #[error("the server did not answer in time")]
    Timeout,
}

/// Whatever acknowledges a contact form submission
pub trait SubmitBackend {
    fn acknowledge(&mut self, values: &FieldValues) -> Result<(), SubmitError>;
}

/// Stand-in backend: every submission is accepted
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedBackend;

impl SubmitBackend for SimulatedBackend {
    fn acknowledge(&mut self, values: &FieldValues) -> Result<(), SubmitError> {
        info!(service = %values.service, "simulated submission acknowledged");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Sending {
        since: Duration,
    },
}

/// The form's submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    label: String,
    sending_label: String,
    state: SubmitState,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new("Send message")
    }
}

impl SubmitButton {
    pub const SENDING_LABEL: &'static str = "Sending...";

    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sending_label: Self::SENDING_LABEL.to_string(),
            state: SubmitState::Idle,
        }
    }

    /// Text currently on the button
    pub fn label(&self) -> &str {
        match self.state {
            SubmitState::Idle => &self.label,
            SubmitState::Sending { .. } => &self.sending_label,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        matches!(self.state, SubmitState::Sending { .. })
    }

    pub(crate) fn start(&mut self, now: Duration) {
        self.state = SubmitState::Sending { since: now };
    }

    pub(crate) fn finish(&mut self) {
        self.state = SubmitState::Idle;
    }
}

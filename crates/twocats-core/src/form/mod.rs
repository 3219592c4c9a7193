//! Contact form: validation, per-field display state and the submission flow
//!
//! - `validation` - Pure field checks in fixed order
//! - `field` - Focus / value / error state of each form group
//! - `submit` - Submit control state and the acknowledgment backend

pub mod field;
pub mod submit;
pub mod validation;

use std::time::Duration;

use tracing::{info, warn};

use crate::scheduler::{TimerId, TimerQueue};

pub use field::{FieldState, FocusState, LabelPosition};
pub use submit::{SimulatedBackend, SubmitBackend, SubmitButton, SubmitError, SubmitState};
pub use validation::{
    is_valid_email, validate, validate_field, FieldName, FieldValues, ValidationError,
    MIN_MESSAGE_CHARS,
};

/// Timer payload for the delayed acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcknowledgeTimer;

/// What happened when the user pressed submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent. The first error is the one to show.
    Invalid(Vec<ValidationError>),
    /// Submission is on its way
    Sending,
    /// A submission is already in flight
    Busy,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    values: FieldValues,
    fields: [FieldState; 4],
    button: SubmitButton,
    delay: Duration,
    pending: Option<TimerId>,
}

fn slot(field: FieldName) -> usize {
    match field {
        FieldName::Name => 0,
        FieldName::Email => 1,
        FieldName::Service => 2,
        FieldName::Message => 3,
    }
}

impl ContactForm {
    /// `delay` is how long the acknowledgment takes to arrive
    pub fn new(button: SubmitButton, delay: Duration) -> Self {
        Self {
            values: FieldValues::default(),
            fields: [FieldState::default(); 4],
            button,
            delay,
            pending: None,
        }
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn field(&self, field: FieldName) -> &FieldState {
        &self.fields[slot(field)]
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    /// Whether the form is dimmed and ignoring pointer input
    pub fn is_locked(&self) -> bool {
        self.button.is_disabled()
    }

    pub fn focus(&mut self, field: FieldName) {
        self.fields[slot(field)].on_focus(field);
    }

    pub fn blur(&mut self, field: FieldName) -> Option<ValidationError> {
        let value = self.values.get(field).to_string();
        self.fields[slot(field)].on_blur(field, &value)
    }

    pub fn input(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        self.fields[slot(field)].on_input(&value);
        self.values.set(field, value);
    }

    /// Validate and, when clean, start the delayed acknowledgment
    pub fn submit<T>(&mut self, timers: &mut TimerQueue<T>, now: Duration) -> SubmitOutcome
    where
        T: From<AcknowledgeTimer>,
    {
        if self.button.is_disabled() {
            return SubmitOutcome::Busy;
        }

        let errors = validate(&self.values);
        if !errors.is_empty() {
            for error in &errors {
                self.fields[slot(error.field())].error = true;
            }
            return SubmitOutcome::Invalid(errors);
        }

        self.button.start(now);
        self.pending = Some(timers.schedule_after(now, self.delay, AcknowledgeTimer.into()));
        info!(delay_ms = self.delay.as_millis() as u64, "contact form submitted");
        SubmitOutcome::Sending
    }

    /// The acknowledgment delay elapsed: ask the backend and settle the form.
    ///
    /// Returns `None` if no submission was in flight. On success the form is
    /// cleared; on failure the values are kept so the user can retry.
    pub fn complete<B>(&mut self, backend: &mut B) -> Option<Result<(), SubmitError>>
    where
        B: SubmitBackend + ?Sized,
    {
        self.pending.take()?;
        let result = backend.acknowledge(&self.values);
        self.button.finish();

        match &result {
            Ok(()) => self.reset(),
            Err(e) => warn!(error = %e, "contact form submission failed"),
        }
        Some(result)
    }

    /// Clear values and every field's display state
    pub fn reset(&mut self) {
        self.values.clear();
        for state in &mut self.fields {
            state.reset();
        }
    }
}

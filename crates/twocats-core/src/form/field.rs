use super::validation::{validate_field, FieldName, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Blurred,
    Focused,
}

/// Where a field's label sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPosition {
    /// Inside the input, like a placeholder
    #[default]
    Resting,
    /// Lifted above the input as a badge
    Floating,
}

/// Display state of one form group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldState {
    pub focus: FocusState,
    pub has_value: bool,
    pub error: bool,
    pub label: LabelPosition,
}

impl FieldState {
    pub fn on_focus(&mut self, field: FieldName) {
        if field.is_text_input() {
            self.focus = FocusState::Focused;
            self.label = LabelPosition::Floating;
        }
    }

    /// Leaving the field re-rests an empty label and checks the field on its own
    pub fn on_blur(&mut self, field: FieldName, value: &str) -> Option<ValidationError> {
        if field.is_text_input() {
            self.focus = FocusState::Blurred;
            if value.is_empty() {
                self.label = LabelPosition::Resting;
            }
        }
        // Message length is only enforced on submit
        let problem = validate_field(field, value)
            .filter(|p| !matches!(p, ValidationError::MessageTooShort { .. }));
        self.error = problem.is_some();
        problem
    }

    pub fn on_input(&mut self, value: &str) {
        self.has_value = !value.is_empty();
        self.error = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_and_blur_empty() {
        let mut state = FieldState::default();
        state.on_focus(FieldName::Name);
        assert_eq!(state.focus, FocusState::Focused);
        assert_eq!(state.label, LabelPosition::Floating);

        let problem = state.on_blur(FieldName::Name, "");
        assert_eq!(problem, Some(ValidationError::NameRequired));
        assert_eq!(state.focus, FocusState::Blurred);
        assert_eq!(state.label, LabelPosition::Resting);
        assert!(state.error);
    }

    #[test]
    fn test_label_stays_up_with_value() {
        let mut state = FieldState::default();
        state.on_focus(FieldName::Email);
        state.on_input("a@b.c");
        assert!(state.has_value);
        assert_eq!(state.on_blur(FieldName::Email, "a@b.c"), None);
        assert_eq!(state.label, LabelPosition::Floating);
        assert!(!state.error);
    }

    #[test]
    fn test_input_clears_error() {
        let mut state = FieldState::default();
        state.on_blur(FieldName::Email, "nope");
        assert!(state.error);
        state.on_input("nope@");
        assert!(!state.error);
        state.on_input("");
        assert!(!state.has_value);
    }

    #[test]
    fn test_blur_skips_message_length() {
        let mut state = FieldState::default();
        state.on_focus(FieldName::Message);
        state.on_input("short");
        assert_eq!(state.on_blur(FieldName::Message, "short"), None);
        assert!(!state.error);

        // Blank is still required
        assert_eq!(
            state.on_blur(FieldName::Message, "   "),
            Some(ValidationError::MessageRequired)
        );
        assert!(state.error);
    }

    #[test]
    fn test_select_has_no_focus_styling() {
        let mut state = FieldState::default();
        state.on_focus(FieldName::Service);
        assert_eq!(state.focus, FocusState::Blurred);
        assert_eq!(state.on_blur(FieldName::Service, ""), Some(ValidationError::ServiceRequired));
        assert!(state.error);
    }
}

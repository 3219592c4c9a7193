use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use twocats_core::form::FieldName;

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToTop,
    JumpToBottom,
    NextLink,
    PrevLink,
    FollowLink,
    EnterForm,
    LeaveForm,
    NextField,
    PrevField,
    NextChoice,
    PrevChoice,
    InputChar(char),
    Backspace,
    Submit,
    /// Close button on the notification
    CloseNotification,
    /// Click anywhere on the notification body
    ClickNotification,
    ShowHelp,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }

    match app.mode {
        Mode::Help => Action::ExitMode,
        Mode::Form(field) => handle_form_mode(key, field),
        Mode::Browse => handle_browse_mode(key),
    }
}

fn handle_browse_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
            Action::ScrollPageDown
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::ScrollPageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        (KeyCode::Tab, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextLink,
        (KeyCode::BackTab, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevLink,
        (KeyCode::Enter, _) => Action::FollowLink,

        (KeyCode::Char('f'), KeyModifiers::NONE) | (KeyCode::Char('i'), KeyModifiers::NONE) => {
            Action::EnterForm
        }

        (KeyCode::Char('x'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Action::CloseNotification,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::ClickNotification,

        (KeyCode::Char('?'), _) => Action::ShowHelp,
        _ => Action::None,
    }
}

fn handle_form_mode(key: KeyEvent, field: FieldName) -> Action {
    match key.code {
        KeyCode::Esc => Action::LeaveForm,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        KeyCode::Enter => Action::Submit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Right if field == FieldName::Service => Action::NextChoice,
        KeyCode::Left if field == FieldName::Service => Action::PrevChoice,
        KeyCode::Char(' ') if field == FieldName::Service => Action::NextChoice,
        KeyCode::Char(c) if field != FieldName::Service => Action::InputChar(c),
        _ => Action::None,
    }
}

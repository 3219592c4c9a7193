use std::time::Duration;

use tracing::debug;
use twocats_core::form::FieldName;
use twocats_core::{EventSource, Site, UiEvent};

use crate::event::InputQueue;
use crate::input::Action;
use crate::theme::Theme;

/// Document pixels drawn per terminal row
pub const PX_PER_ROW: f64 = 20.0;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Scrolling and following links
    Browse,
    /// Typing into a contact form field
    Form(FieldName),
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    pub site: Site,
    pub theme: Theme,
    pub mode: Mode,
    /// Nav link highlighted for keyboard navigation
    pub selected_link: usize,
    pub should_quit: bool,
    /// One-off message for the status bar
    pub status_message: Option<String>,
    input: InputQueue,
    scroll_step: f64,
}

impl App {
    pub fn new(site: Site, theme: Theme) -> Self {
        let scroll_step = site.config().ui.scroll_step;
        Self {
            site,
            theme,
            mode: Mode::Browse,
            selected_link: 0,
            should_quit: false,
            status_message: None,
            input: InputQueue::default(),
            scroll_step,
        }
    }

    /// Terminal resized to `rows` rows of page area
    pub fn resize(&mut self, rows: u16, now: Duration) {
        let viewport_height = f64::from(rows.max(1)) * PX_PER_ROW;
        if (viewport_height - self.site.viewport_height()).abs() > f64::EPSILON {
            self.input.push(now, UiEvent::Resize { viewport_height });
        }
    }

    /// Dispatch queued input, then paint a frame at `now`
    pub fn update(&mut self, now: Duration) {
        while let Some(event) = self.input.poll(now) {
            self.site.dispatch(event.at(), event.event);
        }
        self.site.frame(now);
    }

    /// Whether the page still has animation work pending
    pub fn needs_fast_update(&self) -> bool {
        !self.input.is_empty()
            || self.site.has_frame_work()
            || self.site.is_animating_scroll()
            || self
                .site
                .next_deadline()
                .is_some_and(|deadline| deadline <= self.site.now() + Duration::from_millis(500))
    }

    /// Row the page area should be scrolled to
    pub fn scroll_row(&self) -> u16 {
        (self.site.scroll_offset() / PX_PER_ROW).round() as u16
    }

    pub fn handle_action(&mut self, action: Action, now: Duration) {
        if action != Action::None {
            self.status_message = None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(self.scroll_step, now),
            Action::ScrollUp => self.scroll_by(-self.scroll_step, now),
            Action::ScrollPageDown => self.scroll_by(self.site.viewport_height() * 0.9, now),
            Action::ScrollPageUp => self.scroll_by(-self.site.viewport_height() * 0.9, now),
            Action::JumpToTop => self.input.push(now, UiEvent::Scroll { offset: 0.0 }),
            Action::JumpToBottom => {
                let offset = self.site.max_scroll();
                self.input.push(now, UiEvent::Scroll { offset });
            }
            Action::NextLink | Action::PrevLink => {
                let count = self.site.page().nav_links().len();
                if count > 0 {
                    self.selected_link = if action == Action::NextLink {
                        (self.selected_link + 1) % count
                    } else {
                        (self.selected_link + count - 1) % count
                    };
                }
            }
            Action::FollowLink => {
                if let Some(link) = self.site.page().nav_links().get(self.selected_link) {
                    let href = link.href.clone();
                    self.input.push(now, UiEvent::AnchorClick { href });
                }
            }
            Action::EnterForm => {
                if self.site.form().is_none() {
                    self.status_message = Some("This page has no contact form".to_string());
                    return;
                }
                self.mode = Mode::Form(FieldName::Name);
                self.input.push(now, UiEvent::Focus { field: FieldName::Name });
            }
            Action::LeaveForm => {
                if let Mode::Form(field) = self.mode {
                    self.input.push(now, UiEvent::Blur { field });
                }
                self.mode = Mode::Browse;
            }
            Action::NextField | Action::PrevField => {
                if let Mode::Form(field) = self.mode {
                    let next = step_field(field, action == Action::NextField);
                    self.input.push(now, UiEvent::Blur { field });
                    self.input.push(now, UiEvent::Focus { field: next });
                    self.mode = Mode::Form(next);
                }
            }
            Action::NextChoice | Action::PrevChoice => {
                self.choose_service(action == Action::NextChoice, now);
            }
            Action::InputChar(c) => self.edit(now, |value| value.push(c)),
            Action::Backspace => self.edit(now, |value| {
                value.pop();
            }),
            Action::Submit => self.input.push(now, UiEvent::Submit),
            Action::CloseNotification => self.input.push(now, UiEvent::NotificationClose),
            Action::ClickNotification => self.input.push(now, UiEvent::NotificationClick),
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => self.mode = Mode::Browse,
            Action::None => {}
        }
    }

    fn scroll_by(&mut self, delta: f64, now: Duration) {
        let offset = (self.site.scroll_offset() + delta).clamp(0.0, self.site.max_scroll());
        self.input.push(now, UiEvent::Scroll { offset });
    }

    fn edit(&mut self, now: Duration, change: impl FnOnce(&mut String)) {
        let Mode::Form(field) = self.mode else {
            return;
        };
        let Some(form) = self.site.form() else {
            return;
        };
        let mut value = form.values().get(field).to_string();
        change(&mut value);
        self.input.push(now, UiEvent::Input { field, value });
    }

    fn choose_service(&mut self, forward: bool, now: Duration) {
        let Some(form) = self.site.page().form() else {
            return;
        };
        let choices = &form.services;
        if choices.is_empty() {
            return;
        }
        let current = self
            .site
            .form()
            .map(|form| form.values().service.as_str())
            .and_then(|value| choices.iter().position(|c| c == value));
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => choices.len() - 1,
            (Some(i), true) => (i + 1) % choices.len(),
            (Some(i), false) => (i + choices.len() - 1) % choices.len(),
        };
        let value = choices[index].clone();
        debug!(service = %value, "service chosen");
        self.input.push(
            now,
            UiEvent::Input {
                field: FieldName::Service,
                value,
            },
        );
    }
}

fn step_field(field: FieldName, forward: bool) -> FieldName {
    let all = FieldName::ALL;
    let index = all.iter().position(|f| *f == field).unwrap_or(0);
    if forward {
        all[(index + 1) % all.len()]
    } else {
        all[(index + all.len() - 1) % all.len()]
    }
}

//! Presentation of runtime state
//!
//! State types stay free of class names and style strings. Everything visual
//! is decided here, when a surface asks the site for a [`PageView`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::form::{FieldName, FieldState, FocusState, LabelPosition, SubmitButton};
use crate::notification::{NotificationKind, NotificationPhase, NotificationRecord};
use crate::reveal::RevealState;
use crate::scroll::Transform;

/// Classes and inline styles of one element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub classes: Vec<&'static str>,
    pub styles: BTreeMap<&'static str, String>,
}

impl Rendered {
    pub fn class(mut self, class: &'static str) -> Self {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    pub fn class_if(self, class: &'static str, on: bool) -> Self {
        if on {
            self.class(class)
        } else {
            self
        }
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.insert(property, value.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn style_of(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

/// State that knows how it looks
pub trait Render {
    fn render(&self) -> Rendered;
}

impl Render for RevealState {
    fn render(&self) -> Rendered {
        match self {
            Self::Static => Rendered::default(),
            Self::Pending => Rendered::default().class("fade-in"),
            Self::Appeared => Rendered::default().class("fade-in").class("appear"),
        }
    }
}

/// The form group wrapping a field
impl Render for FieldState {
    fn render(&self) -> Rendered {
        Rendered::default()
            .class("form-group")
            .class_if("focused", self.focus == FocusState::Focused)
            .class_if("has-value", self.has_value)
            .class_if("error", self.error)
    }
}

impl Render for LabelPosition {
    fn render(&self) -> Rendered {
        match self {
            Self::Floating => Rendered::default()
                .style("top", "-12px")
                .style("left", "12px")
                .style("font-size", "0.8rem")
                .style("color", "white")
                .style("background", "linear-gradient(135deg, #667eea, #764ba2)")
                .style("padding", "4px 12px")
                .style("border-radius", "8px")
                .style("font-weight", "500"),
            Self::Resting => Rendered::default()
                .style("top", "16px")
                .style("left", "16px")
                .style("font-size", "1rem")
                .style("color", "rgba(255, 255, 255, 0.7)"),
        }
    }
}

impl Render for SubmitButton {
    fn render(&self) -> Rendered {
        Rendered::default()
            .class("btn-submit")
            .class_if("loading", self.is_disabled())
            .class_if("disabled", self.is_disabled())
    }
}

impl Render for Transform {
    fn render(&self) -> Rendered {
        Rendered::default().style("transform", self.to_string())
    }
}

/// Emphasis on a stat once its counter lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pulse {
    #[default]
    None,
    Raised,
    Settled,
}

impl Render for Pulse {
    fn render(&self) -> Rendered {
        match self {
            Self::None => Rendered::default(),
            Self::Raised => Rendered::default().style("transform", "scale(1.1)"),
            Self::Settled => Rendered::default().style("transform", "scale(1)"),
        }
    }
}

/// Transition position of the notification
impl Render for NotificationPhase {
    fn render(&self) -> Rendered {
        match self {
            Self::Entering => Rendered::default().style("transform", "translateX(400px)"),
            Self::Visible => Rendered::default().style("transform", "translateX(0)"),
            Self::Leaving => Rendered::default()
                .style("transform", "translateX(400px)")
                .style("opacity", "0"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLinkView {
    pub label: String,
    pub href: String,
    pub active: bool,
    pub element: Rendered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealView {
    pub id: String,
    pub label: String,
    pub state: &'static str,
    pub element: Rendered,
}

impl RevealView {
    pub fn new(id: &str, label: &str, state: RevealState) -> Self {
        let name = match state {
            RevealState::Static => "static",
            RevealState::Pending => "pending",
            RevealState::Appeared => "appeared",
        };
        Self {
            id: id.to_string(),
            label: label.to_string(),
            state: name,
            element: state.render(),
        }
    }

    pub fn appeared(&self) -> bool {
        self.element.has_class("appear")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatView {
    pub label: String,
    pub text: String,
    pub pulse: Pulse,
    pub element: Rendered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView {
    pub field: FieldName,
    pub value: String,
    pub group: Rendered,
    pub label: Rendered,
}

impl FieldView {
    pub fn new(field: FieldName, value: &str, state: &FieldState) -> Self {
        Self {
            field,
            value: value.to_string(),
            group: state.render(),
            label: state.label.render(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
    pub element: Rendered,
}

impl From<&SubmitButton> for ButtonView {
    fn from(button: &SubmitButton) -> Self {
        Self {
            label: button.label().to_string(),
            disabled: button.is_disabled(),
            element: button.render(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub submit: ButtonView,
    pub element: Rendered,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationView {
    pub message: String,
    pub kind: NotificationKind,
    pub icon: &'static str,
    pub glyph: char,
    pub phase: &'static str,
    pub element: Rendered,
}

impl NotificationView {
    pub fn new(record: &NotificationRecord, phase: NotificationPhase) -> Self {
        let kind_class = match record.kind {
            NotificationKind::Success => "notification-success",
            NotificationKind::Error => "notification-error",
            NotificationKind::Info => "notification-info",
            NotificationKind::Warning => "notification-warning",
        };
        let phase_name = match phase {
            NotificationPhase::Entering => "entering",
            NotificationPhase::Visible => "visible",
            NotificationPhase::Leaving => "leaving",
        };

        let mut element = phase.render().class("notification").class(kind_class);
        element = element.style("background", record.kind.background());

        Self {
            message: record.message.clone(),
            kind: record.kind,
            icon: record.kind.icon(),
            glyph: record.kind.glyph(),
            phase: phase_name,
            element,
        }
    }

    /// Whether the notification is on screen and not on its way out
    pub fn is_shown(&self) -> bool {
        self.phase == "visible"
    }
}

/// Everything a surface needs to draw the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub title: String,
    pub scroll_offset: f64,
    pub viewport_height: f64,
    pub document_height: f64,
    pub navbar: Rendered,
    pub progress: Rendered,
    pub progress_percent: f64,
    pub nav_links: Vec<NavLinkView>,
    pub hero_graphic: Option<Rendered>,
    pub about_graphic: Option<Rendered>,
    pub reveal: Vec<RevealView>,
    pub stats: Vec<StatView>,
    pub form: Option<FormView>,
    pub notification: Option<NotificationView>,
}

impl PageView {
    pub fn active_link(&self) -> Option<&NavLinkView> {
        self.nav_links.iter().find(|link| link.active)
    }

    pub fn reveal_target(&self, id: &str) -> Option<&RevealView> {
        self.reveal.iter().find(|r| r.id == id)
    }

    pub fn field(&self, field: FieldName) -> Option<&FieldView> {
        self.form.as_ref()?.fields.iter().find(|f| f.field == field)
    }
}

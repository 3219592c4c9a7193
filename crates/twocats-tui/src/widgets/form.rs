use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use twocats_core::form::{validate_field, FieldName};
use twocats_core::render::FormView;
use twocats_core::PageView;

use crate::app::{App, Mode};
use crate::theme::Theme;

pub struct FormWidget;

impl FormWidget {
    pub fn render(frame: &mut Frame, area: Rect, view: &PageView, app: &App) {
        let theme = &app.theme;
        let editing = matches!(app.mode, Mode::Form(_));
        let border = if editing { theme.accent } else { theme.bg2 };
        let block = Block::default()
            .title(" Contact ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg1));

        let Some(form) = &view.form else {
            let empty = Paragraph::new("This page has no contact form")
                .style(Style::default().fg(theme.grey1))
                .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let paragraph = Paragraph::new(form_lines(form, theme))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

fn form_lines(form: &FormView, theme: &Theme) -> Vec<Line<'static>> {
    let locked = form.element.style_of("pointer-events") == Some("none");
    let mut lines = Vec::new();

    for field in &form.fields {
        let focused = field.group.has_class("focused");
        let error = field.group.has_class("error");
        // A floating label sits above the input as a badge
        let floating = field.label.style_of("top") == Some("-12px");

        let mut label_style = Style::default().fg(theme.grey1);
        if floating {
            label_style = Style::default().fg(theme.fg0).bg(theme.accent_alt);
        }
        lines.push(Line::from(Span::styled(
            format!(" {} ", field.field.label()),
            label_style,
        )));

        let marker = if focused { "▸ " } else { "  " };
        let value = if field.value.is_empty() && field.field == FieldName::Service {
            "‹ choose ›".to_string()
        } else {
            field.value.clone()
        };
        let mut value_style = Style::default().fg(theme.fg1);
        if locked {
            value_style = value_style.add_modifier(Modifier::DIM);
        }
        if error {
            value_style = value_style.fg(theme.error).add_modifier(Modifier::UNDERLINED);
        }
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(value, value_style),
        ]));

        if error {
            if let Some(problem) = validate_field(field.field, &field.value) {
                lines.push(Line::from(Span::styled(
                    format!("  {}", problem),
                    Style::default().fg(theme.error),
                )));
            }
        }
        lines.push(Line::default());
    }

    let mut button_style = Style::default()
        .fg(theme.fg0)
        .bg(theme.accent)
        .add_modifier(Modifier::BOLD);
    if form.submit.disabled {
        button_style = button_style.bg(theme.grey0).add_modifier(Modifier::ITALIC);
    }
    lines.push(Line::from(Span::styled(
        format!(" {} ", form.submit.label),
        button_style,
    )));
    lines
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use twocats_core::{Page, Site, SiteConfig, UiEvent};

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_form_shows_errors_and_button() {
        let mut site = Site::new(SiteConfig::default(), Page::two_cats());
        site.dispatch(
            Duration::ZERO,
            UiEvent::Input {
                field: FieldName::Email,
                value: "bad-email".to_string(),
            },
        );
        site.dispatch(Duration::ZERO, UiEvent::Blur { field: FieldName::Email });

        let view = site.render();
        let rendered = text(&form_lines(view.form.as_ref().unwrap(), &Theme::default()));
        assert!(rendered.contains("bad-email"));
        assert!(rendered.contains("Please enter a valid email address"));
        assert!(rendered.contains("‹ choose ›"));
        assert!(rendered.contains(" Send message "));
    }
}

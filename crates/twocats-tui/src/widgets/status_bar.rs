use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use twocats_core::PageView;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, view: &PageView, app: &App) {
        let theme = &app.theme;
        let mode_str = match app.mode {
            Mode::Browse => "BROWSE".to_string(),
            Mode::Form(field) => format!("FORM {}", field.as_str().to_uppercase()),
            Mode::Help => "HELP".to_string(),
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {} | {:.0}px | {:.0}% | t={:.1}s",
                mode_str,
                view.scroll_offset,
                view.progress_percent,
                app.site.now().as_secs_f64()
            ),
        };

        let help_hint = match app.mode {
            Mode::Form(_) => " tab:next enter:send esc:leave ",
            _ => " q:quit j/k:scroll tab:link enter:go f:form ?:help ",
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.chars().count() + help_hint.chars().count());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

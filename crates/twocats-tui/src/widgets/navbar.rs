use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use twocats_core::PageView;

use crate::app::App;

pub struct NavbarWidget;

impl NavbarWidget {
    /// Title, nav links and the scroll progress bar. Needs two rows.
    pub fn render(frame: &mut Frame, area: Rect, view: &PageView, app: &App) {
        let theme = &app.theme;
        let bg = if view.navbar.has_class("scrolled") {
            theme.bg2
        } else {
            theme.bg0
        };

        let mut spans = vec![Span::styled(
            format!(" {} ", view.title),
            Style::default()
                .fg(theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )];
        for (index, link) in view.nav_links.iter().enumerate() {
            let mut style = Style::default().fg(theme.grey1).bg(bg);
            if link.element.has_class("active") {
                style = style.fg(theme.fg0).add_modifier(Modifier::BOLD);
            }
            if index == app.selected_link {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(" ", Style::default().bg(bg)));
            spans.push(Span::styled(link.label.clone(), style));
        }
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let fill = (area.width as usize).saturating_sub(used);
        spans.push(Span::styled(" ".repeat(fill), Style::default().bg(bg)));

        let progress = progress_bar(view.progress_percent, area.width);
        let lines = vec![
            Line::from(spans),
            Line::from(vec![
                Span::styled(progress.0, Style::default().fg(theme.accent).bg(bg)),
                Span::styled(progress.1, Style::default().fg(theme.pending).bg(bg)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Filled and empty parts of a `width`-cell progress bar
fn progress_bar(percent: f64, width: u16) -> (String, String) {
    let width = width as usize;
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    ("━".repeat(filled), "─".repeat(width - filled))
}

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use twocats_core::render::NotificationView;
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

const MAX_WIDTH: u16 = 44;
/// Columns the toast sits off-screen while entering or leaving
const SLIDE_COLUMNS: u16 = 12;

pub struct ToastWidget;

impl ToastWidget {
    /// Draw the notification in the top-right corner of `area`
    pub fn render(frame: &mut Frame, area: Rect, notification: &NotificationView, theme: &Theme) {
        let width = toast_width(&notification.message, area.width);
        let height = 3u16.min(area.height);
        if width == 0 || height == 0 {
            return;
        }

        let slide = match notification.phase {
            "visible" => 0,
            _ => SLIDE_COLUMNS.min(width),
        };
        let x = area.x + area.width.saturating_sub(width + 1) + slide;
        let visible_width = width.min((area.x + area.width).saturating_sub(x));
        let toast_area = Rect::new(x, area.y + 1, visible_width, height);

        let bg = theme.notification(notification.kind);
        let mut style = Style::default().fg(theme.fg0).bg(bg);
        if notification.element.style_of("opacity") == Some("0") {
            style = style.add_modifier(Modifier::DIM);
        }

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Line::from(" × ").right_aligned())
            .style(style);
        let line = Line::from(vec![
            Span::styled(format!("{} ", notification.glyph), style.add_modifier(Modifier::BOLD)),
            Span::styled(notification.message.clone(), style),
        ]);
        frame.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: true }),
            toast_area,
        );
    }
}

/// Border, glyph and message, capped to the screen and `MAX_WIDTH`
fn toast_width(message: &str, screen: u16) -> u16 {
    let content = (message.width() + 4 + 2).min(MAX_WIDTH as usize) as u16;
    content.min(screen.saturating_sub(2))
}

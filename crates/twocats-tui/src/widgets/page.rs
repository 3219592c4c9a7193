use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use twocats_core::page::Page;
use twocats_core::render::{Pulse, RevealView};
use twocats_core::PageView;

use crate::app::{App, PX_PER_ROW};
use crate::theme::Theme;

const HERO_GRAPHIC: &str = "(=^･ω･^=)";
const ABOUT_GRAPHIC: &str = "ฅ^•ﻌ•^ฅ";

pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, view: &PageView, app: &App) {
        let lines = document_lines(view, app.site.page(), &app.theme);
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(app.theme.bg2))
            .style(Style::default().bg(app.theme.bg1));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((app.scroll_row(), 0));
        frame.render_widget(paragraph, area);
    }
}

fn row_of(y: f64) -> usize {
    (y.max(0.0) / PX_PER_ROW).floor() as usize
}

/// Parse a `translateY(...)` pixel offset out of an inline transform
fn translate_y(transform: Option<&str>) -> f64 {
    transform
        .and_then(|t| t.strip_prefix("translateY("))
        .and_then(|t| t.split("px").next())
        .and_then(|px| px.parse().ok())
        .unwrap_or(0.0)
}

fn reveal_style(target: &RevealView, theme: &Theme) -> Style {
    if target.appeared() {
        Style::default().fg(theme.fg0)
    } else if target.element.has_class("fade-in") {
        Style::default().fg(theme.pending)
    } else {
        Style::default().fg(theme.fg1)
    }
}

/// Lay the whole document out as terminal rows
pub fn document_lines(view: &PageView, page: &Page, theme: &Theme) -> Vec<Line<'static>> {
    let total = row_of(view.document_height).max(1);
    let mut rows: Vec<Vec<Span<'static>>> = vec![Vec::new(); total];
    let mut put = |row: usize, span: Span<'static>| {
        if let Some(line) = rows.get_mut(row) {
            if !line.is_empty() {
                line.push(Span::raw("  "));
            }
            line.push(span);
        }
    };

    for section in page.sections() {
        let row = row_of(section.span.top);
        put(
            row,
            Span::styled(
                format!("■ {}", section.title),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        );
        for (offset, text) in section.body.iter().enumerate() {
            put(row + 1 + offset, Span::styled(text.clone(), Style::default().fg(theme.fg1)));
        }
    }

    for (target, reveal) in page.reveal_targets().iter().zip(&view.reveal) {
        let label = if reveal.label.is_empty() {
            reveal.id.clone()
        } else {
            reveal.label.clone()
        };
        put(
            row_of(target.span.top),
            Span::styled(format!("▌{}", label), reveal_style(reveal, theme)),
        );
    }

    if let Some(region) = page.stats() {
        let row = row_of(region.span.top);
        for stat in &view.stats {
            let mut style = Style::default().fg(theme.accent_alt);
            if stat.pulse == Pulse::Raised {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            put(row, Span::styled(stat.text.clone(), style));
            put(row + 1, Span::styled(stat.label.clone(), Style::default().fg(theme.grey1)));
        }
    }

    if let Some(hero) = &view.hero_graphic {
        let y = 300.0 + translate_y(hero.style_of("transform"));
        put(row_of(y), Span::styled(HERO_GRAPHIC, Style::default().fg(theme.accent)));
    }
    if let (Some(about), Some(section)) = (&view.about_graphic, page.about_graphic_section()) {
        let y = section.span.top + 200.0 + translate_y(about.style_of("transform"));
        put(row_of(y), Span::styled(ABOUT_GRAPHIC, Style::default().fg(theme.accent_alt)));
    }

    rows.into_iter().map(Line::from).collect()
}

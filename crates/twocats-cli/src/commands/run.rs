use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::info;

use twocats_core::{Page, Site, SiteConfig};
use twocats_tui::{
    app::Mode,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::{FormWidget, NavbarWidget, PageWidget, PopupWidget, StatusBarWidget, ToastWidget},
    App, Theme,
};

/// Rows taken by the navbar and the status bar
const CHROME_ROWS: u16 = 3;

pub async fn run(config: SiteConfig, page: Page) -> Result<()> {
    let tick_rate_ms = config.ui.tick_rate_ms;
    let animation_fps = config.scroll.animation_fps;
    let title = format!("{} (twocats)", page.title);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(title))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Site::new(config, page), Theme::default());
    let event_handler = EventHandler::with_animation_fps(tick_rate_ms, animation_fps);

    let started = Instant::now();
    let size = terminal.size()?;
    app.resize(size.height.saturating_sub(CHROME_ROWS), started.elapsed());

    // Checked at the end of each iteration to pick the next poll rate
    let mut needs_fast_update = true;

    let result = loop {
        app.update(started.elapsed());
        let view = app.site.render();

        let drawn = terminal.draw(|frame| {
            let size = frame.area();

            // Navbar, page body, status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(size);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(3, 5), Constraint::Ratio(2, 5)])
                .split(main_layout[1]);

            NavbarWidget::render(frame, main_layout[0], &view, &app);
            PageWidget::render(frame, columns[0], &view, &app);
            FormWidget::render(frame, columns[1], &view, &app);
            StatusBarWidget::render(frame, main_layout[2], &view, &app);

            if let Some(notification) = &view.notification {
                ToastWidget::render(frame, main_layout[1], notification, &app.theme);
            }
            if app.mode == Mode::Help {
                PopupWidget::render_help(frame, &app.theme);
            }
        });
        if let Err(e) = drawn {
            break Err(e.into());
        }

        let event = if needs_fast_update {
            event_handler.next_animation()
        } else {
            event_handler.next()
        };
        match event {
            Ok(Some(AppEvent::Key(key))) => {
                let action = handle_key_event(key, &app);
                app.handle_action(action, started.elapsed());
            }
            Ok(Some(AppEvent::Resize(_, height))) => {
                app.resize(height.saturating_sub(CHROME_ROWS), started.elapsed());
            }
            Ok(Some(AppEvent::Tick)) | Ok(None) => {}
            Err(e) => break Err(e),
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        notifications = app.site.notification_history().len(),
        "preview closed"
    );
    result
}

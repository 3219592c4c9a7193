use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use twocats_core::{Page, PageView, Scenario, Site, SiteConfig};

/// Time left after the last event for timers to play out
const SETTLE_TIME: Duration = Duration::from_millis(9000);

pub async fn run(config: SiteConfig, page: Page, path: &Path, json: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario = Scenario::from_toml(&content)
        .with_context(|| format!("parsing scenario {}", path.display()))?;

    let view = replay(config, page, &scenario, json)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}

fn replay(config: SiteConfig, page: Page, scenario: &Scenario, quiet: bool) -> Result<PageView> {
    let mut source = scenario.source();
    let until = match scenario.until_ms {
        Some(ms) => Duration::from_millis(ms),
        None => source.last_at().unwrap_or_default() + SETTLE_TIME,
    };
    info!(
        scenario = %scenario.name,
        events = source.len(),
        until_ms = until.as_millis() as u64,
        "replaying scenario"
    );

    let mut site = Site::new(config, page);
    site.replay(&mut source, scenario.frame_interval(), until);
    let view = site.render();

    if !quiet {
        print_trace(&site, &view);
    }
    Ok(view)
}

fn print_trace(site: &Site, view: &PageView) {
    println!("Notifications:");
    if site.notification_history().is_empty() {
        println!("  (none)");
    }
    for record in site.notification_history() {
        println!(
            "  {:>6}ms  {} {:<7}  {}",
            record.created_at.as_millis(),
            record.kind.glyph(),
            record.kind,
            record.message
        );
    }

    println!();
    println!(
        "Scroll:   {:.0}px of {:.0}px ({:.0}%)",
        view.scroll_offset, view.document_height, view.progress_percent
    );
    println!(
        "Navbar:   {}",
        if view.navbar.has_class("scrolled") { "scrolled" } else { "top" }
    );
    println!(
        "Active:   {}",
        view.active_link().map(|l| l.label.as_str()).unwrap_or("-")
    );

    let appeared = view.reveal.iter().filter(|r| r.appeared()).count();
    println!("Revealed: {}/{}", appeared, view.reveal.len());
    for target in view.reveal.iter().filter(|r| !r.appeared()) {
        println!("  pending {}", target.id);
    }

    if !view.stats.is_empty() {
        let stats: Vec<String> = view
            .stats
            .iter()
            .map(|s| format!("{} {}", s.text, s.label))
            .collect();
        println!("Stats:    {}", stats.join(" | "));
    }

    if let Some(form) = &view.form {
        println!(
            "Button:   {}{}",
            form.submit.label,
            if form.submit.disabled { " (disabled)" } else { "" }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_submit_scenario() {
        let scenario = Scenario::from_toml(
            r##"
            name = "submit"
            until_ms = 10000

            [[event]]
            at_ms = 0
            type = "input"
            field = "name"
            value = "Mia"

            [[event]]
            at_ms = 10
            type = "input"
            field = "email"
            value = "mia@example.com"

            [[event]]
            at_ms = 20
            type = "input"
            field = "service"
            value = "web"

            [[event]]
            at_ms = 30
            type = "input"
            field = "message"
            value = "We need a new landing page"

            [[event]]
            at_ms = 40
            type = "submit"

            [[event]]
            at_ms = 100
            type = "anchor_click"
            href = "#contact"
            "##,
        )
        .unwrap();

        let view = replay(SiteConfig::default(), Page::two_cats(), &scenario, true).unwrap();
        let form = view.form.as_ref().unwrap();
        assert!(!form.submit.disabled);
        assert_eq!(form.submit.label, "Send message");
        assert_eq!(view.active_link().map(|l| l.label.as_str()), Some("Contact"));
        // Notification has played out within the settle window
        assert!(view.notification.is_none());
    }
}

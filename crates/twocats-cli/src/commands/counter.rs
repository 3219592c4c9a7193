use std::time::Duration;

use anyhow::{bail, Result};
use twocats_core::counter::{counter_values, parse_stat};
use twocats_core::SiteConfig;

pub fn run(
    config: &SiteConfig,
    stat: &str,
    duration_ms: Option<u64>,
    tick_ms: Option<u64>,
) -> Result<()> {
    let Some(parsed) = parse_stat(stat) else {
        bail!("'{}' has no number to count up to", stat);
    };
    let duration = duration_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.timing.counter_duration());
    let tick = tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.timing.counter_tick());
    if tick.is_zero() {
        bail!("tick must be at least 1ms");
    }

    let values = counter_values(parsed.number, duration, tick);
    println!(
        "{} ticks of {}ms over {}ms:",
        values.len() - 1,
        tick.as_millis(),
        duration.as_millis()
    );
    let shown: Vec<String> = values
        .iter()
        .map(|v| format!("{}{}", v, parsed.suffix))
        .collect();
    println!("{}", shown.join(" "));
    Ok(())
}

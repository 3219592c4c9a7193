use std::path::Path;

use anyhow::Result;
use twocats_core::SiteConfig;

pub fn run(config: &SiteConfig, explicit: Option<&Path>) -> Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(SiteConfig::config_path);
    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("# config: {}{}", path.display(), status);
    println!("# log:    {}", config.log_path().display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

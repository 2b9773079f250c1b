use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use trailhead_core::config::Config;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("load config")?;
    let warnings = config.validate();

    if json {
        print_json(&warnings)?;
        return Ok(());
    }
    if warnings.is_empty() {
        println!("Config OK.");
        return Ok(());
    }
    for warning in &warnings {
        println!("{:?}: {}", warning.level, warning.message);
    }
    anyhow::bail!("{} config warning(s)", warnings.len());
}

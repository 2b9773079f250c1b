use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use trailhead_core::config::Config;
use trailhead_core::gate;
use trailhead_core::store::UserStore;

pub fn run(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let config = Config::load(root).context("load config")?;
    let record = store.load(id)?;
    let report = gate::evaluate(&record, super::today(), config.tenure_days)?;

    if json {
        print_json(&report)?;
        return Ok(());
    }

    for check in &report.checks {
        let mark = if check.met { "ok " } else { "NOT" };
        println!("[{mark}] {}", check.condition.describe());
    }
    println!(
        "Tenure: {} of {} days",
        report.tenure_days, config.tenure_days
    );
    if !report.incomplete_sections.is_empty() {
        let names: Vec<String> = report
            .incomplete_sections
            .iter()
            .map(|s| s.to_string())
            .collect();
        println!("Open sections: {}", names.join(", "));
    }
    if report.all_met() {
        println!("All gates met — exam unlock and promotion are available.");
    }
    Ok(())
}

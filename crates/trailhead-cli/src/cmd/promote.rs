use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use trailhead_core::config::Config;
use trailhead_core::mentor;
use trailhead_core::store::UserStore;

pub fn run(root: &Path, mentor_id: u64, trainee: u64, json: bool) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let config = Config::load(root).context("load config")?;
    let record = mentor::promote(&store, mentor_id, trainee, super::today(), config.tenure_days)?;

    if json {
        print_json(&record.summary())?;
    } else {
        println!("{} is now an employee.", record.full_name());
    }
    Ok(())
}

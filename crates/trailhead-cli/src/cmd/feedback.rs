use std::path::Path;
use trailhead_core::feedback;
use trailhead_core::store::UserStore;

pub fn run(root: &Path, id: u64, text: &str) -> anyhow::Result<()> {
    let store = UserStore::new(root);
    let record = store.load(id)?;
    feedback::append(root, id, &record.first_name, &record.last_name, text)?;
    println!("Thanks, your feedback was recorded.");
    Ok(())
}

use std::path::Path;
use trailhead_core::config::Config;
use trailhead_core::{io, paths};

pub fn run(root: &Path) -> anyhow::Result<()> {
    io::ensure_dir(&paths::users_dir(root))?;

    let config_path = paths::config_path(root);
    if config_path.exists() {
        println!("Already initialized at {}", paths::data_dir(root).display());
        return Ok(());
    }
    Config::default().save(root)?;

    println!("Initialized {}", paths::data_dir(root).display());
    println!("Drop your training catalog at {}", paths::content_path(root).display());
    Ok(())
}

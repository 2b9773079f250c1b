use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DATA_DIR: &str = ".trailhead";
pub const USERS_DIR: &str = ".trailhead/users";

pub const CONFIG_FILE: &str = ".trailhead/config.yaml";
pub const CONTENT_FILE: &str = ".trailhead/training.json";
pub const FEEDBACK_FILE: &str = ".trailhead/feedback.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn users_dir(root: &Path) -> PathBuf {
    root.join(USERS_DIR)
}

pub fn user_file(root: &Path, user_id: u64) -> PathBuf {
    users_dir(root).join(format!("user_{user_id}.json"))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn content_path(root: &Path) -> PathBuf {
    root.join(CONTENT_FILE)
}

pub fn feedback_path(root: &Path) -> PathBuf {
    root.join(FEEDBACK_FILE)
}

/// Parse a user id back out of a `user_<id>.json` file name.
pub fn parse_user_file(name: &str) -> Option<u64> {
    name.strip_prefix("user_")?
        .strip_suffix(".json")?
        .parse()
        .ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/site");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/site/.trailhead/config.yaml")
        );
        assert_eq!(
            user_file(root, 42),
            PathBuf::from("/tmp/site/.trailhead/users/user_42.json")
        );
    }

    #[test]
    fn parse_user_file_names() {
        assert_eq!(parse_user_file("user_42.json"), Some(42));
        assert_eq!(parse_user_file("user_.json"), None);
        assert_eq!(parse_user_file("user_42.yaml"), None);
        assert_eq!(parse_user_file("42.json"), None);
    }
}

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub first_name: String,
    pub last_name: String,
    pub feedbacks: Vec<String>,
}

/// All collected feedback, one JSON document keyed by user id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackBook {
    pub entries: BTreeMap<u64, FeedbackEntry>,
}

impl FeedbackBook {
    /// A missing or empty file is an empty book.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::feedback_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let book: FeedbackBook = serde_json::from_str(&data)?;
        Ok(book)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::feedback_path(root);
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }
}

/// Append one feedback message, creating the user's entry on first use.
pub fn append(
    root: &Path,
    user_id: u64,
    first_name: &str,
    last_name: &str,
    text: &str,
) -> Result<()> {
    let mut book = FeedbackBook::load(root)?;
    book.entries
        .entry(user_id)
        .or_insert_with(|| FeedbackEntry {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            feedbacks: Vec::new(),
        })
        .feedbacks
        .push(text.to_string());
    book.save(root)?;
    tracing::info!(user_id, "feedback saved");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty_book() {
        let dir = TempDir::new().unwrap();
        assert!(FeedbackBook::load(dir.path()).unwrap().entries.is_empty());
    }

    #[test]
    fn append_accumulates_per_user() {
        let dir = TempDir::new().unwrap();
        append(dir.path(), 1, "Ada", "Petrova", "great onboarding").unwrap();
        append(dir.path(), 1, "Ada", "Petrova", "quiz two was hard").unwrap();
        append(dir.path(), 2, "Igor", "Volkov", "more breaks please").unwrap();

        let book = FeedbackBook::load(dir.path()).unwrap();
        assert_eq!(book.entries.len(), 2);
        assert_eq!(book.entries[&1].feedbacks.len(), 2);
        assert_eq!(book.entries[&2].first_name, "Igor");
    }

    #[test]
    fn empty_file_is_empty_book() {
        let dir = TempDir::new().unwrap();
        let path = paths::feedback_path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "").unwrap();
        assert!(FeedbackBook::load(dir.path()).unwrap().entries.is_empty());
    }
}

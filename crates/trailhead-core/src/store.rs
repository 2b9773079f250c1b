use crate::error::{Result, TrailheadError};
use crate::paths;
use crate::profile::UserRecord;
use std::path::{Path, PathBuf};

/// Per-user document repository. Every record is one JSON file read and
/// written wholesale; `update` is the only read-modify-write path, so call
/// sites cannot interleave partial writes. Last write wins — the delivery
/// layer is expected to dispatch at most one event per user at a time.
pub struct UserStore {
    root: PathBuf,
}

impl UserStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self, user_id: u64) -> bool {
        paths::user_file(&self.root, user_id).exists()
    }

    pub fn load(&self, user_id: u64) -> Result<UserRecord> {
        let path = paths::user_file(&self.root, user_id);
        if !path.exists() {
            return Err(TrailheadError::ProfileNotFound(user_id));
        }
        let data = std::fs::read_to_string(&path)?;
        let record: UserRecord = serde_json::from_str(&data)?;
        Ok(record)
    }

    pub fn try_load(&self, user_id: u64) -> Result<Option<UserRecord>> {
        match self.load(user_id) {
            Ok(record) => Ok(Some(record)),
            Err(TrailheadError::ProfileNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, record: &UserRecord) -> Result<()> {
        let path = paths::user_file(&self.root, record.user_id);
        let data = serde_json::to_string_pretty(record)?;
        crate::io::atomic_write(&path, data.as_bytes())?;
        tracing::info!(user_id = record.user_id, "record saved");
        Ok(())
    }

    /// Load, mutate, save as one operation. The record is not written when
    /// the closure fails, so a failed operation leaves no partial state.
    pub fn update<F>(&self, user_id: u64, f: F) -> Result<UserRecord>
    where
        F: FnOnce(&mut UserRecord) -> Result<()>,
    {
        let mut record = self.load(user_id)?;
        f(&mut record)?;
        self.save(&record)?;
        Ok(record)
    }

    /// All stored user ids, ascending. Used by the manager view.
    pub fn list_ids(&self) -> Result<Vec<u64>> {
        let dir = paths::users_dir(&self.root);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if let Some(id) = paths::parse_user_file(&entry.file_name().to_string_lossy()) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::CoursePlan;
    use crate::profile::Training;
    use crate::types::{Course, Role};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(id: u64) -> UserRecord {
        UserRecord {
            user_id: id,
            role: Role::Trainee,
            first_name: "Ada".to_string(),
            last_name: "Petrova".to_string(),
            position: None,
            city: None,
            venue: None,
            email: None,
            phone_number: None,
            registration_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            warcoin: 0,
            vr_room: false,
            vr_extreme: false,
            attractions: Vec::new(),
            training: Some(Training::new(Course::Base, CoursePlan::build(Course::Base, &[]))),
            trainees: Vec::new(),
        }
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        store.save(&record(42)).unwrap();
        let loaded = store.load(42).unwrap();
        assert_eq!(loaded.first_name, "Ada");
        assert!(store.exists(42));
    }

    #[test]
    fn load_missing_profile() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        assert!(matches!(
            store.load(7),
            Err(TrailheadError::ProfileNotFound(7))
        ));
        assert!(store.try_load(7).unwrap().is_none());
    }

    #[test]
    fn update_persists_mutation() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        store.save(&record(42)).unwrap();

        let updated = store
            .update(42, |r| {
                r.award_warcoin(5);
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.warcoin, 5);
        assert_eq!(store.load(42).unwrap().warcoin, 5);
    }

    #[test]
    fn failed_update_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        store.save(&record(42)).unwrap();

        let result = store.update(42, |r| {
            r.award_warcoin(5);
            Err(TrailheadError::TaskNotFound(0))
        });
        assert!(result.is_err());
        assert_eq!(store.load(42).unwrap().warcoin, 0);
    }

    #[test]
    fn list_ids_sorted() {
        let dir = TempDir::new().unwrap();
        let store = UserStore::new(dir.path());
        for id in [30, 10, 20] {
            store.save(&record(id)).unwrap();
        }
        assert_eq!(store.list_ids().unwrap(), [10, 20, 30]);
    }
}

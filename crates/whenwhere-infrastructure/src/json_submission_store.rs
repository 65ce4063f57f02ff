//! File-backed submission store.
//!
//! Persists completed submissions as a JSON array of records at a single
//! well-known path. Writes go through a read-modify-write cycle guarded
//! by an exclusive advisory lock on a sibling `.lock` file, then land via
//! temp-file + atomic rename so a crash mid-write never truncates the
//! collected data.
//!
//! The store is deliberately forgiving on the read side: a missing,
//! empty, or unparseable file is treated as an empty record list. The
//! walkthrough must never halt because local storage is in a bad state.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tracing::{debug, warn};

use whenwhere_core::error::{Result, StudyError};
use whenwhere_core::submission::{SubmissionRecord, SubmissionSink};

use crate::paths::StudyPaths;

/// Submission sink backed by a local JSON file.
pub struct JsonSubmissionStore {
    path: PathBuf,
}

impl JsonSubmissionStore {
    /// Creates a store writing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform-default location
    /// (`<data_dir>/whenwhere/submissions.json`).
    pub fn at_default_location() -> Result<Self> {
        let path = StudyPaths::submissions_file()
            .map_err(|e| StudyError::data_access(e.to_string()))?;
        Ok(Self::new(path))
    }

    /// The file this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record currently on disk.
    ///
    /// Missing or unreadable content yields an empty list, never an
    /// error; a corrupt file is reported via a warning log only.
    pub fn load_all(&self) -> Vec<SubmissionRecord> {
        read_records(&self.path)
    }

    fn append_sync(path: &Path, record: &SubmissionRecord) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let _lock = FileLock::acquire(path)?;

        let mut records = read_records(path);
        records.push(record.clone());

        let json = serde_json::to_string_pretty(&records)?;
        write_atomic(path, json.as_bytes())?;

        debug!(
            record_id = %record.id,
            total = records.len(),
            "Appended submission record"
        );
        Ok(())
    }
}

#[async_trait]
impl SubmissionSink for JsonSubmissionStore {
    async fn append(&self, record: &SubmissionRecord) -> Result<()> {
        let path = self.path.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || JsonSubmissionStore::append_sync(&path, &record))
            .await
            .map_err(|e| StudyError::internal(format!("append task panicked: {e}")))?
    }
}

/// Reads the record list, tolerating absent, empty, and corrupt files.
fn read_records(path: &Path) -> Vec<SubmissionRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read submissions file, starting empty");
            return Vec::new();
        }
    };

    if content.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str(&content) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Corrupt submissions file, starting empty");
            Vec::new()
        }
    }
}

/// Writes content to a temp file in the target directory, then renames
/// it over the target. Rename within one directory is atomic on the
/// platforms this tool runs on.
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let mut tmp = File::create(&tmp_path)?;
    tmp.write_all(content)?;
    tmp.sync_all()?;
    drop(tmp);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Exclusive advisory lock on a sibling `.lock` file.
///
/// The lock file, not the data file, carries the lock: the data file is
/// replaced by rename on every write, which would silently detach a lock
/// held on it. Released on drop.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(data_path: &Path) -> Result<Self> {
        let lock_path = data_path.with_extension("json.lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)?;
        file.lock_exclusive()
            .map_err(|e| StudyError::data_access(format!("failed to lock submissions file: {e}")))?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            warn!(error = %e, "Failed to release submissions lock");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;
    use whenwhere_core::experience::ExperienceOrder;
    use whenwhere_core::participant::ParticipantIdentity;
    use whenwhere_core::survey::SurveyResponses;

    fn sample_record(id: &str) -> SubmissionRecord {
        SubmissionRecord {
            id: id.to_string(),
            identity: ParticipantIdentity {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
            },
            experience_order: ExperienceOrder::sample(&mut StdRng::seed_from_u64(1)),
            responses: SurveyResponses {
                interface_ranking: vec![],
                interface_why: String::new(),
                pain_level: 7,
                time_match_value: None,
                what_matters_more: None,
                form_completion_likelihood: None,
                group_size: None,
                additional_thoughts: "worked fine".to_string(),
            },
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_append_creates_file_and_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/submissions.json");
        let store = JsonSubmissionStore::new(&path);

        store.append(&sample_record("r1")).await.unwrap();

        assert!(path.exists());
        let records = store.load_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "r1");
    }

    #[tokio::test]
    async fn test_appends_accumulate_in_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonSubmissionStore::new(dir.path().join("submissions.json"));

        store.append(&sample_record("first")).await.unwrap();
        store.append(&sample_record("second")).await.unwrap();

        let records = store.load_all();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "first");
        assert_eq!(records[1].id, "second");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced_not_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("submissions.json");
        fs::write(&path, "{ not valid json at all").unwrap();
        let store = JsonSubmissionStore::new(&path);

        assert!(store.load_all().is_empty());

        store.append(&sample_record("fresh")).await.unwrap();
        let records = store.load_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "fresh");
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("submissions.json");
        fs::write(&path, "").unwrap();
        let store = JsonSubmissionStore::new(&path);

        assert!(store.load_all().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_record_fields() {
        let dir = TempDir::new().unwrap();
        let store = JsonSubmissionStore::new(dir.path().join("submissions.json"));
        let record = sample_record("rt");

        store.append(&record).await.unwrap();
        let loaded = &store.load_all()[0];

        assert_eq!(loaded.identity, record.identity);
        assert_eq!(loaded.experience_order, record.experience_order);
        assert_eq!(loaded.responses, record.responses);
    }
}

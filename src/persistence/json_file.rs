//! JSON file implementation of the record store.
//!
//! The whole collection lives in one pretty-printed JSON array. Every call
//! re-reads or re-writes the full file; nothing is cached between calls.
//! Writes go to a uniquely named temp file next to the target and are
//! moved into place, so readers never observe a partially written file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use super::seed::seed_collection;
use crate::domain::RecordCollection;
use crate::error::RosterError;

/// File-backed store for the full [`RecordCollection`].
///
/// Concurrent saves are last-writer-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`. Nothing is touched
    /// until the first call.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the full collection, seeding the file first if
    /// it does not exist.
    ///
    /// # Errors
    ///
    /// - [`RosterError::MalformedCollection`] if the file is not valid JSON
    ///   or not an array.
    /// - [`RosterError::InvalidRecord`] for the first invalid element.
    /// - [`RosterError::Io`] if the file cannot be created or read.
    pub async fn load(&self) -> Result<RecordCollection, RosterError> {
        self.ensure_seeded().await?;

        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| RosterError::io(&self.path, e))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| RosterError::MalformedCollection(format!("invalid JSON: {e}")))?;
        let records = RecordCollection::from_json(&value).map_err(RosterError::from_stored)?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "collection read");
        Ok(records)
    }

    /// Replaces the file content with `records`.
    ///
    /// Creates the parent directory if needed. Returns the number of
    /// records written. On failure the previous content is left intact.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Io`] if the directory or file cannot be
    /// written, or [`RosterError::Encode`] if serialization fails.
    pub async fn save(&self, records: &RecordCollection) -> Result<usize, RosterError> {
        self.ensure_parent_dir().await?;
        let bytes = encode(records)?;
        let tmp = self.temp_path();

        let written = match fs::write(&tmp, &bytes).await {
            Ok(()) => fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(RosterError::io(&self.path, e));
        }

        tracing::debug!(path = %self.path.display(), count = records.len(), "collection written");
        Ok(records.len())
    }

    /// Creates the file with the seed collection if it does not exist.
    ///
    /// Creation is atomic: the seed is written to a temp file and
    /// hard-linked into place, so if another caller creates the file
    /// first its content is kept. Returns `true` if this call created it.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Io`] if the file cannot be created.
    pub async fn ensure_seeded(&self) -> Result<bool, RosterError> {
        let exists = fs::try_exists(&self.path)
            .await
            .map_err(|e| RosterError::io(&self.path, e))?;
        if exists {
            return Ok(false);
        }

        self.ensure_parent_dir().await?;
        let seed = seed_collection();
        let bytes = encode(&seed)?;
        let tmp = self.temp_path();

        let linked = match fs::write(&tmp, &bytes).await {
            Ok(()) => fs::hard_link(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        let _ = fs::remove_file(&tmp).await;

        match linked {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), count = seed.len(), "seeded record file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(RosterError::io(&self.path, e)),
        }
    }

    async fn ensure_parent_dir(&self) -> Result<(), RosterError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| RosterError::io(parent, e)),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4()))
    }
}

/// Encodes a collection as pretty-printed JSON (2-space indent) with a
/// trailing newline.
fn encode(records: &RecordCollection) -> Result<Vec<u8>, RosterError> {
    let mut bytes = serde_json::to_vec_pretty(records)?;
    bytes.push(b'\n');
    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{RecordField, UserRecord};
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("data").join("users.json"))
    }

    fn record(name: &str, age: u64) -> UserRecord {
        let Ok(record) = UserRecord::new(name, age) else {
            panic!("valid record");
        };
        record
    }

    fn temp_dir() -> TempDir {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        dir
    }

    #[tokio::test]
    async fn first_load_seeds_defaults() {
        let dir = temp_dir();
        let store = store_in(&dir);

        let records = assert_ok!(store.load().await);
        assert_eq!(records, seed_collection());
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn load_is_idempotent() {
        let dir = temp_dir();
        let store = store_in(&dir);

        let first = assert_ok!(store.load().await);
        let second = assert_ok!(store.load().await);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn ensure_seeded_only_creates_once() {
        let dir = temp_dir();
        let store = store_in(&dir);

        assert!(assert_ok!(store.ensure_seeded().await));
        assert!(!assert_ok!(store.ensure_seeded().await));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = temp_dir();
        let store = store_in(&dir);
        let records = RecordCollection::from(vec![
            record("Zé", 40),
            record("Ana", 0),
            record("Zé", 40),
        ]);

        assert_eq!(assert_ok!(store.save(&records).await), 3);
        let loaded = assert_ok!(store.load().await);
        assert_eq!(loaded, records);
    }

    #[tokio::test]
    async fn save_empty_then_load_empty() {
        let dir = temp_dir();
        let store = store_in(&dir);

        assert_eq!(assert_ok!(store.save(&RecordCollection::new()).await), 0);
        let loaded = assert_ok!(store.load().await);
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_creates_missing_directory_and_pretty_prints() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("a").join("b").join("users.json"));
        let records = RecordCollection::from(vec![record("Ana", 22)]);

        assert_ok!(store.save(&records).await);
        let Ok(text) = std::fs::read_to_string(store.path()) else {
            panic!("file must exist");
        };
        assert!(text.starts_with("[\n  {\n    \"name\": \"Ana\""));
        assert!(text.ends_with("]\n"));
    }

    #[tokio::test]
    async fn save_leaves_no_temp_files() {
        let dir = temp_dir();
        let store = store_in(&dir);
        assert_ok!(store.load().await);
        assert_ok!(store.save(&RecordCollection::new()).await);

        let Some(parent) = store.path().parent() else {
            panic!("store path has a parent");
        };
        let Ok(entries) = std::fs::read_dir(parent) else {
            panic!("data dir exists");
        };
        let names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["users.json"]);
    }

    #[tokio::test]
    async fn non_array_content_is_malformed() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert_ok!(std::fs::write(store.path(), "\"not an array\""));

        let err = assert_err!(store.load().await);
        assert!(matches!(err, RosterError::MalformedCollection(_)));
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert_ok!(std::fs::write(store.path(), "{ nome: \"Ana\", idade: 22 }"));

        let err = assert_err!(store.load().await);
        assert!(matches!(err, RosterError::MalformedCollection(_)));
    }

    #[tokio::test]
    async fn invalid_stored_record_fails_whole_load() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert_ok!(std::fs::write(
            store.path(),
            r#"[{"name":"Ana","age":22},{"name":"Carlos"}]"#
        ));

        let err = assert_err!(store.load().await);
        let RosterError::InvalidRecord { index, field, .. } = err else {
            panic!("expected invalid record, got {err}");
        };
        assert_eq!(index, 1);
        assert_eq!(field, RecordField::Age);
    }

    #[tokio::test]
    async fn float_written_whole_ages_load() {
        let dir = temp_dir();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert_ok!(std::fs::write(
            store.path(),
            r#"[{"name":"Ana","age":22.0},{"name":"Carlos","age":17}]"#
        ));

        let records = assert_ok!(store.load().await);
        let ages: Vec<u64> = records.iter().map(UserRecord::age).collect();
        assert_eq!(ages, vec![22, 17]);
    }

    #[tokio::test]
    async fn unreadable_path_is_io_failure() {
        let dir = temp_dir();
        // A directory where the file should be.
        let store = JsonFileStore::new(dir.path());

        let err = assert_err!(store.load().await);
        assert!(matches!(err, RosterError::Io { .. }));
    }
}

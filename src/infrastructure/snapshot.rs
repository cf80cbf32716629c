use crate::domain::ports::SnapshotStore;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Whole-collection JSON store with atomic replacement.
///
/// `save` writes the full array to a temporary file in the target
/// directory and renames it over the destination, so a crash mid-write
/// leaves the previous snapshot intact rather than a truncated file.
pub struct JsonSnapshot<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonSnapshot<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[async_trait]
impl<T> SnapshotStore<T> for JsonSnapshot<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn save(&self, items: &[T]) -> Result<()> {
        let mut tmp = NamedTempFile::new_in(self.parent())?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), items)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    async fn load(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::alert::{Alert, Severity};
    use chrono::Utc;
    use tempfile::tempdir;

    fn alert(id: u64) -> Alert {
        Alert {
            alert_id: format!("ALT{id:08}"),
            account_id: "op_aud".to_string(),
            severity: Severity::Medium,
            message: "Low balance warning: Operating Account has 4999.99 AUD".to_string(),
            timestamp: Utc::now(),
            acknowledged: false,
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store: JsonSnapshot<Alert> = JsonSnapshot::new(dir.path().join("alerts.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store: JsonSnapshot<Alert> = JsonSnapshot::new(dir.path().join("alerts.json"));

        store.save(&[alert(1)]).await.unwrap();
        store.save(&[alert(1), alert(2)]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].alert_id, "ALT00000002");
    }

    #[tokio::test]
    async fn test_save_leaves_no_stray_temp_files() {
        let dir = tempdir().unwrap();
        let store: JsonSnapshot<Alert> = JsonSnapshot::new(dir.path().join("alerts.json"));
        store.save(&[alert(1)]).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}

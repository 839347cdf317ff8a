use crate::error::ExportError;
use crate::model::MovieList;
use crate::storage::ListStorage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backup document written by export and read by import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub lists: Vec<MovieList>,
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    pub fn new(lists: &[MovieList], exported_at: DateTime<Utc>) -> Self {
        Self {
            lists: lists.to_vec(),
            exported_at,
        }
    }

    /// `watchlist-backup-<YYYY-MM-DD>.json`, dated by the export time.
    pub fn file_name(&self) -> String {
        format!("watchlist-backup-{}.json", self.exported_at.format("%Y-%m-%d"))
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Write a backup of `lists` into `dir` and return the file path.
pub fn export_to_dir(
    lists: &[MovieList],
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let doc = ExportDocument::new(lists, now);
    std::fs::create_dir_all(dir)?;
    let path = dir.join(doc.file_name());
    std::fs::write(&path, doc.to_json()?)?;
    tracing::info!(path = %path.display(), lists = lists.len(), "exported lists");
    Ok(path)
}

/// Replace the stored lists with the ones in a backup file.
pub fn import_from_file(path: &Path, storage: &mut ListStorage) -> Result<Vec<MovieList>, ExportError> {
    let raw = std::fs::read_to_string(path)?;
    let doc = ExportDocument::from_json(&raw)?;
    storage.save(&doc.lists)?;
    tracing::info!(
        path = %path.display(),
        lists = doc.lists.len(),
        exported_at = %doc.exported_at,
        "imported lists"
    );
    Ok(doc.lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::movie;
    use crate::model::{WATCHED_LIST_ID, Watchlist};
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn populated() -> Watchlist {
        let mut watchlist = Watchlist::default();
        let id = watchlist.create_list("Festival").unwrap().id.clone();
        watchlist.toggle_membership(&movie(1, "Paprika", "Satoshi Kon", &["Anime"]), &id);
        watchlist.toggle_membership(&movie(2, "Perfect Blue", "Satoshi Kon", &["Thriller"]), &id);
        watchlist.toggle_membership(&movie(2, "Perfect Blue", "Satoshi Kon", &["Thriller"]), WATCHED_LIST_ID);
        watchlist
    }

    #[test]
    fn test_file_name_uses_export_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 0).unwrap();
        let doc = ExportDocument::new(&[], at);
        assert_eq!(doc.file_name(), "watchlist-backup-2024-03-09.json");
    }

    #[test]
    fn test_document_wire_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let doc = ExportDocument::new(populated().lists(), at);
        let value: serde_json::Value = serde_json::from_str(&doc.to_json().unwrap()).unwrap();
        assert!(value["exportedAt"].as_str().unwrap().starts_with("2024-03-09T12:00:00"));
        assert_eq!(value["lists"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_export_then_import_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let watchlist = populated();
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 8, 30, 0).unwrap();
        let path = export_to_dir(watchlist.lists(), dir.path(), now).unwrap();
        assert!(path.ends_with("watchlist-backup-2025-01-02.json"));

        let store = MemoryStore::new();
        let mut storage = ListStorage::new(store.clone());
        let imported = import_from_file(&path, &mut storage).unwrap();
        assert_eq!(imported, watchlist.lists());
        assert_eq!(ListStorage::new(store).load(), watchlist.lists());
    }

    #[test]
    fn test_import_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"lists\": 5}").unwrap();
        let mut storage = ListStorage::new(MemoryStore::new());
        assert!(matches!(
            import_from_file(&path, &mut storage),
            Err(ExportError::Format(_))
        ));
    }
}

//! Progress Tracking
//!
//! Remembers which error codes the user has opened, persisted as a small
//! JSON file in the data directory.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PROGRESS_FILE: &str = "progress.json";

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Failed to access progress file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode progress: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProgressError>;

/// Persisted progress document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Codes in the order they were first opened.
    #[serde(default)]
    pub viewed: Vec<String>,
    /// Code -> most recent visit.
    #[serde(default)]
    pub last_visited: BTreeMap<String, DateTime<Utc>>,
}

#[derive(Debug)]
pub struct ProgressStore {
    /// `None` keeps progress in memory only.
    path: Option<PathBuf>,
    progress: Progress,
}

impl ProgressStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let progress = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(progress) => progress,
                Err(e) => {
                    log::warn!(
                        "Ignoring corrupt progress file {}: {e}",
                        path.display()
                    );
                    Progress::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Progress::default(),
            Err(e) => {
                log::warn!("Failed to read progress file {}: {e}", path.display());
                Progress::default()
            }
        };

        Self {
            path: Some(path),
            progress,
        }
    }

    /// Open `progress.json` inside `data_dir`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::open(data_dir.join(PROGRESS_FILE))
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            progress: Progress::default(),
        }
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Record a visit now. Adds the code once; always refreshes the timestamp.
    pub fn mark_viewed(&mut self, code: &str) -> Result<()> {
        self.mark_viewed_at(code, Utc::now())
    }

    pub fn mark_viewed_at(&mut self, code: &str, at: DateTime<Utc>) -> Result<()> {
        let code = normalize(code);
        if !self.progress.viewed.contains(&code) {
            self.progress.viewed.push(code.clone());
        }
        self.progress.last_visited.insert(code, at);
        self.save()
    }

    pub fn is_viewed(&self, code: &str) -> bool {
        self.progress.viewed.contains(&normalize(code))
    }

    pub fn last_visited(&self, code: &str) -> Option<DateTime<Utc>> {
        self.progress.last_visited.get(&normalize(code)).copied()
    }

    pub fn viewed_count(&self) -> usize {
        self.progress.viewed.len()
    }

    /// Share of `total` codes viewed, rounded to a whole percent.
    pub fn completion_percentage(&self, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        let ratio = self.progress.viewed.len() as f64 / total as f64;
        (ratio * 100.0).round() as u32
    }

    /// Forget everything and remove the file.
    pub fn clear(&mut self) -> Result<()> {
        self.progress = Progress::default();
        let Some(path) = &self.path else {
            return Ok(());
        };
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ProgressError::Io {
                path: path.clone(),
                source,
            }),
        }
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| ProgressError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.progress)?;
        std::fs::write(path, json).map_err(io_err)
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_mark_viewed_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProgressStore::in_data_dir(dir.path());
        store.mark_viewed("ac04").unwrap();

        let reopened = ProgressStore::in_data_dir(dir.path());
        assert!(reopened.is_viewed("AC04"));
        assert_eq!(reopened.progress().viewed, vec!["AC04"]);
    }

    #[test]
    fn test_repeat_visit_refreshes_timestamp_only() {
        let mut store = ProgressStore::in_memory();
        let first = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
        store.mark_viewed_at("AM04", first).unwrap();
        store.mark_viewed_at("AM04", second).unwrap();
        assert_eq!(store.viewed_count(), 1);
        assert_eq!(store.last_visited("am04"), Some(second));
    }

    #[test]
    fn test_completion_percentage() {
        let mut store = ProgressStore::in_memory();
        assert_eq!(store.completion_percentage(0), 0);
        store.mark_viewed("AC01").unwrap();
        assert_eq!(store.completion_percentage(3), 33);
        store.mark_viewed("AC04").unwrap();
        assert_eq!(store.completion_percentage(3), 67);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROGRESS_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let store = ProgressStore::open(&path);
        assert_eq!(store.viewed_count(), 0);
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProgressStore::in_data_dir(dir.path());
        store.mark_viewed("RC01").unwrap();
        let path = store.path().unwrap().to_path_buf();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(!store.is_viewed("RC01"));
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut store = ProgressStore::in_data_dir(&nested);
        store.mark_viewed("BE01").unwrap();
        assert!(nested.join(PROGRESS_FILE).exists());
    }
}

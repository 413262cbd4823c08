// src/store.rs
//! Snapshot store: JSON documents under one data directory.
//!
//! ```text
//! <root>/all_<file>        full statewide capture
//! <root>/<file>            locally relevant subset
//! <root>/search_<term>.json
//! ```
//! Every write replaces the previous document of the same name.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::consts::{FULL_PREFIX, SEARCH_PREFIX};
use crate::core::sanitize::sanitize_filename_part;
use crate::engine::types::Record;
use crate::error::{Result, ScrapeError};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub records: Vec<Record>,
    pub last_updated: DateTime<Local>,
    pub total_count: usize,
    pub all_state_records: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub file: String,
    pub record: Record,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub path: PathBuf,
    pub hits: Vec<SearchHit>,
}

#[derive(Clone, Debug)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn path_of(&self, name: &str) -> PathBuf { self.root.join(name) }

    pub fn ensure_root(&self) -> Result<()> {
        ensure_directory(&self.root)
    }

    /// Write `records` as document `name`, replacing any earlier one.
    pub fn save(&self, name: &str, records: &[Record], statewide_total: usize) -> Result<PathBuf> {
        let doc = SnapshotDocument {
            records: records.to_vec(),
            last_updated: Local::now(),
            total_count: records.len(),
            all_state_records: statewide_total,
        };
        let path = self.path_of(name);
        self.write_json(&path, &doc)?;
        info!(file = name, saved = records.len(), statewide = statewide_total, "snapshot saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<SnapshotDocument> {
        let path = self.path_of(name);
        let file = File::open(&path).map_err(|e| ScrapeError::io("open", &path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ScrapeError::Json { path, source })
    }

    /// Names of every full (`all_*.json`) document, sorted.
    pub fn full_documents(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.root).map_err(|e| ScrapeError::io("list", &self.root, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScrapeError::io("list", &self.root, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(FULL_PREFIX) && name.ends_with(".json") && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Every full-document record containing `keyword` (case-insensitive),
    /// written to `search_<keyword>.json`. Unreadable documents are skipped.
    pub fn search(&self, keyword: &str) -> Result<SearchOutcome> {
        let needle = keyword.to_lowercase();
        let mut hits = Vec::new();

        for name in self.full_documents()? {
            let doc = match self.load(&name) {
                Ok(d) => d,
                Err(e) => { warn!(file = %name, "skipping unreadable document: {e}"); continue; }
            };
            for record in doc.records {
                if record.text().to_lowercase().contains(&needle) {
                    hits.push(SearchHit { file: name.clone(), record });
                }
            }
        }

        let path = self.path_of(&search_file_name(keyword));
        self.write_json(&path, &hits)?;
        Ok(SearchOutcome { path, hits })
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        self.ensure_root()?;
        let file = File::create(path).map_err(|e| ScrapeError::io("create", path, e))?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, value)
            .map_err(|source| ScrapeError::Json { path: path.to_path_buf(), source })?;
        out.flush().map_err(|e| ScrapeError::io("write", path, e))
    }
}

pub fn search_file_name(keyword: &str) -> String {
    format!("{SEARCH_PREFIX}{}.json", sanitize_filename_part(keyword))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::io(
            "use as directory",
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::io("create directory", dir, e))?;
    }
    Ok(())
}

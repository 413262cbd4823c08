// src/config/options.rs
use std::{fs, path::{Path, PathBuf}, time::Duration};

use serde::Deserialize;

use super::consts::*;
use crate::driver::{BrowserConfig, Timing};
use crate::engine::classify::LocalityPolicy;
use crate::error::{Result, ScrapeError};

/// Run configuration. Built-in defaults, optionally overlaid by a YAML file;
/// any field missing from the file keeps its default.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub data_dir: PathBuf,
    pub webdriver: String,
    pub headless: bool,
    pub settle: SettleOptions,
    /// Pause between datasets when running several.
    pub dataset_pause_ms: u64,
    pub counties: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            webdriver: s!(DEFAULT_WEBDRIVER),
            headless: false,
            settle: SettleOptions::default(),
            dataset_pause_ms: DATASET_PAUSE_MS,
            counties: COUNTIES.iter().map(|c| s!(*c)).collect(),
            keywords: KEYWORDS.iter().map(|k| s!(*k)).collect(),
        }
    }
}

impl Options {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ScrapeError::io("read", path, e))?;
        Self::from_yaml(&text).map_err(|source| ScrapeError::Config { path: path.to_path_buf(), source })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file parses as null; treat it as "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn policy(&self) -> LocalityPolicy {
        LocalityPolicy::new(&self.counties[..], &self.keywords[..])
    }

    pub fn browser(&self) -> BrowserConfig {
        BrowserConfig { headless: self.headless, ..BrowserConfig::default() }
    }

    pub fn dataset_pause(&self) -> Duration {
        Duration::from_millis(self.dataset_pause_ms)
    }
}

/// Settle budgets in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SettleOptions {
    pub navigate_ms: u64,
    pub interact_ms: u64,
    pub paginate_ms: u64,
    pub poll_ms: u64,
}

impl Default for SettleOptions {
    fn default() -> Self {
        Self {
            navigate_ms: NAVIGATE_TIMEOUT_MS,
            interact_ms: INTERACT_TIMEOUT_MS,
            paginate_ms: PAGINATE_TIMEOUT_MS,
            poll_ms: POLL_MS,
        }
    }
}

impl SettleOptions {
    /// Everything checked once, never slept on.
    pub fn immediate() -> Self {
        Self { navigate_ms: 0, interact_ms: 0, paginate_ms: 0, poll_ms: 0 }
    }
    pub fn navigate(&self) -> Timing { Timing::from_millis(self.navigate_ms, self.poll_ms) }
    pub fn interact(&self) -> Timing { Timing::from_millis(self.interact_ms, self.poll_ms) }
    pub fn paginate(&self) -> Timing { Timing::from_millis(self.paginate_ms, self.poll_ms) }
}

// src/runner.rs
//! Dataset orchestration: one report from navigation to saved snapshots.

use std::{path::PathBuf, thread, time::Duration};

use chrono::Local;
use tracing::{debug, error, info};

use crate::{
    config::{consts::{MAX_PAGES, SUMMARY_LIMIT}, options::SettleOptions},
    core::html::contains_tag_ci,
    driver::{page_view, wait_until, PageDriver},
    engine::{
        filters::{self, Normalized},
        paginate::{paginate, Stop},
        types::{Record, SCRAPED_AT_FIELD, SOURCE_FIELD},
        LocalityPolicy,
    },
    error::{Result, ScrapeError},
    progress::Progress,
    specs::DatasetSpec,
    store::SnapshotStore,
};

/// What one dataset run produced.
#[derive(Debug)]
pub struct DatasetReport {
    pub key: &'static str,
    pub normalized: Normalized,
    pub pages: usize,
    pub stop: Stop,
    pub statewide: usize,
    pub kept: usize,
    pub full_path: PathBuf,
    pub filtered_path: PathBuf,
}

/// Outcome of several dataset runs; failures never stop the others.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<DatasetReport>,
    pub failures: Vec<(&'static str, ScrapeError)>,
}

impl RunSummary {
    pub fn all_ok(&self) -> bool { self.failures.is_empty() }
}

pub struct Runner<'a> {
    driver: &'a mut dyn PageDriver,
    store: &'a SnapshotStore,
    policy: &'a LocalityPolicy,
    settle: SettleOptions,
    max_pages: usize,
}

impl<'a> Runner<'a> {
    pub fn new(
        driver: &'a mut dyn PageDriver,
        store: &'a SnapshotStore,
        policy: &'a LocalityPolicy,
        settle: SettleOptions,
    ) -> Self {
        Self { driver, store, policy, settle, max_pages: MAX_PAGES }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Run `specs` in order with `pause` between them.
    pub fn run_all(
        &mut self,
        specs: &[&'static DatasetSpec],
        pause: Duration,
        progress: &mut dyn Progress,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        for (i, &spec) in specs.iter().enumerate() {
            if i > 0 && !pause.is_zero() {
                thread::sleep(pause);
            }
            match self.run_dataset(spec, progress) {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!(dataset = spec.key, detail = ?e, "dataset failed: {e}");
                    progress.finish(false);
                    summary.failures.push((spec.key, e));
                }
            }
        }
        summary
    }

    pub fn run_dataset(&mut self, spec: &'static DatasetSpec, progress: &mut dyn Progress) -> Result<DatasetReport> {
        info!("=== {} ===", spec.source_label());
        progress.begin(spec.name);

        self.driver.navigate(spec.url)?;
        let driver = &mut *self.driver;
        let loaded = wait_until(&self.settle.navigate(), || {
            page_view(&mut *driver, |doc| contains_tag_ci(doc, "table")).unwrap_or(false)
        });
        if !loaded {
            debug!(dataset = spec.key, "no table after navigation; continuing");
        }

        let normalized = filters::normalize(&mut *self.driver, spec.clear_filters, &self.settle.interact());
        let paged = paginate(&mut *self.driver, &self.settle.paginate(), self.max_pages, progress)?;

        let mut records = paged.records;
        let statewide = records.len();
        info!(total = statewide, "statewide records");

        let kept = self.policy.tag(&mut records);
        let scraped_at = Local::now().to_rfc3339();
        let source = spec.source_label();
        for r in records.iter_mut().filter(|r| r.priority().is_some()) {
            r.insert(SOURCE_FIELD, source.as_str());
            r.insert(SCRAPED_AT_FIELD, scraped_at.as_str());
        }
        let local: Vec<Record> = records.iter().filter(|r| r.priority().is_some()).cloned().collect();
        info!(local = kept, "locally relevant records");

        let full_path = self.store.save(&spec.full_file(), &records, statewide)?;
        let filtered_path = self.store.save(spec.file, &local, statewide)?;

        for r in local.iter().take(SUMMARY_LIMIT) {
            let line = summary_line(r, spec.id_field);
            info!("    {line}");
            progress.log(&line);
        }
        progress.finish(true);

        Ok(DatasetReport {
            key: spec.key,
            normalized,
            pages: paged.pages,
            stop: paged.stop,
            statewide,
            kept: local.len(),
            full_path,
            filtered_path,
        })
    }
}

/// `[PRIORITY] id-County-Concerning` (falls back to `Site`).
pub fn summary_line(r: &Record, id_field: &str) -> String {
    let priority = r.priority().map(|p| p.as_str()).unwrap_or_default();
    let concern = r.get("Concerning").or_else(|| r.get("Site")).unwrap_or_default();
    format!(
        "[{priority}] {}-{}-{concern}",
        r.get(id_field).unwrap_or_default(),
        r.get("County").unwrap_or_default(),
    )
}

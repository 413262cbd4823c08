// src/specs/mod.rs
//! # Dataset specs
//!
//! One `DatasetSpec` per TDEC dataviewer report. A spec says *where* a
//! dataset lives and *what to call its output*; it carries no scraping
//! logic. The engine reads every report the same way.
//!
//! ## What lives here
//! - Display name (also written into each kept record as `source`).
//! - Report URL.
//! - Output file name; the full dataset goes to `all_<file>`.
//! - The column used as the record id in log summaries.
//! - Whether the report opens with filters that must be cleared first.
//!
//! ## What does **not** live here
//! - Selectors (`engine::filters`, `engine::paginate`).
//! - Relevance rules (`engine::classify`, configured from `config::options`).
//!
//! Specs are `'static` and never change at runtime.

use crate::config::consts::FULL_PREFIX;

#[derive(Debug, PartialEq, Eq)]
pub struct DatasetSpec {
    /// CLI key, e.g. `complaints`.
    pub key: &'static str,
    pub name: &'static str,
    pub url: &'static str,
    pub file: &'static str,
    pub id_field: &'static str,
    pub clear_filters: bool,
}

impl DatasetSpec {
    pub fn source_label(&self) -> String { format!("TDEC {}", self.name) }
    pub fn full_file(&self) -> String { format!("{FULL_PREFIX}{}", self.file) }
}

pub const COMPLAINTS: DatasetSpec = DatasetSpec {
    key: "complaints",
    name: "DWR Complaints",
    url: "https://dataviewers.tdec.tn.gov/dataviewers/f?p=9034:34250::::::",
    file: "tdec_complaints.json",
    id_field: "ID",
    clear_filters: true,
};

pub const PERMITS: DatasetSpec = DatasetSpec {
    key: "permits",
    name: "DWR Permits",
    url: "https://dataviewers.tdec.tn.gov/dataviewers/f?p=9034:34001",
    file: "tdec_permits.json",
    id_field: "Permit No",
    clear_filters: false,
};

pub const INSPECTIONS: DatasetSpec = DatasetSpec {
    key: "inspections",
    name: "DWR Inspections",
    url: "https://dataviewers.tdec.tn.gov/dataviewers/f?p=9034:34200::::::",
    file: "tdec_inspections.json",
    id_field: "ID",
    clear_filters: true,
};

pub const WATER_WELLS: DatasetSpec = DatasetSpec {
    key: "wells",
    name: "Water Wells",
    url: "https://dataviewers.tdec.tn.gov/dataviewers/f?p=2005:39900::::::",
    file: "tdec_wells.json",
    id_field: "ID",
    clear_filters: false,
};

pub const DRILLERS: DatasetSpec = DatasetSpec {
    key: "drillers",
    name: "Licensed Drillers",
    url: "https://dataviewers.tdec.tn.gov/dataviewers/f?p=2005:39906::::::",
    file: "tdec_drillers.json",
    id_field: "License No",
    clear_filters: false,
};

/// Every dataset, in the order `all` runs them.
pub static ALL: [&DatasetSpec; 5] = [&COMPLAINTS, &PERMITS, &INSPECTIONS, &WATER_WELLS, &DRILLERS];

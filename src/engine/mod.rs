// src/engine/mod.rs
//! Scraping core: read tables, prepare the report, paginate, classify.
//!
//! ```text
//! runner → filters::normalize → paginate::paginate ⟲ table::read_tables
//!                                      ↓
//!                              classify::LocalityPolicy::filter → store
//! ```
//! Nothing in here touches the filesystem.

pub mod classify;
pub mod filters;
pub mod paginate;
pub mod table;
pub mod types;

pub use classify::LocalityPolicy;
pub use paginate::{paginate, Paginated, Stop};
pub use table::{read_tables, TableSnapshot};
pub use types::{Accumulator, Priority, Record};

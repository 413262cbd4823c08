// src/engine/paginate.rs
//! Drain a multi-page report into one deduplicated record list.
//!
//! The portal gives rows no stable id, so a row is "new" when its full
//! content has not been seen in this run. Two distinct records that render
//! identically in every visible column collapse into one.

use tracing::{debug, info};

use crate::driver::{click_and_settle, page_view, probe_first, DriverError, Locator, PageDriver, Timing};
use crate::engine::table::read_tables;
use crate::engine::types::{Accumulator, Record};
use crate::progress::Progress;

pub const NEXT_PAGE: &[Locator] = &[
    Locator::Css("a.a-IRR-pagination-next"),
    Locator::XPath("//a[text()='>']"),
    Locator::XPath("//a[contains(@title,'Next')]"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stop {
    /// A page after the first added nothing new.
    Exhausted,
    /// No next-page control, or clicking it failed.
    NoNextPage,
    /// Hit the page cap.
    PageCap,
}

#[derive(Debug)]
pub struct Paginated {
    pub records: Vec<Record>,
    pub pages: usize,
    pub stop: Stop,
}

/// Walk pages until exhaustion, a missing next control, or `max_pages`.
/// Only reading the page can fail; navigation problems just end the walk.
pub fn paginate(
    driver: &mut dyn PageDriver,
    timing: &Timing,
    max_pages: usize,
    progress: &mut dyn Progress,
) -> Result<Paginated, DriverError> {
    let mut acc = Accumulator::new();
    let mut pages = 0usize;
    let mut stop = Stop::PageCap;

    for page in 0..max_pages {
        let snap = read_tables(&driver.page_source()?);
        pages = page + 1;
        let added = acc.absorb(snap.rows);
        if added == 0 && page > 0 {
            stop = Stop::Exhausted;
            break;
        }
        info!(page = pages, added, total = acc.len(), "page captured");
        progress.page_done(pages, added, acc.len());

        let Some(next) = probe_first(driver, NEXT_PAGE) else {
            stop = Stop::NoNextPage;
            break;
        };
        // settled once the rows differ from the ones just captured
        if !click_and_settle(driver, &next, timing, |d| page_view(d, |doc| read_tables(doc).rows)) {
            stop = Stop::NoNextPage;
            break;
        }
    }

    if acc.is_empty() {
        info!(pages, "report has no rows");
    }
    debug!(pages, ?stop, "pagination finished");
    Ok(Paginated { records: acc.into_records(), pages, stop })
}

// src/engine/filters.rs
//! Page preparation before pagination: drop pre-applied filter chips and
//! pick the biggest rows-per-page option. Both steps are best-effort.

use tracing::{debug, info};

use crate::config::consts::{MAX_FILTER_REMOVALS, PAGE_SIZE_PREFS};
use crate::driver::{click_and_settle, page_view, probe_first, settle_after_change, Locator, PageDriver, Timing};

pub const REMOVE_FILTER: &[Locator] = &[
    Locator::Css("a[title='Remove Filter']"),
    Locator::XPath("//a[contains(@title,'Remove')]"),
];

pub const PAGE_SIZE_SELECT: Locator = Locator::Css("select");

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized {
    pub filters_removed: usize,
    pub page_size: Option<String>,
}

/// Clear filters (when asked) and maximize the page size.
pub fn normalize(driver: &mut dyn PageDriver, clear_filters: bool, timing: &Timing) -> Normalized {
    let filters_removed = if clear_filters { remove_filters(driver, timing) } else { 0 };
    let page_size = maximize_page_size(driver, timing);
    Normalized { filters_removed, page_size }
}

/// Click "remove filter" until none is left, at most `MAX_FILTER_REMOVALS` times.
pub fn remove_filters(driver: &mut dyn PageDriver, timing: &Timing) -> usize {
    let mut removed = 0;
    for _ in 0..MAX_FILTER_REMOVALS {
        let Some(chip) = probe_first(driver, REMOVE_FILTER) else { break };
        if !click_and_settle(driver, &chip, timing, chips_showing) {
            break;
        }
        removed += 1;
    }
    if removed > 0 {
        info!(removed, "removed filters");
    }
    removed
}

/// On the first `<select>` offering one of `PAGE_SIZE_PREFS`, choose the best one.
/// Returns the option chosen.
pub fn maximize_page_size(driver: &mut dyn PageDriver, timing: &Timing) -> Option<String> {
    let selects = match driver.find_elements(&PAGE_SIZE_SELECT) {
        Ok(s) => s,
        Err(e) => {
            debug!("page-size lookup failed: {e}");
            return None;
        }
    };

    for select in selects {
        let texts = match driver.option_texts(&select) {
            Ok(t) => t,
            Err(e) => { debug!("reading options failed: {e}"); continue; }
        };
        let Some(choice) = PAGE_SIZE_PREFS.iter().find(|p| texts.iter().any(|t| t == *p)) else {
            continue;
        };
        let before = page_view(driver, str::to_string);
        if let Err(e) = driver.select_by_text(&select, choice) {
            debug!(choice, "selecting page size failed: {e}");
            continue;
        }
        settle_after_change(driver, before, timing, |d| page_view(d, str::to_string));
        info!(rows = choice, "rows per page set");
        return Some(s!(*choice));
    }
    None
}

/// Remove-filter controls on a settled page; `None` while it is loading.
fn chips_showing(driver: &mut dyn PageDriver) -> Option<usize> {
    page_view(driver, |_| ())?;
    let n = REMOVE_FILTER
        .iter()
        .map(|loc| driver.find_elements(loc).map(|found| found.len()).unwrap_or(0))
        .find(|&n| n > 0)
        .unwrap_or(0);
    Some(n)
}

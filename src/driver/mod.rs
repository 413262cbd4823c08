// src/driver/mod.rs
//! # Page driver
//!
//! The capability set the scraping engine needs from a live page:
//! navigate, read the current markup, find elements, click, and pick a
//! dropdown option. `WebDriverSession` is the production implementation;
//! tests provide an in-memory portal.
//!
//! Optional UI interactions go through the probe helpers at the bottom of
//! this module. They never return errors: a failed lookup or click is
//! reported as "not there", which is how the portal's missing controls are
//! treated throughout.
//!
//! Settling after an interaction is content-based: the caller says what it
//! expects to change (the rows, the number of filter chips) and the wait
//! holds until that observation moves while no processing overlay shows.

use thiserror::Error;
use tracing::debug;

use crate::config::consts::BUSY_MARKERS;
use crate::core::html::to_lower;

pub mod wait;
pub mod webdriver;

pub use wait::{wait_until, Timing};
pub use webdriver::{BrowserConfig, WebDriverSession};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webdriver {error}: {message}")]
    Protocol { error: String, message: String },

    #[error("malformed webdriver response: missing {0}")]
    Malformed(&'static str),

    #[error("session already closed")]
    Closed,

    #[error("{0}")]
    Other(String),
}

/// How an element is looked up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    Css(&'static str),
    XPath(&'static str),
}

impl Locator {
    /// W3C locator strategy name.
    pub fn strategy(&self) -> &'static str {
        match self {
            Locator::Css(_) => "css selector",
            Locator::XPath(_) => "xpath",
        }
    }
    pub fn value(&self) -> &'static str {
        match self {
            Locator::Css(v) | Locator::XPath(v) => v,
        }
    }
}

/// Opaque handle to an element on the current page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef(pub String);

pub trait PageDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Markup of the page as currently rendered.
    fn page_source(&mut self) -> Result<String, DriverError>;

    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError>;

    fn click(&mut self, element: &ElementRef) -> Result<(), DriverError>;

    /// Visible texts of a `<select>` element's options, in order.
    fn option_texts(&mut self, select: &ElementRef) -> Result<Vec<String>, DriverError>;

    fn select_by_text(&mut self, select: &ElementRef, text: &str) -> Result<(), DriverError>;

    /// Release the session. Calling it twice is harmless.
    fn close(&mut self) -> Result<(), DriverError>;
}

/* ---------------- capability probes ---------------- */

/// First element matched by the first locator that matches anything.
/// Lookup failures count as "no match" and the next locator is tried.
pub fn probe_first(driver: &mut dyn PageDriver, locators: &[Locator]) -> Option<ElementRef> {
    for loc in locators {
        match driver.find_elements(loc) {
            Ok(found) => {
                if let Some(el) = found.into_iter().next() {
                    return Some(el);
                }
            }
            Err(e) => debug!(selector = loc.value(), "lookup failed: {e}"),
        }
    }
    None
}

/// Click, reporting success as a bool.
pub fn try_click(driver: &mut dyn PageDriver, element: &ElementRef) -> bool {
    match driver.click(element) {
        Ok(()) => true,
        Err(e) => {
            debug!("click failed: {e}");
            false
        }
    }
}

/// Page markup, or `None` when it cannot be read.
pub fn try_source(driver: &mut dyn PageDriver) -> Option<String> {
    driver.page_source().ok()
}

/// Is the report still loading? Looks for the portal's processing overlay.
pub fn is_busy(doc: &str) -> bool {
    let lc = to_lower(doc);
    BUSY_MARKERS.iter().any(|m| lc.contains(m))
}

/// `view` of the current markup, or `None` while the page is unreadable or busy.
pub fn page_view<T>(driver: &mut dyn PageDriver, view: impl Fn(&str) -> T) -> Option<T> {
    let doc = try_source(driver)?;
    if is_busy(&doc) {
        return None;
    }
    Some(view(&doc))
}

/// Click `element`, then wait until `observe` reports something other than
/// what it reported before the click. `observe` returns `None` for "not
/// ready yet". Returns false only when the click itself failed.
pub fn click_and_settle<T: PartialEq>(
    driver: &mut dyn PageDriver,
    element: &ElementRef,
    timing: &Timing,
    mut observe: impl FnMut(&mut dyn PageDriver) -> Option<T>,
) -> bool {
    let before = observe(&mut *driver);
    if !try_click(driver, element) {
        return false;
    }
    settle_after_change(driver, before, timing, observe);
    true
}

/// Wait until `observe` yields a value different from `before`.
/// Without a `before` there is nothing to compare, so any ready value counts.
pub fn settle_after_change<T: PartialEq>(
    driver: &mut dyn PageDriver,
    before: Option<T>,
    timing: &Timing,
    mut observe: impl FnMut(&mut dyn PageDriver) -> Option<T>,
) {
    let changed = wait_until(timing, || match observe(&mut *driver) {
        Some(now) => before.as_ref() != Some(&now),
        None => false,
    });
    if !changed {
        debug!(timeout_ms = timing.timeout.as_millis() as u64, "page did not settle before timeout");
    }
}

// tests/common/mod.rs
//
// In-memory stand-in for the dataviewer portal: each URL serves a list of
// HTML pages, optional filter chips and an optional rows-per-page select.
//
#![allow(dead_code)]

use std::collections::HashMap;

use tdec_scrape::driver::{DriverError, ElementRef, Locator, PageDriver};
use tdec_scrape::engine::Record;
use tdec_scrape::progress::Progress;

pub const NEXT_CSS: Locator = Locator::Css("a.a-IRR-pagination-next");
pub const SPINNER: &str = r#"<span class="u-Processing" role="alert"></span>"#;

#[derive(Clone, Debug)]
pub struct Site {
    pub pages: Vec<String>,
    /// Keep offering a next link on the last page (clicking it does nothing).
    pub next_forever: bool,
    /// The only locator the next link answers to.
    pub next_via: Locator,
    pub filter_chips: usize,
    pub page_sizes: Vec<String>,
    /// Reads after each click or select that still show the previous
    /// rendering with `overlay` on top.
    pub busy_reads: usize,
    pub overlay: &'static str,
}

impl Site {
    pub fn new(pages: Vec<String>) -> Self {
        Self {
            pages,
            next_forever: false,
            next_via: NEXT_CSS,
            filter_chips: 0,
            page_sizes: Vec::new(),
            busy_reads: 0,
            overlay: SPINNER,
        }
    }
}

#[derive(Default)]
pub struct FakePortal {
    pub sites: HashMap<String, Site>,
    pub url: Option<String>,
    pub page: usize,
    pub selected_size: Option<String>,
    pub navigations: Vec<String>,
    pub fail_source: bool,
    pub closed: bool,
    /// Markup served while loading, and how many more reads it is served for.
    stale: Option<String>,
    busy_left: usize,
    pub source_reads: usize,
}

impl FakePortal {
    pub fn with_site(url: &str, site: Site) -> Self {
        let mut p = Self::default();
        p.sites.insert(url.to_string(), site);
        p
    }

    fn site(&self) -> Result<&Site, DriverError> {
        let url = self.url.as_deref().ok_or_else(|| DriverError::Other("nothing loaded".into()))?;
        self.sites.get(url).ok_or_else(|| DriverError::Other(format!("no site {url}")))
    }

    fn site_mut(&mut self) -> Result<&mut Site, DriverError> {
        let url = self.url.clone().ok_or_else(|| DriverError::Other("nothing loaded".into()))?;
        self.sites.get_mut(&url).ok_or_else(|| DriverError::Other(format!("no site {url}")))
    }

    pub fn chips_left(&self, url: &str) -> usize {
        self.sites[url].filter_chips
    }

    fn render(&self) -> Result<String, DriverError> {
        let site = self.site()?;
        let body = site.pages.get(self.page).cloned().unwrap_or_default();
        Ok(format!(
            "<html><!-- chips:{} size:{:?} --><body>{body}</body></html>",
            site.filter_chips, self.selected_size
        ))
    }

    /// Apply an interaction, leaving the old rendering up for `busy_reads` reads.
    fn interact<T>(&mut self, change: impl FnOnce(&mut Self) -> Result<T, DriverError>) -> Result<T, DriverError> {
        let before = self.render().ok();
        let out = change(self)?;
        let busy = self.site()?.busy_reads;
        if busy > 0 {
            let overlay = self.site()?.overlay;
            self.stale = before.map(|doc| doc.replace("<body>", &format!("<body>{overlay}")));
            self.busy_left = busy;
        }
        Ok(out)
    }
}

impl PageDriver for FakePortal {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.navigations.push(url.to_string());
        if !self.sites.contains_key(url) {
            return Err(DriverError::Protocol { error: "unknown error".into(), message: format!("net::ERR_NAME_NOT_RESOLVED {url}") });
        }
        self.url = Some(url.to_string());
        self.page = 0;
        self.selected_size = None;
        self.stale = None;
        self.busy_left = 0;
        Ok(())
    }

    fn page_source(&mut self) -> Result<String, DriverError> {
        if self.fail_source {
            return Err(DriverError::Other("renderer crashed".into()));
        }
        self.source_reads += 1;
        if self.busy_left > 0 {
            self.busy_left -= 1;
            if let Some(stale) = &self.stale {
                return Ok(stale.clone());
            }
        }
        self.render()
    }

    fn find_elements(&mut self, locator: &Locator) -> Result<Vec<ElementRef>, DriverError> {
        let page = self.page;
        let site = self.site()?;
        let v = locator.value();
        let found = if *locator == site.next_via {
            let more = page + 1 < site.pages.len();
            if more || site.next_forever { vec![ElementRef("next".into())] } else { vec![] }
        } else if v.contains("Remove") {
            (0..site.filter_chips).map(|_| ElementRef("chip".into())).collect()
        } else if v == "select" {
            if site.page_sizes.is_empty() { vec![] } else { vec![ElementRef("size".into())] }
        } else {
            vec![]
        };
        Ok(found)
    }

    fn click(&mut self, element: &ElementRef) -> Result<(), DriverError> {
        match element.0.as_str() {
            "next" => self.interact(|p| {
                let last = p.site()?.pages.len().saturating_sub(1);
                if p.page < last { p.page += 1; }
                Ok(())
            }),
            "chip" => self.interact(|p| {
                let site = p.site_mut()?;
                site.filter_chips = site.filter_chips.saturating_sub(1);
                Ok(())
            }),
            other => Err(DriverError::Other(format!("cannot click {other}"))),
        }
    }

    fn option_texts(&mut self, _select: &ElementRef) -> Result<Vec<String>, DriverError> {
        Ok(self.site()?.page_sizes.clone())
    }

    fn select_by_text(&mut self, _select: &ElementRef, text: &str) -> Result<(), DriverError> {
        if !self.site()?.page_sizes.iter().any(|t| t == text) {
            return Err(DriverError::Other(format!("no option {text}")));
        }
        self.interact(|p| {
            p.selected_size = Some(text.to_string());
            Ok(())
        })
    }

    fn close(&mut self) -> Result<(), DriverError> {
        self.closed = true;
        Ok(())
    }
}

/// A report table with the given header and rows.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> String {
    let mut out = String::from("<table class=\"a-IRR-table\"><tr>");
    for h in headers { out.push_str(&format!("<th>{h}</th>")); }
    out.push_str("</tr>");
    for r in rows {
        out.push_str("<tr>");
        for c in *r { out.push_str(&format!("<td>{c}</td>")); }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

pub const HEADERS: &[&str] = &["ID", "County", "Concerning"];

pub fn row_page(rows: &[&[&str]]) -> String { table(HEADERS, rows) }

pub fn rec(pairs: &[(&str, &str)]) -> Record {
    let mut r = Record::new();
    for (k, v) in pairs { r.insert(*k, *v); }
    r
}

#[derive(Default)]
pub struct Recording {
    pub begun: Vec<String>,
    pub lines: Vec<String>,
    pub pages: Vec<(usize, usize, usize)>,
    pub finished: Vec<bool>,
}

impl Progress for Recording {
    fn begin(&mut self, dataset: &str) { self.begun.push(dataset.to_string()); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn page_done(&mut self, page: usize, added: usize, total: usize) { self.pages.push((page, added, total)); }
    fn finish(&mut self, ok: bool) { self.finished.push(ok); }
}

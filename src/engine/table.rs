// src/engine/table.rs
//! Table snapshot: every data row on the current page as a `Record`.
//!
//! Rows are walked in document order. A table's first all-header row sets
//! the active headers; the headers carry over into later tables that have
//! no header row of their own (the portal renders a fixed header table
//! above a separate body table). Rows that wrap a nested table are layout,
//! so the walk descends into them instead of reading them.

use crate::config::consts::MIN_ROW_CELLS;
use crate::core::html::{block_text, next_tag_block_in, to_lower, TagBlocks};
use crate::engine::types::Record;

#[derive(Debug, Default, PartialEq)]
pub struct TableSnapshot {
    /// First header row seen on the page.
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

pub fn read_tables(doc: &str) -> TableSnapshot {
    let lc = to_lower(doc);
    let mut snap = TableSnapshot::default();
    let mut active: Option<Vec<String>> = None;
    let mut table_has_header = false;
    let mut pos = 0usize;

    while let Some((s, e)) = next_tag_block_in(doc, &lc, "<tr", "</tr>", pos) {
        if has_opener(&lc[pos..s], "<table") {
            table_has_header = false;
        }
        let tr = &doc[s..e];
        if has_opener(&lc[s..e], "<table") {
            // layout row; read what it wraps
            pos = s + "<tr".len();
            continue;
        }
        pos = e;

        let ths: Vec<String> = TagBlocks::new(tr, "<th", "</th>").map(block_text).collect();
        if !ths.is_empty() && !table_has_header {
            if snap.headers.is_empty() {
                snap.headers = ths.clone();
            }
            active = Some(ths);
            table_has_header = true;
            continue;
        }

        let tds: Vec<String> = TagBlocks::new(tr, "<td", "</td>").map(block_text).collect();
        let Some(headers) = active.as_ref() else { continue };
        if tds.len() < MIN_ROW_CELLS {
            continue;
        }
        snap.rows.push(Record::zip(headers, &tds));
    }
    snap
}

/// Does `lc` contain `open` as a real tag opener (not a longer tag name)?
fn has_opener(lc: &str, open: &str) -> bool {
    let mut from = 0;
    while let Some(i) = lc[from..].find(open) {
        let at = from + i + open.len();
        match lc.as_bytes().get(at) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return true,
            _ => from = at,
        }
    }
    false
}

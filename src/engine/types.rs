// src/engine/types.rs
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PRIORITY_FIELD: &str = "_priority";
pub const SOURCE_FIELD: &str = "source";
pub const SCRAPED_AT_FIELD: &str = "scraped_at";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority { High, Normal }

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self { Priority::High => "HIGH", Priority::Normal => "NORMAL" }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One table row: column header → cell text, in rendered header order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self { Self(Map::new()) }

    /// Zip headers against cells positionally; surplus on either side is ignored.
    /// A repeated header keeps its first position and the later cell's text.
    pub fn zip<H: AsRef<str>, C: AsRef<str>>(headers: &[H], cells: &[C]) -> Self {
        let mut r = Self::new();
        for (h, c) in headers.iter().zip(cells) {
            r.insert(h.as_ref(), c.as_ref());
        }
        r
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    /// Text of a field; non-string values (hand-edited files) read as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn keys(&self) -> impl Iterator<Item = &str> { self.0.keys().map(String::as_str) }

    pub fn priority(&self) -> Option<Priority> {
        match self.get(PRIORITY_FIELD)? {
            "HIGH" => Some(Priority::High),
            "NORMAL" => Some(Priority::Normal),
            _ => None,
        }
    }

    pub fn set_priority(&mut self, p: Priority) { self.insert(PRIORITY_FIELD, p.as_str()); }

    /// Dedup identity: compact JSON object with keys sorted.
    pub fn canonical(&self) -> String {
        let mut pairs: Vec<(&String, &Value)> = self.0.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        encode(pairs)
    }

    /// Compact JSON in field order; what relevance and search match against.
    pub fn text(&self) -> String {
        encode(self.0.iter())
    }
}

fn encode<'a>(pairs: impl IntoIterator<Item = (&'a String, &'a Value)>) -> String {
    let mut out = s!("{");
    for (i, (k, v)) in pairs.into_iter().enumerate() {
        if i > 0 { out.push(','); }
        out.push_str(&Value::String(k.clone()).to_string());
        out.push(':');
        out.push_str(&v.to_string());
    }
    out.push('}');
    out
}

/// Ordered, content-deduplicated records of one pagination run.
#[derive(Debug, Default)]
pub struct Accumulator {
    records: Vec<Record>,
    seen: HashSet<String>,
}

impl Accumulator {
    pub fn new() -> Self { Self::default() }

    /// Append the rows not seen before (including repeats within `rows`),
    /// in order. Returns how many were appended.
    pub fn absorb(&mut self, rows: Vec<Record>) -> usize {
        let before = self.records.len();
        for row in rows {
            if self.seen.insert(row.canonical()) {
                self.records.push(row);
            }
        }
        self.records.len() - before
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn into_records(self) -> Vec<Record> { self.records }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        let mut r = Record::new();
        for (k, v) in pairs { r.insert(*k, *v); }
        r
    }

    #[test]
    fn canonical_ignores_field_order() {
        let a = rec(&[("County", "Wilson"), ("ID", "7")]);
        let b = rec(&[("ID", "7"), ("County", "Wilson")]);
        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(a.canonical(), r#"{"County":"Wilson","ID":"7"}"#);
        assert_ne!(a.text(), b.text());
    }

    #[test]
    fn canonical_escapes_quotes() {
        let a = rec(&[("Note", r#"say "hi""#)]);
        assert_eq!(a.canonical(), r#"{"Note":"say \"hi\""}"#);
    }

    #[test]
    fn zip_truncates_to_shorter_side() {
        let r = Record::zip(&["A", "B", "C"], &["1", "2"]);
        assert_eq!(r.len(), 2);
        let r = Record::zip(&["A"], &["1", "2", "3"]);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn accumulator_drops_repeats_within_and_across_batches() {
        let mut acc = Accumulator::new();
        let a = rec(&[("ID", "1")]);
        let b = rec(&[("ID", "2")]);
        assert_eq!(acc.absorb(vec![a.clone(), b.clone(), a.clone()]), 2);
        assert_eq!(acc.absorb(vec![b, a]), 0);
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn priority_round_trips_through_field() {
        let mut r = rec(&[("ID", "1")]);
        assert_eq!(r.priority(), None);
        r.set_priority(Priority::High);
        assert_eq!(r.get(PRIORITY_FIELD), Some("HIGH"));
        assert_eq!(r.priority(), Some(Priority::High));
    }
}

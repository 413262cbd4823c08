// src/engine/classify.rs
use crate::engine::types::{Priority, Record};

/// Places and topics that make a record locally relevant.
/// Both lists are matched case-insensitively as substrings of the record text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalityPolicy {
    localities: Vec<String>,
    keywords: Vec<String>,
}

impl LocalityPolicy {
    pub fn new<L: AsRef<str>, K: AsRef<str>>(localities: &[L], keywords: &[K]) -> Self {
        let lower = |s: &str| s.trim().to_lowercase();
        Self {
            localities: localities.iter().map(|l| lower(l.as_ref())).filter(|l| !l.is_empty()).collect(),
            keywords: keywords.iter().map(|k| lower(k.as_ref())).filter(|k| !k.is_empty()).collect(),
        }
    }

    /// `Some(High)` on a keyword hit, `Some(Normal)` on a locality-only hit, else `None`.
    pub fn classify(&self, record: &Record) -> Option<Priority> {
        let text = record.text().to_lowercase();
        if self.keywords.iter().any(|k| text.contains(k.as_str())) {
            Some(Priority::High)
        } else if self.localities.iter().any(|l| text.contains(l.as_str())) {
            Some(Priority::Normal)
        } else {
            None
        }
    }

    /// Tag every relevant record in place with its priority.
    /// Returns how many were tagged.
    pub fn tag(&self, records: &mut [Record]) -> usize {
        let mut n = 0;
        for r in records.iter_mut() {
            if let Some(p) = self.classify(r) {
                r.set_priority(p);
                n += 1;
            }
        }
        n
    }

    /// [`tag`](Self::tag), then copies of the tagged records in input order.
    pub fn filter(&self, records: &mut [Record]) -> Vec<Record> {
        self.tag(records);
        records.iter().filter(|r| r.priority().is_some()).cloned().collect()
    }
}

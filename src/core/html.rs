// src/core/html.rs
//! Tolerant, case-insensitive tag-block scanning.
//!
//! Not a parser: blocks run from an opener (`<tr ...>`) to the first matching
//! closer (`</tr>`). Lowercasing is ASCII-only so byte offsets are shared
//! between the source and its lowercase copy.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// True when the byte after a `<tag` prefix ends the tag name.
fn is_name_boundary(lc: &str, at: usize) -> bool {
    match lc.as_bytes().get(at) {
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
        None => false,
    }
}

/// Find the next `<tag ...>...</tag>` block in `s` starting at `from`.
/// `lc` must be `to_lower(s)`; `open` is e.g. `"<tr"`, `close` e.g. `"</tr>"`.
/// Returns byte offsets of the whole block.
pub fn next_tag_block_in(s: &str, lc: &str, open: &str, close: &str, from: usize) -> Option<(usize, usize)> {
    let ol = to_lower(open);
    let cl = to_lower(close);
    let mut cursor = from;
    let start = loop {
        let cand = lc.get(cursor..)?.find(&ol)? + cursor;
        if is_name_boundary(lc, cand + ol.len()) {
            break cand;
        }
        cursor = cand + ol.len();
    };
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + cl.len();
    Some((start, end))
}

/// Convenience form of [`next_tag_block_in`] that lowercases `s` itself.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    next_tag_block_in(s, &to_lower(s), o, c, from)
}

/// Iterator over successive `<tag>...</tag>` blocks, lowercasing the haystack once.
pub struct TagBlocks<'a> {
    src: &'a str,
    lc: String,
    open: &'a str,
    close: &'a str,
    pos: usize,
}

impl<'a> TagBlocks<'a> {
    pub fn new(src: &'a str, open: &'a str, close: &'a str) -> Self {
        Self { src, lc: to_lower(src), open, close, pos: 0 }
    }
}

impl<'a> Iterator for TagBlocks<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<Self::Item> {
        let (s, e) = next_tag_block_in(self.src, &self.lc, self.open, self.close, self.pos)?;
        self.pos = e;
        Some(&self.src[s..e])
    }
}

/// Does the document contain at least one `<tag` opener?
pub fn contains_tag_ci(doc: &str, tag: &str) -> bool {
    next_tag_block_ci(doc, &format!("<{tag}"), &format!("</{tag}>"), 0).is_some()
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Visible text of a block: tags stripped, entities decoded, whitespace collapsed.
pub fn block_text(block: &str) -> String {
    let text = strip_tags(inner_after_open_tag(block));
    super::sanitize::normalize_ws(&super::sanitize::normalize_entities(&text))
}

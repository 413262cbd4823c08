// src/core/sanitize.rs

/// Decode the handful of entities the portal emits plus numeric references.
/// Unknown named entities are kept verbatim.
pub fn normalize_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let semi = tail
            .char_indices()
            .take_while(|(i, _)| *i < 12)
            .find(|(_, c)| *c == ';')
            .map(|(i, _)| i);
        let Some(semi) = semi else {
            out.push('&');
            rest = &tail[1..];
            continue;
        };
        match decode_entity(&tail[1..semi]) {
            Some(ch) => out.push(ch),
            None => out.push_str(&tail[..=semi]),
        }
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            // U+00A0 is the numeric spelling of &nbsp;
            if code == 0xA0 { Some(' ') } else { char::from_u32(code) }
        }
    }
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// File-name-safe form of a free-text search term.
/// Spaces become `_`; anything that is not alphanumeric, `-`, `_` or `.` is dropped.
pub fn sanitize_filename_part(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.trim().chars() {
        if ch.is_whitespace() { out.push('_'); }
        else if ch.is_alphanumeric() || ch == '-' || ch == '_' || ch == '.' { out.push(ch); }
    }
    let out = out.trim_matches('.').to_string();
    if out.is_empty() { s!("query") } else { out }
}

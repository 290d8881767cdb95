// src/scrape/html.rs
//
// Just-enough HTML scanning for pulling one table out of a page. Case
// insensitive, tolerant of attributes on the open tags. std-only.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Slice between the first `<tag ...>` and its `</tag>`, exclusive.
fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let o = lc.find(&to_lower(open_pat))?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&to_lower(close_pat))?;
    Some(&s[after..after + cr])
}

/// Find the next `<tag ...>…</tag>` block at or after `from`.
/// Returns (start, end) byte offsets covering the whole block.
fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Inner HTML of the first `<table>` on the page.
pub fn first_table(doc: &str) -> Option<&str> {
    slice_between_ci(doc, "<table", "</table>")
}

/// All `<tr>…</tr>` blocks inside a table, in order.
pub fn table_rows(table: &str) -> Vec<&str> {
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        rows.push(&table[s..e]);
        pos = e;
    }
    rows
}

/// Cleaned text of the first `<tag>` cell in `row`, if present.
pub fn cell_text(row: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let (s, e) = next_tag_block_ci(row, &open, &close, 0)?;
    Some(strip_tags(inner_after_open_tag(&row[s..e])))
}

fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Drop tags, decode the entities we actually meet, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = normalize_entities(s.as_ref());

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
    normalize_ws(&out)
}

fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

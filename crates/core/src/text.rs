//! Turns provider text (HTML-escaped, possibly with raw markup characters)
//! into plain display strings without going through a markup engine.

/// Decode an HTML-escaped string into readable plain text.
///
/// Literal `<`, `>`, space, CR and LF are first escaped so they survive
/// decoding verbatim; the whole string is then run through an inert entity
/// decoder. The output is text, never markup.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let escaped = escape_literals(raw);
    html_escape::decode_html_entities(&escaped).into_owned()
}

fn escape_literals(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            // `&nbsp;` would decode to U+00A0; keep plain spaces plain.
            ' ' => out.push_str("&#32;"),
            '\r' => out.push_str("&#13;"),
            '\n' => out.push_str("&#10;"),
            other => out.push(other),
        }
    }
    out
}

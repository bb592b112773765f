// Minimal HTML handling for event descriptions: tag removal, a fixed entity
// table, and lookup of a single element by id.

/// The only entities that are decoded. `&amp;` is last so that `&amp;lt;`
/// decodes to the literal text `&lt;`.
const ENTITIES: [(&str, &str); 5] = [
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&amp;", "&"),
];

/// True when the text contains something that looks like an HTML tag
pub fn contains_markup(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.windows(2).any(|w| {
        w[0] == b'<' && (w[1].is_ascii_alphabetic() || w[1] == b'/' || w[1] == b'!')
    })
}

/// Remove every `<...>` tag. Block-level tags (`<br>`, `<p>`, `<div>`, `<li>`)
/// become a space so adjacent words do not run together. `<script>` and
/// `<style>` elements are dropped together with their content.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('>') else {
            // Unterminated tag: drop the remainder
            rest = "";
            break;
        };

        let tag = &rest[start + 1..start + end];
        rest = &rest[start + end + 1..];

        if let Some(name) = raw_text_element(tag) {
            rest = skip_past_close(rest, name);
            out.push(' ');
        } else if is_breaking_tag(tag) {
            out.push(' ');
        }
    }
    out.push_str(rest);
    out
}

/// Opening tags whose content is code rather than text
fn raw_text_element(tag: &str) -> Option<&'static str> {
    if tag.starts_with('/') || tag.ends_with('/') {
        return None;
    }
    match tag_name(tag).as_str() {
        "script" => Some("script"),
        "style" => Some("style"),
        _ => None,
    }
}

/// Text after the `</name ...>` that closes a raw text element, or nothing
/// when it is never closed
fn skip_past_close<'a>(rest: &'a str, name: &str) -> &'a str {
    let close = format!("</{}", name);
    let Some(pos) = rest.to_ascii_lowercase().find(&close) else {
        return "";
    };
    match rest[pos..].find('>') {
        Some(end) => &rest[pos + end + 1..],
        None => "",
    }
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn is_breaking_tag(tag: &str) -> bool {
    matches!(tag_name(tag).as_str(), "br" | "p" | "div" | "li" | "ul" | "ol" | "h1" | "h2" | "h3" | "h4" | "tr")
}

/// Decode the fixed entity table; everything else is left as-is
pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            acc.replace(entity, replacement)
        })
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tags stripped, entities decoded, whitespace collapsed
pub fn html_to_text(html: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(html)))
}

/// Inner HTML of the first element whose `id` attribute equals `id`.
///
/// Nested elements with the same tag name are balanced so that
/// `<div id="x"><div>a</div>b</div>` yields `<div>a</div>b`.
pub fn inner_html_by_id<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let open_start = find_element_with_id(html, id)?;
    let open_end = tag_end(html, open_start)? + 1;

    let tag_name: String = html[open_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if tag_name.is_empty() {
        return None;
    }

    // Self-closing element has no inner content
    if html[..open_end].ends_with("/>") {
        return Some("");
    }

    let lower = html.to_ascii_lowercase();
    let open_tag = format!("<{}", tag_name);
    let close_tag = format!("</{}", tag_name);

    let mut depth = 1usize;
    let mut cursor = open_end;
    while cursor < lower.len() {
        let next_open = find_tag(&lower, &open_tag, cursor);
        let next_close = lower[cursor..].find(&close_tag).map(|i| i + cursor)?;

        match next_open {
            Some(open) if open < next_close => {
                let end = tag_end(html, open)?;
                // <div/> opens nothing
                if html.as_bytes()[end - 1] != b'/' {
                    depth += 1;
                }
                cursor = end + 1;
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(&html[open_end..next_close]);
                }
                cursor = next_close + close_tag.len();
            }
        }
    }
    None
}

/// Start offset of the `<` of the first tag carrying `id="<id>"` (or single quotes)
fn find_element_with_id(html: &str, id: &str) -> Option<usize> {
    let needles = [format!("id=\"{}\"", id), format!("id='{}'", id)];

    needles
        .iter()
        .filter_map(|needle| {
            let mut from = 0;
            while let Some(pos) = html[from..].find(needle.as_str()).map(|i| i + from) {
                // attribute must be preceded by whitespace, inside a tag
                let preceded_by_space = pos > 0
                    && html[..pos]
                        .chars()
                        .last()
                        .map(char::is_whitespace)
                        .unwrap_or(false);
                if let Some(tag_start) = html[..pos].rfind('<') {
                    if preceded_by_space && in_tag_outside_quotes(html, tag_start, pos) {
                        return Some(tag_start);
                    }
                }
                from = pos + needle.len();
            }
            None
        })
        .min()
}

/// Offset of the `>` closing the tag that starts at `tag_start`, skipping any
/// `>` inside quoted attribute values
fn tag_end(html: &str, tag_start: usize) -> Option<usize> {
    let mut quote = None;
    for (i, b) in html.as_bytes()[tag_start..].iter().copied().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(tag_start + i),
            None => {}
        }
    }
    None
}

/// True when `pos` lies inside the tag opened at `tag_start` and not within
/// a quoted attribute value
fn in_tag_outside_quotes(html: &str, tag_start: usize, pos: usize) -> bool {
    let mut quote = None;
    for b in html.as_bytes()[tag_start..pos].iter().copied() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return false,
            None => {}
        }
    }
    quote.is_none()
}

/// Find `<name` followed by whitespace, `>` or `/`, so `<p` does not match `<pre`
fn find_tag(lower: &str, open_tag: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(pos) = lower[cursor..].find(open_tag).map(|i| i + cursor) {
        let after = lower[pos + open_tag.len()..].chars().next();
        match after {
            Some(c) if c.is_whitespace() || c == '>' || c == '/' => return Some(pos),
            _ => cursor = pos + open_tag.len(),
        }
    }
    None
}

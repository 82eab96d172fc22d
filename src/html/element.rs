//! Open-tag scanning and balanced element ranges.
//!
//! All positions are byte offsets into the page text. Tag names match
//! case-insensitively; delimiters are ASCII so offsets always fall on
//! UTF-8 boundaries.

use std::ops::Range;

use super::escape::unescape;

/// An opening tag located in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    /// Offset of `<`.
    pub start: usize,
    /// Offset just past `>`.
    pub end: usize,
    /// Lowercased tag name.
    pub name: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Whether the tag ends with `/>`.
    pub self_closing: bool,
}

impl OpenTag {
    /// Get an attribute value (attribute names are case-insensitive).
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check whether the `class` attribute contains `class` as a token.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|v| v.split_ascii_whitespace().any(|c| c == class))
    }

    /// Check whether the `class` attribute contains every token of `classes`.
    pub fn has_classes(&self, classes: &str) -> bool {
        classes.split_ascii_whitespace().all(|c| self.has_class(c))
    }
}

#[inline]
fn eq_ci(bytes: &[u8], pos: usize, pat: &str) -> bool {
    bytes
        .get(pos..pos + pat.len())
        .is_some_and(|s| s.eq_ignore_ascii_case(pat.as_bytes()))
}

#[inline]
fn is_name_end(b: Option<&u8>) -> bool {
    matches!(b, Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
}

/// Whether an opening `<tag` starts at `pos`.
fn open_at(bytes: &[u8], pos: usize, tag: &str) -> bool {
    bytes.get(pos) == Some(&b'<')
        && eq_ci(bytes, pos + 1, tag)
        && is_name_end(bytes.get(pos + 1 + tag.len()))
}

/// Length of a closing `</tag>` starting at `pos`, if any.
fn close_at(bytes: &[u8], pos: usize, tag: &str) -> Option<usize> {
    if !(bytes.get(pos) == Some(&b'<') && bytes.get(pos + 1) == Some(&b'/')) {
        return None;
    }
    if !eq_ci(bytes, pos + 2, tag) {
        return None;
    }
    let mut i = pos + 2 + tag.len();
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    (bytes.get(i) == Some(&b'>')).then(|| i + 1 - pos)
}

/// Offset just past the `>` closing a tag whose `<` is at `start`,
/// skipping `>` inside quoted attribute values.
fn tag_close(bytes: &[u8], start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(start + 1) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return Some(i + 1),
            None => {}
        }
    }
    None
}

/// Elements whose content is text, never markup.
const RAW_TEXT: [&str; 2] = ["script", "style"];

/// Offset just past the `</tag>` closing raw text that starts at `from`.
fn raw_text_end(html: &str, from: usize, tag: &str) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut pos = from;
    while let Some(rel) = html.get(pos..)?.find("</") {
        let at = pos + rel;
        if let Some(len) = close_at(bytes, at, tag) {
            return Some(at + len);
        }
        pos = at + 2;
    }
    None
}

/// Offset past a comment, or a raw text element other than `tag`,
/// starting at `at`. Unterminated regions run to the end of the page.
fn skip_opaque(html: &str, at: usize, tag: &str) -> Option<usize> {
    if html[at..].starts_with("<!--") {
        let end = html[at + 4..].find("-->").map_or(html.len(), |i| at + 4 + i + 3);
        return Some(end);
    }
    let bytes = html.as_bytes();
    let raw = RAW_TEXT
        .into_iter()
        .find(|raw| !raw.eq_ignore_ascii_case(tag) && open_at(bytes, at, raw))?;
    let body = tag_close(bytes, at).unwrap_or(html.len());
    Some(raw_text_end(html, body, raw).unwrap_or(html.len()))
}

/// Find the next opening `tag` at or after `from`.
///
/// Comments and the contents of `<script>` and `<style>` are skipped.
pub fn find_open_tag(html: &str, from: usize, tag: &str) -> Option<OpenTag> {
    let bytes = html.as_bytes();
    let mut pos = from;

    while let Some(rel) = html.get(pos..)?.find('<') {
        let start = pos + rel;
        if let Some(next) = skip_opaque(html, start, tag) {
            pos = next;
            continue;
        }
        if open_at(bytes, start, tag) {
            let end = tag_close(bytes, start)?;
            let inner = html[start + 1 + tag.len()..end - 1].trim_end();
            let self_closing = inner.ends_with('/');
            let attr_src = inner.strip_suffix('/').unwrap_or(inner);
            return Some(OpenTag {
                start,
                end,
                name: tag.to_ascii_lowercase(),
                attrs: parse_attributes(attr_src),
                self_closing,
            });
        }
        pos = start + 1;
    }
    None
}

/// Offset just past the closing tag that balances `open`.
///
/// Nested elements with the same name are counted; comments and script
/// or style contents are not. Self-closing tags end at their own `>`.
/// Returns `None` when the element is never closed.
pub fn element_end(html: &str, open: &OpenTag) -> Option<usize> {
    if open.self_closing || is_void(&open.name) {
        return Some(open.end);
    }
    if RAW_TEXT.contains(&open.name.as_str()) {
        return raw_text_end(html, open.end, &open.name);
    }

    let bytes = html.as_bytes();
    let mut depth = 1usize;
    let mut pos = open.end;

    while let Some(rel) = html.get(pos..)?.find('<') {
        let at = pos + rel;
        if let Some(next) = skip_opaque(html, at, &open.name) {
            pos = next;
        } else if let Some(len) = close_at(bytes, at, &open.name) {
            depth -= 1;
            if depth == 0 {
                return Some(at + len);
            }
            pos = at + len;
        } else if open_at(bytes, at, &open.name) {
            let end = tag_close(bytes, at)?;
            if bytes[end - 2] != b'/' {
                depth += 1;
            }
            pos = end;
        } else {
            pos = at + 1;
        }
    }
    None
}

/// Byte ranges of every top-level `tag` element accepted by `pred`.
///
/// Matches never overlap: once an element matches, scanning resumes after
/// its end, so matching elements nested inside it are not reported.
/// Unclosed matching elements are skipped.
pub fn find_elements<F>(html: &str, tag: &str, pred: F) -> Vec<Range<usize>>
where
    F: Fn(&OpenTag) -> bool,
{
    let mut ranges = Vec::new();
    let mut pos = 0;

    while let Some(open) = find_open_tag(html, pos, tag) {
        if pred(&open)
            && let Some(end) = element_end(html, &open)
        {
            ranges.push(open.start..end);
            pos = end;
            continue;
        }
        pos = open.end;
    }
    ranges
}

/// Text content of a fragment: tags dropped, entities decoded,
/// whitespace collapsed.
pub fn inner_text(fragment: &str) -> String {
    let mut text = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for c in fragment.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    unescape(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if an HTML tag is a void element (never has a closing tag).
#[inline]
pub fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Parse HTML-style attributes from a string.
///
/// Input: `class="accordion-item" data-x='1' hidden`
/// Output: `[("class", "accordion-item"), ("data-x", "1"), ("hidden", "")]`
pub fn parse_attributes(s: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        let mut name = String::from(c);
        while let Some(&next) = chars.peek() {
            if next == '=' || next.is_whitespace() {
                break;
            }
            name.push(next);
            chars.next();
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        if chars.peek() != Some(&'=') {
            attrs.push((name, String::new()));
            continue;
        }
        chars.next(); // consume '='

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        let mut value = String::new();
        match chars.peek().copied() {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                for c in chars.by_ref() {
                    if c == quote {
                        break;
                    }
                    value.push(c);
                }
            }
            _ => {
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    value.push(c);
                    chars.next();
                }
            }
        }
        attrs.push((name, value));
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<main>
<div class="accordion" id="course-outline">
  <div class="accordion-item"><div class="accordion-header"><h3 class="accordion-title">Unit 2</h3></div></div>
  <div class="accordion-item"><h3>Unit 1</h3></div>
</div>
<img src="a.png" alt="x">
</main>"#;

    #[test]
    fn test_find_open_tag_attrs() {
        let open = find_open_tag(PAGE, 0, "div").unwrap();
        assert_eq!(open.attr("id"), Some("course-outline"));
        assert!(open.has_class("accordion"));
        assert!(!open.has_class("accordion-item"));
        assert!(!open.self_closing);
    }

    #[test]
    fn test_find_open_tag_does_not_match_prefix() {
        // `<divider>` is not a `div`
        let html = "<divider></divider><div id=\"x\"></div>";
        let open = find_open_tag(html, 0, "div").unwrap();
        assert_eq!(open.attr("id"), Some("x"));
    }

    #[test]
    fn test_element_end_nested() {
        let open = find_open_tag(PAGE, 0, "div").unwrap();
        let end = element_end(PAGE, &open).unwrap();
        assert!(PAGE[..end].ends_with("</div>"));
        assert!(PAGE[end..].trim_start().starts_with("<img"));
    }

    #[test]
    fn test_element_end_quoted_gt() {
        let html = r#"<p data-x="a>b">text</p>tail"#;
        let open = find_open_tag(html, 0, "p").unwrap();
        assert_eq!(open.attr("data-x"), Some("a>b"));
        assert_eq!(&html[element_end(html, &open).unwrap()..], "tail");
    }

    #[test]
    fn test_void_and_self_closing() {
        let open = find_open_tag(PAGE, 0, "img").unwrap();
        assert_eq!(element_end(PAGE, &open), Some(open.end));

        let html = "<div class=\"spacer\" /><p>x</p>";
        let open = find_open_tag(html, 0, "div").unwrap();
        assert!(open.self_closing);
        assert_eq!(open.attr("class"), Some("spacer"));
    }

    #[test]
    fn test_find_elements_top_level() {
        let items = find_elements(PAGE, "div", |t| t.has_class("accordion-item"));
        assert_eq!(items.len(), 2);
        assert!(PAGE[items[0].clone()].contains("Unit 2"));
        assert!(PAGE[items[1].clone()].contains("Unit 1"));
    }

    #[test]
    fn test_unclosed_element() {
        let html = "<section class=\"x\"><p>never closed";
        let open = find_open_tag(html, 0, "section").unwrap();
        assert_eq!(element_end(html, &open), None);
        assert!(find_elements(html, "section", |_| true).is_empty());
    }

    #[test]
    fn test_element_end_skips_scripts_and_comments() {
        let html = concat!(
            "<div class=\"item\">",
            "<script>var s = \"<div>\"; if (a<b) {}</script>",
            "<style>.x::after { content: \"</div>\"; }</style>",
            "<!-- <div> </div></div> -->",
            "text</div>tail"
        );
        let open = find_open_tag(html, 0, "div").unwrap();
        assert_eq!(&html[element_end(html, &open).unwrap()..], "tail");
    }

    #[test]
    fn test_find_open_tag_skips_opaque_regions() {
        let html = "<!-- <div id=\"a\"> --><script>'<div id=\"b\">'</script><div id=\"c\"></div>";
        let open = find_open_tag(html, 0, "div").unwrap();
        assert_eq!(open.attr("id"), Some("c"));

        let script = find_open_tag(html, 0, "script").unwrap();
        let end = element_end(html, &script).unwrap();
        assert!(html[..end].ends_with("</script>"));
    }

    #[test]
    fn test_case_insensitive_tags() {
        let html = "<SECTION Class=\"breadcrumb\">x</Section>after";
        let ranges = find_elements(html, "section", |t| t.has_class("breadcrumb"));
        assert_eq!(ranges, vec![0..html.len() - "after".len()]);
    }

    #[test]
    fn test_inner_text() {
        assert_eq!(
            inner_text("<h3 class=\"t\">  Unit&nbsp;1:\n  <em>Intro</em> </h3>"),
            "Unit 1: Intro"
        );
        assert_eq!(inner_text("Health &amp; Safety"), "Health & Safety");
    }

    #[test]
    fn test_parse_attributes() {
        let attrs = parse_attributes(r#"a="1" b='2' c=3 disabled"#);
        assert_eq!(
            attrs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
                ("disabled".to_string(), String::new()),
            ]
        );
    }
}

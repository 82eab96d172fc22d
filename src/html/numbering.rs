//! List item numbering cleanup.
//!
//! Imported syllabus text often carries manual numbering (`1. Intro`) inside
//! `<li>` elements, which renders as a doubled marker next to the bullet.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::element::find_elements;

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|\s)(?:\d+\.\s+)+").unwrap());

/// Remove `1. ` style prefixes from the text inside `<li>` elements.
///
/// Only text between tags is touched; attributes and markup are kept.
/// Numbers must be followed by whitespace, so `3.5 hours` is preserved.
pub fn strip_list_numbering(html: &str) -> Cow<'_, str> {
    let items = find_elements(html, "li", |_| true);
    if items.is_empty() {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    let mut changed = false;

    for item in items {
        out.push_str(&html[cursor..item.start]);
        let segment = &html[item.clone()];
        let cleaned = strip_text_nodes(segment);
        changed |= matches!(cleaned, Cow::Owned(_));
        out.push_str(&cleaned);
        cursor = item.end;
    }
    out.push_str(&html[cursor..]);

    if changed { Cow::Owned(out) } else { Cow::Borrowed(html) }
}

/// Apply the prefix removal to each text run between tags.
fn strip_text_nodes(fragment: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(fragment.len());
    let mut changed = false;
    let mut rest = fragment;

    while !rest.is_empty() {
        let text_end = rest.find('<').unwrap_or(rest.len());
        let (text, tail) = rest.split_at(text_end);

        let replaced = NUMBER_PREFIX.replace_all(text, "$1");
        changed |= matches!(replaced, Cow::Owned(_));
        out.push_str(&replaced);

        let tag_end = tail.find('>').map_or(tail.len(), |i| i + 1);
        out.push_str(&tail[..tag_end]);
        rest = &tail[tag_end..];
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_numbering() {
        let html = "<ul><li>1. Introduction</li><li>2. Tables and 3. charts</li></ul>";
        assert_eq!(
            strip_list_numbering(html),
            "<ul><li>Introduction</li><li>Tables and charts</li></ul>"
        );
    }

    #[test]
    fn test_nested_markup_kept() {
        let html = "<li><strong>4. Filters</strong> and sorting</li>";
        assert_eq!(
            strip_list_numbering(html),
            "<li><strong>Filters</strong> and sorting</li>"
        );
    }

    #[test]
    fn test_decimals_and_outside_text_untouched() {
        let html = "<p>1. Not a list</p><li>Takes 3.5 hours</li>";
        assert!(matches!(strip_list_numbering(html), Cow::Borrowed(_)));
    }

    #[test]
    fn test_attributes_untouched() {
        let html = "<li data-step=\"1. x\">1. Step</li>";
        assert_eq!(strip_list_numbering(html), "<li data-step=\"1. x\">Step</li>");
    }

    #[test]
    fn test_idempotent() {
        let html = "<li>1. One</li>";
        let once = strip_list_numbering(html).into_owned();
        assert_eq!(strip_list_numbering(&once), once);
    }

    #[test]
    fn test_stacked_prefixes() {
        let html = "<li>1. 2. Intro</li><li>Part 3. 4. Review</li>";
        let once = strip_list_numbering(html).into_owned();
        assert_eq!(once, "<li>Intro</li><li>Part Review</li>");
        assert!(matches!(strip_list_numbering(&once), Cow::Borrowed(_)));
    }
}

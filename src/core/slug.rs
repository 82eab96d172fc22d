//! Title slugification.
//!
//! Course and category pages are named after their titles:
//! `Business Analysis and Data Skills` → `business-analysis-and-data-skills.html`.

use deunicode::deunicode;

/// Convert a title into a URL-safe, lowercase-hyphenated slug.
///
/// `&` becomes `and`, non-ASCII text is transliterated, and everything
/// except ASCII letters, digits, whitespace and `-` is dropped. Runs of
/// whitespace and hyphens collapse into a single `-`.
///
/// Returns an empty string when nothing usable remains; callers treat that
/// as "skip this item".
pub fn slugify(title: &str) -> String {
    let ascii = deunicode(title).to_lowercase().replace('&', "and");

    let kept: String = ascii
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for part in kept.trim().split(|c: char| c.is_whitespace() || c == '-') {
        if part.is_empty() {
            continue;
        }
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(part);
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_titles() {
        assert_eq!(
            slugify("Business Analysis and Data Skills"),
            "business-analysis-and-data-skills"
        );
        assert_eq!(
            slugify("Compliance, Law and Governance"),
            "compliance-law-and-governance"
        );
        assert_eq!(slugify("Health & Safety"), "health-and-safety");
        assert_eq!(slugify("  Retail -- Sales  "), "retail-sales");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Café Management"), "cafe-management");
        assert_eq!(slugify("Excel – Advanced"), "excel-advanced");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}

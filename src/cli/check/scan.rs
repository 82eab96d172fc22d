//! Page scanning for `check`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::core::{LinkKind, split_suffix};
use crate::html::unescape;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static RAW_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>").unwrap()
});
static DIV_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<div[\s>/]").unwrap());
static DIV_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</div\s*>").unwrap());

const URL_ATTRS: [&str; 2] = ["href", "src"];

/// A link extracted from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLink {
    /// Link destination, entities decoded.
    pub dest: String,
    /// Source attribute.
    pub attr: &'static str,
}

impl ScannedLink {
    #[inline]
    pub fn kind(&self) -> LinkKind<'_> {
        LinkKind::parse(&self.dest)
    }
}

/// Extract `href`/`src` values from a page.
pub fn extract_links(html: &str) -> Vec<ScannedLink> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else { continue };
        for attr in URL_ATTRS {
            if let Some(Some(value)) = tag.attributes().get(attr) {
                let value = value.as_utf8_str();
                let dest = unescape(value.trim()).into_owned();
                if !dest.is_empty() {
                    links.push(ScannedLink { dest, attr });
                }
            }
        }
    }
    links
}

/// The file a file-relative link points at, or `None` for links `check`
/// does not resolve (external, fragment, site-root, query-only, templated).
pub fn link_target(file: &Path, link: &ScannedLink) -> Option<PathBuf> {
    let LinkKind::FileRelative(dest) = link.kind() else {
        return None;
    };
    let (path, _) = split_suffix(dest);
    if path.is_empty() || path.contains("${") || path.contains("{{") {
        return None;
    }
    let dir = file.parent()?;
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    Some(dir.join(decoded.as_ref()))
}

/// Count `<div>` opens and closes outside comments, scripts and styles.
pub fn div_balance(html: &str) -> (usize, usize) {
    let text = COMMENT.replace_all(html, "");
    let text = RAW_TEXT.replace_all(&text, "");
    (DIV_OPEN.find_iter(&text).count(), DIV_CLOSE.find_iter(&text).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links() {
        let html = r#"<a href="a.html?x=1&amp;y=2">A</a><img src='../img/x.png'><link href=""><script src="app.js"></script>"#;
        let links = extract_links(html);
        let dests: Vec<_> = links.iter().map(|l| (l.attr, l.dest.as_str())).collect();
        assert_eq!(
            dests,
            vec![
                ("href", "a.html?x=1&y=2"),
                ("src", "../img/x.png"),
                ("src", "app.js"),
            ]
        );
    }

    #[test]
    fn test_link_target() {
        let file = Path::new("/site/pages/about.html");
        let link = |dest: &str| ScannedLink {
            dest: dest.into(),
            attr: "href",
        };
        assert_eq!(
            link_target(file, &link("../assets/a%20b.css?v=2")),
            Some(PathBuf::from("/site/pages/../assets/a b.css"))
        );
        assert_eq!(link_target(file, &link("https://example.com")), None);
        assert_eq!(link_target(file, &link("#top")), None);
        assert_eq!(link_target(file, &link("/index.html")), None);
        assert_eq!(link_target(file, &link("?page=2")), None);
        assert_eq!(link_target(file, &link("${base}/x.html")), None);
    }

    #[test]
    fn test_div_balance() {
        let html = "<div class=\"a\"><div>\n<!-- <div> -->\n<script>let s = '<div>';</script></div>";
        assert_eq!(div_balance(html), (2, 1));
        assert_eq!(div_balance("<divider></divider><div/>"), (1, 0));
    }

    #[test]
    fn test_link_target_keeps_invalid_escapes() {
        let file = Path::new("/site/index.html");
        let link = ScannedLink {
            dest: "100%/%zz.png".into(),
            attr: "src",
        };
        assert_eq!(
            link_target(file, &link),
            Some(PathBuf::from("/site/100%/%zz.png"))
        );
    }
}

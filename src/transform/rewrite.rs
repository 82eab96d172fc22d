//! Relative path rewriting.
//!
//! Every `href`, `src` and `content` attribute holding a file-relative path
//! is reduced to its root-relative form (leading `./` and `../` removed),
//! mapped through the configured rules, and re-anchored with the page's
//! root prefix:
//!
//! ```text
//! pages/courses/individual/word.html
//!   href="../css/style.css"  ──(css/ → assets/css/)──►  href="../../../assets/css/style.css"
//! ```
//!
//! Rules are applied until none matches, so a path moved by one rule into
//! the source of a later rule ends at the final destination. A path already
//! at some rule's destination, or under an anchor, is only re-anchored.
//!
//! External, fragment and site-root links are never touched, and paths that
//! match neither a rule nor an anchor are left as written. The output is a
//! fixed point: rewriting it again changes nothing.
//!
//! Only attributes inside a tag are considered, and `content` only on
//! `<meta>` tags that carry URLs (`og:`/`twitter:` properties and
//! `http-equiv` refresh).

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use std::{fs, io};

use regex::{Captures, Regex};

use super::{Page, Transform};
use crate::config::{RewriteConfig, RewriteRule};
use crate::core::{LinkKind, split_suffix};

static LINK_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\s)(href|src|content)(\s*=\s*)(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static REFRESH_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\s*\d+\s*;\s*url\s*=\s*)(.*)$").unwrap());

/// Category pages that exist, used to redirect legacy `pages/<slug>.html` links.
#[derive(Debug, Clone, Default)]
pub struct CategoryPages {
    /// Legacy directory, e.g. `pages/`.
    legacy: String,
    /// Category directory, e.g. `pages/courses/categories/`.
    dir: String,
    slugs: HashSet<String>,
}

impl CategoryPages {
    /// `dir` is the root-relative category directory; legacy links live in
    /// its first component.
    pub fn new(dir: &str, slugs: impl IntoIterator<Item = String>) -> Self {
        let dir = dir.trim_matches('/');
        let legacy = dir.split('/').next().unwrap_or_default();
        Self {
            legacy: format!("{legacy}/"),
            dir: format!("{dir}/"),
            slugs: slugs.into_iter().collect(),
        }
    }

    /// Collect the `*.html` stems of `abs_dir`. A missing directory yields
    /// no pages.
    pub fn scan(rel_dir: &Path, abs_dir: &Path) -> io::Result<Self> {
        let mut slugs = Vec::new();
        if abs_dir.is_dir() {
            for entry in fs::read_dir(abs_dir)? {
                let path = entry?.path();
                if path.extension().is_some_and(|e| e == "html")
                    && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                {
                    slugs.push(stem.to_string());
                }
            }
        }
        let dir = rel_dir.to_string_lossy().replace('\\', "/");
        Ok(Self::new(&dir, slugs))
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }

    fn relink(&self, bare: &str) -> Option<String> {
        let file = bare.strip_prefix(self.legacy.as_str())?;
        let slug = file.strip_suffix(".html")?;
        (!slug.contains('/') && self.slugs.contains(slug)).then(|| format!("{}{file}", self.dir))
    }
}

/// The `rewrite` pass.
pub struct Rewriter<'a> {
    config: &'a RewriteConfig,
    categories: Option<CategoryPages>,
}

impl<'a> Rewriter<'a> {
    /// `categories` is only consulted when category relinking is enabled.
    pub fn new(config: &'a RewriteConfig, categories: Option<CategoryPages>) -> Self {
        let categories = categories.filter(|_| config.category_links);
        Self { config, categories }
    }

    /// Rewrite one attribute value for a page whose root prefix is `root`.
    ///
    /// Returns `None` when the value stays as it is.
    pub fn rewrite_link(&self, value: &str, root: &str) -> Option<String> {
        let LinkKind::FileRelative(link) = LinkKind::parse(value) else {
            return None;
        };
        let (path, suffix) = split_suffix(link);
        let bare = strip_relative(path);
        if bare.is_empty() {
            return None;
        }

        let mapped = self.map(bare);
        let base = mapped.as_deref().unwrap_or(bare);
        let target = match self.categories.as_ref().and_then(|c| c.relink(base)) {
            Some(relinked) => relinked,
            None => mapped?.into_owned(),
        };

        let mut out = format!("{root}{target}{suffix}");
        if self.config.collapse_slashes {
            out = collapse_slashes(&out);
        }
        (out != value).then_some(out)
    }

    /// Map a root-relative path through the rules.
    ///
    /// Each round applies the first matching rule; rounds stop when no rule
    /// moves the path. A path no rule moves is kept when it already sits at
    /// a rule's destination or under an anchor.
    fn map<'b>(&self, bare: &'b str) -> Option<Cow<'b, str>> {
        let rules = &self.config.rules;
        let mut mapped: Option<String> = None;
        for _ in 0..rules.len() {
            let path = mapped.as_deref().unwrap_or(bare);
            let Some(Cow::Owned(next)) = rules.iter().find_map(|rule| apply_rule(rule, path))
            else {
                break;
            };
            mapped = Some(next);
        }
        if let Some(mapped) = mapped {
            return Some(Cow::Owned(mapped));
        }

        let settled = rules.iter().any(|rule| at_destination(rule, bare))
            || self.config.anchors.iter().any(|a| bare.starts_with(a.as_str()));
        settled.then_some(Cow::Borrowed(bare))
    }

    /// Rewrite a `<meta content>` value. Refresh values keep their delay.
    fn rewrite_meta(&self, value: &str, root: &str) -> Option<String> {
        match REFRESH_URL.captures(value) {
            Some(caps) => {
                let url = self.rewrite_link(caps[2].trim(), root)?;
                Some(format!("{}{url}", &caps[1]))
            }
            None => self.rewrite_link(value, root),
        }
    }
}

impl Transform for Rewriter<'_> {
    const NAME: &'static str = "rewrite";

    fn apply<'h>(&self, html: &'h str, page: &Page, _notes: &mut Vec<String>) -> Cow<'h, str> {
        let out = LINK_ATTR.replace_all(html, |caps: &Captures| {
            let whole = &caps[0];
            let Some(tag) = enclosing_tag(html, caps.get(0).map_or(0, |m| m.start())) else {
                return whole.to_string();
            };
            let value = caps.get(4).or_else(|| caps.get(5)).map_or("", |m| m.as_str());
            let rewritten = if caps[2].eq_ignore_ascii_case("content") {
                is_url_meta(tag)
                    .then(|| self.rewrite_meta(value, &page.root))
                    .flatten()
            } else {
                self.rewrite_link(value, &page.root)
            };
            match rewritten {
                Some(new) => {
                    let quote = if caps.get(4).is_some() { '"' } else { '\'' };
                    format!("{}{}{}{quote}{new}{quote}", &caps[1], &caps[2], &caps[3])
                }
                None => whole.to_string(),
            }
        });
        match out {
            Cow::Owned(s) if s != html => Cow::Owned(s),
            _ => Cow::Borrowed(html),
        }
    }
}

/// Match a rule against a root-relative path.
///
/// When the destination extends the source (`img/` to `img/v2/`), a path
/// already under the destination matches without change so the rule is
/// never applied twice.
fn apply_rule<'b>(rule: &RewriteRule, bare: &'b str) -> Option<Cow<'b, str>> {
    if rule.is_prefix() {
        if rule.to.starts_with(rule.from.as_str()) && bare.starts_with(rule.to.as_str()) {
            return Some(Cow::Borrowed(bare));
        }
        let rest = bare.strip_prefix(rule.from.as_str())?;
        Some(Cow::Owned(format!("{}{rest}", rule.to)))
    } else if bare == rule.from {
        Some(Cow::Owned(rule.to.clone()))
    } else {
        None
    }
}

/// Whether `bare` already sits where `rule` sends paths.
fn at_destination(rule: &RewriteRule, bare: &str) -> bool {
    if rule.is_prefix() {
        !rule.to.is_empty() && bare.starts_with(rule.to.as_str())
    } else {
        bare == rule.to
    }
}

/// The tag text from `<` up to `pos`, or `None` when `pos` is not inside
/// a tag. `>` inside quoted values does not close the tag.
fn enclosing_tag(html: &str, pos: usize) -> Option<&str> {
    let start = html[..pos].rfind('<')?;
    let tag = &html[start..pos];
    let mut quote: Option<char> = None;
    for c in tag.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => return None,
            None => {}
        }
    }
    Some(tag)
}

/// `<meta>` tags whose `content` holds a URL.
fn is_url_meta(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    tag.starts_with("<meta")
        && (tag.contains("og:") || tag.contains("twitter:") || tag.contains("http-equiv"))
}

/// Remove leading `./` and `../` segments.
fn strip_relative(mut path: &str) -> &str {
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix("../") {
            path = rest;
        } else {
            return path;
        }
    }
}

/// Collapse repeated `/`, except the `//` following a scheme colon.
pub fn collapse_slashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '/' && out.ends_with('/') && !out[..out.len() - 1].ends_with(':') {
            continue;
        }
        out.push(c);
    }
    out
}

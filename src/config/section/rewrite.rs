//! `[rewrite]` section configuration.
//!
//! ```toml
//! [rewrite]
//! rules = [
//!     { from = "css/", to = "assets/css/" },           # prefix rule
//!     { from = "about.html", to = "pages/about.html" }, # file rule
//! ]
//! anchors = ["assets/", "pages/", "index.html"]
//! collapse_slashes = true
//! category_links = true
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Maps a legacy root-relative location to its new place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// A `from` ending in `/` matches every path below it.
    pub fn is_prefix(&self) -> bool {
        self.from.ends_with('/')
    }

    /// Whether paths this rule produces can be matched by `next`.
    fn feeds(&self, next: &RewriteRule) -> bool {
        !next.from.is_empty()
            && self.to.starts_with(next.from.as_str())
            && !self.to.starts_with(self.from.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Tried in order on each pass; passes repeat until no rule matches.
    pub rules: Vec<RewriteRule>,

    /// Canonical prefixes re-anchored to the file's depth without renaming.
    pub anchors: Vec<String>,

    /// Collapse `//` in rewritten paths.
    pub collapse_slashes: bool,

    /// Redirect `pages/<slug>.html` to existing category pages.
    pub category_links: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            anchors: vec![
                "assets/".into(),
                "pages/".into(),
                "Images/".into(),
                "index.html".into(),
            ],
            collapse_slashes: true,
            category_links: true,
        }
    }
}

impl RewriteConfig {
    pub const RULES: FieldPath = FieldPath::new("rewrite.rules");
    pub const ANCHORS: FieldPath = FieldPath::new("rewrite.anchors");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (i, rule) in self.rules.iter().enumerate() {
            let from = rule.from.as_str();
            if from.is_empty() || from == "/" {
                diag.error(Self::RULES, format!("rule #{}: `from` cannot be empty", i + 1));
            } else if from.starts_with('/') || from.starts_with("./") || from.starts_with("../") {
                diag.error_with_hint(
                    Self::RULES,
                    format!("rule #{}: `from = \"{from}\"` must be root-relative", i + 1),
                    format!(
                        "use \"{}\"",
                        from.trim_start_matches(['.', '/'])
                    ),
                );
            }
            if rule.is_prefix() && !rule.to.is_empty() && !rule.to.ends_with('/') {
                diag.warn(
                    Self::RULES,
                    format!(
                        "rule #{}: prefix rule `{from}` maps to `{}` without a trailing `/`",
                        i + 1,
                        rule.to
                    ),
                );
            }
        }
        for (i, a) in self.rules.iter().enumerate() {
            for (j, b) in self.rules.iter().enumerate().skip(i + 1) {
                if a.feeds(b) && b.feeds(a) {
                    diag.warn(
                        Self::RULES,
                        format!("rules #{} and #{} map paths into each other", i + 1, j + 1),
                    );
                }
            }
        }
        if self.anchors.iter().any(|a| a.is_empty()) {
            diag.error(Self::ANCHORS, "anchors cannot contain an empty prefix");
        }
    }
}

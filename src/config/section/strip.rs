//! `[strip]` section configuration.
//!
//! ```toml
//! [strip]
//! elements = [{ tag = "nav", class = "breadcrumb" }]
//! item_titles = ['^Author\s*:']
//! remove_scripts = ["reorder-units.js"]
//! ensure_scripts = ["assets/js/accordion.js"]
//! replacements = [{ from = "`n", to = "\n" }]
//! collapse_blank_lines = true
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An element selected by tag name and class token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMatch {
    pub tag: String,
    pub class: String,
}

/// A literal text replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Elements removed with their content.
    pub elements: Vec<ElementMatch>,

    /// Patterns matched against accordion item titles.
    pub item_titles: Vec<String>,

    /// Script tags whose `src` ends with one of these are removed.
    pub remove_scripts: Vec<String>,

    /// Scripts (relative to the site root) included once before `</body>`.
    pub ensure_scripts: Vec<String>,

    /// Applied in order, after element removal.
    pub replacements: Vec<Replacement>,

    /// Collapse three or more newlines into one blank line.
    pub collapse_blank_lines: bool,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            item_titles: vec![r"^Author\s*:".into()],
            remove_scripts: Vec::new(),
            ensure_scripts: Vec::new(),
            replacements: vec![Replacement {
                from: "`n".into(),
                to: "\n".into(),
            }],
            collapse_blank_lines: true,
        }
    }
}

impl StripConfig {
    pub const ELEMENTS: FieldPath = FieldPath::new("strip.elements");
    pub const ITEM_TITLES: FieldPath = FieldPath::new("strip.item_titles");
    pub const SCRIPTS: FieldPath = FieldPath::new("strip.ensure_scripts");
    pub const REPLACEMENTS: FieldPath = FieldPath::new("strip.replacements");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for m in &self.elements {
            if m.tag.trim().is_empty() || m.class.trim().is_empty() {
                diag.error(Self::ELEMENTS, "elements need both `tag` and `class`");
            }
        }
        for pattern in &self.item_titles {
            if let Err(e) = Regex::new(pattern) {
                diag.error(Self::ITEM_TITLES, format!("invalid pattern `{pattern}`: {e}"));
            }
        }
        for script in &self.ensure_scripts {
            if script.starts_with('/') || script.starts_with('.') {
                diag.error_with_hint(
                    Self::SCRIPTS,
                    format!("`{script}` must be relative to the site root"),
                    "the root prefix is added per page",
                );
            }
        }
        if self.replacements.iter().any(|r| r.from.is_empty()) {
            diag.error(Self::REPLACEMENTS, "replacement `from` cannot be empty");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let mut diag = ConfigDiagnostics::new();
        StripConfig::default().validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let config = StripConfig {
            item_titles: vec!["(unclosed".into()],
            ensure_scripts: vec!["../js/a.js".into()],
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}

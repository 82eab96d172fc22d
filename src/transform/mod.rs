//! In-place page transformations.
//!
//! Each pass takes a page's text and returns the new text, borrowing the
//! input when nothing changes so callers can skip the write.
//!
//! | Pass        | Purpose                                                |
//! |-------------|--------------------------------------------------------|
//! | [`rewrite`] | Re-anchor and rename file-relative links               |
//! | [`strip`]   | Remove fragments and scripts, ensure required scripts  |
//! | [`reorder`] | Sort accordion units, normalise titles and numbering   |

pub mod reorder;
pub mod rewrite;
pub mod strip;

pub use reorder::Reorderer;
pub use rewrite::{CategoryPages, Rewriter};
pub use strip::Stripper;

use crate::core::to_root;
use std::borrow::Cow;
use std::path::Path;

/// A page being transformed.
#[derive(Debug, Clone)]
pub struct Page {
    /// Prefix reaching the site root from this page (`./`, `../`, ...).
    pub root: String,
}

impl Page {
    /// `rel_path` is the page path relative to the site root.
    pub fn new(rel_path: impl AsRef<Path>) -> Self {
        Self {
            root: to_root(rel_path.as_ref()),
        }
    }
}

/// A single-pass page transformation.
pub trait Transform: Sync {
    /// Log module name, e.g. `rewrite`.
    const NAME: &'static str;

    /// Transform `html`. Non-fatal observations are pushed to `notes`.
    fn apply<'h>(&self, html: &'h str, page: &Page, notes: &mut Vec<String>) -> Cow<'h, str>;
}

/// Replace `ranges` (sorted, non-overlapping) of `html` with the strings
/// produced by `f`.
pub(crate) fn splice<F>(html: &str, ranges: &[std::ops::Range<usize>], mut f: F) -> String
where
    F: FnMut(usize, &str) -> String,
{
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for (i, r) in ranges.iter().enumerate() {
        out.push_str(&html[cursor..r.start]);
        out.push_str(&f(i, &html[r.clone()]));
        cursor = r.end;
    }
    out.push_str(&html[cursor..]);
    out
}

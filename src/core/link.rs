//! Link classification utilities.

/// Syntactic classification of links found in page attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/about, /assets/css/styles.css).
    SiteRoot(&'a str),
    /// File-relative path (./image.png, ../../index.html).
    FileRelative(&'a str),
    /// Empty attribute value.
    Empty,
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if link.is_empty() {
            Self::Empty
        } else if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if let Some(anchor) = link.strip_prefix("./#") {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }
}

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must have at least 1 character before the colon and only
/// contain ASCII alphanumeric or `+`, `-`, `.`
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a link into its path and the `?query` / `#fragment` suffix.
///
/// # Examples
/// ```ignore
/// assert_eq!(split_suffix("a/b.html#top"), ("a/b.html", "#top"));
/// assert_eq!(split_suffix("a/b.css?v=2"), ("a/b.css", "?v=2"));
/// assert_eq!(split_suffix("a/b.html"), ("a/b.html", ""));
/// ```
#[inline]
pub fn split_suffix(link: &str) -> (&str, &str) {
    match link.find(['?', '#']) {
        Some(pos) => link.split_at(pos),
        None => (link, ""),
    }
}

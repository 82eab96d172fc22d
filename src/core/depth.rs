//! Relative prefixes between site locations.

use std::path::{Component, Path};

/// Prefix that reaches the site root from a page.
///
/// `rel_path` is the page path relative to the site root. Pages at the root
/// get `./`; each directory level adds one `../`.
///
/// # Examples
/// ```ignore
/// assert_eq!(to_root(Path::new("index.html")), "./");
/// assert_eq!(to_root(Path::new("pages/courses/individual/x.html")), "../../../");
/// ```
pub fn to_root(rel_path: &Path) -> String {
    let depth = rel_path
        .parent()
        .map(|p| p.components().filter(|c| matches!(c, Component::Normal(_))).count())
        .unwrap_or(0);

    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

/// Relative link prefix from directory `from` to directory `to`.
///
/// Both paths are relative to the site root. The result always ends with
/// `/` so a file name can be appended.
///
/// # Examples
/// ```ignore
/// assert_eq!(relative_dir(Path::new("pages/courses/categories"),
///                         Path::new("pages/courses/individual")), "../individual/");
/// ```
pub fn relative_dir(from: &Path, to: &Path) -> String {
    let from: Vec<_> = normal_components(from);
    let to: Vec<_> = normal_components(to);

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut out = "../".repeat(from.len() - common);
    for part in &to[common..] {
        out.push_str(part);
        out.push('/');
    }
    if out.is_empty() {
        out.push_str("./");
    }
    out
}

fn normal_components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_root_depths() {
        assert_eq!(to_root(Path::new("index.html")), "./");
        assert_eq!(to_root(Path::new("pages/about.html")), "../");
        assert_eq!(to_root(Path::new("pages/features/x.html")), "../../");
        assert_eq!(
            to_root(Path::new("pages/courses/individual/excel.html")),
            "../../../"
        );
        assert_eq!(to_root(Path::new("./pages/about.html")), "../");
    }

    #[test]
    fn test_relative_dir() {
        assert_eq!(
            relative_dir(
                Path::new("pages/courses/categories"),
                Path::new("pages/courses/individual")
            ),
            "../individual/"
        );
        assert_eq!(relative_dir(Path::new("pages"), Path::new("pages")), "./");
        assert_eq!(
            relative_dir(Path::new(""), Path::new("pages/courses")),
            "pages/courses/"
        );
        assert_eq!(relative_dir(Path::new("a/b"), Path::new("")), "../../");
    }
}

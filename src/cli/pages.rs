//! In-place page commands: `rewrite`, `strip` and `reorder`.

use anyhow::{Context, Result};

use super::PageArgs;
use super::common::{collect_pages, run_transform};
use crate::config::SiteConfig;
use crate::{debug, log};
use crate::transform::{CategoryPages, Reorderer, Rewriter, Stripper};
use crate::utils::plural_count;

/// Rewrite file-relative links in place.
pub fn rewrite_pages(args: &PageArgs, config: &SiteConfig) -> Result<()> {
    let files = collect_pages(&args.paths, config)?;

    let categories = if config.rewrite.category_links {
        let dir = &config.paths.categories;
        let pages = CategoryPages::scan(&config.root_relative(dir), dir)
            .with_context(|| format!("failed to scan {}", dir.display()))?;
        if pages.is_empty() {
            log!("warning"; "no category pages in {}, category links left as they are", dir.display());
        } else {
            debug!("rewrite"; "found {}", plural_count(pages.len(), "category page"));
        }
        Some(pages)
    } else {
        None
    };

    let rewriter = Rewriter::new(&config.rewrite, categories);
    run_transform(&rewriter, &files, config, args.dry).map(|_| ())
}

/// Strip configured fragments and ensure required scripts.
pub fn strip_pages(args: &PageArgs, config: &SiteConfig) -> Result<()> {
    let files = collect_pages(&args.paths, config)?;
    let stripper = Stripper::new(&config.strip).context("invalid strip.item_titles pattern")?;
    run_transform(&stripper, &files, config, args.dry).map(|_| ())
}

/// Reorder course outline units and clean list numbering.
pub fn reorder_pages(args: &PageArgs, config: &SiteConfig) -> Result<()> {
    let files = collect_pages(&args.paths, config)?;
    let reorderer = Reorderer::new(&config.reorder);
    run_transform(&reorderer, &files, config, args.dry).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> PageArgs {
        PageArgs {
            paths: vec![],
            dry: false,
        }
    }

    #[test]
    fn test_rewrite_relinks_existing_categories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pages/courses/categories")).unwrap();
        fs::write(root.join("pages/courses/categories/leadership.html"), "").unwrap();
        fs::write(
            root.join("index.html"),
            r#"<a href="pages/leadership.html">L</a><a href="pages/other.html">O</a>"#,
        )
        .unwrap();
        let config = test_config(root, "");

        rewrite_pages(&args(), &config).unwrap();
        let html = fs::read_to_string(root.join("index.html")).unwrap();
        assert!(html.contains(r#"href="./pages/courses/categories/leadership.html""#));
        assert!(html.contains(r#"href="./pages/other.html""#));

        rewrite_pages(&args(), &config).unwrap();
        assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), html);
    }

    #[test]
    fn test_strip_and_reorder_pass() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pages")).unwrap();
        let page = concat!(
            "<div class=\"accordion\" id=\"course-outline\">\n",
            "<div class=\"accordion-item\"><h3 class=\"accordion-title\">Unit 2: B</h3></div>\n",
            "<div class=\"accordion-item\"><h3 class=\"accordion-title\">Author: Jo</h3></div>\n",
            "<div class=\"accordion-item\"><h3 class=\"accordion-title\">Unit 1: A</h3></div>\n",
            "</div>\n",
        );
        fs::write(root.join("pages/course.html"), page).unwrap();
        let config = test_config(root, "");

        reorder_pages(&args(), &config).unwrap();
        let html = fs::read_to_string(root.join("pages/course.html")).unwrap();
        assert!(html.find("Unit 1: A").unwrap() < html.find("Unit 2: B").unwrap());

        strip_pages(&args(), &config).unwrap();
        let html = fs::read_to_string(root.join("pages/course.html")).unwrap();
        assert!(!html.contains("Author"));
        assert!(html.contains("Unit 1: A"));
    }

    #[test]
    fn test_strip_rejects_bad_pattern() {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path(), "[strip]\nitem_titles = [\"(\"]\n");
        assert!(strip_pages(&args(), &config).is_err());
    }
}

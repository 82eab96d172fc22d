//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::logger::ProgressLine;
use crate::transform::{Page, Transform};
use crate::utils::{clean_path, collect_html_files, plural_count, write_if_changed};
use crate::{debug, log};

/// Collect the HTML pages a command works on.
///
/// No paths means the configured `paths.roots`; a single `-` reads paths
/// from stdin. Relative paths are taken from the current directory, and
/// every path must lie inside the site root.
pub fn collect_pages(paths: &[PathBuf], config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_lines_from_stdin()?.into_iter().map(PathBuf::from).collect()
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(collect_html_files(&config.paths.roots));
    }

    let cwd = std::env::current_dir().context("Failed to get current working directory")?;
    let mut resolved = Vec::with_capacity(paths.len());
    for path in &paths {
        let abs = clean_path(&cwd.join(path));
        if !abs.exists() {
            anyhow::bail!("Path not found: {}", path.display());
        }
        if config.within_root(&abs).is_none() {
            anyhow::bail!(
                "{} is outside the site root {}",
                path.display(),
                config.get_root().display()
            );
        }
        resolved.push(abs);
    }

    Ok(collect_html_files(&resolved))
}

/// Read non-empty lines from stdin, trimmed
pub fn read_lines_from_stdin() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    Ok(lines)
}

/// Display path of `file` relative to the site root.
pub fn display_path(file: &Path, config: &SiteConfig) -> String {
    config
        .root_relative(file)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Counters from one pass over the pages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub files: usize,
    pub changed: usize,
    pub failed: usize,
}

/// Apply `transform` to every file in parallel.
///
/// Files are written only when their content changes. Notes are logged as
/// warnings; per-file failures are logged and make the pass fail once all
/// files have been processed.
pub fn run_transform<T: Transform>(
    transform: &T,
    files: &[PathBuf],
    config: &SiteConfig,
    dry: bool,
) -> Result<PassSummary> {
    if files.is_empty() {
        log!(T::NAME; "no pages found");
        return Ok(PassSummary::default());
    }

    let changed = AtomicUsize::new(0);
    let failures: Mutex<Vec<(String, anyhow::Error)>> = Mutex::new(Vec::new());
    let progress = ProgressLine::with_module(T::NAME, &[("pages", files.len())]);

    files.par_iter().for_each(|file| {
        let rel = display_path(file, config);
        match apply_one(transform, file, config, dry) {
            Ok((was_changed, notes)) => {
                for note in notes {
                    log!("warning"; "{}: {}", rel, note);
                }
                if was_changed {
                    changed.fetch_add(1, Ordering::Relaxed);
                    debug!(T::NAME; "{} {}", if dry { "would update" } else { "updated" }, rel);
                }
            }
            Err(e) => failures.lock().push((rel, e)),
        }
        progress.inc("pages");
    });
    progress.finish();

    let mut failures = failures.into_inner();
    failures.sort_by(|a, b| a.0.cmp(&b.0));
    for (rel, e) in &failures {
        log!("error"; "{}: {:#}", rel, e);
    }

    let summary = PassSummary {
        files: files.len(),
        changed: changed.into_inner(),
        failed: failures.len(),
    };

    let verb = if dry { "would update" } else { "updated" };
    log!(T::NAME; "{} {} of {}", verb, summary.changed, plural_count(summary.files, "page"));

    if summary.failed > 0 {
        anyhow::bail!("{} failed", plural_count(summary.failed, "page"));
    }
    Ok(summary)
}

/// Transform one file. Returns whether it changed, plus the pass's notes.
fn apply_one<T: Transform>(
    transform: &T,
    file: &Path,
    config: &SiteConfig,
    dry: bool,
) -> Result<(bool, Vec<String>)> {
    let html = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let rel = config.within_root(file).with_context(|| {
        format!("{} is outside the site root {}", file.display(), config.get_root().display())
    })?;
    let page = Page::new(rel);
    let mut notes = Vec::new();
    let out = transform.apply(&html, &page, &mut notes);

    if out == html {
        return Ok((false, notes));
    }
    if dry {
        return Ok((true, notes));
    }
    let written = write_if_changed(file, &out)
        .with_context(|| format!("failed to write {}", file.display()))?;
    Ok((written, notes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RewriteConfig, RewriteRule, test_config};
    use crate::transform::Rewriter;
    use std::borrow::Cow;
    use std::fs;
    use tempfile::TempDir;

    /// Uppercases `quiet` paragraphs and notes pages mentioning `note`.
    struct Shout;

    impl Transform for Shout {
        const NAME: &'static str = "shout";

        fn apply<'h>(&self, html: &'h str, page: &Page, notes: &mut Vec<String>) -> Cow<'h, str> {
            if html.contains("note") {
                notes.push(format!("root is {}", page.root));
            }
            if html.contains("<p>quiet</p>") {
                Cow::Owned(html.replace("quiet", "QUIET"))
            } else {
                Cow::Borrowed(html)
            }
        }
    }

    fn site() -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("pages")).unwrap();
        fs::write(root.join("index.html"), "<p>quiet</p>").unwrap();
        fs::write(root.join("pages/a.html"), "<p>loud</p> note").unwrap();
        fs::write(root.join("pages/b.html"), "<p>quiet</p>").unwrap();
        let config = test_config(root, "");
        (dir, config)
    }

    #[test]
    fn test_run_transform_writes_changed() {
        let (dir, config) = site();
        let files = collect_pages(&[], &config).unwrap();
        assert_eq!(files.len(), 3);

        let summary = run_transform(&Shout, &files, &config, false).unwrap();
        assert_eq!(summary.files, 3);
        assert_eq!(summary.changed, 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("pages/b.html")).unwrap(),
            "<p>QUIET</p>"
        );

        let again = run_transform(&Shout, &files, &config, false).unwrap();
        assert_eq!(again.changed, 0);
    }

    #[test]
    fn test_run_transform_dry() {
        let (dir, config) = site();
        let files = collect_pages(&[], &config).unwrap();

        let summary = run_transform(&Shout, &files, &config, true).unwrap();
        assert_eq!(summary.changed, 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<p>quiet</p>"
        );
    }

    #[test]
    fn test_run_transform_reports_failures() {
        let (dir, config) = site();
        let missing = dir.path().join("pages/missing.html");
        let files = vec![dir.path().join("index.html"), missing];
        assert!(run_transform(&Shout, &files, &config, false).is_err());
        // other files are still processed
        assert_eq!(
            fs::read_to_string(dir.path().join("index.html")).unwrap(),
            "<p>QUIET</p>"
        );
    }

    #[test]
    fn test_dotted_path_gets_root_prefix() {
        let (dir, config) = site();
        let root = dir.path();
        fs::write(root.join("index.html"), r#"<link href="css/style.css">"#).unwrap();
        let rewrite = RewriteConfig {
            rules: vec![RewriteRule::new("css/", "assets/css/")],
            ..Default::default()
        };
        let rewriter = Rewriter::new(&rewrite, None);

        let files = vec![root.join("pages/../index.html")];
        run_transform(&rewriter, &files, &config, false).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("index.html")).unwrap(),
            r#"<link href="./assets/css/style.css">"#
        );

        let collected = collect_pages(&[root.join("pages/./../index.html")], &config).unwrap();
        assert_eq!(collected, vec![root.join("index.html")]);
    }

    #[test]
    fn test_paths_outside_root_rejected() {
        let (_dir, config) = site();
        let other = TempDir::new().unwrap();
        let stray = other.path().join("stray.html");
        fs::write(&stray, r#"<link href="css/style.css">"#).unwrap();

        let err = collect_pages(&[stray.clone()], &config).unwrap_err();
        assert!(err.to_string().contains("outside the site root"));

        let rewrite = RewriteConfig {
            rules: vec![RewriteRule::new("css/", "assets/css/")],
            ..Default::default()
        };
        assert!(run_transform(&Rewriter::new(&rewrite, None), &[stray.clone()], &config, false).is_err());
        assert_eq!(
            fs::read_to_string(&stray).unwrap(),
            r#"<link href="css/style.css">"#
        );
    }

    #[test]
    fn test_display_path() {
        let (dir, config) = site();
        assert_eq!(display_path(&dir.path().join("pages/a.html"), &config), "pages/a.html");
    }
}

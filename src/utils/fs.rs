//! Filesystem helpers for page collection and in-place writes.

use jwalk::WalkDir;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

const IGNORED_DIRS: &[&str] = &[".git", "node_modules", "target"];

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the start of a relative path is kept; above the filesystem root
/// it is dropped.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Collect HTML files under each root, sorted and deduplicated.
///
/// A root may be a single file or a directory walked recursively. Missing
/// roots are skipped.
pub fn collect_html_files(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = roots
        .iter()
        .flat_map(|root| {
            if root.is_file() {
                return if is_html(root) { vec![root.clone()] } else { vec![] };
            }
            WalkDir::new(root)
                .process_read_dir(|_, _, _, children| {
                    children.retain(|entry| {
                        entry.as_ref().is_ok_and(|e| {
                            let name = e.file_name().to_str().unwrap_or_default();
                            !(e.file_type().is_dir() && IGNORED_DIRS.contains(&name))
                        })
                    });
                })
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.path())
                .filter(|p| is_html(p))
                .collect()
        })
        .collect();
    files.sort();
    files.dedup();
    files
}

/// Write `content` to `path` unless the file already holds exactly that.
///
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> io::Result<bool> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == content => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

//! `slug` command: print the slug of each title.

use anyhow::Result;

use super::common::read_lines_from_stdin;
use crate::core::slugify;
use crate::log;

/// Print one slug per title. `-` alone reads titles from stdin.
///
/// Titles with an empty slug print an empty line and a warning, keeping
/// output lines aligned with input lines.
pub fn run_slug(titles: &[String]) -> Result<()> {
    let titles = if titles.len() == 1 && titles[0] == "-" {
        read_lines_from_stdin()?
    } else {
        titles.to_vec()
    };

    for (title, slug) in slugs(&titles) {
        if slug.is_empty() {
            log!("warning"; "empty slug for {:?}", title);
        }
        println!("{slug}");
    }
    Ok(())
}

fn slugs(titles: &[String]) -> impl Iterator<Item = (&str, String)> {
    titles.iter().map(|t| (t.as_str(), slugify(t)))
}

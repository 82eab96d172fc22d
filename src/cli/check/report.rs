//! Check report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_s;

/// A single check failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    /// The link or construct that failed.
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Check results grouped per file, sorted by path.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Broken file-relative links, grouped by source file.
    pub links: BTreeMap<String, Vec<CheckError>>,
    /// Structural problems (unbalanced divs, unreadable files).
    pub structure: BTreeMap<String, Vec<CheckError>>,
}

impl CheckReport {
    pub fn add_link(&mut self, source: String, link: String, reason: String) {
        self.links.entry(source).or_default().push(CheckError {
            target: link,
            reason,
        });
    }

    pub fn add_structure(&mut self, source: String, target: String, reason: String) {
        self.structure
            .entry(source)
            .or_default()
            .push(CheckError { target, reason });
    }

    /// Number of files with at least one problem.
    pub fn file_count(&self) -> usize {
        let mut files: Vec<&String> = self.links.keys().chain(self.structure.keys()).collect();
        files.sort();
        files.dedup();
        files.len()
    }

    pub fn link_error_count(&self) -> usize {
        self.links.values().map(Vec::len).sum()
    }

    pub fn structure_error_count(&self) -> usize {
        self.structure.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.structure.is_empty()
    }

    /// Print the full report to stderr (links -> structure).
    pub fn print(&self) {
        Self::print_section("links", &self.links);
        Self::print_section("structure", &self.structure);
    }

    fn print_section(name: &str, errors: &BTreeMap<String, Vec<CheckError>>) {
        if errors.is_empty() {
            return;
        }
        eprintln!();

        let file_count = errors.len();
        let error_count: usize = errors.values().map(Vec::len).sum();

        eprintln!(
            "{} {}",
            name.red().bold(),
            format!(
                "({file_count} file{}, {error_count} error{})",
                plural_s(file_count),
                plural_s(error_count)
            )
            .dimmed()
        );

        for (path, errs) in errors {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                if e.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), e.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason);
                }
            }
        }
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.link_error_count() + self.structure_error_count();

        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {} {}",
                "found".dimmed(),
                total.to_string().red().bold(),
                format!("error{}", plural_s(total)).dimmed()
            )
        }
    }
}

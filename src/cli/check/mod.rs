//! `check` command: broken relative links and unbalanced divs.

mod report;
mod scan;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::RwLock;
use rayon::prelude::*;

use super::CheckArgs;
use super::common::{collect_pages, display_path};
use crate::config::SiteConfig;
use crate::log;
use crate::utils::{plural_count, plural_s};

use report::CheckReport;
use scan::{div_balance, extract_links, link_target};

/// Check pages and print a per-file report.
///
/// Fails when any problem is found, unless warn-only is set by flag or config.
pub fn check_pages(args: &CheckArgs, config: &SiteConfig) -> Result<()> {
    let files = collect_pages(&args.paths, config)?;
    if files.is_empty() {
        log!("check"; "no pages found");
        return Ok(());
    }

    log!("check"; "checking {}", plural_count(files.len(), "page"));

    let report = Arc::new(RwLock::new(CheckReport::default()));
    files
        .par_iter()
        .for_each(|file| check_file(file, config, &report));

    let report = Arc::into_inner(report).map(RwLock::into_inner).unwrap_or_default();

    let count = report.link_error_count();
    if count > 0 {
        log!("check"; "found {} broken link{}", count, plural_s(count));
    } else {
        log!("check"; "all relative links resolve");
    }

    report.print();
    log!("check"; "{}", report);

    if report.is_empty() {
        return Ok(());
    }
    let summary = format!("{} with problems", plural_count(report.file_count(), "page"));
    if config.check.warn_only || args.warn_only {
        log!("warning"; "{}", summary);
        return Ok(());
    }
    anyhow::bail!("check failed: {}", summary)
}

fn check_file(file: &Path, config: &SiteConfig, report: &RwLock<CheckReport>) {
    let source = display_path(file, config);
    let html = match std::fs::read_to_string(file) {
        Ok(html) => html,
        Err(e) => {
            report
                .write()
                .add_structure(source, String::new(), format!("failed to read: {e}"));
            return;
        }
    };

    for link in extract_links(&html) {
        if let Some(target) = link_target(file, &link)
            && !target.exists()
        {
            report
                .write()
                .add_link(source.clone(), format!("`{}`", link.dest), "not found".into());
        }
    }

    if config.check.div_balance {
        let (open, close) = div_balance(&html);
        if open != close {
            let reason = if open > close {
                format!("{} unclosed", open - close)
            } else {
                format!("{} extra close{}", close - open, plural_s(close - open))
            };
            report
                .write()
                .add_structure(source, format!("<div> {open} open / {close} close"), reason);
        }
    }
}

//! `catalog` command: list and export the course catalog.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::{CatalogAction, ExportFormat};
use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::plural_count;

pub fn run_catalog(action: &CatalogAction, config: &SiteConfig) -> Result<()> {
    let catalog = Catalog::load(&config.paths.catalog)?;
    match action {
        CatalogAction::List => {
            print!("{}", list(&catalog));
            report_issues(&catalog);
            log!("catalog"; "{}", catalog.summary());
            Ok(())
        }
        CatalogAction::Export { format, output } => {
            let content = export(&catalog, *format)?;
            match output {
                Some(path) => write_output(path, &content),
                None => {
                    print!("{content}");
                    Ok(())
                }
            }
        }
    }
}

/// Human-readable listing: categories, then their courses.
fn list(catalog: &Catalog) -> String {
    let mut out = String::new();
    for (key, category) in &catalog.categories {
        out.push_str(&format!(
            "{} {} {}\n",
            category.title.bold(),
            format!("[{key}]").dimmed(),
            plural_count(category.courses.len(), "course").dimmed()
        ));
        for course in &category.courses {
            out.push_str(&format!(
                "  {} {} {}\n",
                course.title,
                format!("({}, {})", course.level, display_duration(&course.duration)).dimmed(),
                plural_count(course.units.len(), "unit").dimmed()
            ));
        }
    }
    out
}

fn display_duration(duration: &str) -> &str {
    if duration.trim().is_empty() { "N/A" } else { duration }
}

fn report_issues(catalog: &Catalog) {
    let issues = catalog.validate();
    for issue in &issues {
        log!("warning"; "{}", issue);
    }
    if !issues.is_empty() {
        log!("catalog"; "{}", plural_count(issues.len(), "issue"));
    }
}

fn export(catalog: &Catalog, format: ExportFormat) -> Result<String> {
    let content = match format {
        ExportFormat::Script => catalog.to_script()?,
        ExportFormat::Json => {
            let mut json = serde_json::to_string_pretty(catalog)?;
            json.push('\n');
            json
        }
        ExportFormat::Toml => toml::to_string_pretty(catalog)?,
    };
    Ok(content)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    log!("catalog"; "wrote {}", path.display());
    Ok(())
}

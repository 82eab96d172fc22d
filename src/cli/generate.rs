//! `generate` command: course and category pages.
//!
//! Course pages come from the outline text when `paths.outline` is set,
//! otherwise from the catalog. Category pages come from the grouped file
//! when `paths.groups` is set, otherwise from the catalog. Missing inputs
//! and templates are fatal.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::catalog::{Catalog, CatalogError, Course, ImageIndex, parse_groups, parse_outline};
use crate::cli::common::display_path;
use crate::config::SiteConfig;
use crate::core::slugify;
use crate::embed::pages::{CATEGORY_HTML, COURSE_HTML};
use crate::generate::{
    CategoryLink, CategoryRenderer, CourseRenderer, Rendered, SiteLayout, TileCourse,
};
use crate::logger::ProgressLine;
use crate::utils::{plural_count, write_if_changed};
use crate::{debug, log};

/// Generate individual course pages.
pub fn generate_courses(config: &SiteConfig, dry: bool) -> Result<()> {
    let layout = SiteLayout::from_config(config);
    let template = COURSE_HTML.or_file(config.generate.course_template.as_deref())?;
    let renderer = CourseRenderer::with_template(template, &layout);

    let courses = load_courses(config)?;
    let links = category_links(config)?;
    log!("generate"; "rendering {}", plural_count(courses.len(), "course page"));

    let pages: Vec<Rendered> = courses
        .par_iter()
        .filter_map(|course| {
            let link = links.get(&course.slug());
            let page = renderer.render(course, link);
            if page.is_none() {
                debug!("generate"; "skipped course with empty slug: {:?}", course.title);
            }
            page
        })
        .collect();

    write_pages(&config.paths.individual, &pages, config, dry, "courses")
}

/// Generate category pages.
pub fn generate_categories(config: &SiteConfig, dry: bool) -> Result<()> {
    let layout = SiteLayout::from_config(config);
    let images = ImageIndex::load(config.paths.image_names.as_deref(), &config.paths.images)?;
    if images.is_empty() {
        debug!("generate"; "no course images found, tiles use the site logo");
    } else {
        debug!("generate"; "indexed {}", plural_count(images.len(), "course image"));
    }

    let template = CATEGORY_HTML.or_file(config.generate.category_template.as_deref())?;
    let renderer = CategoryRenderer::with_template(template, &layout, &images);

    let catalog = load_catalog(config, config.paths.groups.is_none())?;
    let by_slug: HashMap<String, &Course> = catalog
        .iter()
        .flat_map(|c| c.courses())
        .map(|(_, course)| (course.slug(), course))
        .collect();
    let tile = |title: &str| by_slug.get(&slugify(title)).copied();

    let pages: Vec<Rendered> = match &config.paths.groups {
        Some(path) => {
            let groups = parse_groups(&read_input(path)?);
            groups
                .par_iter()
                .filter_map(|group| {
                    let courses: Vec<TileCourse> = group
                        .courses
                        .iter()
                        .map(|name| match tile(name) {
                            Some(course) => TileCourse::from_course(course),
                            None => TileCourse::named(name),
                        })
                        .collect();
                    renderer.render(&group.name, "", &courses)
                })
                .collect()
        }
        None => {
            let catalog = catalog.as_ref().context("catalog not loaded")?;
            catalog
                .categories
                .par_iter()
                .filter_map(|(key, category)| {
                    let courses: Vec<TileCourse> =
                        category.courses.iter().map(TileCourse::from_course).collect();
                    let title = if category.title.trim().is_empty() {
                        key.as_str()
                    } else {
                        category.title.as_str()
                    };
                    renderer.render(title, &category.description, &courses)
                })
                .collect()
        }
    };

    write_pages(&config.paths.categories, &pages, config, dry, "categories")
}

/// Courses from the outline text, or from the catalog when no outline is set.
fn load_courses(config: &SiteConfig) -> Result<Vec<Course>> {
    if let Some(path) = &config.paths.outline {
        let outlines = parse_outline(&read_input(path)?, config.generate.split_topics);
        let level = config.generate.default_level;
        return Ok(outlines.into_iter().map(|o| o.into_course(level)).collect());
    }

    let catalog = Catalog::load(&config.paths.catalog)?;
    Ok(catalog.courses().map(|(_, c)| c.clone()).collect())
}

/// Map course slug to the category page that lists it.
///
/// The grouped file wins over the catalog; with neither, pages link to the
/// site index.
fn category_links(config: &SiteConfig) -> Result<HashMap<String, CategoryLink>> {
    let mut links = HashMap::new();

    if let Some(path) = &config.paths.groups {
        for group in parse_groups(&read_input(path)?) {
            let link = CategoryLink {
                slug: slugify(&group.name),
                title: group.name,
            };
            for course in &group.courses {
                links.entry(slugify(course)).or_insert_with(|| link.clone());
            }
        }
        return Ok(links);
    }

    if let Some(catalog) = load_catalog(config, false)? {
        for (key, category) in &catalog.categories {
            let title = if category.title.trim().is_empty() {
                key.clone()
            } else {
                category.title.clone()
            };
            let link = CategoryLink {
                slug: slugify(&title),
                title,
            };
            for course in &category.courses {
                links.entry(course.slug()).or_insert_with(|| link.clone());
            }
        }
    }
    Ok(links)
}

/// Load the catalog. When not `required`, a missing file yields `None`.
fn load_catalog(config: &SiteConfig, required: bool) -> Result<Option<Catalog>, CatalogError> {
    let path = &config.paths.catalog;
    if !required && !path.is_file() {
        return Ok(None);
    }
    Catalog::load(path).map(Some)
}

fn read_input(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))
}

/// Write rendered pages into `dir`, or list them when `dry`.
fn write_pages(
    dir: &Path,
    pages: &[Rendered],
    config: &SiteConfig,
    dry: bool,
    counter: &'static str,
) -> Result<()> {
    let mut seen = HashSet::new();
    for page in pages {
        if !seen.insert(page.file_name.as_str()) {
            log!("warning"; "duplicate output {}, later page wins", page.file_name);
        }
    }

    if dry {
        for page in pages {
            log!("generate"; "would write {}", display_path(&dir.join(&page.file_name), config));
        }
        log!("generate"; "would write {}", plural_count(pages.len(), "page"));
        return Ok(());
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let progress = ProgressLine::new(&[(counter, pages.len())]);
    let mut written = 0;
    for page in pages {
        let path = dir.join(&page.file_name);
        if write_if_changed(&path, &page.html)
            .with_context(|| format!("failed to write {}", path.display()))?
        {
            written += 1;
            debug!("generate"; "wrote {}", display_path(&path, config));
        }
        progress.inc(counter);
    }
    progress.finish();

    log!(
        "generate";
        "wrote {} ({} unchanged) to {}",
        plural_count(written, "page"),
        pages.len() - written,
        display_path(dir, config)
    );
    Ok(())
}

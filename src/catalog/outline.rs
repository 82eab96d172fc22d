//! Course outline text files.
//!
//! The formatted outline export looks like:
//!
//! ```text
//! Course 1 of 42
//! Course Name: Basic Microsoft Word
//! Course Description: Produce professional documents.
//! Course Overview: Create, edit and format documents with ease.
//! Duration (minutes): 960
//! Units:
//! - Unit 1: Getting started
//!   - Opening Word, The ribbon, Saving documents
//! - Unit 2: Formatting
//!   - Fonts and paragraphs
//! ```
//!
//! Parsing is lenient: unrecognised lines are ignored, lines before the
//! first `Course N of M` marker are skipped, and blocks without a name are
//! dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::{Course, Level, Unit, minutes_to_human};

static COURSE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Course\s+\d+\s+of\s+\d+").unwrap());
static FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Course\s*(Name|Description|Overview)\s*:\s*(.+)$").unwrap()
});
static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Duration\s*\(minutes\)\s*:\s*(\d+)").unwrap());
static UNITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^Units:$").unwrap());
static UNIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^-\s*Unit\s*(\d+)\s*:\s*(.+)$").unwrap());
static TOPIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s{2,}-\s*(.+)$").unwrap());
static TOPIC_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s+").unwrap());

/// A course block read from the outline file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseOutline {
    pub name: String,
    pub description: String,
    pub overview: String,
    pub duration_minutes: Option<u32>,
    pub units: Vec<OutlineUnit>,
}

/// A unit inside a course block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineUnit {
    pub number: Option<u32>,
    pub title: String,
    pub topics: Vec<String>,
}

impl CourseOutline {
    /// Convert to a catalog course.
    ///
    /// Unit titles keep their number (`Unit 2: Formatting`) so the outline
    /// order survives later reordering passes.
    pub fn into_course(self, level: Level) -> Course {
        Course {
            title: self.name,
            description: self.description,
            overview: self.overview,
            level,
            duration: minutes_to_human(self.duration_minutes),
            units: self
                .units
                .into_iter()
                .map(|u| Unit {
                    title: match u.number {
                        Some(n) => format!("Unit {n}: {}", u.title),
                        None => u.title,
                    },
                    topics: u.topics,
                })
                .collect(),
        }
    }
}

/// Parse the formatted outline text.
///
/// With `split_topics`, topic lines that are comma-separated enumerations
/// become one topic per item.
pub fn parse_outline(text: &str, split_topics: bool) -> Vec<CourseOutline> {
    let mut courses = Vec::new();
    let mut current: Option<CourseOutline> = None;
    let mut in_units = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if COURSE_START.is_match(line) {
            courses.extend(current.take().filter(|c| !c.name.is_empty()));
            current = Some(CourseOutline::default());
            in_units = false;
            continue;
        }

        // Skip header noise until a course starts
        let Some(course) = current.as_mut() else {
            continue;
        };

        if let Some(c) = FIELD.captures(line) {
            let value = c[2].trim().to_string();
            match c[1].to_ascii_lowercase().as_str() {
                "name" => course.name = value,
                "description" => course.description = value,
                _ => course.overview = value,
            }
            continue;
        }

        if let Some(c) = DURATION.captures(line) {
            course.duration_minutes = c[1].parse().ok();
            continue;
        }

        if UNITS.is_match(line) {
            in_units = true;
            continue;
        }

        if !in_units {
            continue;
        }

        if let Some(c) = UNIT.captures(line) {
            course.units.push(OutlineUnit {
                number: c[1].parse().ok(),
                title: c[2].trim().to_string(),
                topics: Vec::new(),
            });
            continue;
        }

        if let Some(c) = TOPIC.captures(raw)
            && let Some(unit) = course.units.last_mut()
        {
            let topic = c[1].trim();
            if split_topics {
                unit.topics.extend(
                    TOPIC_SPLIT
                        .split(topic)
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from),
                );
            } else {
                unit.topics.push(topic.to_string());
            }
        }
    }

    courses.extend(current.filter(|c| !c.name.is_empty()));
    courses
}

//! Grouped category file.
//!
//! ```text
//! Category: Computer Courses
//! - Basic Microsoft Word
//! - Intro to Computers
//!
//! Category: Leadership
//! - Business Analysis and Data Skills
//! ```

/// A category with its course titles, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseGroup {
    pub name: String,
    pub courses: Vec<String>,
}

/// Parse the grouped category file. Course lines outside a category are ignored.
pub fn parse_groups(text: &str) -> Vec<CourseGroup> {
    let mut groups: Vec<CourseGroup> = Vec::new();

    for line in text.lines().map(str::trim) {
        if let Some(name) = strip_prefix_ci(line, "category:") {
            groups.push(CourseGroup {
                name: name.trim().to_string(),
                courses: Vec::new(),
            });
        } else if let Some(course) = line.strip_prefix('-')
            && let Some(group) = groups.last_mut()
        {
            let course = course.trim();
            if !course.is_empty() {
                group.courses.push(course.to_string());
            }
        }
    }

    groups.retain(|g| !g.name.is_empty());
    groups
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

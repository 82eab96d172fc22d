//! Course image lookup.
//!
//! Images live in one directory. A course is matched to a file by, in order:
//! 1. the token given for it in the image-name CSV, against file stems
//! 2. its own name, against file stems
//!
//! Both comparisons ignore case and collapse whitespace.

use super::CatalogError;
use std::{collections::HashMap, fs, path::Path};

/// Image files and the CSV name map, resolved once per run.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    /// normalized course name -> CSV token
    tokens: HashMap<String, String>,
    /// normalized file stem -> file name
    files: HashMap<String, String>,
}

impl ImageIndex {
    /// Build the index. A missing CSV or image directory yields an empty part.
    pub fn load(csv: Option<&Path>, images_dir: &Path) -> Result<Self, CatalogError> {
        let tokens = match csv {
            Some(path) if path.is_file() => read_tokens(path)?,
            _ => HashMap::new(),
        };
        let files = if images_dir.is_dir() {
            read_stems(images_dir)?
        } else {
            HashMap::new()
        };
        Ok(Self { tokens, files })
    }

    /// Resolve a course name to an image file name.
    pub fn resolve(&self, course: &str) -> Option<&str> {
        let key = image_key(course);
        self.tokens
            .get(&key)
            .and_then(|token| self.files.get(&image_key(token)))
            .or_else(|| self.files.get(&key))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn image_key(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn read_tokens(path: &Path) -> Result<HashMap<String, String>, CatalogError> {
    let csv_err = |source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut tokens = HashMap::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        let (Some(name), Some(token)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if i == 0 && is_header(name, token) {
            continue;
        }
        if name.is_empty() || token.is_empty() {
            continue;
        }
        tokens.insert(image_key(name), token.to_string());
    }
    Ok(tokens)
}

fn is_header(name: &str, token: &str) -> bool {
    name.eq_ignore_ascii_case("coursename") && token.to_ascii_lowercase().starts_with("courseimage")
}

fn read_stems(dir: &Path) -> Result<HashMap<String, String>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|e| CatalogError::io(dir, e))?;
    let mut files = HashMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let (Some(stem), Some(name)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.file_name().and_then(|s| s.to_str()),
        ) {
            files.entry(image_key(stem)).or_insert_with(|| name.to_string());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ImageIndex) {
        let dir = TempDir::new().unwrap();
        let images = dir.path().join("images");
        fs::create_dir(&images).unwrap();
        for name in ["WORD01.png", "Intro to Computers.png", "Excel.jpg"] {
            fs::write(images.join(name), "").unwrap();
        }

        let csv = dir.path().join("names.csv");
        fs::write(
            &csv,
            "CourseName,CourseImage (file)\n\
             Basic  Microsoft Word, word01\n\
             \"Excel, Advanced\",Excel\n\
             Only a name\n\
             Missing Token,\n",
        )
        .unwrap();

        let index = ImageIndex::load(Some(&csv), &images).unwrap();
        (dir, index)
    }

    #[test]
    fn test_resolve_by_token() {
        let (_dir, index) = setup();
        assert_eq!(index.resolve("Basic Microsoft Word"), Some("WORD01.png"));
        assert_eq!(index.resolve("excel, advanced"), Some("Excel.jpg"));
    }

    #[test]
    fn test_resolve_by_name() {
        let (_dir, index) = setup();
        assert_eq!(index.resolve("intro to  computers"), Some("Intro to Computers.png"));
    }

    #[test]
    fn test_resolve_missing() {
        let (_dir, index) = setup();
        assert_eq!(index.resolve("Missing Token"), None);
        assert_eq!(index.resolve("CourseName"), None);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_missing_inputs_are_empty() {
        let dir = TempDir::new().unwrap();
        let index = ImageIndex::load(Some(&dir.path().join("none.csv")), &dir.path().join("none"))
            .unwrap();
        assert!(index.is_empty());
        assert_eq!(index.resolve("anything"), None);
    }
}

//! Template types for typed variable injection.

use std::{
    borrow::Cow,
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{path}' not found: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template '{name}' is missing {}", .missing.join(", "))]
    MissingPlaceholders {
        name: String,
        missing: Vec<&'static str>,
    },
}

/// Trait for template variable sets
pub trait TemplateVars {
    /// Placeholders a template must contain to render these variables.
    const REQUIRED: &'static [&'static str] = &[];

    fn apply(&self, content: &str) -> String;
}

/// Replace `__NAME__` placeholders in one pass.
///
/// Substituted values are never scanned again, so a value that itself
/// contains a placeholder is inserted literally. Unknown placeholders are
/// left as they are.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(i) = rest.find("__") {
        out.push_str(&rest[..i]);
        let tail = &rest[i..];
        match vars.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('_');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Template with typed variable injection
pub struct Template<V> {
    name: Cow<'static, str>,
    content: Cow<'static, str>,
    _marker: PhantomData<V>,
}

impl<V> Clone for Template<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            content: self.content.clone(),
            _marker: PhantomData,
        }
    }
}

impl<V> std::fmt::Debug for Template<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("content", &self.content)
            .finish()
    }
}

impl<V> Template<V> {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            content: Cow::Borrowed(content),
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    /// Load a template from disk, checking its required placeholders.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let template = Self {
            name: Cow::Owned(path.display().to_string()),
            content: Cow::Owned(content),
            _marker: PhantomData,
        };
        template.check()?;
        Ok(template)
    }

    /// Use the file at `path` when given, otherwise this embedded default.
    pub fn or_file(self, path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(self),
        }
    }

    pub fn check(&self) -> Result<(), TemplateError> {
        let missing: Vec<_> = V::REQUIRED
            .iter()
            .copied()
            .filter(|p| !self.content.contains(p))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TemplateError::MissingPlaceholders {
                name: self.name.to_string(),
                missing,
            })
        }
    }

    pub fn render(&self, vars: &V) -> String {
        vars.apply(&self.content)
    }
}

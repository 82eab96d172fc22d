//! Site configuration management for `coursekit.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── site       # [site]
//! │   ├── paths      # [paths]
//! │   ├── generate   # [generate]
//! │   ├── rewrite    # [rewrite]
//! │   ├── strip      # [strip]
//! │   ├── reorder    # [reorder]
//! │   └── check      # [check]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    CheckConfig, ElementMatch, GenerateConfig, PathsConfig, ReorderConfig, Replacement,
    RewriteConfig, RewriteRule, SiteSectionConfig, StripConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands},
    log,
    utils::clean_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing coursekit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub generate: GenerateConfig,

    #[serde(default)]
    pub rewrite: RewriteConfig,

    #[serde(default)]
    pub strip: StripConfig,

    #[serde(default)]
    pub reorder: ReorderConfig,

    #[serde(default)]
    pub check: CheckConfig,
}

impl SiteConfig {
    /// Load configuration for the given command line.
    ///
    /// `init` starts from defaults rooted at the target directory. Every other
    /// command searches upward from the cwd for the config file, and the site
    /// root is the directory containing it.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        if let Commands::Init { name, .. } = &cli.command {
            let root = name.as_ref().map_or_else(|| cwd.clone(), |n| cwd.join(n));
            let mut config = Self::default();
            config.config_path = root.join(&cli.config);
            config.finalize(&root);
            return Ok(config);
        }

        let config_path = find_config_file(&cli.config, &cwd)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = config_path;
        config.apply_command_options(cli);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.validate(&root)?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set the root and make every configured path absolute.
    fn finalize(&mut self, root: &Path) {
        self.root = clean_path(root);
        self.paths.normalize(&self.root);
        self.generate.normalize(&self.root);
    }

    /// Validate raw values, finalize paths, then check referenced files.
    ///
    /// All problems are collected and reported together.
    fn validate(&mut self, root: &Path) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.paths.validate(&mut diag);
        self.rewrite.validate(&mut diag);
        self.strip.validate(&mut diag);

        self.finalize(root);
        self.generate.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Apply command-specific overrides from CLI flags.
    fn apply_command_options(&mut self, cli: &Cli) {
        if let Commands::Check { args } = &cli.command
            && args.warn_only
        {
            self.check.warn_only = true;
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Path of `path` inside the site root, with `.` and `..` resolved.
    ///
    /// Returns `None` when the path lies outside the root.
    pub fn within_root(&self, path: &Path) -> Option<PathBuf> {
        clean_path(path)
            .strip_prefix(&self.root)
            .ok()
            .map(Path::to_path_buf)
    }

    /// Get path relative to the site root
    ///
    /// Paths outside the root are returned cleaned but otherwise unchanged.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = clean_path(path.as_ref());
        match path.strip_prefix(&self.root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path,
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config and root it at `root`.
/// Panics on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_config(root: &Path, content: &str) -> SiteConfig {
    let (mut config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    config.finalize(root);
    config
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::init::{CONFIG_TOML, ConfigVars};
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::from_str("[paths\nroots = []");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new(""));
        assert_eq!(config.paths.roots.len(), 2);
        assert!(config.generate.split_topics);
        assert!(config.rewrite.collapse_slashes);
        assert!(config.reorder.strip_numbering);
        assert!(!config.check.warn_only);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\nname = \"TAP\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert_eq!(config.site.name, "TAP");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_init_template_has_no_unknown_fields() {
        let content = CONFIG_TOML.render(&ConfigVars::default());
        let (config, ignored) = SiteConfig::parse_with_ignored(&content).unwrap();
        assert!(ignored.is_empty(), "unknown fields: {ignored:?}");
        assert_eq!(config.strip.item_titles, [r"^Author\s*:"]);
        assert_eq!(config.strip.replacements[0].to, "\n");
    }

    #[test]
    fn test_validate_collects_errors() {
        let temp = TempDir::new().unwrap();
        let mut config = SiteConfig::from_str(
            r#"
[paths]
roots = []

[generate]
course_template = "templates/missing.html"

[strip]
item_titles = ["("]
"#,
        )
        .unwrap();
        let err = config.validate(temp.path()).unwrap_err();
        let diag = match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Diagnostics(d)) => d,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_validate_finalizes_paths() {
        let temp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.validate(temp.path()).unwrap();
        assert_eq!(config.get_root(), temp.path());
        assert_eq!(config.paths.catalog, temp.path().join("data/catalog.toml"));
        assert_eq!(
            config.root_relative(&config.paths.individual),
            Path::new("pages/courses/individual")
        );
    }
}

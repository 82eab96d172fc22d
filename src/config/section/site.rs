//! `[site]` section configuration.
//!
//! ```toml
//! [site]
//! name = "TAP"
//! logo = "Images/Logo.png"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site name, shown in page titles.
    pub name: String,

    /// Logo image relative to the site root; the tile image fallback.
    pub logo: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            name: "Courses".into(),
            logo: "Images/Logo.png".into(),
        }
    }
}

impl SiteSectionConfig {
    pub const NAME: FieldPath = FieldPath::new("site.name");
    pub const LOGO: FieldPath = FieldPath::new("site.logo");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.name.trim().is_empty() {
            diag.warn(Self::NAME, "empty site name, page titles will end with ` | `");
        }
        if self.logo.starts_with('/') {
            diag.error_with_hint(
                Self::LOGO,
                "logo must be relative to the site root",
                format!("use \"{}\"", self.logo.trim_start_matches('/')),
            );
        }
    }
}

//! Configuration sections.
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[site]`     | Site name and logo                                |
//! | `[paths]`    | Page roots, output directories, input files       |
//! | `[generate]` | Page templates and outline parsing                |
//! | `[rewrite]`  | Path rewrite rules and anchors                    |
//! | `[strip]`    | Fragments, scripts and text removed from pages    |
//! | `[reorder]`  | Accordion reordering options                      |
//! | `[check]`    | Link and markup checks                            |

mod check;
mod generate;
mod paths;
mod reorder;
mod rewrite;
mod site;
mod strip;

pub use check::CheckConfig;
pub use generate::GenerateConfig;
pub use paths::PathsConfig;
pub use reorder::ReorderConfig;
pub use rewrite::{RewriteConfig, RewriteRule};
pub use site::SiteSectionConfig;
pub use strip::{ElementMatch, Replacement, StripConfig};

//! Small helpers shared by the commands.

mod fs;
mod plural;

pub use fs::{clean_path, collect_html_files, write_if_changed};
pub use plural::{plural_count, plural_s};

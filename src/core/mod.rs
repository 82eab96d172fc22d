//! Core types - pure abstractions shared across the codebase.

mod depth;
mod link;
mod slug;

pub use depth::{relative_dir, to_root};
pub use link::{LinkKind, split_suffix};
pub use slug::slugify;

//! HTML text utilities.
//!
//! Pages are treated as text: the transformations here locate elements by
//! tag and attributes, find their balanced end, and splice strings. Nothing
//! is re-serialised, so untouched markup stays byte-for-byte identical.
//!
//! - [`escape`]: entity escaping and unescaping
//! - [`element`]: open-tag scanning and balanced element ranges
//! - [`accordion`]: course outline accordion items
//! - [`numbering`]: list item numbering cleanup

pub mod accordion;
pub mod element;
pub mod escape;
pub mod numbering;

pub use element::{find_elements, find_open_tag};
pub use escape::{escape, escape_attr, unescape};

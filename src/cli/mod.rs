//! Command-line interface module.

mod args;
pub mod catalog;
pub mod check;
pub mod common;
pub mod generate;
pub mod init;
pub mod pages;
pub mod slug;

pub use args::{CatalogAction, CheckArgs, Cli, Commands, ExportFormat, GenerateTarget, PageArgs};

//! CLI module
//!
//! Command-line interface for paging through a collection stored in a file.
//!
//! # Commands
//!
//! - `page` - Print one page
//! - `walk` - Follow `next_key` until the collection is exhausted
//! - `limits` - Show the effective page limits

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::{load_items, Runner};

//! Pagination module
//!
//! Supports: Offset, Key (cursor), Reverse
//!
//! # Overview
//!
//! Pages over an in-memory collection addressed by index. The caller supplies
//! the collection length and a visitor; pagination decides which indices to
//! visit and which cursor to hand back for the next page. Cursors are the
//! decimal ASCII encoding of an index, so a `next_key` fed back as `key`
//! resumes exactly where the previous page stopped.

mod paginator;
mod types;

pub use paginator::{collect_page, paginate, paginate_slice, plan, PageIndices, PagePlan};
pub use types::{
    decode_key, encode_key, Direction, Page, PageItem, PageRequest, PageResponse,
};

//! # array-pager
//!
//! Offset, cursor and reverse pagination over in-memory collections that are
//! addressed by index.
//!
//! ## Features
//!
//! - **Offset Paging**: skip `offset` items from the start, or from the end when reversed
//! - **Cursor Paging**: resume from the `next_key` of a previous page
//! - **Reverse Paging**: walk the collection from its last item back to the first
//! - **Visitor Style**: the caller decides what happens with each selected index
//! - **Configurable Limits**: default and maximum page size from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use array_pager::pagination::{paginate_slice, PageRequest};
//!
//! let class_ids = vec!["a", "b", "c", "d", "e"];
//! let mut page = Vec::new();
//!
//! let request = PageRequest::new().with_limit(2).reversed();
//! let response = paginate_slice(&class_ids, Some(&request), |_, id| {
//!     page.push(*id);
//!     Ok::<_, array_pager::Error>(())
//! }, 20, 50)?;
//!
//! assert_eq!(page, vec!["e", "d"]);
//! assert_eq!(response.total, 5);
//!
//! // Hand `next_key` back to continue in the same direction
//! let next = request.continue_from(&response).unwrap();
//! assert_eq!(next.key.as_deref(), Some(&b"2"[..]));
//! # Ok::<(), array_pager::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  paginate(length, request, visitor, default, max)        │
//! │  paginate_slice(items, request, visitor, default, max)   │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//!            ┌─────────────────┴─────────────────┐
//!            │ plan(): validate + resolve start  │
//!            │   offset | key | reverse          │
//!            └─────────────────┬─────────────────┘
//!                              │
//!            ┌─────────────────┴─────────────────┐
//!            │ PagePlan::indices() -> visitor    │
//!            │ PagePlan::response() -> next_key  │
//!            └───────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Index pagination
pub mod pagination;

/// Page limit configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PageLimits;
pub use error::{Error, Result};
pub use pagination::{paginate, paginate_slice, PageRequest, PageResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

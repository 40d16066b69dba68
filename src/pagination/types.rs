//! Pagination types
//!
//! Request/response value objects, iteration direction and the cursor codec.

use crate::error::{Error, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

// ============================================================================
// Direction
// ============================================================================

/// Iteration direction over the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending index order
    #[default]
    Forward,
    /// Descending index order
    Reverse,
}

impl Direction {
    /// Map the request's `reverse` flag to a direction
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    /// Check if this is reverse iteration
    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Reverse)
    }
}

// ============================================================================
// Cursor Codec
// ============================================================================

/// Encode an index as a cursor (decimal ASCII, e.g. `42` -> `"42"`)
pub fn encode_key(index: usize) -> Bytes {
    Bytes::from(index.to_string())
}

/// Decode a cursor back into a signed index.
///
/// Range checking against the collection is left to the caller; a negative
/// value decodes fine here.
pub fn decode_key(key: &[u8]) -> Result<isize> {
    let text = std::str::from_utf8(key).map_err(|e| Error::invalid_key(e.to_string()))?;
    text.parse::<isize>()
        .map_err(|e| Error::invalid_key(e.to_string()))
}

// ============================================================================
// Page Request
// ============================================================================

/// A request for one page of a collection.
///
/// `offset` and `key` are mutually exclusive; a zero `limit` falls back to the
/// caller's default limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Cursor from a previous response's `next_key`
    #[serde(default, with = "base64_key")]
    pub key: Option<Bytes>,

    /// Number of items to skip from the start (or end, if reverse)
    #[serde(default, deserialize_with = "u64_text::deserialize")]
    pub offset: u64,

    /// Maximum number of items to return (0 = default)
    #[serde(default, deserialize_with = "u64_text::deserialize")]
    pub limit: u64,

    /// Iterate from the end of the collection
    #[serde(default)]
    pub reverse: bool,
}

impl PageRequest {
    /// Create an all-defaults request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset
    #[must_use]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the limit
    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set a raw cursor
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the cursor to a specific index
    #[must_use]
    pub fn with_key_index(self, index: usize) -> Self {
        self.with_key(encode_key(index))
    }

    /// Iterate in descending index order
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Direction requested by this page
    pub fn direction(&self) -> Direction {
        Direction::from_reverse(self.reverse)
    }

    /// Build the follow-up request for `response`, keeping direction and limit.
    ///
    /// Returns `None` once the collection is exhausted in this direction.
    pub fn continue_from(&self, response: &PageResponse) -> Option<Self> {
        let key = response.next_key.clone()?;
        Some(Self {
            key: Some(key),
            offset: 0,
            limit: self.limit,
            reverse: self.reverse,
        })
    }
}

// ============================================================================
// Page Response
// ============================================================================

/// Pagination metadata returned alongside a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Cursor of the next unvisited index, if any
    #[serde(default, with = "base64_key")]
    pub next_key: Option<Bytes>,

    /// Number of items in the whole collection
    #[serde(default, deserialize_with = "u64_text::deserialize")]
    pub total: u64,
}

impl PageResponse {
    /// Response for a page with no continuation
    pub fn exhausted(total: u64) -> Self {
        Self {
            next_key: None,
            total,
        }
    }

    /// Check if more items remain in the current direction
    pub fn has_more(&self) -> bool {
        self.next_key.is_some()
    }

    /// Decode `next_key` back into an index
    pub fn next_index(&self) -> Result<Option<isize>> {
        self.next_key.as_deref().map(decode_key).transpose()
    }
}

// ============================================================================
// Collected Page
// ============================================================================

/// One item of a collected page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageItem<T> {
    /// Position in the collection
    pub index: usize,
    /// The item itself
    pub value: T,
}

/// Items of one page together with its pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items in iteration order
    pub items: Vec<PageItem<T>>,
    /// Pagination metadata
    pub pagination: PageResponse,
}

impl<T> Page<T> {
    /// Indices of the items in this page
    pub fn indices(&self) -> Vec<usize> {
        self.items.iter().map(|item| item.index).collect()
    }
}

/// Serde helper: bytes fields travel as standard base64 strings, `null` when absent
mod base64_key {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        key: &Option<Bytes>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match key {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Bytes>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| {
                STANDARD
                    .decode(s)
                    .map(Bytes::from)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

/// Serde helper: uint64 fields accept a JSON number or a decimal string
mod u64_text {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<u64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

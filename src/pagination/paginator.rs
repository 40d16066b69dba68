//! Index pagination over a collection of known length
//!
//! A request is first resolved into a [`PagePlan`] (validation, start index,
//! direction, limit). The plan yields the indices to visit and the response
//! to hand back once they have all been visited.

use super::types::{
    decode_key, encode_key, Direction, Page, PageItem, PageRequest, PageResponse,
};
use crate::config::PageLimits;
use crate::error::{Error, Result};
use tracing::{debug, trace};

/// Largest offset/limit accepted from a request (the native signed index width)
const MAX_NATIVE: u64 = isize::MAX as u64;

// ============================================================================
// Page Plan
// ============================================================================

/// A validated page request resolved against a collection length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    length: usize,
    start: Option<usize>,
    direction: Direction,
    limit: usize,
}

impl PagePlan {
    /// Length of the collection this plan was resolved against
    pub fn length(&self) -> usize {
        self.length
    }

    /// First index to visit, `None` when the page is empty by offset
    pub fn start(&self) -> Option<usize> {
        self.start
    }

    /// Iteration direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Effective limit after defaulting
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of indices this plan visits
    pub fn count(&self) -> usize {
        let Some(start) = self.start else {
            return 0;
        };
        let available = match self.direction {
            Direction::Forward => self.length - start,
            Direction::Reverse => start + 1,
        };
        available.min(self.limit)
    }

    /// Lazily yield the indices to visit, in iteration order
    pub fn indices(&self) -> PageIndices {
        PageIndices {
            next: self.start,
            remaining: self.count(),
            direction: self.direction,
        }
    }

    /// Response for this plan once every index has been visited
    pub fn response(&self) -> PageResponse {
        let total = self.length as u64;
        let count = self.count();
        let next = match (self.start, count) {
            (Some(start), count) if count > 0 => match self.direction {
                Direction::Forward => Some(start + count).filter(|&next| next < self.length),
                Direction::Reverse => start.checked_sub(count),
            },
            _ => None,
        };

        match next {
            Some(next) => PageResponse {
                next_key: Some(encode_key(next)),
                total,
            },
            None => PageResponse::exhausted(total),
        }
    }
}

/// Iterator over the indices of a [`PagePlan`]
#[derive(Debug, Clone)]
pub struct PageIndices {
    next: Option<usize>,
    remaining: usize,
    direction: Direction,
}

impl Iterator for PageIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = match self.direction {
            Direction::Forward => current.checked_add(1),
            Direction::Reverse => current.checked_sub(1),
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PageIndices {}

// ============================================================================
// Planning
// ============================================================================

/// Validate `request` and resolve it against a collection of `length` items.
///
/// An absent request behaves like [`PageRequest::default`].
pub fn plan(
    length: usize,
    request: Option<&PageRequest>,
    default_limit: usize,
    max_limit: usize,
) -> Result<PagePlan> {
    let default_request = PageRequest::default();
    let request = request.unwrap_or(&default_request);
    let direction = request.direction();

    if request.offset > MAX_NATIVE {
        return Err(Error::OffsetOutOfRange {
            offset: request.offset,
        });
    }
    let offset = request.offset as usize;

    let max = u64::try_from(max_limit).unwrap_or(u64::MAX);
    if request.limit > max || request.limit > MAX_NATIVE {
        return Err(Error::LimitOutOfRange {
            limit: request.limit,
            max_limit,
        });
    }
    let limit = match request.limit as usize {
        0 => default_limit,
        limit => limit,
    };

    if offset > 0 && request.key.is_some() {
        return Err(Error::ConflictingCursor);
    }

    let start = match &request.key {
        Some(key) => {
            let key = decode_key(key)?;
            match usize::try_from(key) {
                Ok(index) if index < length => Some(index),
                _ => return Err(Error::KeyOutOfRange { key, length }),
            }
        }
        None => match direction {
            Direction::Forward => Some(offset).filter(|&start| start < length),
            Direction::Reverse => length
                .checked_sub(1)
                .and_then(|last| last.checked_sub(offset)),
        },
    };

    if start.is_none() {
        trace!(length, offset, ?direction, "offset past the end, empty page");
    }
    debug!(length, ?start, ?direction, limit, "resolved page plan");

    Ok(PagePlan {
        length,
        start,
        direction,
        limit,
    })
}

// ============================================================================
// Entry Points
// ============================================================================

/// Paginate a collection of `length` items, calling `visitor` for each
/// selected index.
///
/// The first visitor failure stops iteration and is returned as is; no
/// partial response is produced. Pagination errors are converted into the
/// visitor's error type through `From<Error>`.
///
/// # Examples
///
/// ```
/// use array_pager::pagination::{paginate, PageRequest};
///
/// let mut visited = Vec::new();
/// let request = PageRequest::new().with_limit(3);
/// let response = paginate(10, Some(&request), |i| {
///     visited.push(i);
///     Ok::<_, array_pager::Error>(())
/// }, 5, 10)?;
///
/// assert_eq!(visited, vec![0, 1, 2]);
/// assert_eq!(response.next_key.as_deref(), Some(&b"3"[..]));
/// assert_eq!(response.total, 10);
/// # Ok::<(), array_pager::Error>(())
/// ```
pub fn paginate<F, E>(
    length: usize,
    request: Option<&PageRequest>,
    mut visitor: F,
    default_limit: usize,
    max_limit: usize,
) -> std::result::Result<PageResponse, E>
where
    F: FnMut(usize) -> std::result::Result<(), E>,
    E: From<Error>,
{
    let plan = plan(length, request, default_limit, max_limit)?;
    for index in plan.indices() {
        visitor(index)?;
    }
    Ok(plan.response())
}

/// Paginate a slice, calling `visitor` with each selected index and item
pub fn paginate_slice<'a, T, F, E>(
    items: &'a [T],
    request: Option<&PageRequest>,
    mut visitor: F,
    default_limit: usize,
    max_limit: usize,
) -> std::result::Result<PageResponse, E>
where
    F: FnMut(usize, &'a T) -> std::result::Result<(), E>,
    E: From<Error>,
{
    paginate(
        items.len(),
        request,
        |index| visitor(index, &items[index]),
        default_limit,
        max_limit,
    )
}

/// Collect one page of `items` using the configured limits
pub fn collect_page<'a, T>(
    items: &'a [T],
    request: Option<&PageRequest>,
    limits: &PageLimits,
) -> Result<Page<&'a T>> {
    let mut collected = Vec::new();
    let pagination = paginate_slice(
        items,
        request,
        |index, value| {
            collected.push(PageItem { index, value });
            Ok::<_, Error>(())
        },
        limits.default_limit,
        limits.max_limit,
    )?;

    Ok(Page {
        items: collected,
        pagination,
    })
}

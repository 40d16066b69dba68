//! Integration tests
//!
//! Tests the full flow a query handler goes through: decode a JSON page
//! request -> page over a stored list -> encode the JSON page response.

use array_pager::pagination::{paginate, paginate_slice, PageRequest, PageResponse};
use array_pager::{Error, PageLimits};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

// ============================================================================
// Query Handler Fixture
// ============================================================================

/// Status codes a query layer would answer with
#[derive(Debug, PartialEq, Eq)]
enum Status {
    InvalidArgument(String),
    NotFound(String),
}

#[derive(Debug, thiserror::Error)]
enum QueryError {
    #[error("class {0} not found")]
    MissingClass(String),
    #[error(transparent)]
    Page(#[from] Error),
}

impl From<QueryError> for Status {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Page(e) if e.is_invalid_argument() => Status::InvalidArgument(e.to_string()),
            other => Status::NotFound(other.to_string()),
        }
    }
}

/// Lists the classes owned by an account, one page at a time
struct ClassIndex {
    class_ids: Vec<String>,
    known: Vec<String>,
    limits: PageLimits,
}

impl ClassIndex {
    fn new(count: usize) -> Self {
        let class_ids: Vec<String> = (0..count).map(|i| format!("class-{i}")).collect();
        Self {
            known: class_ids.clone(),
            class_ids,
            limits: PageLimits::default(),
        }
    }

    fn classes(&self, request: Value) -> Result<Value, Status> {
        let request: Option<PageRequest> = serde_json::from_value(request)
            .map_err(|e| Status::InvalidArgument(e.to_string()))?;

        let mut classes = Vec::new();
        let pagination = self
            .limits
            .paginate_slice(&self.class_ids, request.as_ref(), |_, id| {
                if !self.known.contains(id) {
                    return Err(QueryError::MissingClass(id.clone()));
                }
                classes.push(id.clone());
                Ok(())
            })?;

        Ok(json!({ "classes": classes, "pagination": pagination }))
    }
}

// ============================================================================
// Handler Tests
// ============================================================================

#[test]
fn test_handler_first_page_uses_default_limit() {
    let index = ClassIndex::new(25);
    let body = index.classes(Value::Null).unwrap();

    assert_eq!(body["classes"].as_array().unwrap().len(), 20);
    assert_eq!(body["classes"][0], "class-0");
    // "20" in base64
    assert_eq!(body["pagination"], json!({"next_key": "MjA=", "total": 25}));
}

#[test]
fn test_handler_follows_next_key() {
    let index = ClassIndex::new(25);
    let first = index.classes(json!({"limit": 10, "reverse": true})).unwrap();
    let next_key = first["pagination"]["next_key"].clone();

    let second = index
        .classes(json!({"limit": 10, "reverse": true, "key": next_key}))
        .unwrap();
    assert_eq!(second["classes"][0], "class-14");
    assert_eq!(second["classes"][9], "class-5");

    let response: PageResponse = serde_json::from_value(second["pagination"].clone()).unwrap();
    assert_eq!(response.next_index().unwrap(), Some(4));
}

#[test]
fn test_handler_maps_bad_requests_to_invalid_argument() {
    let index = ClassIndex::new(5);

    let status = index.classes(json!({"limit": 51})).unwrap_err();
    assert!(matches!(status, Status::InvalidArgument(ref m) if m.contains("limit out of range")));

    // "9" in base64
    let status = index.classes(json!({"key": "OQ=="})).unwrap_err();
    assert!(matches!(status, Status::InvalidArgument(ref m) if m.contains("key out of range")));

    let status = index.classes(json!({"key": "OQ==", "offset": 1})).unwrap_err();
    assert!(matches!(status, Status::InvalidArgument(ref m) if m.contains("got both")));
}

#[test]
fn test_handler_surfaces_visitor_failure() {
    let mut index = ClassIndex::new(5);
    index.known.retain(|id| id != "class-3");

    let status = index.classes(json!({"limit": 5})).unwrap_err();
    assert_eq!(status, Status::NotFound("class class-3 not found".to_string()));

    // the page before the missing class still works
    let body = index.classes(json!({"limit": 3})).unwrap();
    assert_eq!(body["classes"], json!(["class-0", "class-1", "class-2"]));
}

#[test]
fn test_handler_offset_past_end_is_empty() {
    let index = ClassIndex::new(5);
    let body = index.classes(json!({"offset": 5})).unwrap();

    assert_eq!(body["classes"], json!([]));
    assert_eq!(body["pagination"], json!({"next_key": null, "total": 5}));
}

// ============================================================================
// Reference Scenarios
// ============================================================================

fn visited(
    length: usize,
    request: Option<&PageRequest>,
) -> (Vec<usize>, PageResponse) {
    let mut visited = Vec::new();
    let response = paginate(
        length,
        request,
        |i| {
            visited.push(i);
            Ok::<_, Error>(())
        },
        5,
        10,
    )
    .unwrap();
    (visited, response)
}

#[test]
fn test_reference_scenarios() {
    let (indices, response) = visited(10, Some(&PageRequest::new().with_limit(3)));
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(response.next_key.as_deref(), Some(&b"3"[..]));
    assert_eq!(response.total, 10);

    let (indices, response) = visited(10, Some(&PageRequest::new().with_limit(3).reversed()));
    assert_eq!(indices, vec![9, 8, 7]);
    assert_eq!(response.next_key.as_deref(), Some(&b"6"[..]));

    let (indices, response) =
        visited(10, Some(&PageRequest::new().with_offset(9).with_limit(3)));
    assert_eq!(indices, vec![9]);
    assert_eq!(response.next_key, None);

    let (indices, response) = visited(10, None);
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(response.next_key.as_deref(), Some(&b"5"[..]));
}

#[test]
fn test_offset_paging_matches_key_paging() {
    for length in 0..12 {
        for limit in 1..=4_u64 {
            let mut offset = 0;
            let mut by_offset = Vec::new();
            loop {
                let request = PageRequest::new().with_offset(offset).with_limit(limit);
                let (indices, _) = visited(length, Some(&request));
                if indices.is_empty() {
                    break;
                }
                by_offset.extend(indices);
                offset += limit;
            }

            let mut by_key = Vec::new();
            let mut request = Some(PageRequest::new().with_limit(limit));
            while let Some(current) = request {
                let (indices, response) = visited(length, Some(&current));
                by_key.extend(indices);
                request = current.continue_from(&response);
            }

            assert_eq!(by_offset, (0..length).collect::<Vec<_>>());
            assert_eq!(by_key, by_offset);
        }
    }
}

#[test]
fn test_paginate_slice_with_owned_strings() {
    let ids: Vec<String> = ["x", "y", "z"].iter().map(ToString::to_string).collect();
    let mut seen = Vec::new();
    let request = PageRequest::new().with_key_index(1);
    let response = paginate_slice(
        &ids,
        Some(&request),
        |i, id| {
            seen.push(format!("{i}:{id}"));
            Ok::<_, Error>(())
        },
        2,
        3,
    )
    .unwrap();

    assert_eq!(seen, vec!["1:y", "2:z"]);
    assert!(!response.has_more());
}

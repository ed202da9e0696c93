//! Scans - cursor-driven paging over a collection.
//!
//! A store answers each scan call with one bounded batch and, when more
//! matching items may follow, a [`Cursor`] to resume from. [`ScanPages`]
//! turns that protocol into an iterator of batches:
//!
//! - single-page mode (`first_page`) makes exactly one call and hands back
//!   the store's cursor untouched;
//! - exhaustive mode (`drain`) keeps calling with the latest cursor until a
//!   batch arrives without one.
//!
//! Calls are strictly sequential; each one depends on the previous cursor.

use std::iter::FusedIterator;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::trace;

use super::{Item, ModelStore};
use crate::error::StoreError;

/// Opaque continuation token for resuming a scan.
///
/// Callers only ever round-trip a cursor; it is valid for the collection
/// and filter it was issued under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

/// What a store-issued cursor token decodes to.
#[derive(Deserialize)]
struct Position {
    #[serde(rename = "c")]
    collection: String,
    #[serde(rename = "f", default)]
    filter: Option<Filter>,
    #[serde(rename = "k")]
    key: String,
}

impl Cursor {
    /// Wrap a token received from a client.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Cursor resuming after `key` in `collection`, scanned under `filter`.
    pub(crate) fn after(collection: &str, filter: Option<&Filter>, key: &str) -> Self {
        let raw = json!({ "c": collection, "f": filter, "k": key }).to_string();
        Self(URL_SAFE_NO_PAD.encode(raw.as_bytes()))
    }

    /// The key this cursor resumes after, provided it was issued for the
    /// same collection and filter.
    pub(crate) fn resume_key(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<String, StoreError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(self.0.as_bytes())
            .map_err(|e| StoreError::InvalidCursor(e.to_string()))?;
        let position: Position = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::InvalidCursor(format!("malformed position: {}", e)))?;

        if position.collection != collection {
            return Err(StoreError::InvalidCursor(format!(
                "issued for {}, not {}",
                position.collection, collection
            )));
        }
        if position.filter.as_ref() != filter {
            return Err(StoreError::InvalidCursor(
                "issued under a different filter".into(),
            ));
        }
        Ok(position.key)
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Predicate on one attribute of a scanned item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    /// The attribute is a string containing `needle`.
    Contains { field: String, needle: String },
    /// The attribute exists and is not null, `""`, `[]` or `{}`.
    NotEmpty { field: String },
}

impl Filter {
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn not_empty(field: impl Into<String>) -> Self {
        Filter::NotEmpty {
            field: field.into(),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Filter::Contains { field, needle } => item
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|value| value.contains(needle.as_str())),
            Filter::NotEmpty { field } => match item.get(field) {
                None | Some(Value::Null) => false,
                Some(Value::String(s)) => !s.is_empty(),
                Some(Value::Array(a)) => !a.is_empty(),
                Some(Value::Object(o)) => !o.is_empty(),
                Some(_) => true,
            },
        }
    }
}

/// Parameters of a single scan call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanRequest {
    pub filter: Option<Filter>,
    pub cursor: Option<Cursor>,
    pub limit: Option<usize>,
}

impl ScanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Option<Filter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// One batch of raw items as returned by a store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    pub items: Vec<Item>,
    pub next_cursor: Option<Cursor>,
}

/// One batch of typed models plus the cursor to continue from.
///
/// No cursor means the scan is exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<M> {
    pub items: Vec<M>,
    pub next_cursor: Option<Cursor>,
}

enum Next {
    /// First call, at the caller's cursor.
    Start(Option<Cursor>),
    /// Follow-up call, at a cursor the store handed out.
    Resume(Cursor),
    Done,
}

/// Iterator over the batches of one scan.
///
/// Each `next()` issues exactly one store call. Iteration ends after the
/// first batch without a cursor, after the first error, or when the store
/// hands back a cursor it issued earlier in this scan (reported as
/// [`StoreError::StalledScan`]).
pub struct ScanPages<'a, S: ModelStore + ?Sized> {
    store: &'a S,
    collection: &'a str,
    filter: Option<Filter>,
    limit: Option<usize>,
    next: Next,
}

impl<'a, S: ModelStore + ?Sized> ScanPages<'a, S> {
    /// Start a scan at `request.cursor` (or at the collection start).
    pub fn new(store: &'a S, collection: &'a str, request: ScanRequest) -> Self {
        Self {
            store,
            collection,
            filter: request.filter,
            limit: request.limit,
            next: Next::Start(request.cursor),
        }
    }

    /// Single-page mode: one store call, its cursor passed through as is.
    pub fn first_page(mut self) -> Result<ScanOutput, StoreError> {
        self.next().unwrap_or_else(|| Ok(ScanOutput::default()))
    }

    /// Exhaustive mode: every matching item of the collection.
    pub fn drain(self) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        for output in self {
            items.extend(output?.items);
        }
        Ok(items)
    }
}

impl<S: ModelStore + ?Sized> Iterator for ScanPages<'_, S> {
    type Item = Result<ScanOutput, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (cursor, resumed) = match std::mem::replace(&mut self.next, Next::Done) {
            Next::Start(cursor) => (cursor, false),
            Next::Resume(cursor) => (Some(cursor), true),
            Next::Done => return None,
        };

        let request = ScanRequest {
            filter: self.filter.clone(),
            cursor: cursor.clone(),
            limit: self.limit,
        };
        let output = match self.store.scan(self.collection, &request) {
            Ok(output) => output,
            Err(e) => return Some(Err(e)),
        };

        trace!(
            collection = self.collection,
            items = output.items.len(),
            more = output.next_cursor.is_some(),
            "scan batch"
        );

        if let Some(next_cursor) = &output.next_cursor {
            // The caller's own cursor coming back is passed through untouched.
            if resumed && cursor.as_ref() == Some(next_cursor) {
                return Some(Err(StoreError::StalledScan {
                    collection: self.collection.to_string(),
                    cursor: next_cursor.to_string(),
                }));
            }
            self.next = Next::Resume(next_cursor.clone());
        }

        Some(Ok(output))
    }
}

impl<S: ModelStore + ?Sized> FusedIterator for ScanPages<'_, S> {}

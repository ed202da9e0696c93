//! Request decoding shared by all entity handlers.

use axum::body::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::HandlerError;
use crate::{Cursor, Filter, Model, ModelStore, ModelsExt, Page, ScanRequest};

/// Query parameters of the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    #[serde(rename = "pageSize")]
    page_size: Option<String>,
    #[serde(rename = "LastEvaluatedKey")]
    last_evaluated_key: Option<String>,
    search: Option<String>,
}

impl ListParams {
    /// Requested page size. `None` asks for the whole collection.
    pub(crate) fn page_size(&self) -> Result<Option<usize>, HandlerError> {
        let Some(raw) = self.page_size.as_deref() else {
            return Ok(None);
        };
        match raw.trim().parse::<usize>() {
            Ok(size) if size > 0 => Ok(Some(size)),
            _ => Err(HandlerError::BadRequest(format!(
                "pageSize must be a positive integer, got '{}'",
                raw
            ))),
        }
    }

    pub(crate) fn cursor(&self) -> Option<Cursor> {
        self.last_evaluated_key
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(Cursor::new)
    }

    pub(crate) fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|search| !search.is_empty())
    }
}

/// One page when `pageSize` is given, otherwise every item matching `filter`.
///
/// Without `pageSize` the cursor is ignored and the listing starts from the
/// beginning of the collection.
pub(crate) fn list<S: ModelStore, M: Model>(
    store: &S,
    params: &ListParams,
    filter: Option<Filter>,
) -> Result<Page<M>, HandlerError> {
    let models = store.models::<M>();
    match params.page_size()? {
        Some(limit) => {
            let request = ScanRequest::new()
                .filter(filter)
                .cursor(params.cursor())
                .limit(Some(limit));
            Ok(models.page(request)?)
        }
        None => Ok(Page {
            items: models.scan_all(filter)?,
            next_cursor: None,
        }),
    }
}

/// Decode a JSON body, answering 400 with `format` as the expected shape.
pub(crate) fn decode_body<T: DeserializeOwned>(
    body: &Bytes,
    format: &str,
) -> Result<T, HandlerError> {
    serde_json::from_slice(body).map_err(|e| {
        HandlerError::BadRequest(format!(
            "Please provide body in format '{}' ({})",
            format, e
        ))
    })
}

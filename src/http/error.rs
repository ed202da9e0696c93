//! Error types for the HTTP handlers.

use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::warn;

use super::response::respond;
use crate::{ModelError, StoreError};

/// Error type for entity handler operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Malformed body or query parameters.
    #[error("{0}")]
    BadRequest(String),
    /// An update targeted an ID that is not stored.
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        field: &'static str,
    },
    /// No handler for this method and path.
    #[error("Not such endpoint")]
    UnknownEndpoint,
    /// Store or model failure.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl HandlerError {
    /// Map this error to its HTTP status code.
    ///
    /// Generic failures answer 502, not 500, to stay compatible with the
    /// gateway clients of this API.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::BadRequest(_) => 400,
            HandlerError::NotFound { .. } => 404,
            HandlerError::UnknownEndpoint => 502,
            HandlerError::Model(ModelError::Store(StoreError::InvalidCursor(_))) => 400,
            HandlerError::Model(_) => 502,
        }
    }

    fn body(&self) -> Value {
        match self {
            HandlerError::NotFound { field, .. } => {
                let mut body = Map::new();
                body.insert((*field).to_string(), Value::Null);
                body.insert("message".into(), json!(self.to_string()));
                Value::Object(body)
            }
            HandlerError::Model(ModelError::Store(StoreError::InvalidCursor(_))) => {
                json!({ "message": self.to_string() })
            }
            HandlerError::Model(_) => json!({ "error": self.to_string() }),
            HandlerError::BadRequest(_) | HandlerError::UnknownEndpoint => {
                json!({ "message": self.to_string() })
            }
        }
    }
}

// Extractor rejections answer like any other bad request, with JSON and CORS.
macro_rules! bad_request_from {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for HandlerError {
                fn from(rejection: $rejection) -> Self {
                    HandlerError::BadRequest(rejection.body_text())
                }
            }
        )*
    };
}

bad_request_from!(BytesRejection, PathRejection, QueryRejection);

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        if status == StatusCode::BAD_GATEWAY {
            warn!(error = %self, "request failed");
        }
        respond(status, self.body())
    }
}

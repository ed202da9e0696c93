//! Response shaping shared by all entity handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};

use crate::Page;

/// JSON response with the CORS header every endpoint carries.
pub(crate) fn respond(status: StatusCode, body: Value) -> Response {
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(body),
    )
        .into_response()
}

/// 200 with `"message": "Success"` added to `body`.
pub(crate) fn success(body: Value) -> Response {
    let mut body = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    body.insert("message".into(), json!("Success"));
    respond(StatusCode::OK, Value::Object(body))
}

/// `{ <field>: [...], "LastEvaluatedKey": cursor }`, the cursor omitted once
/// the scan is exhausted.
pub(crate) fn page_body<M: serde::Serialize>(
    field: &str,
    page: &Page<M>,
) -> Result<Value, serde_json::Error> {
    let mut body = Map::new();
    body.insert(field.into(), serde_json::to_value(&page.items)?);
    if let Some(cursor) = &page.next_cursor {
        body.insert("LastEvaluatedKey".into(), json!(cursor.as_str()));
    }
    Ok(Value::Object(body))
}

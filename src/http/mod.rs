//! HTTP surface - the product, order and user handlers as an axum router.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET|POST /products`, `GET|PATCH|DELETE /products/:id`
//! - `GET|POST /orders` (`?search=` matches `userId`), `GET|PATCH /orders/:id`
//! - `GET|POST /users`, `GET|PATCH /users/:id`, `GET|PATCH /users/:id/cart`
//! - `GET /carts/pending` - users whose cart is not empty
//! - `GET /health`
//!
//! List endpoints take `pageSize` and `LastEvaluatedKey` for one page, or
//! return every matching item when `pageSize` is absent.
//!
//! Each path is bound with `any` and the handler matches on the method, so
//! an unsupported method answers like an unknown path: 502
//! `{"message": "Not such endpoint"}`. Status codes are 200, 400 (bad body
//! or query), 404 (update of a missing id) and 502 (anything else).
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use beanstore::{http, InMemoryModelStore};
//!
//! let store = Arc::new(InMemoryModelStore::new());
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(store.clone());
//!
//! // Or serve directly
//! http::serve(store, "0.0.0.0:3000").await?;
//! ```

mod error;
mod orders;
mod products;
mod request;
mod response;
mod users;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{any, get};
use axum::Router;
use serde_json::json;
use tracing::info;

use crate::ModelStore;

pub use error::HandlerError;

/// Build an axum `Router` serving all entity handlers over `store`.
pub fn router<S: ModelStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", any(products::collection::<S>))
        .route("/products/:id", any(products::item::<S>))
        .route("/orders", any(orders::collection::<S>))
        .route("/orders/:id", any(orders::item::<S>))
        .route("/users", any(users::collection::<S>))
        .route("/users/:id", any(users::item::<S>))
        .route("/users/:id/cart", any(users::cart::<S>))
        .route("/carts/pending", any(users::pending_carts::<S>))
        .fallback(unknown_endpoint)
        .with_state(store)
}

/// Serve the API over HTTP at the given address (e.g. `"0.0.0.0:3000"`)
/// until Ctrl-C.
pub async fn serve<S: ModelStore + 'static>(
    store: Arc<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

/// `GET /health`
async fn health() -> Response {
    response::respond(StatusCode::OK, json!({ "ok": true }))
}

async fn unknown_endpoint() -> HandlerError {
    HandlerError::UnknownEndpoint
}

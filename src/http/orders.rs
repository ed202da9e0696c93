//! Orders: listing (paged, or every order of a user), create, read and
//! partial update.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::response::Response;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::error::HandlerError;
use super::request::{decode_body, list, ListParams};
use super::response::{page_body, success};
use crate::entities::{Order, OrderPatch};
use crate::{ModelError, ModelStore, ModelsExt};

const ORDER_FORMAT: &str = "{ order: { id: string; userId: string; lineItems: { productId: string; \
variantId: string; quantity: number; unitPrice: number }[]; status?: string } }";

#[derive(Deserialize)]
struct CreateBody {
    order: Order,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    new_order_fields: OrderPatch,
}

/// `/orders`
pub(crate) async fn collection<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    query: Result<Query<ListParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Query(params) = query?;
    debug!(%method, search = ?params.search(), "orders");
    match method {
        Method::GET => {
            let filter = params.search().map(Order::search);
            let page = list::<S, Order>(&store, &params, filter)?;
            Ok(success(page_body("orders", &page).map_err(ModelError::from)?))
        }
        Method::POST => {
            let CreateBody { order } = decode_body(&body?, ORDER_FORMAT)?;
            if order.id.is_empty() || order.user_id.is_empty() {
                return Err(HandlerError::BadRequest(format!(
                    "Please provide body in format '{}' (id and userId must not be empty)",
                    ORDER_FORMAT
                )));
            }
            store.models::<Order>().put(&order)?;
            Ok(success(json!({ "newOrder": order })))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

/// `/orders/:id`
pub(crate) async fn item<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Path(id) = path?;
    debug!(%method, id = %id, "order");
    let orders = store.models::<Order>();
    match method {
        Method::GET => {
            let order = orders.get(&id)?;
            Ok(success(json!({ "order": order })))
        }
        Method::PATCH => {
            let UpdateBody { new_order_fields } =
                decode_body(&body?, "{ newOrderFields: Partial<Order> }")?;
            let order = orders
                .update(&id, &new_order_fields)?
                .ok_or(HandlerError::NotFound {
                    entity: "Order",
                    field: "order",
                })?;
            Ok(success(json!({ "order": order })))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

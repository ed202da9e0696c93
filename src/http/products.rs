//! Products: paged listing, create, read, partial update and delete.

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
use crate::entities::{Product, ProductPatch};
use crate::{ModelError, ModelStore, ModelsExt};

const PRODUCT_FORMAT: &str = "{ product: { id: string; name: string; description: string; \
minPerPurchase: number; variants: { id: string; name: string; stock: number; \
priceRanges: { minQuantity: number; maxQuantity: number; price: number }[] }[] } }";

#[derive(Deserialize)]
struct CreateBody {
    product: Product,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    new_product_fields: ProductPatch,
}

/// `/products`
pub(crate) async fn collection<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    query: Result<Query<ListParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Query(params) = query?;
    debug!(%method, "products");
    match method {
        Method::GET => {
            let page = list::<S, Product>(&store, &params, None)?;
            Ok(success(page_body("products", &page).map_err(ModelError::from)?))
        }
        Method::POST => {
            let CreateBody { product } = decode_body(&body?, PRODUCT_FORMAT)?;
            store.models::<Product>().put(&product)?;
            Ok(success(json!({ "newProduct": product })))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

/// `/products/:id`
pub(crate) async fn item<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Path(id) = path?;
    debug!(%method, id = %id, "product");
    let products = store.models::<Product>();
    match method {
        Method::GET => {
            let product = products.get(&id)?;
            Ok(success(json!({ "product": product })))
        }
        Method::PATCH => {
            let UpdateBody { new_product_fields } =
                decode_body(&body?, "{ newProductFields: Partial<Product> }")?;
            let product = products
                .update(&id, &new_product_fields)?
                .ok_or(HandlerError::NotFound {
                    entity: "Product",
                    field: "product",
                })?;
            Ok(success(json!({ "product": product })))
        }
        Method::DELETE => {
            products.delete(&id)?;
            Ok(success(json!({})))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

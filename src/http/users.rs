//! Users and their carts.

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
use crate::entities::{Cart, User, UserPatch};
use crate::{ModelError, ModelStore, ModelsExt};

const USER_FORMAT: &str = "{ 'userData': { 'email':string, 'name':string, 'id':string } }";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewUser {
    id: Option<String>,
    email: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    user_data: NewUser,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody {
    user_data: UserPatch,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartBody {
    new_cart: Cart,
}

const USER_NOT_FOUND: HandlerError = HandlerError::NotFound {
    entity: "User",
    field: "user",
};

const CART_NOT_FOUND: HandlerError = HandlerError::NotFound {
    entity: "User",
    field: "cart",
};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// `/users`
pub(crate) async fn collection<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    query: Result<Query<ListParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Query(params) = query?;
    debug!(%method, "users");
    match method {
        Method::GET => {
            let page = list::<S, User>(&store, &params, None)?;
            Ok(success(page_body("users", &page).map_err(ModelError::from)?))
        }
        Method::POST => {
            let CreateBody { user_data } = decode_body(&body?, USER_FORMAT)?;
            let (Some(id), Some(email), Some(name)) = (
                non_empty(user_data.id),
                non_empty(user_data.email),
                non_empty(user_data.name),
            ) else {
                return Err(HandlerError::BadRequest(format!(
                    "Please provide body in format '{}'",
                    USER_FORMAT
                )));
            };

            let user = User::new(id, email, name);
            store.models::<User>().put(&user)?;
            Ok(success(json!({ "user": user })))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

/// `/users/:id`
pub(crate) async fn item<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Path(id) = path?;
    debug!(%method, id = %id, "user");
    let users = store.models::<User>();
    match method {
        Method::GET => {
            let user = users.get(&id)?;
            Ok(success(json!({ "user": user })))
        }
        Method::PATCH => {
            let UpdateBody { user_data } = decode_body(&body?, "{ userData: Partial<User> }")?;
            let user = users.update(&id, &user_data)?.ok_or(USER_NOT_FOUND)?;
            Ok(success(json!({ "user": user })))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

/// `/users/:id/cart`
pub(crate) async fn cart<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, HandlerError> {
    let Path(id) = path?;
    debug!(%method, id = %id, "cart");
    let users = store.models::<User>();
    match method {
        Method::GET => {
            let cart = users.get(&id)?.map(|user| user.cart);
            Ok(success(json!({ "cart": cart })))
        }
        Method::PATCH => {
            let CartBody { new_cart } =
                decode_body(&body?, "{ newCart: { productId: string; quantity: number }[] }")?;
            let patch = UserPatch {
                cart: Some(new_cart),
                ..Default::default()
            };
            let user = users.update(&id, &patch)?.ok_or(CART_NOT_FOUND)?;
            Ok(success(json!({ "cart": user.cart })))
        }
        _ => Err(HandlerError::UnknownEndpoint),
    }
}

/// `/carts/pending`: every user who left something in their cart.
pub(crate) async fn pending_carts<S: ModelStore + 'static>(
    State(store): State<Arc<S>>,
    method: Method,
) -> Result<Response, HandlerError> {
    if method != Method::GET {
        return Err(HandlerError::UnknownEndpoint);
    }
    let users = store.models::<User>().scan_all(Some(User::pending_cart()))?;
    debug!(count = users.len(), "pending carts");
    Ok(success(json!({ "users": users })))
}

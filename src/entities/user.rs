use serde::{Deserialize, Serialize};

use crate::model::Filter;
use crate::Model;

/// Products a user has put aside but not ordered yet.
pub type Cart = Vec<CartEntry>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[model(collection = "BeanUsers")]
pub struct User {
    #[model(id)]
    pub id: String,
    #[model(patch)]
    pub name: String,
    #[model(patch)]
    pub email: String,
    #[model(patch)]
    #[serde(default)]
    pub cart: Cart,
}

impl User {
    /// A freshly registered user, with an empty cart.
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            cart: Cart::new(),
        }
    }

    /// Users with something left in their cart.
    pub fn pending_cart() -> Filter {
        Filter::not_empty("cart")
    }
}

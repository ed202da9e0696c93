use serde::{Deserialize, Serialize};

use crate::model::Filter;
use crate::Model;

/// An order placed by a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "BeanOrders")]
pub struct Order {
    #[model(id)]
    pub id: String,
    pub user_id: String,
    #[model(patch)]
    pub line_items: Vec<LineItem>,
    #[model(patch)]
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Attribute that order searches match against.
    pub const SEARCH_FIELD: &'static str = "userId";

    /// Orders whose user id contains `search`.
    pub fn search(search: impl Into<String>) -> Filter {
        Filter::contains(Self::SEARCH_FIELD, search)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub variant_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Cancelled,
}

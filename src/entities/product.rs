use serde::{Deserialize, Serialize};

use crate::Model;

/// A product in the catalogue, sold in one or more variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Model)]
#[serde(rename_all = "camelCase")]
#[model(collection = "BeanProducts")]
pub struct Product {
    #[model(id)]
    pub id: String,
    #[model(patch)]
    pub name: String,
    #[model(patch)]
    pub description: String,
    #[model(patch)]
    pub min_per_purchase: u32,
    #[model(patch)]
    pub variants: Vec<Variant>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: String,
    pub name: String,
    pub stock: u32,
    pub price_ranges: Vec<PriceRange>,
}

/// Unit price for purchases of `min_quantity..=max_quantity` units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub price: f64,
}

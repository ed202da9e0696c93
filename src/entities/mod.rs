//! The three entity kinds of the shop and their nested records.
//!
//! Each entity derives [`Model`](crate::Model), which also generates its
//! typed patch (`ProductPatch`, `OrderPatch`, `UserPatch`). The fields marked
//! `#[model(patch)]` are the entity's update allow-list.

mod order;
mod product;
mod user;

pub use order::{LineItem, Order, OrderPatch, OrderStatus};
pub use product::{PriceRange, Product, ProductPatch, Variant};
pub use user::{Cart, CartEntry, User, UserPatch};

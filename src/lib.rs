//! beanstore - products, orders and users over a schema-less key-value store.
//!
//! The persistence core is two mechanisms:
//!
//! - **partial updates**: a typed patch becomes an attribute-level
//!   [`UpdateSpec`] that writes only the named fields and never the key;
//! - **cursor-driven scans**: [`ScanPages`] returns one page with its
//!   continuation cursor, or drains every matching item.
//!
//! Both run against any [`ModelStore`]; [`InMemoryModelStore`] is bundled.
//! With the `http` feature the [`http`] module exposes the entities as an
//! axum router.

// Lets `#[derive(Model)]` output name this crate the same way inside and outside it.
extern crate self as beanstore;

pub mod config;
pub mod entities;
mod error;
mod model;

#[cfg(feature = "http")]
pub mod http;

pub use config::ServiceConfig;
pub use error::StoreError;
pub use model::{
    Assignment, Cursor, Filter, InMemoryModelStore, Item, Model, ModelError, ModelRepository,
    ModelStore, ModelsExt, Page, Patch, ScanOutput, ScanPages, ScanRequest, StoreConfig,
    UpdateBuilder, UpdateExpression, UpdateSpec,
};

// Re-export the derive so `use beanstore::Model` brings in trait and derive together
pub use beanstore_macros::Model;

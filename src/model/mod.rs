//! Models - typed entities over a schema-less key-value store.
//!
//! A store only knows collections of JSON items addressed by a string key.
//! This module layers three things on top of that:
//!
//! - [`Model`] and [`Patch`], usually derived with `#[derive(Model)]`, which
//!   tie a Rust struct to its collection and to the set of fields a partial
//!   update may touch.
//! - [`UpdateSpec`], the attribute-level mutation built from a patch.
//! - [`ScanPages`], which drives cursor-based scans one page at a time or
//!   until the collection is drained.
//!
//! ## Example
//!
//! ```ignore
//! use beanstore::{InMemoryModelStore, Model, ModelsExt};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize, Model)]
//! #[model(collection = "BeanUsers")]
//! struct User {
//!     #[model(id)]
//!     pub id: String,
//!     #[model(patch)]
//!     pub name: String,
//! }
//!
//! let store = InMemoryModelStore::new();
//! store.models::<User>().put(&user)?;
//! let renamed = store.models::<User>().update("u1", &UserPatch {
//!     name: Some("Ada".into()),
//! })?;
//! ```

mod in_memory;
mod model_repository;
mod scan;
mod store;
mod update;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::StoreError;

/// A stored record: attribute name to attribute value.
pub type Item = serde_json::Map<String, Value>;

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection (table) holding this model type.
    const COLLECTION: &'static str;

    /// Attribute name of the primary key, as it appears in the stored item.
    const KEY: &'static str;

    /// The typed partial update for this model.
    type Patch: Patch<Model = Self>;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// A partial set of new field values for an existing model.
///
/// Every field of a patch is optional; only the `Some` ones are written.
/// The fields a patch can name are its model's allow-list, so keys outside
/// it cannot even be represented.
pub trait Patch: Serialize + DeserializeOwned + Default + Send + Sync {
    type Model: Model;

    /// Attribute names this patch may set.
    const FIELDS: &'static [&'static str];

    /// One `(field, value)` pair per field that is set.
    fn assignments(&self) -> Result<Vec<Assignment>, serde_json::Error>;
}

/// Error type for typed model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("model serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{collection} model did not serialize to an object")]
    NotAnObject { collection: &'static str },
}

pub use in_memory::{InMemoryModelStore, StoreConfig};
pub use model_repository::{ModelRepository, ModelsExt};
pub use scan::{Cursor, Filter, Page, ScanOutput, ScanPages, ScanRequest};
pub use store::ModelStore;
pub use update::{Assignment, UpdateBuilder, UpdateExpression, UpdateSpec};

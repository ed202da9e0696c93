//! ModelStore - Abstract key-value storage for schema-less items.

use super::{Item, ScanOutput, ScanRequest, UpdateSpec};
use crate::error::StoreError;

/// Abstract key-value storage for models.
///
/// One collection per entity kind, each item addressed by its primary key.
/// The store never interprets item contents beyond what a scan filter or an
/// update assignment names.
pub trait ModelStore: Send + Sync {
    /// Get an item by key. A missing key is `Ok(None)`, never an error.
    fn get_item(&self, collection: &str, key: &str) -> Result<Option<Item>, StoreError>;

    /// Create or fully replace the item stored under `key`.
    fn put_item(&self, collection: &str, key: &str, item: Item) -> Result<(), StoreError>;

    /// Delete the item stored under `key`. Deleting a missing key is a no-op.
    fn delete_item(&self, collection: &str, key: &str) -> Result<(), StoreError>;

    /// Apply `update` to an existing item as a single operation and return
    /// the item as it reads afterwards. Returns `Ok(None)`, writing nothing,
    /// when no item is stored under `key`.
    fn update_item(
        &self,
        collection: &str,
        key: &str,
        update: &UpdateSpec,
    ) -> Result<Option<Item>, StoreError>;

    /// Read one batch of the collection, resuming after `request.cursor`.
    ///
    /// Returns at most `request.limit` items. `next_cursor` is set when more
    /// matching items may follow.
    fn scan(&self, collection: &str, request: &ScanRequest) -> Result<ScanOutput, StoreError>;
}

//! InMemoryModelStore - ordered, HashMap-of-BTreeMap backed model store.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{Cursor, Item, ModelStore, ScanOutput, ScanRequest, UpdateSpec};
use crate::error::StoreError;

/// Tuning for [`InMemoryModelStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Most items a single scan call evaluates, whatever limit is asked for.
    pub max_scan_batch: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_scan_batch: 100,
        }
    }
}

/// In-memory model store.
///
/// Each collection is a `BTreeMap` keyed by primary key, so scans visit
/// items in ascending key order. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryModelStore {
    storage: Arc<RwLock<HashMap<String, BTreeMap<String, Item>>>>,
    config: StoreConfig,
}

impl Default for InMemoryModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryModelStore {
    /// Create a new empty model store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Items evaluated by one scan call: the requested limit, capped by the
    /// store's batch size, and never zero.
    fn batch_size(&self, limit: Option<usize>) -> usize {
        let cap = self.config.max_scan_batch.max(1);
        limit.map_or(cap, |limit| limit.clamp(1, cap))
    }
}

impl ModelStore for InMemoryModelStore {
    fn get_item(&self, collection: &str, key: &str) -> Result<Option<Item>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;

        Ok(storage
            .get(collection)
            .and_then(|items| items.get(key))
            .cloned())
    }

    fn put_item(&self, collection: &str, key: &str, item: Item) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("put"))?;

        storage
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), item);
        Ok(())
    }

    fn delete_item(&self, collection: &str, key: &str) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete"))?;

        if let Some(items) = storage.get_mut(collection) {
            items.remove(key);
        }
        Ok(())
    }

    fn update_item(
        &self,
        collection: &str,
        key: &str,
        update: &UpdateSpec,
    ) -> Result<Option<Item>, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("update"))?;

        let Some(item) = storage
            .get_mut(collection)
            .and_then(|items| items.get_mut(key))
        else {
            debug!(collection, key, "update target missing");
            return Ok(None);
        };

        update.apply(item);
        Ok(Some(item.clone()))
    }

    fn scan(&self, collection: &str, request: &ScanRequest) -> Result<ScanOutput, StoreError> {
        let start = match &request.cursor {
            Some(cursor) => {
                Bound::Excluded(cursor.resume_key(collection, request.filter.as_ref())?)
            }
            None => Bound::Unbounded,
        };

        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("scan"))?;

        let Some(items) = storage.get(collection) else {
            return Ok(ScanOutput::default());
        };

        let matches = |item: &Item| request.filter.as_ref().map_or(true, |f| f.matches(item));
        let mut range = items.range::<String, _>((start, Bound::Unbounded));

        let mut found = Vec::new();
        let mut last_key = None;
        for (key, item) in range.by_ref().take(self.batch_size(request.limit)) {
            last_key = Some(key);
            if matches(item) {
                found.push(item.clone());
            }
        }

        // Lookahead past the batch so a cursor is only issued when a match
        // remains. Costs a walk of the rest of the collection under the read
        // lock; a sparse filter drained in small batches is quadratic.
        let more = range.any(|(_, item)| matches(item));
        let next_cursor = match last_key {
            Some(key) if more => {
                Some(Cursor::after(collection, request.filter.as_ref(), key))
            }
            _ => None,
        };

        Ok(ScanOutput {
            items: found,
            next_cursor,
        })
    }
}

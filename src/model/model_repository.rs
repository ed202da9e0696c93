//! ModelRepository - Typed accessor for one model kind on a store.

use std::marker::PhantomData;

use serde_json::Value;

use super::{
    Filter, Item, Model, ModelError, ModelStore, Page, ScanPages, ScanRequest, UpdateSpec,
};

/// Typed repository wrapper for accessing models of a specific type.
pub struct ModelRepository<'a, S: ?Sized, M> {
    store: &'a S,
    _marker: PhantomData<M>,
}

impl<'a, S: ModelStore + ?Sized, M: Model> ModelRepository<'a, S, M> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Get a model by ID.
    pub fn get(&self, id: &str) -> Result<Option<M>, ModelError> {
        self.store
            .get_item(M::COLLECTION, id)?
            .map(decode::<M>)
            .transpose()
    }

    /// Create or fully replace a model.
    pub fn put(&self, model: &M) -> Result<(), ModelError> {
        let item = encode(model)?;
        self.store.put_item(M::COLLECTION, model.id(), item)?;
        Ok(())
    }

    /// Delete a model by ID. Missing IDs are fine.
    pub fn delete(&self, id: &str) -> Result<(), ModelError> {
        self.store.delete_item(M::COLLECTION, id)?;
        Ok(())
    }

    /// Apply a typed patch. Returns the updated model, or `None` if there
    /// is no model with this ID.
    pub fn update(&self, id: &str, patch: &M::Patch) -> Result<Option<M>, ModelError> {
        let spec = UpdateSpec::from_patch(patch)?;
        self.update_with(id, &spec)
    }

    /// Apply a prebuilt update spec.
    pub fn update_with(&self, id: &str, spec: &UpdateSpec) -> Result<Option<M>, ModelError> {
        self.store
            .update_item(M::COLLECTION, id, spec)?
            .map(decode::<M>)
            .transpose()
    }

    /// One page of at most `request.limit` models.
    pub fn page(&self, request: ScanRequest) -> Result<Page<M>, ModelError> {
        let output = self.pages(request).first_page()?;
        Ok(Page {
            items: decode_all(output.items)?,
            next_cursor: output.next_cursor,
        })
    }

    /// Every model matching `filter`, however many store calls that takes.
    pub fn scan_all(&self, filter: Option<Filter>) -> Result<Vec<M>, ModelError> {
        let items = self.pages(ScanRequest::new().filter(filter)).drain()?;
        decode_all(items)
    }

    /// Raw batch iterator over this model's collection.
    pub fn pages(&self, request: ScanRequest) -> ScanPages<'a, S> {
        ScanPages::new(self.store, M::COLLECTION, request)
    }
}

fn encode<M: Model>(model: &M) -> Result<Item, ModelError> {
    match serde_json::to_value(model)? {
        Value::Object(item) => Ok(item),
        _ => Err(ModelError::NotAnObject {
            collection: M::COLLECTION,
        }),
    }
}

fn decode<M: Model>(item: Item) -> Result<M, ModelError> {
    Ok(serde_json::from_value(Value::Object(item))?)
}

fn decode_all<M: Model>(items: Vec<Item>) -> Result<Vec<M>, ModelError> {
    items.into_iter().map(decode::<M>).collect()
}

/// Extension trait for typed model access on any ModelStore.
pub trait ModelsExt: ModelStore + Sized {
    /// Get a typed model repository.
    fn models<M: Model>(&self) -> ModelRepository<'_, Self, M> {
        ModelRepository::new(self)
    }
}

impl<S: ModelStore> ModelsExt for S {}

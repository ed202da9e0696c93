//! Partial updates - attribute-level mutations built from patches.
//!
//! An [`UpdateSpec`] never rewrites a whole item. It is a list of `SET`
//! assignments, one per named attribute, so two updates touching different
//! fields of the same item cannot clobber each other. A nested value named
//! as a field (a cart, a list of variants) is replaced whole, never merged.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::{Item, Model, ModelError, Patch};

/// A single `field = value` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub value: Value,
}

impl Assignment {
    pub fn new(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

/// A store-level mutation: the set of attributes to overwrite.
///
/// An empty spec is valid and leaves the item untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSpec {
    assignments: Vec<Assignment>,
}

/// An [`UpdateSpec`] rendered as a key-value store update expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// `SET #attr0 = :val0, #attr1 = :val1`
    pub expression: String,
    /// Placeholder to attribute name.
    pub names: BTreeMap<String, String>,
    /// Placeholder to attribute value.
    pub values: BTreeMap<String, Value>,
}

impl UpdateSpec {
    /// Build the mutation for a typed patch.
    pub fn from_patch<P: Patch>(patch: &P) -> Result<Self, ModelError> {
        let builder = patch
            .assignments()?
            .into_iter()
            .fold(UpdateBuilder::for_patch::<P>(), |builder, assignment| {
                builder.set(assignment.field, assignment.value)
            });
        Ok(builder.build())
    }

    /// Build the mutation for an untyped JSON object, dropping every key
    /// outside `P`'s allow-list.
    pub fn from_fields<P: Patch>(fields: Item) -> Self {
        fields
            .into_iter()
            .fold(UpdateBuilder::for_patch::<P>(), |builder, (field, value)| {
                builder.set(field, value)
            })
            .build()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Names of the attributes this spec writes, in assignment order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.assignments.iter().map(|a| a.field.as_str())
    }

    /// Overwrite the named attributes of `item`, leaving every other one as is.
    pub fn apply(&self, item: &mut Item) {
        for assignment in &self.assignments {
            item.insert(assignment.field.clone(), assignment.value.clone());
        }
    }

    /// Render as an update expression with placeholder maps.
    ///
    /// Returns `None` for an empty spec, since `SET` needs at least one clause.
    pub fn expression(&self) -> Option<UpdateExpression> {
        if self.is_empty() {
            return None;
        }

        let mut clauses = Vec::with_capacity(self.assignments.len());
        let mut names = BTreeMap::new();
        let mut values = BTreeMap::new();

        for (i, assignment) in self.assignments.iter().enumerate() {
            let name = format!("#attr{}", i);
            let value = format!(":val{}", i);
            clauses.push(format!("{} = {}", name, value));
            names.insert(name, assignment.field.clone());
            values.insert(value, assignment.value.clone());
        }

        Some(UpdateExpression {
            expression: format!("SET {}", clauses.join(", ")),
            names,
            values,
        })
    }
}

/// Accumulates assignments, enforcing an allow-list as it goes.
///
/// Fields outside the allow-list, and the primary key, are dropped without
/// error. Setting the same field twice keeps the last value.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    allowed: &'static [&'static str],
    key: &'static str,
    assignments: Vec<Assignment>,
}

impl UpdateBuilder {
    pub fn new(allowed: &'static [&'static str], key: &'static str) -> Self {
        Self {
            allowed,
            key,
            assignments: Vec::new(),
        }
    }

    /// Builder for the allow-list of patch type `P`.
    pub fn for_patch<P: Patch>() -> Self {
        Self::new(P::FIELDS, <P::Model as Model>::KEY)
    }

    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        let field = field.into();
        if field == self.key || !self.allowed.contains(&field.as_str()) {
            debug!(field = %field, "dropping field outside the update allow-list");
            return self;
        }

        match self.assignments.iter_mut().find(|a| a.field == field) {
            Some(existing) => existing.value = value,
            None => self.assignments.push(Assignment { field, value }),
        }
        self
    }

    pub fn build(self) -> UpdateSpec {
        UpdateSpec {
            assignments: self.assignments,
        }
    }
}

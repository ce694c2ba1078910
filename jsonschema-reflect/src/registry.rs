//! Definition registry for named record types.
//!
//! Each reflection call owns one registry. A type is reserved before its
//! fields are walked, so a nested occurrence of the same type (directly or
//! through other types) resolves to a reference instead of recursing.

use std::any::TypeId;
use std::collections::HashMap;

use crate::schema::{Definition, SchemaNode};

/// Outcome of reserving a definition slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The slot is new; the caller must walk the type and [`complete`] it.
    ///
    /// [`complete`]: DefinitionRegistry::complete
    New(String),
    /// The type (or another type with the same name) is already registered.
    Existing(String),
}

#[derive(Debug)]
struct Entry {
    name: String,
    node: Option<SchemaNode>,
}

/// Deduplicating table of named definitions.
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    entries: Vec<Entry>,
    by_id: HashMap<TypeId, usize>,
    by_name: HashMap<String, usize>,
}

impl DefinitionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The definition name registered for a type, if any.
    pub fn lookup(&self, id: TypeId) -> Option<&str> {
        self.by_id
            .get(&id)
            .map(|&index| self.entries[index].name.as_str())
    }

    /// Reserve a definition slot for a type.
    ///
    /// A type id is registered at most once. A different type claiming a name
    /// that is already taken is mapped onto the existing entry; the first
    /// registered shape wins.
    pub fn reserve(&mut self, id: TypeId, name: &str) -> Registration {
        if let Some(existing) = self.lookup(id) {
            return Registration::Existing(existing.to_string());
        }

        if let Some(&index) = self.by_name.get(name) {
            tracing::warn!(
                definition = name,
                "distinct types share a definition name; keeping the first registered shape"
            );
            self.by_id.insert(id, index);
            return Registration::Existing(name.to_string());
        }

        let index = self.entries.len();
        self.entries.push(Entry {
            name: name.to_string(),
            node: None,
        });
        self.by_id.insert(id, index);
        self.by_name.insert(name.to_string(), index);
        tracing::trace!(definition = name, "reserved definition");
        Registration::New(name.to_string())
    }

    /// Store the walked node of a reserved definition.
    pub fn complete(&mut self, name: &str, node: SchemaNode) {
        if let Some(&index) = self.by_name.get(name) {
            self.entries[index].node = Some(node);
        }
    }

    /// Consume the registry, yielding definitions in registration order.
    pub fn into_definitions(self) -> Vec<Definition> {
        self.entries
            .into_iter()
            .filter_map(|entry| {
                entry.node.map(|node| Definition {
                    name: entry.name,
                    node,
                })
            })
            .collect()
    }
}

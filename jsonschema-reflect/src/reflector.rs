//! Reflection entry point and configuration.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ReflectError;
use crate::schema::{Schema, SchemaNode};
use crate::traits::Reflect;
use crate::types::{TypeInfo, TypeKind};
use crate::walker::Walker;

/// Boolean reflection options.
///
/// Deserializable so hosts can keep them in their own configuration files:
///
/// ```rust
/// use jsonschema_reflect::ReflectOptions;
///
/// let options: ReflectOptions =
///     serde_json::from_str(r#"{"expandedStruct": true}"#).unwrap();
/// assert!(options.expanded_struct);
/// assert!(!options.allow_additional_properties);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReflectOptions {
    /// Omit `additionalProperties: false` from record nodes.
    pub allow_additional_properties: bool,

    /// Only fields carrying the `required` directive are required.
    pub required_from_jsonschema_tags: bool,

    /// Inline the root record instead of referencing a definition.
    pub expanded_struct: bool,

    /// Use field doc comments as descriptions when no description is given.
    pub doc_comments_as_descriptions: bool,
}

/// Caller-supplied override: a node returned for a type replaces the walked
/// node at every occurrence of that type.
pub type TypeMapper = Arc<dyn Fn(&TypeInfo) -> Option<SchemaNode> + Send + Sync>;

/// Builds schema documents from [`Reflect`] types.
///
/// # Example
///
/// ```rust
/// use jsonschema_reflect::{JsonSchema, Reflector};
///
/// #[derive(JsonSchema)]
/// pub struct Point {
///     pub x: i64,
///     pub y: i64,
/// }
///
/// let schema = Reflector::new()
///     .with_expanded_struct(true)
///     .reflect::<Point>()
///     .unwrap();
/// assert_eq!(schema.to_json()["required"], serde_json::json!(["x", "y"]));
/// ```
#[derive(Clone, Default)]
pub struct Reflector {
    options: ReflectOptions,
    ignored_types: HashSet<TypeId>,
    type_mapper: Option<TypeMapper>,
}

impl fmt::Debug for Reflector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reflector")
            .field("options", &self.options)
            .field("ignored_types", &self.ignored_types.len())
            .field("type_mapper", &self.type_mapper.is_some())
            .finish()
    }
}

impl Reflector {
    /// Create a reflector with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all boolean options at once.
    pub fn with_options(mut self, options: ReflectOptions) -> Self {
        self.options = options;
        self
    }

    /// Set whether records accept unlisted properties.
    pub fn with_additional_properties(mut self, allow: bool) -> Self {
        self.options.allow_additional_properties = allow;
        self
    }

    /// Set whether requiredness comes only from the `required` directive.
    pub fn with_required_from_jsonschema_tags(mut self, enabled: bool) -> Self {
        self.options.required_from_jsonschema_tags = enabled;
        self
    }

    /// Set whether the root record is inlined.
    pub fn with_expanded_struct(mut self, expanded: bool) -> Self {
        self.options.expanded_struct = expanded;
        self
    }

    /// Set whether doc comments fill in missing descriptions.
    pub fn with_doc_comments(mut self, enabled: bool) -> Self {
        self.options.doc_comments_as_descriptions = enabled;
        self
    }

    /// Omit every field of type `T`.
    pub fn ignore<T: ?Sized + 'static>(self) -> Self {
        self.ignore_type(TypeId::of::<T>())
    }

    /// Omit every field whose type has this id.
    pub fn ignore_type(mut self, id: TypeId) -> Self {
        self.ignored_types.insert(id);
        self
    }

    /// Install a type mapper.
    pub fn with_type_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&TypeInfo) -> Option<SchemaNode> + Send + Sync + 'static,
    {
        self.type_mapper = Some(Arc::new(mapper));
        self
    }

    /// Current boolean options.
    pub fn options(&self) -> &ReflectOptions {
        &self.options
    }

    /// Whether a type is ignored, looking through pointers, optionals,
    /// newtypes, sequences and map values.
    pub(crate) fn is_ignored(&self, info: &TypeInfo) -> bool {
        if self.ignored_types.is_empty() {
            return false;
        }
        let mut current = info.clone();
        loop {
            if self.ignored_types.contains(&current.id) {
                return true;
            }
            current = match current.kind {
                TypeKind::Pointer(inner)
                | TypeKind::Optional(inner)
                | TypeKind::Newtype(inner)
                | TypeKind::Sequence(inner) => inner.info(),
                TypeKind::Map { value, .. } => value.info(),
                _ => return false,
            };
        }
    }

    pub(crate) fn map_type(&self, info: &TypeInfo) -> Option<SchemaNode> {
        self.type_mapper.as_ref().and_then(|mapper| mapper(info))
    }

    /// Reflect `T` into a schema document.
    pub fn reflect<T: Reflect + ?Sized>(&self) -> Result<Schema, ReflectError> {
        self.reflect_type(&T::type_info())
    }

    /// Reflect a type description into a schema document.
    #[tracing::instrument(skip(self, info), fields(root = info.name))]
    pub fn reflect_type(&self, info: &TypeInfo) -> Result<Schema, ReflectError> {
        let mut walker = Walker::new(self);

        let root = if self.is_ignored(info) {
            Ok(SchemaNode::any())
        } else if let Some(record) = self.expandable_root(info) {
            Ok(walker.inline_record_node(&record))
        } else {
            walker.walk(info)
        };

        let root = root.map_err(|unsupported| ReflectError::Unsupported {
            type_name: unsupported.type_name,
            kind: unsupported.kind,
        })?;

        let definitions = walker.into_definitions();
        tracing::debug!(definitions = definitions.len(), "reflected schema");
        Ok(Schema { root, definitions })
    }

    /// The record to inline at the root, when expansion applies.
    fn expandable_root(&self, info: &TypeInfo) -> Option<TypeInfo> {
        if !self.options.expanded_struct {
            return None;
        }
        let mut current = info.clone();
        loop {
            if self.map_type(&current).is_some() {
                return None;
            }
            match current.kind {
                TypeKind::Struct(_) => return Some(current),
                TypeKind::Pointer(inner) | TypeKind::Optional(inner) => current = inner.info(),
                _ => return None,
            }
        }
    }
}

/// Reflect `T` with default options.
pub fn reflect<T: Reflect + ?Sized>() -> Result<Schema, ReflectError> {
    Reflector::new().reflect::<T>()
}

//! Type descriptions consumed by the reflector.
//!
//! A [`TypeInfo`] is what a [`Reflect`](crate::Reflect) implementation hands
//! to the walker: the type's identity, its definition name and its shape.
//! Field and element types are held as [`TypeRef`]s, which resolve lazily so
//! that describing a self-referential struct does not recurse.

use std::any::TypeId;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::traits::Reflect;

/// Description of a single type.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// Identity used for deduplication, cycle detection and ignore lists.
    pub id: TypeId,

    /// Name used for the definitions table (e.g. "User").
    pub name: &'static str,

    /// Shape of the type.
    pub kind: TypeKind,

    /// Doc comment of the type, if any.
    pub doc: Option<&'static str>,
}

impl TypeInfo {
    /// Describe `T` with the given name and shape.
    pub fn new<T: ?Sized + 'static>(name: &'static str, kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            kind,
            doc: None,
        }
    }

    /// Attach a doc comment.
    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.doc = Some(doc);
        self
    }

    /// Whether this type is a record with named fields.
    pub fn is_record(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// The name this type contributes to a generic instantiation's name.
    ///
    /// Containers spell out their element types, so `Page<Vec<i32>>` and
    /// `Page<Vec<String>>` stay distinct.
    pub fn argument_name(&self) -> String {
        match &self.kind {
            TypeKind::Sequence(inner)
            | TypeKind::Pointer(inner)
            | TypeKind::Optional(inner) => {
                format!("{}_{}", self.name, inner.info().argument_name())
            }
            TypeKind::Map { key, value } => format!(
                "{}_{}_{}",
                self.name,
                key.info().argument_name(),
                value.info().argument_name()
            ),
            TypeKind::Unit => "Unit".to_string(),
            _ => self.name.to_string(),
        }
    }
}

/// Definition name of a generic instantiation: the base name followed by its
/// arguments, joined with `_` (`Page<i32>` is `Page_i32`).
///
/// Names are interned for the life of the process so they can be stored in
/// [`TypeInfo::name`].
pub fn generic_name(base: &str, args: &[String]) -> &'static str {
    static NAMES: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();

    let name = std::iter::once(base)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("_");
    let mut names = NAMES
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(&interned) = names.get(name.as_str()) {
        return interned;
    }
    let interned: &'static str = Box::leak(name.into_boxed_str());
    names.insert(interned);
    interned
}

/// Lazily resolved reference to another type's description.
#[derive(Clone, Copy)]
pub struct TypeRef(fn() -> TypeInfo);

impl TypeRef {
    /// Reference the description of `T`.
    pub fn of<T: Reflect + ?Sized>() -> Self {
        TypeRef(T::type_info)
    }

    /// Resolve the description.
    pub fn info(&self) -> TypeInfo {
        (self.0)()
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeRef").field(&self.info().name).finish()
    }
}

/// Shape categories understood by the walker.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Record with named fields, in declaration order.
    Struct(Vec<FieldInfo>),

    /// Ordered sequence (Vec, slices, sets).
    Sequence(TypeRef),

    /// String-keyed mapping.
    Map { key: TypeRef, value: TypeRef },

    /// Owning or shared pointer (Box, Rc, Arc).
    Pointer(TypeRef),

    /// `Option<T>`; walked like a pointer but makes the field omit-capable.
    Optional(TypeRef),

    /// Single-field tuple struct, encoded as its inner value.
    Newtype(TypeRef),

    /// Scalar with a fixed set of values (fieldless enums).
    Enumerated(Primitive),

    /// Built-in scalar.
    Primitive(Primitive),

    /// Timestamp, encoded as an RFC 3339 string.
    Time,

    /// URI string.
    Uri,

    /// IPv4 address string.
    Ipv4,

    /// IPv6 address string.
    Ipv6,

    /// UUID string.
    Uuid,

    /// Any JSON value.
    Any,

    /// The unit type, encoded as null.
    Unit,

    /// A type with no JSON encoding (channels, function pointers).
    Unsupported(&'static str),
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    String,
}

/// Description of one struct field.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    /// Rust identifier of the field.
    pub ident: &'static str,

    /// Whether the field is publicly visible.
    pub exported: bool,

    /// Whether the field is embedded (flattened into the parent).
    pub embedded: bool,

    /// Raw annotation channels.
    pub tags: FieldTags,

    /// Declared type of the field.
    pub ty: TypeRef,
}

impl FieldInfo {
    /// Describe a field of type `T`.
    pub fn new<T: Reflect + ?Sized>(ident: &'static str, exported: bool) -> Self {
        Self {
            ident,
            exported,
            embedded: false,
            tags: FieldTags::default(),
            ty: TypeRef::of::<T>(),
        }
    }

    /// Mark the field as embedded.
    pub fn embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    /// Set the external-name annotation (`name[,omitempty]`).
    pub fn with_json(mut self, tag: &'static str) -> Self {
        self.tags.json = Some(tag);
        self
    }

    /// Set the fallback external-name annotation.
    pub fn with_yaml(mut self, tag: &'static str) -> Self {
        self.tags.yaml = Some(tag);
        self
    }

    /// Set the constraint directive string.
    pub fn with_constraints(mut self, directives: &'static str) -> Self {
        self.tags.constraints = Some(directives);
        self
    }

    /// Set the description annotation.
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.tags.description = Some(description);
        self
    }

    /// Set enum values as a JSON array literal.
    pub fn with_enum_json(mut self, values: &'static str) -> Self {
        self.tags.enum_json = Some(values);
        self
    }

    /// Mark the field omit-capable without touching the json tag.
    pub fn with_omit_empty(mut self) -> Self {
        self.tags.omit_empty = true;
        self
    }

    /// Exclude the field regardless of other annotations.
    pub fn skipped(mut self) -> Self {
        self.tags.skip = true;
        self
    }

    /// Attach the field's doc comment.
    pub fn with_doc(mut self, doc: &'static str) -> Self {
        self.tags.doc = Some(doc);
        self
    }
}

/// Raw, unparsed annotation channels of a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldTags {
    pub json: Option<&'static str>,
    pub yaml: Option<&'static str>,
    pub constraints: Option<&'static str>,
    pub description: Option<&'static str>,
    pub enum_json: Option<&'static str>,
    pub doc: Option<&'static str>,
    /// Set by serde `default` / `skip_serializing_if`.
    pub omit_empty: bool,
    /// Set by serde `skip`.
    pub skip: bool,
}

//! Intermediate representation between parsing and code generation.
//!
//! The derive only records what the source says; every annotation string is
//! passed through verbatim and interpreted by `jsonschema-reflect` at
//! reflection time.

use syn::{Generics, Ident, Type};

/// Everything the code generator needs for one derived type.
#[derive(Debug, Clone)]
pub struct ReflectIR {
    /// Rust identifier of the type.
    pub ident: Ident,
    /// Definition name.
    pub name: String,
    pub generics: Generics,
    /// Doc comment of the type.
    pub doc: Option<String>,
    pub shape: Shape,
}

/// Shape of the derived type.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Struct with named fields (or a unit struct, with none).
    Record(Vec<FieldIR>),
    /// Single-field tuple struct encoded as its inner value.
    Newtype(Type),
    /// Newtype declared as a well-known string format.
    WellKnown(WellKnown),
    /// Fieldless enum; carries the `Primitive` variant name of its encoding.
    Enumerated(&'static str),
}

/// Well-known formats a newtype can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnown {
    Uri,
    DateTime,
    Ipv4,
}

impl WellKnown {
    /// The container attribute that requests this format.
    pub fn attr_name(&self) -> &'static str {
        match self {
            WellKnown::Uri => "uri",
            WellKnown::DateTime => "date_time",
            WellKnown::Ipv4 => "ipv4",
        }
    }

    /// Name of the matching `TypeKind` variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            WellKnown::Uri => "Uri",
            WellKnown::DateTime => "Time",
            WellKnown::Ipv4 => "Ipv4",
        }
    }
}

/// One struct field as written in the source.
#[derive(Debug, Clone)]
pub struct FieldIR {
    /// Rust field name, without a raw-identifier prefix.
    pub ident: String,
    pub ty: Type,
    /// Declared `pub`. Only embedded fields can be private.
    pub exported: bool,
    pub embedded: bool,
    pub json: Option<String>,
    pub yaml: Option<String>,
    pub constraints: Option<String>,
    pub description: Option<String>,
    pub enum_json: Option<String>,
    pub doc: Option<String>,
    /// Omit-capable without a json `omitempty` option (serde defaults).
    pub omit_empty: bool,
}

impl FieldIR {
    /// A field with no annotations.
    pub fn new(ident: impl Into<String>, ty: Type) -> Self {
        Self {
            ident: ident.into(),
            ty,
            exported: true,
            embedded: false,
            json: None,
            yaml: None,
            constraints: None,
            description: None,
            enum_json: None,
            doc: None,
            omit_empty: false,
        }
    }
}

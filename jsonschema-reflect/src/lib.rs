//! # jsonschema-reflect
//!
//! Generate [JSON Schema](https://json-schema.org/) (draft-04) documents from
//! Rust types.
//!
//! Types describe their shape through the [`Reflect`] trait, usually derived
//! with `#[derive(JsonSchema)]`. A [`Reflector`] walks that description and
//! produces a [`Schema`]: an inline root node plus a table of named
//! definitions, one per record type.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonschema_reflect::{reflect, JsonSchema};
//!
//! #[derive(JsonSchema)]
//! pub struct User {
//!     pub id: u64,
//!     #[jsonschema(json = "name,omitempty", constraints = "minLength=1,maxLength=20")]
//!     pub name: String,
//! }
//!
//! let schema = reflect::<User>().unwrap();
//! let json = schema.to_json();
//! assert_eq!(json["$ref"], "#/definitions/User");
//! assert_eq!(json["definitions"]["User"]["required"], serde_json::json!(["id"]));
//! ```
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | `#[derive(JsonSchema)]` | ✅ |
//! | `serde-compat` | Respect serde attributes in the derive | ✅ |
//! | `chrono` | `chrono` date and time types as `date-time` | ❌ |
//! | `uuid` | `uuid::Uuid` as `uuid` | ❌ |
//!
//! ## Container Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[jsonschema(rename = "Name")]` | Definition name of the type |
//! | `#[jsonschema(rename_all = "camelCase")]` | Case convention for fields without a json name |
//! | `#[jsonschema(uri)]` | Newtype encoded as a `uri` string |
//! | `#[jsonschema(date_time)]` | Newtype encoded as a `date-time` string |
//! | `#[jsonschema(ipv4)]` | Newtype encoded as an `ipv4` string |
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[jsonschema(json = "name,omitempty")]` | External name; `-` excludes the field |
//! | `#[jsonschema(yaml = "name")]` | Fallback external name |
//! | `#[jsonschema(constraints = "...")]` | Constraint directives |
//! | `#[jsonschema(description = "...")]` | Description, overrides the directive |
//! | `#[jsonschema(enum_json = "[...]")]` | Enum values as a JSON array |
//! | `#[jsonschema(embed)]` | Flatten the field's own fields into the parent |
//!
//! ## Constraint Directives
//!
//! Comma-separated `key` or `key=value` tokens:
//!
//! | Directive | Applies to |
//! |-----------|------------|
//! | `required`, `omitempty` | any field |
//! | `minLength=N`, `maxLength=N`, `pattern=RE` | strings |
//! | `minimum=N`, `maximum=N`, `exclusiveMinimum`, `exclusiveMaximum` | numbers |
//! | `minItems=N`, `maxItems=N`, `uniqueItems` | arrays |
//! | `enum=V` (repeatable), `format=F` | scalars |
//! | `title=T`, `description=D`, `example=V` (repeatable), `default=V` | any field |
//! | `-` as the first token | excludes the field |
//!
//! Malformed values are dropped; parsing never fails.
//!
//! ## Type Mappings
//!
//! | Rust Type | Schema |
//! |-----------|--------|
//! | `String`, `&str`, `char` | `{"type": "string"}` |
//! | `bool` | `{"type": "boolean"}` |
//! | integers | `{"type": "integer"}` |
//! | `f32`, `f64` | `{"type": "number"}` |
//! | `Vec<T>`, sets, slices, arrays | `{"type": "array", "items": T}` |
//! | `Vec<u8>` | base64 `string` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | `{"type": "object", "additionalProperties": V}` |
//! | `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>` | `T` |
//! | `SystemTime` | `date-time` string |
//! | `IpAddr`, `Ipv4Addr` / `Ipv6Addr` | `ipv4` / `ipv6` string |
//! | `serde_json::Value` | `{}` |
//! | `()` | `{"type": "null"}` |
//! | structs | `{"$ref": "#/definitions/Name"}` |
//! | fieldless enums | the underlying scalar |
//!
//! Channels and function pointers have no encoding; reflecting one at the root
//! is an error, and a field of such a type is dropped.

extern crate self as jsonschema_reflect;

pub mod error;
pub mod field;
pub mod primitive;
pub mod reflector;
pub mod registry;
pub mod schema;
pub mod tags;
pub mod traits;
pub mod types;

mod walker;

pub use error::{ReflectError, TagError};
pub use reflector::{reflect, ReflectOptions, Reflector, TypeMapper};
pub use schema::{Schema, SchemaNode};
pub use traits::Reflect;
pub use types::{FieldInfo, Primitive, TypeInfo, TypeKind, TypeRef};

// Re-export derive macro when available
#[cfg(feature = "derive")]
pub use jsonschema_reflect_macros::JsonSchema;

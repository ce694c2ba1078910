//! # jsonschema-reflect-macros
//!
//! Derive macro for [`jsonschema-reflect`](https://docs.rs/jsonschema-reflect).
//!
//! `#[derive(JsonSchema)]` implements `jsonschema_reflect::Reflect` for a
//! struct or fieldless enum. The macro only records what the source says:
//! field names, types, embedding and the raw annotation strings. Everything
//! else (external names, requiredness, keyword parsing) happens when the
//! type is reflected, so the derive and a hand-written impl behave the same.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jsonschema_reflect::JsonSchema;
//!
//! #[derive(JsonSchema)]
//! pub struct User {
//!     #[jsonschema(json = "name,omitempty", constraints = "minLength=1,maxLength=20")]
//!     pub name: String,
//!
//!     /// Friends of this user.
//!     #[jsonschema(description = "list of IDs, omitted when empty")]
//!     pub friends: Vec<u64>,
//!
//!     #[jsonschema(embed)]
//!     pub audit: Audit,
//!
//!     // Not `pub`: never part of the schema.
//!     cache: Vec<u8>,
//! }
//! ```
//!
//! ## Attributes
//!
//! ### Container Attributes (on struct/enum)
//!
//! - `#[jsonschema(rename = "Name")]` - Definition name (defaults to the ident)
//! - `#[jsonschema(rename_all = "camelCase")]` - Case convention for fields without a json name
//! - `#[jsonschema(uri)]`, `#[jsonschema(date_time)]`, `#[jsonschema(ipv4)]` - Newtype is a string format
//!
//! ### Field Attributes
//!
//! - `#[jsonschema(json = "name,omitempty")]` - Primary name annotation (`"-"` excludes the field)
//! - `#[jsonschema(yaml = "name")]` - Secondary name annotation
//! - `#[jsonschema(constraints = "minimum=1,required")]` - Constraint directives
//! - `#[jsonschema(description = "...")]` - Property description
//! - `#[jsonschema(enum_json = "[1, \"a\"]")]` - Extra enum values as a JSON array
//! - `#[jsonschema(embed)]` - Promote the fields of a nested struct
//!
//! With the `serde-compat` feature, `#[serde(rename, rename_all, skip,
//! skip_serializing_if, default, flatten)]` are honored as well.

use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

mod codegen;
mod error;
mod ir;
mod parser;

use codegen::ImplBlockGenerator;
use error::{DeriveError, DeriveErrorKind};
use parser::enum_parser::EnumParser;
use parser::struct_parser::StructParser;

/// Derive `jsonschema_reflect::Reflect`.
///
/// # Example
///
/// ```rust,ignore
/// use jsonschema_reflect::JsonSchema;
///
/// #[derive(JsonSchema)]
/// pub struct Point {
///     pub x: f64,
///     pub y: f64,
/// }
/// ```
#[proc_macro_derive(JsonSchema, attributes(jsonschema, serde))]
pub fn derive_json_schema(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_json_schema_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_syn_error().into_compile_error().into(),
    }
}

/// Route to the parser for the input's data type and generate the impl block.
fn derive_json_schema_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, DeriveError> {
    let ir = match &input.data {
        Data::Struct(_) => StructParser::parse(input)?,
        Data::Enum(_) => EnumParser::parse(input)?,
        Data::Union(_) => {
            return Err(DeriveError::new(DeriveErrorKind::Union, input.ident.span()));
        }
    };

    Ok(ImplBlockGenerator::new().generate(&ir))
}

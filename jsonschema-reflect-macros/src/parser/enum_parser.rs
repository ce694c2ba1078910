//! Enum parsing logic.
//!
//! Only fieldless enums have a schema: they are enumerated scalars encoded as
//! their underlying primitive. That is a string (the variant name, as serde
//! writes it) unless the enum has an integer `#[repr]`.

use syn::{Attribute, Data, DeriveInput, Fields};

use crate::error::{DeriveError, DeriveErrorKind};
use crate::ir::{ReflectIR, Shape};
use crate::parser::struct_parser::{definition_name, extract_doc_comments, parse_container_attrs};

/// Parses Rust enum definitions into ReflectIR.
pub struct EnumParser;

impl EnumParser {
    /// Parse a DeriveInput into a ReflectIR.
    pub fn parse(input: &DeriveInput) -> Result<ReflectIR, DeriveError> {
        let container = parse_container_attrs(input)?;

        let data_enum = match &input.data {
            Data::Enum(e) => e,
            Data::Struct(_) => return Err(unexpected_shape("struct", input)),
            Data::Union(_) => return Err(unexpected_shape("union", input)),
        };

        if let Some(format) = container
            .well_known()
            .map_err(|kind| DeriveError::new(kind, input.ident.span()))?
        {
            return Err(DeriveError::new(
                DeriveErrorKind::FormatNotNewtype(format.attr_name()),
                input.ident.span(),
            ));
        }

        for variant in &data_enum.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(DeriveError::new(
                    DeriveErrorKind::DataVariant(variant.ident.to_string()),
                    variant.ident.span(),
                )
                .with_suggestion("implement Reflect by hand for enums with data"));
            }
        }

        Ok(ReflectIR {
            ident: container.ident.clone(),
            name: definition_name(&container, input),
            generics: container.generics.clone(),
            doc: extract_doc_comments(&input.attrs),
            shape: Shape::Enumerated(repr_primitive(&input.attrs).unwrap_or("String")),
        })
    }
}

fn unexpected_shape(found: &'static str, input: &DeriveInput) -> DeriveError {
    DeriveError::new(
        DeriveErrorKind::UnexpectedShape {
            expected: "enum",
            found,
        },
        input.ident.span(),
    )
}

/// The `Primitive` variant named by an integer `#[repr(..)]`, if any.
fn repr_primitive(attrs: &[Attribute]) -> Option<&'static str> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("repr")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(ident) = meta.path.get_ident() {
                found = found.or_else(|| integer_primitive(&ident.to_string()));
            }
            Ok(())
        });
    }
    found
}

fn integer_primitive(repr: &str) -> Option<&'static str> {
    let primitive = match repr {
        "i8" => "I8",
        "i16" => "I16",
        "i32" => "I32",
        "i64" => "I64",
        "i128" => "I128",
        "isize" => "Isize",
        "u8" => "U8",
        "u16" => "U16",
        "u32" => "U32",
        "u64" => "U64",
        "u128" => "U128",
        "usize" => "Usize",
        _ => return None,
    };
    Some(primitive)
}

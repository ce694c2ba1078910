//! Struct parsing logic.
//!
//! This module handles parsing Rust struct definitions into IR.
//! It supports:
//! - Named structs (records)
//! - Single-field tuple structs (newtypes, optionally well-known formats)
//! - Unit structs (records without fields)

use darling::FromDeriveInput;
use syn::{Attribute, Data, DeriveInput, Fields, Lit, Meta};

use crate::error::{DeriveError, DeriveErrorKind};
use crate::ir::{ReflectIR, Shape};
use crate::parser::attributes::ContainerAttrs;
use crate::parser::field_parser::{FieldContext, FieldParser};

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::SerdeContainerAttrs;

/// Parses Rust struct definitions into ReflectIR.
pub struct StructParser;

impl StructParser {
    /// Parse a DeriveInput into a ReflectIR.
    pub fn parse(input: &DeriveInput) -> Result<ReflectIR, DeriveError> {
        let container = parse_container_attrs(input)?;
        let span = input.ident.span();

        let data_struct = match &input.data {
            Data::Struct(s) => s,
            Data::Enum(_) => return Err(unexpected_shape("struct", "enum", input)),
            Data::Union(_) => return Err(unexpected_shape("struct", "union", input)),
        };

        #[cfg(feature = "serde-compat")]
        let serde_container = SerdeContainerAttrs::from_attrs(&input.attrs);

        #[cfg(feature = "serde-compat")]
        let context = FieldContext {
            rename_all: container.rename_all.or(serde_container.rename_all),
            default: serde_container.default,
        };

        #[cfg(not(feature = "serde-compat"))]
        let context = FieldContext {
            rename_all: container.rename_all,
            default: false,
        };

        let well_known = container
            .well_known()
            .map_err(|kind| DeriveError::new(kind, span))?;

        let shape = match (&data_struct.fields, well_known) {
            (Fields::Unnamed(fields), format) if fields.unnamed.len() == 1 => match format {
                Some(format) => Shape::WellKnown(format),
                None => Shape::Newtype(fields.unnamed[0].ty.clone()),
            },
            (Fields::Unnamed(fields), _) => {
                return Err(DeriveError::new(
                    DeriveErrorKind::TupleStruct(fields.unnamed.len()),
                    span,
                )
                .with_suggestion("use named fields, or wrap the values in a single-field newtype"));
            }
            (_, Some(format)) => {
                return Err(DeriveError::new(
                    DeriveErrorKind::FormatNotNewtype(format.attr_name()),
                    span,
                ));
            }
            (Fields::Named(fields), None) => {
                let mut field_irs = Vec::with_capacity(fields.named.len());
                for (index, field) in fields.named.iter().enumerate() {
                    if let Some(field_ir) = FieldParser::parse_named(field, index, context)? {
                        field_irs.push(field_ir);
                    }
                }
                Shape::Record(field_irs)
            }
            (Fields::Unit, None) => Shape::Record(Vec::new()),
        };

        Ok(ReflectIR {
            ident: container.ident.clone(),
            name: definition_name(&container, input),
            generics: container.generics.clone(),
            doc: extract_doc_comments(&input.attrs),
            shape,
        })
    }
}

/// Parse `#[jsonschema(...)]` on the type.
pub fn parse_container_attrs(input: &DeriveInput) -> Result<ContainerAttrs, DeriveError> {
    ContainerAttrs::from_derive_input(input).map_err(|e| {
        DeriveError::new(DeriveErrorKind::Attributes(e.to_string()), input.ident.span())
    })
}

/// Definition name: `#[jsonschema(rename)]`, then `#[serde(rename)]`, then
/// the Rust ident.
pub fn definition_name(container: &ContainerAttrs, input: &DeriveInput) -> String {
    #[cfg(feature = "serde-compat")]
    let serde_rename = SerdeContainerAttrs::from_attrs(&input.attrs).rename;

    #[cfg(not(feature = "serde-compat"))]
    let serde_rename: Option<String> = {
        let _ = input;
        None
    };

    container
        .rename
        .clone()
        .or(serde_rename)
        .unwrap_or_else(|| container.ident.to_string())
}

fn unexpected_shape(expected: &'static str, found: &'static str, input: &DeriveInput) -> DeriveError {
    DeriveError::new(
        DeriveErrorKind::UnexpectedShape { expected, found },
        input.ident.span(),
    )
}

/// Extract doc comments from attributes.
///
/// Doc comments in Rust are represented as `#[doc = "..."]` attributes.
/// This function extracts and concatenates them into a single description string.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }

            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value());
                    }
                }
            }
            None
        })
        .collect();

    let description = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,12}".prop_filter("Must not be a keyword", |s| {
            !matches!(
                s.as_str(),
                "as" | "break" | "const" | "continue" | "crate" | "else" | "enum" | "extern"
                    | "false" | "fn" | "for" | "if" | "impl" | "in" | "let" | "loop" | "match"
                    | "mod" | "move" | "mut" | "pub" | "ref" | "return" | "self" | "static"
                    | "struct" | "super" | "trait" | "true" | "type" | "unsafe" | "use"
                    | "where" | "while" | "async" | "await" | "dyn" | "abstract" | "become"
                    | "box" | "do" | "final" | "macro" | "override" | "priv" | "typeof"
                    | "unsized" | "virtual" | "yield" | "try" | "gen"
            ) && s != "_"
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_field_order_preservation(
            names in proptest::collection::hash_set(arb_identifier(), 1..6)
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let fields: Vec<proc_macro2::TokenStream> = names
                .iter()
                .map(|name| {
                    let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
                    quote::quote! { pub #ident: i32 }
                })
                .collect();
            let input: DeriveInput = syn::parse_quote! {
                struct Generated { #(#fields),* }
            };

            let ir = StructParser::parse(&input).unwrap();
            let Shape::Record(parsed) = &ir.shape else {
                panic!("Expected record shape");
            };
            let parsed: Vec<&str> = parsed.iter().map(|f| f.ident.as_str()).collect();
            prop_assert_eq!(parsed, names.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}

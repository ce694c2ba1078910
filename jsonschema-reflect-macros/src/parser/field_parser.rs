//! Field parsing logic.
//!
//! Turns one named struct field into a [`FieldIR`], merging
//! `#[jsonschema(...)]` with serde attributes. Fields that can never appear
//! in a schema (non-`pub` unless embedded, `json = "-"`, serde-skipped) are
//! dropped here so their types need no `Reflect` implementation.

use darling::FromField;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Field, Visibility};

use crate::error::{DeriveError, DeriveErrorKind};
use crate::ir::FieldIR;
use crate::parser::attributes::{FieldAttrs, RenameRule};
use crate::parser::struct_parser::extract_doc_comments;

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::SerdeFieldAttrs;

/// Container-wide settings that affect every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldContext {
    pub rename_all: Option<RenameRule>,
    /// Container-level `#[serde(default)]`.
    pub default: bool,
}

/// Parses struct fields into FieldIR.
pub struct FieldParser;

impl FieldParser {
    /// Parse a single named field. Returns `None` for fields left out of the
    /// schema.
    pub fn parse_named(
        field: &Field,
        index: usize,
        context: FieldContext,
    ) -> Result<Option<FieldIR>, DeriveError> {
        let attrs = FieldAttrs::from_field(field).map_err(|e| {
            DeriveError::new(DeriveErrorKind::Attributes(e.to_string()), field.span())
        })?;

        #[cfg(feature = "serde-compat")]
        let serde_attrs = SerdeFieldAttrs::from_attrs(&field.attrs);

        #[cfg(feature = "serde-compat")]
        let serde_skip = serde_attrs.should_skip();

        #[cfg(not(feature = "serde-compat"))]
        let serde_skip = false;

        #[cfg(feature = "serde-compat")]
        let embedded = attrs.embed || serde_attrs.flatten;

        #[cfg(not(feature = "serde-compat"))]
        let embedded = attrs.embed;

        // Private embeds stay so their public fields can be promoted.
        let exported = matches!(attrs.vis, Visibility::Public(_));
        if (!exported && !embedded) || attrs.is_excluded() || serde_skip {
            return Ok(None);
        }

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| {
                DeriveError::new(DeriveErrorKind::MissingFieldIdent(index), field.span())
            })?
            .unraw()
            .to_string();

        #[cfg(feature = "serde-compat")]
        let explicit_name = serde_attrs.rename.clone();

        #[cfg(not(feature = "serde-compat"))]
        let explicit_name: Option<String> = None;

        let convention = context.rename_all.map(|rule| rule.apply(&ident));
        let json = external_name(attrs.json.clone(), attrs.yaml.is_some(), explicit_name, convention);

        #[cfg(feature = "serde-compat")]
        let omit_empty = context.default || serde_attrs.omit_empty();

        #[cfg(not(feature = "serde-compat"))]
        let omit_empty = false;

        let mut field_ir = FieldIR::new(ident, attrs.ty.clone());
        field_ir.exported = exported;
        field_ir.embedded = embedded;
        field_ir.json = json;
        field_ir.yaml = attrs.yaml;
        field_ir.constraints = attrs.constraints;
        field_ir.description = attrs.description;
        field_ir.enum_json = attrs.enum_json;
        field_ir.doc = extract_doc_comments(&field.attrs);
        field_ir.omit_empty = omit_empty;

        Ok(Some(field_ir))
    }
}

/// Resolve the json annotation.
///
/// An explicit tag is kept; if it has options but no name (`,omitempty`),
/// the serde rename or case-converted ident is put in front. Without a tag,
/// the serde rename acts as the name, and the case convention applies unless
/// a yaml name is given.
fn external_name(
    tag: Option<String>,
    has_yaml: bool,
    explicit: Option<String>,
    convention: Option<String>,
) -> Option<String> {
    match tag {
        Some(tag) if tag.is_empty() || tag.starts_with(',') => match explicit.or(convention) {
            Some(name) => Some(format!("{}{}", name, tag)),
            None => Some(tag),
        },
        Some(tag) => Some(tag),
        None if has_yaml => explicit,
        None => explicit.or(convention),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(field: Field) -> Option<FieldIR> {
        FieldParser::parse_named(&field, 0, FieldContext::default()).unwrap()
    }

    #[test]
    fn test_plain_field() {
        let field = parse(parse_quote! { pub id: u64 }).unwrap();
        assert_eq!(field.ident, "id");
        assert_eq!(field.json, None);
        assert!(!field.embedded);
        assert!(!field.omit_empty);
    }

    #[test]
    fn test_private_field_is_dropped() {
        assert!(parse(parse_quote! { secret: String }).is_none());
        assert!(parse(parse_quote! { pub(crate) secret: String }).is_none());
    }

    #[test]
    fn test_private_embed_is_kept() {
        let field = parse(parse_quote! {
            #[jsonschema(embed)]
            base: String
        })
        .unwrap();
        assert!(field.embedded);
        assert!(!field.exported);

        assert!(parse(parse_quote! { pub id: u64 }).unwrap().exported);
    }

    #[test]
    fn test_excluded_field_is_dropped() {
        assert!(parse(parse_quote! {
            #[jsonschema(json = "-")]
            pub cache: String
        })
        .is_none());
    }

    #[test]
    fn test_channels_pass_through() {
        let field = parse(parse_quote! {
            /// The user's age.
            #[jsonschema(
                yaml = "years",
                constraints = "minimum=0,maximum=150",
                description = "Age in years",
                enum_json = "[1, 2]"
            )]
            pub age: u8
        })
        .unwrap();
        assert_eq!(field.json, None);
        assert_eq!(field.yaml.as_deref(), Some("years"));
        assert_eq!(field.constraints.as_deref(), Some("minimum=0,maximum=150"));
        assert_eq!(field.description.as_deref(), Some("Age in years"));
        assert_eq!(field.enum_json.as_deref(), Some("[1, 2]"));
        assert_eq!(field.doc.as_deref(), Some("The user's age."));
    }

    #[test]
    fn test_raw_identifier() {
        let field = parse(parse_quote! { pub r#type: String }).unwrap();
        assert_eq!(field.ident, "type");
    }

    #[test]
    fn test_case_convention() {
        let context = FieldContext {
            rename_all: Some(RenameRule::CamelCase),
            default: false,
        };
        let field: Field = parse_quote! { pub user_name: String };
        let parsed = FieldParser::parse_named(&field, 0, context).unwrap().unwrap();
        assert_eq!(parsed.json.as_deref(), Some("userName"));

        let field: Field = parse_quote! {
            #[jsonschema(json = ",omitempty")]
            pub user_name: String
        };
        let parsed = FieldParser::parse_named(&field, 0, context).unwrap().unwrap();
        assert_eq!(parsed.json.as_deref(), Some("userName,omitempty"));
    }

    #[test]
    fn test_external_name_precedence() {
        assert_eq!(
            external_name(Some("a".into()), false, Some("b".into()), Some("c".into())),
            Some("a".into())
        );
        assert_eq!(
            external_name(None, true, None, Some("c".into())),
            None
        );
        assert_eq!(
            external_name(None, true, Some("b".into()), Some("c".into())),
            Some("b".into())
        );
        assert_eq!(
            external_name(Some(",omitempty".into()), false, None, None),
            Some(",omitempty".into())
        );
    }

    #[cfg(feature = "serde-compat")]
    #[test]
    fn test_serde_attributes() {
        let field = parse(parse_quote! {
            #[serde(rename = "userId", default)]
            pub user_id: u64
        })
        .unwrap();
        assert_eq!(field.json.as_deref(), Some("userId"));
        assert!(field.omit_empty);

        let field = parse(parse_quote! {
            #[serde(flatten)]
            pub base: String
        })
        .unwrap();
        assert!(field.embedded);

        assert!(parse(parse_quote! {
            #[serde(skip)]
            pub handle: String
        })
        .is_none());
    }

    #[test]
    fn test_unknown_attribute_is_an_error() {
        let field: Field = parse_quote! {
            #[jsonschema(rename = "x")]
            pub value: i32
        };
        let err = FieldParser::parse_named(&field, 3, FieldContext::default()).unwrap_err();
        assert!(matches!(err.kind, DeriveErrorKind::Attributes(_)));
    }
}

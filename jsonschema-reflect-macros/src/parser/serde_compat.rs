//! Serde attribute compatibility.
//!
//! Parses the `#[serde(...)]` attributes that change a type's JSON shape when
//! the `serde-compat` feature is enabled. `#[jsonschema(...)]` attributes take
//! precedence when both are present.

use syn::Attribute;

use super::attributes::RenameRule;

/// Serde container attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeContainerAttrs {
    /// Rename the type
    pub rename: Option<String>,

    /// Rename all fields using a case convention
    pub rename_all: Option<RenameRule>,

    /// Missing fields take their default value
    pub default: bool,
}

impl SerdeContainerAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("serde") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = rename_value(&meta)?;
                } else if meta.path.is_ident("rename_all") {
                    if let Some(value) = rename_value(&meta)? {
                        result.rename_all = RenameRule::from_name(&value);
                    }
                } else if meta.path.is_ident("default") {
                    result.default = true;
                    skip_value(&meta)?;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }
}

/// Serde field attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeFieldAttrs {
    /// Rename this field
    pub rename: Option<String>,

    /// Skip this field
    pub skip: bool,

    /// Skip serializing this field
    pub skip_serializing: bool,

    /// Skip deserializing this field
    pub skip_deserializing: bool,

    /// Field has a default value
    pub default: bool,

    /// Field is left out when a predicate holds
    pub skip_serializing_if: bool,

    /// Flatten nested object
    pub flatten: bool,
}

impl SerdeFieldAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("serde") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = rename_value(&meta)?;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("skip_serializing") {
                    result.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    result.skip_deserializing = true;
                } else if meta.path.is_ident("default") {
                    result.default = true;
                    skip_value(&meta)?;
                } else if meta.path.is_ident("skip_serializing_if") {
                    result.skip_serializing_if = true;
                    skip_value(&meta)?;
                } else if meta.path.is_ident("flatten") {
                    result.flatten = true;
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }

    /// Check if this field should be skipped entirely.
    /// The schema describes the data contract in both directions, so skipping
    /// either one drops the field.
    pub fn should_skip(&self) -> bool {
        self.skip || self.skip_serializing || self.skip_deserializing
    }

    /// Whether the field may be absent from a document.
    pub fn omit_empty(&self) -> bool {
        self.default || self.skip_serializing_if
    }
}

/// Read `rename = "value"`, or the `serialize` half of
/// `rename(serialize = "a", deserialize = "b")`.
fn rename_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let value: syn::LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }

    let mut serialize = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            let value: syn::LitStr = inner.value()?.parse()?;
            serialize = Some(value.value());
        } else {
            skip_value(&inner)?;
        }
        Ok(())
    })?;
    Ok(serialize)
}

/// Consume an optional `= value` so unrelated serde keys do not abort parsing.
fn skip_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _ = meta.parse_nested_meta(|inner| skip_value(&inner));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_serde_field_attrs_should_skip() {
        let mut attrs = SerdeFieldAttrs::default();
        assert!(!attrs.should_skip());

        attrs.skip_serializing = true;
        assert!(attrs.should_skip());

        attrs.skip_serializing = false;
        attrs.skip_deserializing = true;
        assert!(attrs.should_skip());
    }

    #[test]
    fn test_field_attrs_across_unrelated_keys() {
        let field: syn::Field = parse_quote! {
            #[serde(with = "my_module", rename = "userId", skip_serializing_if = "Option::is_none")]
            pub user_id: Option<u64>
        };
        let attrs = SerdeFieldAttrs::from_attrs(&field.attrs);
        assert_eq!(attrs.rename.as_deref(), Some("userId"));
        assert!(attrs.skip_serializing_if);
        assert!(attrs.omit_empty());
        assert!(!attrs.should_skip());
    }

    #[test]
    fn test_default_with_path() {
        let field: syn::Field = parse_quote! {
            #[serde(default = "default_port")]
            pub port: u16
        };
        let attrs = SerdeFieldAttrs::from_attrs(&field.attrs);
        assert!(attrs.default);
        assert!(attrs.omit_empty());
    }

    #[test]
    fn test_rename_serialize_half() {
        let field: syn::Field = parse_quote! {
            #[serde(rename(serialize = "out", deserialize = "in"))]
            pub value: i32
        };
        let attrs = SerdeFieldAttrs::from_attrs(&field.attrs);
        assert_eq!(attrs.rename.as_deref(), Some("out"));
    }

    #[test]
    fn test_container_attrs() {
        let input: syn::DeriveInput = parse_quote! {
            #[serde(rename = "Account", rename_all = "kebab-case", default, deny_unknown_fields)]
            struct User {
                id: i64,
            }
        };
        let attrs = SerdeContainerAttrs::from_attrs(&input.attrs);
        assert_eq!(attrs.rename.as_deref(), Some("Account"));
        assert_eq!(attrs.rename_all, Some(RenameRule::KebabCase));
        assert!(attrs.default);
    }
}

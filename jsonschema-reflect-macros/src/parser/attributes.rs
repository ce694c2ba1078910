//! `#[jsonschema(...)]` attribute parsing with darling.

use darling::{FromDeriveInput, FromField, FromMeta};
use syn::{Generics, Ident, Type, Visibility};

use crate::error::DeriveErrorKind;
use crate::ir::WellKnown;

/// Container-level attributes for structs and enums.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(jsonschema), supports(struct_any, enum_any))]
pub struct ContainerAttrs {
    pub ident: Ident,

    pub generics: Generics,

    /// Definition name (defaults to the Rust ident).
    #[darling(default)]
    pub rename: Option<String>,

    /// Case convention for field names without an explicit name.
    #[darling(default)]
    pub rename_all: Option<RenameRule>,

    /// Newtype encoded as a `uri` string.
    #[darling(default)]
    pub uri: bool,

    /// Newtype encoded as a `date-time` string.
    #[darling(default)]
    pub date_time: bool,

    /// Newtype encoded as an `ipv4` string.
    #[darling(default)]
    pub ipv4: bool,
}

impl ContainerAttrs {
    /// The well-known format requested, if any.
    pub fn well_known(&self) -> Result<Option<WellKnown>, DeriveErrorKind> {
        let requested: Vec<WellKnown> = [
            (self.uri, WellKnown::Uri),
            (self.date_time, WellKnown::DateTime),
            (self.ipv4, WellKnown::Ipv4),
        ]
        .into_iter()
        .filter_map(|(set, format)| set.then_some(format))
        .collect();

        match requested.as_slice() {
            [] => Ok(None),
            [format] => Ok(Some(*format)),
            _ => Err(DeriveErrorKind::ConflictingFormats),
        }
    }
}

/// Field-level attributes. Each string is one raw annotation channel and is
/// interpreted at reflection time.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(jsonschema))]
pub struct FieldAttrs {
    pub ty: Type,

    pub vis: Visibility,

    /// External name annotation: `name[,omitempty]`, or `-` to exclude.
    #[darling(default)]
    pub json: Option<String>,

    /// Fallback external name annotation.
    #[darling(default)]
    pub yaml: Option<String>,

    /// Constraint directives, e.g. `required,minLength=1`.
    #[darling(default)]
    pub constraints: Option<String>,

    #[darling(default)]
    pub description: Option<String>,

    /// Enum values as a JSON array literal.
    #[darling(default)]
    pub enum_json: Option<String>,

    /// Flatten this field's own fields into the parent.
    #[darling(default)]
    pub embed: bool,
}

impl FieldAttrs {
    /// Whether the external name annotation alone excludes the field.
    pub fn is_excluded(&self) -> bool {
        self.json.as_deref().or(self.yaml.as_deref()) == Some("-")
    }
}

/// Rename rule for field name transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromMeta)]
pub enum RenameRule {
    #[darling(rename = "lowercase")]
    Lowercase,

    #[darling(rename = "UPPERCASE")]
    Uppercase,

    #[darling(rename = "camelCase")]
    CamelCase,

    #[darling(rename = "snake_case")]
    SnakeCase,

    #[darling(rename = "PascalCase")]
    PascalCase,

    #[darling(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,

    #[darling(rename = "kebab-case")]
    KebabCase,
}

impl RenameRule {
    /// Parse a serde-style rule name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lowercase" => Some(RenameRule::Lowercase),
            "UPPERCASE" => Some(RenameRule::Uppercase),
            "camelCase" => Some(RenameRule::CamelCase),
            "snake_case" => Some(RenameRule::SnakeCase),
            "PascalCase" => Some(RenameRule::PascalCase),
            "SCREAMING_SNAKE_CASE" => Some(RenameRule::ScreamingSnakeCase),
            "kebab-case" => Some(RenameRule::KebabCase),
            _ => None,
        }
    }

    /// Apply the rename rule to a field ident.
    pub fn apply(&self, name: &str) -> String {
        use convert_case::{Case, Casing};

        match self {
            RenameRule::Lowercase => name.to_lowercase(),
            RenameRule::Uppercase => name.to_uppercase(),
            RenameRule::CamelCase => name.to_case(Case::Camel),
            RenameRule::SnakeCase => name.to_case(Case::Snake),
            RenameRule::PascalCase => name.to_case(Case::Pascal),
            RenameRule::ScreamingSnakeCase => name.to_case(Case::UpperSnake),
            RenameRule::KebabCase => name.to_case(Case::Kebab),
        }
    }
}

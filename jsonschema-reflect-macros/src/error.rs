//! Error types for the macro crate.

use proc_macro2::Span;
use std::fmt;

/// What went wrong while deriving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeriveErrorKind {
    #[error("Invalid jsonschema attributes: {0}")]
    Attributes(String),

    #[error("JsonSchema cannot be derived for unions")]
    Union,

    #[error("Expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field at index {0} has no identifier")]
    MissingFieldIdent(usize),

    #[error("JsonSchema cannot be derived for enum variant `{0}` because it carries data")]
    DataVariant(String),

    #[error("JsonSchema cannot be derived for tuple structs with {0} fields")]
    TupleStruct(usize),

    #[error("At most one of `uri`, `date_time` and `ipv4` may be set")]
    ConflictingFormats,

    #[error("`{0}` only applies to single-field tuple structs")]
    FormatNotNewtype(&'static str),
}

/// A derive error with its source location.
#[derive(Debug, Clone)]
pub struct DeriveError {
    /// What went wrong.
    pub kind: DeriveErrorKind,
    /// Source span for error reporting.
    pub span: Span,
    /// How to fix it, if there is an obvious way.
    pub suggestion: Option<String>,
}

impl DeriveError {
    /// Create a new error at `span`.
    pub fn new(kind: DeriveErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            suggestion: None,
        }
    }

    /// Add a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Convert to a syn::Error for proc-macro error reporting.
    pub fn into_syn_error(self) -> syn::Error {
        let mut error = syn::Error::new(self.span, self.kind.to_string());
        if let Some(suggestion) = self.suggestion {
            error.combine(syn::Error::new(
                self.span,
                format!("suggestion: {}", suggestion),
            ));
        }
        error
    }
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for DeriveError {}

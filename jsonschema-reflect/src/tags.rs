//! Parsing of field annotation strings.
//!
//! Three annotation channels are understood:
//!
//! - the external-name tag (`json`, falling back to `yaml`), e.g.
//!   `"friends,omitempty"`, parsed by [`NameTag::parse`]
//! - the constraint directive string, e.g.
//!   `"required,minLength=1,maxLength=20,enum=a,enum=b"`, parsed by
//!   [`Directives::parse`]
//! - the enum JSON channel, a JSON array literal parsed by [`parse_enum_json`]
//!
//! Parsing is lenient: a malformed value drops that single directive and
//! never the rest of the field. [`Directives::parse_strict`] reports the
//! first malformed value instead.

use serde_json::{Number, Value};

use crate::error::TagError;

/// The sentinel that excludes a field from the schema.
pub const EXCLUDE: &str = "-";

/// Parsed external-name annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTag {
    /// The external name; empty when the tag only carries options.
    pub name: String,
    /// The tag excludes the field entirely.
    pub excluded: bool,
    /// The `omitempty` option is present.
    pub omit_empty: bool,
}

impl NameTag {
    /// Parse a `name[,option...]` annotation.
    ///
    /// A tag that is exactly `-` excludes the field; `-,` names it `-`.
    pub fn parse(raw: &str) -> Self {
        if raw == EXCLUDE {
            return Self {
                excluded: true,
                ..Self::default()
            };
        }

        let mut parts = raw.split(',');
        let name = parts.next().unwrap_or_default().trim().to_string();
        let omit_empty = parts.any(|opt| opt.trim() == "omitempty");

        Self {
            name,
            excluded: false,
            omit_empty,
        }
    }
}

/// Structured constraint directives of one field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directives {
    /// The directive string starts with the exclusion sentinel.
    pub excluded: bool,
    pub required: bool,
    pub omit_empty: bool,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
    pub format: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Raw enum values, deduplicated in first-seen order.
    pub enum_values: Vec<String>,
    /// Raw example values, deduplicated in first-seen order.
    pub examples: Vec<String>,
    /// Raw default value.
    pub default: Option<String>,
}

impl Directives {
    /// Parse a comma-separated directive string, dropping malformed values.
    pub fn parse(raw: &str) -> Self {
        let mut directives = Self::default();
        for token in tokens(raw) {
            if token.key == EXCLUDE && token.index == 0 {
                directives.excluded = true;
                continue;
            }
            if let Err(err) = directives.apply(&token) {
                tracing::debug!(directive = token.key, error = %err, "dropping malformed directive");
            }
        }
        directives
    }

    /// Parse a directive string, failing on the first malformed value.
    pub fn parse_strict(raw: &str) -> Result<Self, TagError> {
        let mut directives = Self::default();
        for token in tokens(raw) {
            if token.key == EXCLUDE && token.index == 0 {
                directives.excluded = true;
                continue;
            }
            directives.apply(&token)?;
        }
        Ok(directives)
    }

    fn apply(&mut self, token: &Token<'_>) -> Result<(), TagError> {
        let value = token.value;
        match token.key {
            "required" => self.required = parse_flag(token)?,
            "omitempty" => self.omit_empty = parse_flag(token)?,
            "exclusiveMinimum" => self.exclusive_minimum = parse_flag(token)?,
            "exclusiveMaximum" => self.exclusive_maximum = parse_flag(token)?,
            "uniqueItems" => self.unique_items = parse_flag(token)?,
            "minLength" => self.min_length = Some(parse_count(token)?),
            "maxLength" => self.max_length = Some(parse_count(token)?),
            "minItems" => self.min_items = Some(parse_count(token)?),
            "maxItems" => self.max_items = Some(parse_count(token)?),
            "minimum" => self.minimum = Some(parse_number(token)?),
            "maximum" => self.maximum = Some(parse_number(token)?),
            "pattern" => self.pattern = Some(required_value(token)?.to_string()),
            "format" => self.format = Some(required_value(token)?.to_string()),
            "title" => self.title = Some(required_value(token)?.to_string()),
            "description" => self.description = Some(required_value(token)?.to_string()),
            "default" => self.default = Some(required_value(token)?.to_string()),
            "enum" => push_unique(&mut self.enum_values, value),
            "example" => push_unique(&mut self.examples, value),
            _ => tracing::trace!(directive = token.key, "ignoring unknown directive"),
        }
        Ok(())
    }

    /// Whether any directive made the field omit-capable.
    pub fn is_optional(&self) -> bool {
        self.omit_empty
    }
}

/// Parse the enum JSON channel, deduplicating while keeping first-seen order.
///
/// Anything that is not a JSON array yields no values.
pub fn parse_enum_json(raw: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                if !values.contains(&item) {
                    values.push(item);
                }
            }
            values
        }
        Ok(other) => {
            tracing::debug!(value = %other, "enum annotation is not a JSON array");
            Vec::new()
        }
        Err(err) => {
            tracing::debug!(error = %err, "dropping malformed enum annotation");
            Vec::new()
        }
    }
}

/// Kind of node a typed directive value is converted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// Convert a raw directive value for a node of the given kind.
///
/// Returns `None` when the value cannot be represented.
pub fn typed_value(raw: &str, kind: ValueKind) -> Option<Value> {
    match kind {
        ValueKind::String => Some(Value::String(raw.to_string())),
        ValueKind::Integer => raw.trim().parse::<i64>().ok().map(Value::from),
        ValueKind::Number => parse_json_number(raw.trim()).map(Value::Number),
        ValueKind::Boolean => raw.trim().parse::<bool>().ok().map(Value::Bool),
    }
}

/// Convert a list of raw values, dropping unconvertible ones and keeping
/// first-seen order without duplicates.
pub fn typed_values(raw: &[String], kind: ValueKind) -> Vec<Value> {
    let mut values = Vec::with_capacity(raw.len());
    for item in raw {
        match typed_value(item, kind) {
            Some(value) if !values.contains(&value) => values.push(value),
            Some(_) => {}
            None => tracing::debug!(value = %item, ?kind, "dropping unconvertible value"),
        }
    }
    values
}

struct Token<'a> {
    index: usize,
    key: &'a str,
    value: Option<&'a str>,
}

fn tokens(raw: &str) -> impl Iterator<Item = Token<'_>> {
    raw.split(',')
        .enumerate()
        .filter(|(_, part)| !part.trim().is_empty())
        .map(|(index, part)| {
            let (key, value) = match part.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (part.trim(), None),
            };
            Token { index, key, value }
        })
}

fn push_unique(values: &mut Vec<String>, value: Option<&str>) {
    match value {
        Some(value) if !value.is_empty() => {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        _ => {}
    }
}

fn parse_flag(token: &Token<'_>) -> Result<bool, TagError> {
    match token.value {
        None | Some("true") => Ok(true),
        Some(other) => Err(TagError::InvalidFlag {
            key: token.key.to_string(),
            value: other.to_string(),
        }),
    }
}

fn parse_count(token: &Token<'_>) -> Result<u64, TagError> {
    let value = required_value(token)?;
    value.parse::<u64>().map_err(|_| TagError::InvalidNumber {
        key: token.key.to_string(),
        value: value.to_string(),
    })
}

fn parse_number(token: &Token<'_>) -> Result<Number, TagError> {
    let value = required_value(token)?;
    parse_json_number(value).ok_or_else(|| TagError::InvalidNumber {
        key: token.key.to_string(),
        value: value.to_string(),
    })
}

fn required_value<'a>(token: &Token<'a>) -> Result<&'a str, TagError> {
    match token.value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TagError::MissingValue(token.key.to_string())),
    }
}

fn parse_json_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Number::from(n));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

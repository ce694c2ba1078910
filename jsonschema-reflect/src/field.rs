//! Per-field descriptors and constraint application.
//!
//! A [`FieldDescriptor`] resolves a field's raw annotation channels into the
//! decisions the walker needs: whether the field is visible, its external
//! name, whether it is required, and the directives to apply to its node.

use serde_json::Value;

use crate::primitive::value_kind;
use crate::reflector::ReflectOptions;
use crate::schema::{Property, SchemaNode};
use crate::tags::{parse_enum_json, typed_value, typed_values, Directives, NameTag};
use crate::types::{FieldInfo, TypeKind, TypeRef};

/// Resolved view of one struct field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Effective external name.
    pub name: String,
    /// Whether the field is left out of the schema.
    pub skip: bool,
    /// Whether the field belongs in the required set.
    pub required: bool,
    /// Whether the field's own fields are flattened into the parent.
    pub embedded: bool,
    /// Parsed constraint directives.
    pub directives: Directives,
    /// Values from the enum JSON channel.
    pub enum_json: Vec<Value>,
    /// Description after channel precedence.
    pub description: Option<String>,
    /// Declared type.
    pub ty: TypeRef,
}

impl FieldDescriptor {
    /// Resolve a field under the given options.
    pub fn describe(field: &FieldInfo, options: &ReflectOptions) -> Self {
        let tags = &field.tags;
        let name_tag = tags
            .json
            .or(tags.yaml)
            .map(NameTag::parse)
            .unwrap_or_default();
        let directives = tags.constraints.map(Directives::parse).unwrap_or_default();

        // A private embedded record still promotes its own public fields.
        let embedded = field.embedded && name_tag.name.is_empty();
        let skip = (!field.exported && !embedded)
            || tags.skip
            || name_tag.excluded
            || directives.excluded;
        let name = if name_tag.name.is_empty() {
            field.ident.to_string()
        } else {
            name_tag.name.clone()
        };

        let optional = name_tag.omit_empty
            || directives.is_optional()
            || tags.omit_empty
            || matches!(field.ty.info().kind, TypeKind::Optional(_));
        let required = !skip
            && if options.required_from_jsonschema_tags {
                directives.required
            } else {
                !optional
            };

        let description = tags
            .description
            .map(str::to_string)
            .or_else(|| directives.description.clone())
            .or_else(|| {
                tags.doc
                    .filter(|_| options.doc_comments_as_descriptions)
                    .map(|doc| doc.trim().to_string())
            });
        let enum_json = tags.enum_json.map(parse_enum_json).unwrap_or_default();

        Self {
            name,
            skip,
            required,
            embedded,
            directives,
            enum_json,
            description,
            ty: field.ty,
        }
    }

    /// Build the property for this field around its walked node.
    pub fn into_property(self, node: SchemaNode) -> Property {
        let node = apply_constraints(node, &self.directives, &self.enum_json);
        let kind = value_kind(&node);

        let mut property = Property::new(self.name, node);
        property.title = self.directives.title.clone();
        property.description = self.description;
        property.default = self
            .directives
            .default
            .as_deref()
            .and_then(|raw| typed_value(raw, kind));
        for example in typed_values(&self.directives.examples, kind) {
            property.push_example(example);
        }
        property
    }
}

/// Apply node-level directives; keywords that do not fit the node are ignored.
pub fn apply_constraints(
    mut node: SchemaNode,
    directives: &Directives,
    enum_json: &[Value],
) -> SchemaNode {
    let kind = value_kind(&node);
    let enum_values = || {
        let mut values = typed_values(&directives.enum_values, kind);
        for value in enum_json {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        values
    };

    match &mut node {
        SchemaNode::String(string) => {
            if directives.min_length.is_some() {
                string.min_length = directives.min_length;
            }
            if directives.max_length.is_some() {
                string.max_length = directives.max_length;
            }
            if let Some(pattern) = &directives.pattern {
                string.pattern = Some(pattern.clone());
            }
            if let Some(format) = &directives.format {
                string.format = Some(format.clone());
            }
            extend_unique(&mut string.enum_values, enum_values());
        }
        SchemaNode::Integer(numeric) | SchemaNode::Number(numeric) => {
            if let Some(minimum) = &directives.minimum {
                numeric.minimum = Some(minimum.clone());
            }
            if let Some(maximum) = &directives.maximum {
                numeric.maximum = Some(maximum.clone());
            }
            numeric.exclusive_minimum |= directives.exclusive_minimum;
            numeric.exclusive_maximum |= directives.exclusive_maximum;
            if let Some(format) = &directives.format {
                numeric.format = Some(format.clone());
            }
            extend_unique(&mut numeric.enum_values, enum_values());
        }
        SchemaNode::Boolean(boolean) => {
            extend_unique(&mut boolean.enum_values, enum_values());
        }
        SchemaNode::Any(any) => {
            extend_unique(&mut any.enum_values, enum_values());
        }
        SchemaNode::Array(array) => {
            if directives.min_items.is_some() {
                array.min_items = directives.min_items;
            }
            if directives.max_items.is_some() {
                array.max_items = directives.max_items;
            }
            array.unique_items |= directives.unique_items;
        }
        SchemaNode::Object(_)
        | SchemaNode::Map(_)
        | SchemaNode::Reference(_)
        | SchemaNode::Null => {}
    }
    node
}

fn extend_unique(target: &mut Vec<Value>, values: Vec<Value>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn describe(field: FieldInfo) -> FieldDescriptor {
        FieldDescriptor::describe(&field, &ReflectOptions::default())
    }

    #[test]
    fn test_private_field_is_skipped_even_if_required() {
        let d = describe(FieldInfo::new::<String>("secret", false).with_constraints("required"));
        assert!(d.skip);
        assert!(!d.required);
    }

    #[test]
    fn test_private_embed_is_kept_unless_named() {
        let d = describe(FieldInfo::new::<String>("base", false).embedded());
        assert!(!d.skip);
        assert!(d.embedded);

        let d = describe(FieldInfo::new::<String>("base", false).embedded().with_json("base"));
        assert!(d.skip);
    }

    #[test]
    fn test_exclusion_sentinels() {
        assert!(describe(FieldInfo::new::<i32>("a", true).with_json("-")).skip);
        assert!(describe(FieldInfo::new::<i32>("b", true).with_constraints("-")).skip);
        assert!(describe(FieldInfo::new::<i32>("c", true).with_constraints("-,required")).skip);
        assert!(!describe(FieldInfo::new::<i32>("d", true).with_json("-,")).skip);
    }

    #[test]
    fn test_name_precedence() {
        let d = describe(FieldInfo::new::<i32>("base", true).with_yaml("from_yaml"));
        assert_eq!(d.name, "from_yaml");

        let d = describe(
            FieldInfo::new::<i32>("base", true)
                .with_json("from_json")
                .with_yaml("from_yaml"),
        );
        assert_eq!(d.name, "from_json");

        assert_eq!(describe(FieldInfo::new::<i32>("base", true)).name, "base");
    }

    #[test]
    fn test_default_requiredness() {
        assert!(describe(FieldInfo::new::<i32>("id", true)).required);
        assert!(!describe(FieldInfo::new::<i32>("id", true).with_json("id,omitempty")).required);
        assert!(!describe(FieldInfo::new::<i32>("id", true).with_constraints("omitempty")).required);
        assert!(!describe(FieldInfo::new::<Option<i32>>("id", true)).required);
    }

    #[test]
    fn test_requiredness_from_directives() {
        let options = ReflectOptions {
            required_from_jsonschema_tags: true,
            ..ReflectOptions::default()
        };
        let plain = FieldInfo::new::<i32>("id", true);
        let tagged = FieldInfo::new::<i32>("id", true).with_constraints("required");
        assert!(!FieldDescriptor::describe(&plain, &options).required);
        assert!(FieldDescriptor::describe(&tagged, &options).required);
    }

    #[test]
    fn test_description_channel_wins() {
        let d = describe(
            FieldInfo::new::<i32>("n", true)
                .with_constraints("description=from directives")
                .with_description("from channel"),
        );
        assert_eq!(d.description.as_deref(), Some("from channel"));
    }

    #[test]
    fn test_doc_comment_fallback_is_opt_in() {
        let field = FieldInfo::new::<i32>("n", true).with_doc(" Count of things");
        assert_eq!(describe(field.clone()).description, None);

        let options = ReflectOptions {
            doc_comments_as_descriptions: true,
            ..ReflectOptions::default()
        };
        assert_eq!(
            FieldDescriptor::describe(&field, &options).description.as_deref(),
            Some("Count of things")
        );
    }

    #[test]
    fn test_integer_constraints_and_typed_enum() {
        let d = describe(
            FieldInfo::new::<i32>("age", true)
                .with_constraints("minimum=18,maximum=120,exclusiveMaximum=true,enum=10,enum=x,enum=10"),
        );
        let property = d.into_property(SchemaNode::integer());
        assert_eq!(
            property.to_json(),
            json!({
                "type": "integer",
                "maximum": 120,
                "exclusiveMaximum": true,
                "minimum": 18,
                "enum": [10]
            })
        );
    }

    #[test]
    fn test_string_keywords_ignored_on_integer() {
        let node = apply_constraints(
            SchemaNode::integer(),
            &Directives::parse("minLength=3,pattern=.*"),
            &[],
        );
        assert_eq!(node, SchemaNode::integer());
    }

    #[test]
    fn test_enum_json_merges_after_directives() {
        let node = apply_constraints(
            SchemaNode::any(),
            &Directives::parse("enum=a"),
            &[json!("a"), json!(2), json!(null)],
        );
        assert_eq!(node.to_json(), json!({"enum": ["a", 2, null]}));
    }
}

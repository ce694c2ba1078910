//! The schema document model and its JSON encoding.
//!
//! [`SchemaNode`] is a tagged variant with exactly one active kind. Nodes are
//! encoded as JSON Schema draft-04 objects; key order is stable (properties
//! in declaration order, definitions in registration order).

use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// JSON Schema dialect written into every document.
pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Prefix of reference tokens.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Top-level schema document.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Inline root node.
    pub root: SchemaNode,

    /// Named definitions in first-registration order.
    pub definitions: Vec<Definition>,
}

/// One entry of the definitions table.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub node: SchemaNode,
}

impl Schema {
    /// Look up a definition by name.
    pub fn definition(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions
            .iter()
            .find(|d| d.name == name)
            .map(|d| &d.node)
    }

    /// Encode the document as a JSON value.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("$schema".into(), Value::String(DRAFT_04.into()));
        self.root.write_into(&mut map);
        if !self.definitions.is_empty() {
            let definitions = self
                .definitions
                .iter()
                .map(|d| (d.name.clone(), d.node.to_json()))
                .collect::<Map<_, _>>();
            map.insert("definitions".into(), Value::Object(definitions));
        }
        Value::Object(map)
    }

    /// Encode the document as indented JSON text.
    pub fn to_string_pretty(&self) -> Result<String, crate::ReflectError> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Record with a fixed property list.
    Object(ObjectNode),
    /// String-keyed map; values described by the inner node.
    Map(Box<SchemaNode>),
    Array(ArrayNode),
    String(StringNode),
    Integer(NumericNode),
    Number(NumericNode),
    Boolean(BooleanNode),
    /// Reference to a definition by name.
    Reference(String),
    Null,
    /// Accepts any value.
    Any(AnyNode),
}

impl SchemaNode {
    /// A plain string node.
    pub fn string() -> Self {
        SchemaNode::String(StringNode::default())
    }

    /// A string node with a format.
    pub fn formatted_string(format: impl Into<String>) -> Self {
        SchemaNode::String(StringNode {
            format: Some(format.into()),
            ..StringNode::default()
        })
    }

    /// A plain integer node.
    pub fn integer() -> Self {
        SchemaNode::Integer(NumericNode::default())
    }

    /// A plain number node.
    pub fn number() -> Self {
        SchemaNode::Number(NumericNode::default())
    }

    /// A plain boolean node.
    pub fn boolean() -> Self {
        SchemaNode::Boolean(BooleanNode::default())
    }

    /// An unconstrained node.
    pub fn any() -> Self {
        SchemaNode::Any(AnyNode::default())
    }

    /// An array of `items`.
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array(ArrayNode::new(items))
    }

    /// A reference to the definition `name`.
    pub fn reference(name: impl Into<String>) -> Self {
        SchemaNode::Reference(name.into())
    }

    /// The object node, if this is one.
    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            SchemaNode::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The JSON Schema `type` keyword for this node.
    pub fn type_keyword(&self) -> Option<&'static str> {
        match self {
            SchemaNode::Object(_) | SchemaNode::Map(_) => Some("object"),
            SchemaNode::Array(_) => Some("array"),
            SchemaNode::String(_) => Some("string"),
            SchemaNode::Integer(_) => Some("integer"),
            SchemaNode::Number(_) => Some("number"),
            SchemaNode::Boolean(_) => Some("boolean"),
            SchemaNode::Null => Some("null"),
            SchemaNode::Reference(_) | SchemaNode::Any(_) => None,
        }
    }

    /// Encode the node as a JSON value.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.write_into(&mut map);
        Value::Object(map)
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        if let SchemaNode::Reference(name) = self {
            map.insert(
                "$ref".into(),
                Value::String(format!("{}{}", DEFINITIONS_PREFIX, name)),
            );
            return;
        }
        if let Some(ty) = self.type_keyword() {
            map.insert("type".into(), Value::String(ty.into()));
        }
        match self {
            SchemaNode::Object(object) => object.write_into(map),
            SchemaNode::Map(values) => {
                let additional = match values.as_ref() {
                    SchemaNode::Any(any) if any.enum_values.is_empty() => Value::Bool(true),
                    other => other.to_json(),
                };
                map.insert("additionalProperties".into(), additional);
            }
            SchemaNode::Array(array) => array.write_into(map),
            SchemaNode::String(string) => string.write_into(map),
            SchemaNode::Integer(numeric) | SchemaNode::Number(numeric) => {
                numeric.write_into(map)
            }
            SchemaNode::Boolean(boolean) => write_enum(map, &boolean.enum_values),
            SchemaNode::Any(any) => write_enum(map, &any.enum_values),
            SchemaNode::Reference(_) | SchemaNode::Null => {}
        }
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Whether a record accepts properties it does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdditionalProperties {
    /// `additionalProperties: false`
    #[default]
    Forbidden,
    /// The keyword is omitted.
    Unrestricted,
}

/// Record node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectNode {
    /// Record-level description, written before the properties.
    pub description: Option<String>,
    pub properties: Vec<Property>,
    pub required: Vec<String>,
    pub additional_properties: AdditionalProperties,
}

impl ObjectNode {
    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        if let Some(description) = &self.description {
            map.insert("description".into(), Value::String(description.clone()));
        }
        let properties = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.to_json()))
            .collect::<Map<_, _>>();
        map.insert("properties".into(), Value::Object(properties));
        if !self.required.is_empty() {
            let required = self.required.iter().cloned().map(Value::String).collect();
            map.insert("required".into(), Value::Array(required));
        }
        if self.additional_properties == AdditionalProperties::Forbidden {
            map.insert("additionalProperties".into(), Value::Bool(false));
        }
    }
}

/// A named property of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub node: SchemaNode,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    /// Example values, first-seen order, no duplicates.
    pub examples: Vec<Value>,
}

impl Property {
    /// A property without annotations.
    pub fn new(name: impl Into<String>, node: SchemaNode) -> Self {
        Self {
            name: name.into(),
            node,
            title: None,
            description: None,
            default: None,
            examples: Vec::new(),
        }
    }

    /// Add an example unless an equal one is already present.
    pub fn push_example(&mut self, example: Value) {
        if !self.examples.contains(&example) {
            self.examples.push(example);
        }
    }

    /// Encode the property's node together with its annotations.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        self.node.write_into(&mut map);
        if let Some(title) = &self.title {
            map.insert("title".into(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            map.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(default) = &self.default {
            map.insert("default".into(), default.clone());
        }
        if !self.examples.is_empty() {
            map.insert("examples".into(), Value::Array(self.examples.clone()));
        }
        Value::Object(map)
    }
}

/// Array node.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayNode {
    pub items: Box<SchemaNode>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: bool,
}

impl ArrayNode {
    pub fn new(items: SchemaNode) -> Self {
        Self {
            items: Box::new(items),
            min_items: None,
            max_items: None,
            unique_items: false,
        }
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        map.insert("items".into(), self.items.to_json());
        insert_count(map, "minItems", self.min_items);
        insert_count(map, "maxItems", self.max_items);
        if self.unique_items {
            map.insert("uniqueItems".into(), Value::Bool(true));
        }
    }
}

/// String node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringNode {
    pub format: Option<String>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub enum_values: Vec<Value>,
    /// Binary encoding marker for byte sequences (e.g. "base64").
    pub binary_encoding: Option<String>,
}

impl StringNode {
    fn write_into(&self, map: &mut Map<String, Value>) {
        insert_count(map, "maxLength", self.max_length);
        insert_count(map, "minLength", self.min_length);
        if let Some(pattern) = &self.pattern {
            map.insert("pattern".into(), Value::String(pattern.clone()));
        }
        write_enum(map, &self.enum_values);
        if let Some(encoding) = &self.binary_encoding {
            let mut media = Map::new();
            media.insert("binaryEncoding".into(), Value::String(encoding.clone()));
            map.insert("media".into(), Value::Object(media));
        }
        if let Some(format) = &self.format {
            map.insert("format".into(), Value::String(format.clone()));
        }
    }
}

/// Integer or number node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NumericNode {
    pub format: Option<String>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub exclusive_minimum: bool,
    pub exclusive_maximum: bool,
    pub enum_values: Vec<Value>,
}

impl NumericNode {
    fn write_into(&self, map: &mut Map<String, Value>) {
        if let Some(maximum) = &self.maximum {
            map.insert("maximum".into(), Value::Number(maximum.clone()));
        }
        if self.exclusive_maximum {
            map.insert("exclusiveMaximum".into(), Value::Bool(true));
        }
        if let Some(minimum) = &self.minimum {
            map.insert("minimum".into(), Value::Number(minimum.clone()));
        }
        if self.exclusive_minimum {
            map.insert("exclusiveMinimum".into(), Value::Bool(true));
        }
        write_enum(map, &self.enum_values);
        if let Some(format) = &self.format {
            map.insert("format".into(), Value::String(format.clone()));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BooleanNode {
    pub enum_values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnyNode {
    pub enum_values: Vec<Value>,
}

fn write_enum(map: &mut Map<String, Value>, values: &[Value]) {
    if !values.is_empty() {
        map.insert("enum".into(), Value::Array(values.to_vec()));
    }
}

fn insert_count(map: &mut Map<String, Value>, key: &str, value: Option<u64>) {
    if let Some(n) = value {
        map.insert(key.into(), Value::from(n));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_encoding() {
        assert_eq!(
            SchemaNode::reference("User").to_json(),
            json!({"$ref": "#/definitions/User"})
        );
    }

    #[test]
    fn test_object_encoding_keeps_declaration_order() {
        let node = SchemaNode::Object(ObjectNode {
            properties: vec![
                Property::new("zeta", SchemaNode::integer()),
                Property::new("alpha", SchemaNode::string()),
            ],
            required: vec!["zeta".into()],
            additional_properties: AdditionalProperties::Forbidden,
            ..ObjectNode::default()
        });

        let json = node.to_json();
        let keys: Vec<_> = json["properties"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(json["required"], json!(["zeta"]));
        assert_eq!(json["additionalProperties"], json!(false));
    }

    #[test]
    fn test_object_description() {
        let node = SchemaNode::Object(ObjectNode {
            description: Some("A user.".into()),
            additional_properties: AdditionalProperties::Unrestricted,
            ..ObjectNode::default()
        });
        assert_eq!(
            node.to_json(),
            json!({"type": "object", "description": "A user.", "properties": {}})
        );
    }

    #[test]
    fn test_unrestricted_object_omits_keyword() {
        let node = SchemaNode::Object(ObjectNode {
            additional_properties: AdditionalProperties::Unrestricted,
            ..ObjectNode::default()
        });
        assert_eq!(node.to_json(), json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn test_map_of_any_is_open() {
        let node = SchemaNode::Map(Box::new(SchemaNode::any()));
        assert_eq!(
            node.to_json(),
            json!({"type": "object", "additionalProperties": true})
        );

        let node = SchemaNode::Map(Box::new(SchemaNode::integer()));
        assert_eq!(
            node.to_json(),
            json!({"type": "object", "additionalProperties": {"type": "integer"}})
        );
    }

    #[test]
    fn test_property_annotations() {
        let mut property = Property::new("name", SchemaNode::string());
        property.title = Some("the name".into());
        property.default = Some(json!("alex"));
        property.push_example(json!("joe"));
        property.push_example(json!("lucy"));
        property.push_example(json!("joe"));

        assert_eq!(
            property.to_json(),
            json!({
                "type": "string",
                "title": "the name",
                "default": "alex",
                "examples": ["joe", "lucy"]
            })
        );
    }

    #[test]
    fn test_bytes_encoding() {
        let node = SchemaNode::String(StringNode {
            binary_encoding: Some("base64".into()),
            ..StringNode::default()
        });
        assert_eq!(
            node.to_json(),
            json!({"type": "string", "media": {"binaryEncoding": "base64"}})
        );
    }

    #[test]
    fn test_document_encoding() {
        let schema = Schema {
            root: SchemaNode::reference("User"),
            definitions: vec![Definition {
                name: "User".into(),
                node: SchemaNode::Object(ObjectNode::default()),
            }],
        };
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "$schema": DRAFT_04,
                "$ref": "#/definitions/User",
                "definitions": {
                    "User": {
                        "type": "object",
                        "properties": {},
                        "additionalProperties": false
                    }
                }
            })
        );
        assert!(schema.definition("User").is_some());
        assert!(schema.definition("Missing").is_none());
    }
}

//! Mapping of scalar and well-known types to schema nodes.

use crate::schema::{SchemaNode, StringNode};
use crate::tags::ValueKind;
use crate::types::{Primitive, TypeKind};

/// Format of timestamps.
pub const FORMAT_DATE_TIME: &str = "date-time";
/// Format of URIs.
pub const FORMAT_URI: &str = "uri";
/// Format of IPv4 addresses.
pub const FORMAT_IPV4: &str = "ipv4";
/// Format of IPv6 addresses.
pub const FORMAT_IPV6: &str = "ipv6";
/// Format of UUIDs.
pub const FORMAT_UUID: &str = "uuid";
/// Binary encoding used for byte sequences.
pub const BINARY_ENCODING: &str = "base64";

/// Map a built-in scalar to its node.
pub fn primitive_node(primitive: Primitive) -> SchemaNode {
    match primitive {
        Primitive::Bool => SchemaNode::boolean(),
        Primitive::I8
        | Primitive::I16
        | Primitive::I32
        | Primitive::I64
        | Primitive::I128
        | Primitive::Isize
        | Primitive::U8
        | Primitive::U16
        | Primitive::U32
        | Primitive::U64
        | Primitive::U128
        | Primitive::Usize => SchemaNode::integer(),
        Primitive::F32 | Primitive::F64 => SchemaNode::number(),
        Primitive::Char | Primitive::String => SchemaNode::string(),
    }
}

/// Node for a byte sequence.
pub fn bytes_node() -> SchemaNode {
    SchemaNode::String(StringNode {
        binary_encoding: Some(BINARY_ENCODING.into()),
        ..StringNode::default()
    })
}

/// Whether a sequence of this element type is a byte sequence.
pub fn is_byte(kind: &TypeKind) -> bool {
    matches!(kind, TypeKind::Primitive(Primitive::U8))
}

/// How typed directive values (enum, example, default) are read for a node.
pub fn value_kind(node: &SchemaNode) -> ValueKind {
    match node {
        SchemaNode::Integer(_) => ValueKind::Integer,
        SchemaNode::Number(_) => ValueKind::Number,
        SchemaNode::Boolean(_) => ValueKind::Boolean,
        _ => ValueKind::String,
    }
}

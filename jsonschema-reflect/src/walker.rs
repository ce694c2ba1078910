//! Recursive traversal of type descriptions into schema nodes.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use crate::field::FieldDescriptor;
use crate::primitive::{
    bytes_node, is_byte, primitive_node, FORMAT_DATE_TIME, FORMAT_IPV4, FORMAT_IPV6, FORMAT_URI,
    FORMAT_UUID,
};
use crate::reflector::Reflector;
use crate::registry::{DefinitionRegistry, Registration};
use crate::schema::{AdditionalProperties, Definition, ObjectNode, SchemaNode};
use crate::types::{FieldInfo, TypeInfo, TypeKind};

/// A type with no schema representation was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unsupported {
    pub type_name: &'static str,
    pub kind: &'static str,
}

/// Per-call traversal state.
pub(crate) struct Walker<'r> {
    reflector: &'r Reflector,
    registry: DefinitionRegistry,
    visiting: HashSet<TypeId>,
}

struct Candidate {
    depth: usize,
    descriptor: FieldDescriptor,
}

impl<'r> Walker<'r> {
    pub fn new(reflector: &'r Reflector) -> Self {
        Self {
            reflector,
            registry: DefinitionRegistry::new(),
            visiting: HashSet::new(),
        }
    }

    /// Walk a type into its node. Named records become references.
    pub fn walk(&mut self, info: &TypeInfo) -> Result<SchemaNode, Unsupported> {
        if let Some(node) = self.reflector.map_type(info) {
            return Ok(node);
        }

        match &info.kind {
            TypeKind::Struct(_) => Ok(self.walk_record(info)),
            TypeKind::Sequence(item) => {
                let item = item.info();
                if is_byte(&item.kind) && self.reflector.map_type(&item).is_none() {
                    return Ok(bytes_node());
                }
                Ok(SchemaNode::array(self.walk(&item)?))
            }
            TypeKind::Map { value, .. } => {
                let value = self.walk(&value.info())?;
                Ok(SchemaNode::Map(Box::new(value)))
            }
            TypeKind::Pointer(inner) | TypeKind::Optional(inner) | TypeKind::Newtype(inner) => {
                self.walk(&inner.info())
            }
            TypeKind::Enumerated(primitive) | TypeKind::Primitive(primitive) => {
                Ok(primitive_node(*primitive))
            }
            TypeKind::Time => Ok(SchemaNode::formatted_string(FORMAT_DATE_TIME)),
            TypeKind::Uri => Ok(SchemaNode::formatted_string(FORMAT_URI)),
            TypeKind::Ipv4 => Ok(SchemaNode::formatted_string(FORMAT_IPV4)),
            TypeKind::Ipv6 => Ok(SchemaNode::formatted_string(FORMAT_IPV6)),
            TypeKind::Uuid => Ok(SchemaNode::formatted_string(FORMAT_UUID)),
            TypeKind::Any => Ok(SchemaNode::any()),
            TypeKind::Unit => Ok(SchemaNode::Null),
            TypeKind::Unsupported(kind) => Err(Unsupported {
                type_name: info.name,
                kind: *kind,
            }),
        }
    }

    pub fn into_definitions(self) -> Vec<Definition> {
        self.registry.into_definitions()
    }

    fn walk_record(&mut self, info: &TypeInfo) -> SchemaNode {
        if info.name.is_empty() {
            // Anonymous records have nothing to reference.
            if self.visiting.contains(&info.id) {
                tracing::warn!("recursive anonymous record; emitting an open node");
                return SchemaNode::any();
            }
            return self.inline_record_node(info);
        }

        match self.registry.reserve(info.id, info.name) {
            Registration::Existing(name) => SchemaNode::reference(name),
            Registration::New(name) => {
                let node = self.inline_record_node(info);
                self.registry.complete(&name, node);
                SchemaNode::reference(name)
            }
        }
    }

    /// Build a record's object node in place without registering it.
    pub fn inline_record_node(&mut self, info: &TypeInfo) -> SchemaNode {
        self.visiting.insert(info.id);
        let node = self.record_node(info);
        self.visiting.remove(&info.id);
        node
    }

    fn record_node(&mut self, info: &TypeInfo) -> SchemaNode {
        let TypeKind::Struct(fields) = &info.kind else {
            return SchemaNode::any();
        };

        let mut candidates = Vec::new();
        let mut chain = vec![info.id];
        self.gather(fields, 0, &mut chain, &mut candidates);

        let options = self.reflector.options();
        let mut object = ObjectNode {
            description: info
                .doc
                .filter(|_| options.doc_comments_as_descriptions)
                .map(|doc| doc.trim().to_string()),
            additional_properties: if options.allow_additional_properties {
                AdditionalProperties::Unrestricted
            } else {
                AdditionalProperties::Forbidden
            },
            ..ObjectNode::default()
        };

        for candidate in resolve_shadowing(candidates) {
            let descriptor = candidate.descriptor;
            let node = match self.walk(&descriptor.ty.info()) {
                Ok(node) => node,
                Err(unsupported) => {
                    tracing::warn!(
                        record = info.name,
                        field = %descriptor.name,
                        type_name = unsupported.type_name,
                        kind = unsupported.kind,
                        "dropping field of unsupported type"
                    );
                    continue;
                }
            };
            if descriptor.required {
                object.required.push(descriptor.name.clone());
            }
            object.properties.push(descriptor.into_property(node));
        }

        SchemaNode::Object(object)
    }

    /// Collect visible fields, flattening embedded records at their position.
    fn gather(
        &self,
        fields: &[FieldInfo],
        depth: usize,
        chain: &mut Vec<TypeId>,
        out: &mut Vec<Candidate>,
    ) {
        let options = self.reflector.options();
        for field in fields {
            let descriptor = FieldDescriptor::describe(field, options);
            if descriptor.skip || self.reflector.is_ignored(&descriptor.ty.info()) {
                continue;
            }

            if !descriptor.embedded {
                out.push(Candidate { depth, descriptor });
                continue;
            }

            let inner = peel_indirection(descriptor.ty.info());
            let TypeKind::Struct(inner_fields) = &inner.kind else {
                continue;
            };
            if chain.contains(&inner.id) {
                tracing::warn!(embedded = inner.name, "embedding cycle; skipping");
                continue;
            }
            chain.push(inner.id);
            self.gather(inner_fields, depth + 1, chain, out);
            chain.pop();
        }
    }
}

fn peel_indirection(mut info: TypeInfo) -> TypeInfo {
    while let TypeKind::Pointer(inner) | TypeKind::Optional(inner) = info.kind {
        info = inner.info();
    }
    info
}

/// Keep one field per external name: the shallowest, then the first declared.
/// Winners keep their own position.
fn resolve_shadowing(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut best: HashMap<&str, usize> = HashMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let name = candidate.descriptor.name.as_str();
        match best.get(name) {
            Some(&current) if candidates[current].depth <= candidate.depth => {}
            _ => {
                best.insert(name, index);
            }
        }
    }
    let winners: HashSet<usize> = best.into_values().collect();

    candidates
        .into_iter()
        .enumerate()
        .filter(|(index, _)| winners.contains(index))
        .map(|(_, candidate)| candidate)
        .collect()
}

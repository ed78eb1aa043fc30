//! Arena-backed type graph.
//!
//! Inference appends `TypeNode`s into a single arena and hands out integer
//! `TypeId`s instead of owned subtrees. Nodes are hash-consed on insert, so
//! two structurally identical records collapse to one id and every
//! referencing site shares it. JSON itself cannot express cycles, which
//! keeps the arena strictly append-only with ids always pointing backwards.

use std::collections::HashMap;

use serde::Serialize;

/// Index into the [`TypeGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Scalar kinds. `Unknown` is the absorbing placeholder for shapes the
/// engine could not reconcile; emission renders it as the target language's
/// most permissive type rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Bool,
    Integer,
    /// Integers beyond the signed 64-bit range; only produced when every
    /// observed value overflowed, otherwise unification widens to `Float`.
    Unsigned,
    Float,
    String,
    Null,
    Unknown,
}

/// One field of a record. `key` is always the raw JSON key so serialization
/// metadata can reference it after the identifier has been renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    pub key: String,
    #[serde(rename = "type")]
    pub ty: TypeId,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TypeNode {
    Primitive {
        kind: Primitive,
    },
    Array {
        element: TypeId,
        /// True when at least one observed element position held null.
        element_nullable: bool,
    },
    Record {
        /// First-seen key order from the source document.
        fields: Vec<Field>,
    },
}

/// Deduplicated set of inferred types for one document. Built once per
/// conversion, consumed by exactly one emission backend, then dropped.
/// Order-independent record identity: the `(key, type, nullable)` triples
/// sorted by key. Two records with the same signature are one type even when
/// their source objects listed the keys in different orders.
type RecordSignature = Vec<(String, TypeId, bool)>;

#[derive(Debug, Serialize)]
pub struct TypeGraph {
    root: TypeId,
    nodes: Vec<TypeNode>,
    #[serde(skip)]
    interned: HashMap<TypeNode, TypeId>,
    #[serde(skip)]
    record_ids: HashMap<RecordSignature, TypeId>,
}

impl TypeGraph {
    pub(crate) fn new() -> Self {
        Self {
            root: TypeId(0),
            nodes: Vec::new(),
            interned: HashMap::new(),
            record_ids: HashMap::new(),
        }
    }

    pub fn root(&self) -> TypeId {
        self.root
    }

    pub(crate) fn set_root(&mut self, id: TypeId) {
        self.root = id;
    }

    pub fn node(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    pub fn nodes(&self) -> &[TypeNode] {
        &self.nodes
    }

    pub fn is_record(&self, id: TypeId) -> bool {
        matches!(self.node(id), TypeNode::Record { .. })
    }

    /// Insert a node, returning the id of an existing structurally identical
    /// node when there is one.
    fn intern(&mut self, node: TypeNode) -> TypeId {
        if let Some(id) = self.interned.get(&node) {
            return *id;
        }
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(node.clone());
        self.interned.insert(node, id);
        id
    }

    pub(crate) fn primitive(&mut self, kind: Primitive) -> TypeId {
        self.intern(TypeNode::Primitive { kind })
    }

    pub(crate) fn array(&mut self, element: TypeId, element_nullable: bool) -> TypeId {
        self.intern(TypeNode::Array { element, element_nullable })
    }

    /// Records dedup on their field *set*, not the field list: the first
    /// occurrence wins and keeps its first-seen field order; later
    /// occurrences with the same signature reuse its id.
    pub(crate) fn record(&mut self, fields: Vec<Field>) -> TypeId {
        let mut signature: RecordSignature = fields
            .iter()
            .map(|f| (f.key.clone(), f.ty, f.nullable))
            .collect();
        signature.sort();
        if let Some(id) = self.record_ids.get(&signature) {
            return *id;
        }
        let id = TypeId(self.nodes.len() as u32);
        self.nodes.push(TypeNode::Record { fields });
        self.record_ids.insert(signature, id);
        id
    }
}

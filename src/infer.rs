//! Schema inference engine.
//!
//! One traversal of the parsed document builds an evidence tree (`Shape`),
//! pairwise unification merges sibling evidence (array elements that are
//! objects collapse into one field-union record), and a final commit step
//! interns the result into the deduplicated [`TypeGraph`].
//!
//! The engine never fails: irreconcilable shapes widen to
//! `Primitive::Unknown` instead of signaling an error, so every valid
//! document yields an emittable graph.

use indexmap::IndexMap;
use serde_json::Value;

use crate::graph::{Field, Primitive, TypeGraph, TypeId};

// ------------------------------ Evidence ---------------------------------- //

/// Per-slot evidence gathered during traversal. `nullable` records that the
/// slot held null at least once; `kind` is the non-null evidence.
#[derive(Debug, Clone, Default)]
struct Shape {
    nullable: bool,
    kind: Kind,
}

#[derive(Debug, Clone, Default)]
enum Kind {
    /// No non-null evidence yet (empty arrays, null-only slots).
    #[default]
    Unknown,
    /// Irreconcilable evidence. Unlike `Unknown`, this absorbs everything
    /// unified into it afterwards.
    Mixed,
    Bool,
    Integer,
    /// Whole numbers that only fit an unsigned 64-bit type.
    Uint,
    Float,
    Str,
    Array(Box<Shape>),
    Record(RecordShape),
}

#[derive(Debug, Clone, Default)]
struct RecordShape {
    /// Field evidence in first-seen key order.
    fields: IndexMap<String, FieldShape>,
    /// Objects merged into this record so far.
    seen: u64,
}

#[derive(Debug, Clone)]
struct FieldShape {
    shape: Shape,
    /// Objects in which the key was present at all (null counts as present).
    present_in: u64,
}

impl Shape {
    fn of(kind: Kind) -> Self {
        Self { nullable: false, kind }
    }
}

// ------------------------------- Observe ---------------------------------- //

fn observe(value: &Value) -> Shape {
    match value {
        Value::Null => Shape { nullable: true, kind: Kind::Unknown },
        Value::Bool(_) => Shape::of(Kind::Bool),
        Value::Number(n) => {
            if n.is_i64() {
                Shape::of(Kind::Integer)
            } else if n.is_u64() {
                Shape::of(Kind::Uint)
            } else {
                Shape::of(Kind::Float)
            }
        }
        Value::String(_) => Shape::of(Kind::Str),
        Value::Array(items) => {
            let mut element = Shape::default();
            for item in items {
                element = unify(element, observe(item));
            }
            Shape::of(Kind::Array(Box::new(element)))
        }
        Value::Object(map) => {
            let mut fields = IndexMap::with_capacity(map.len());
            for (key, value) in map {
                fields.insert(
                    key.clone(),
                    FieldShape { shape: observe(value), present_in: 1 },
                );
            }
            Shape::of(Kind::Record(RecordShape { fields, seen: 1 }))
        }
    }
}

// -------------------------------- Unify ----------------------------------- //

/// Combine two observations of the same logical slot.
///
/// Rules: Integer ⊔ Float = Float; anything ⊔ null = the non-null side with
/// `nullable` set; records merge by field union; arrays unify their element
/// evidence; any other mismatch is irreconcilable and widens to `Mixed`.
fn unify(a: Shape, b: Shape) -> Shape {
    let nullable = a.nullable || b.nullable;
    let kind = match (a.kind, b.kind) {
        (Kind::Mixed, _) | (_, Kind::Mixed) => Kind::Mixed,
        (Kind::Unknown, k) | (k, Kind::Unknown) => k,
        (Kind::Bool, Kind::Bool) => Kind::Bool,
        (Kind::Integer, Kind::Integer) => Kind::Integer,
        (Kind::Uint, Kind::Uint) => Kind::Uint,
        (Kind::Float, Kind::Float) => Kind::Float,
        (Kind::Integer, Kind::Float) | (Kind::Float, Kind::Integer) => Kind::Float,
        // Signed and overflowing-unsigned evidence in one slot: no integer
        // type holds both, so widen to Float. Same for Uint next to Float.
        (Kind::Integer, Kind::Uint) | (Kind::Uint, Kind::Integer) => Kind::Float,
        (Kind::Uint, Kind::Float) | (Kind::Float, Kind::Uint) => Kind::Float,
        (Kind::Str, Kind::Str) => Kind::Str,
        (Kind::Array(x), Kind::Array(y)) => Kind::Array(Box::new(unify(*x, *y))),
        (Kind::Record(x), Kind::Record(y)) => Kind::Record(merge_records(x, y)),
        _ => Kind::Mixed,
    };
    Shape { nullable, kind }
}

fn merge_records(mut a: RecordShape, b: RecordShape) -> RecordShape {
    a.seen += b.seen;
    for (key, fb) in b.fields {
        match a.fields.get_mut(&key) {
            Some(fa) => {
                fa.present_in += fb.present_in;
                let merged = unify(std::mem::take(&mut fa.shape), fb.shape);
                fa.shape = merged;
            }
            None => {
                // New key: appended after a's keys, preserving first-seen order.
                a.fields.insert(key, fb);
            }
        }
    }
    a
}

// -------------------------------- Commit ---------------------------------- //

fn commit(shape: &Shape, graph: &mut TypeGraph) -> TypeId {
    match &shape.kind {
        Kind::Unknown | Kind::Mixed => graph.primitive(Primitive::Unknown),
        Kind::Bool => graph.primitive(Primitive::Bool),
        Kind::Integer => graph.primitive(Primitive::Integer),
        Kind::Uint => graph.primitive(Primitive::Unsigned),
        Kind::Float => graph.primitive(Primitive::Float),
        Kind::Str => graph.primitive(Primitive::String),
        Kind::Array(element) => {
            let element_id = commit(element, graph);
            graph.array(element_id, element.nullable)
        }
        Kind::Record(record) => {
            let fields = record
                .fields
                .iter()
                .map(|(key, field)| Field {
                    key: key.clone(),
                    ty: commit(&field.shape, graph),
                    nullable: field.shape.nullable || field.present_in < record.seen,
                })
                .collect();
            graph.record(fields)
        }
    }
}

// ------------------------------- Front API -------------------------------- //

/// Infer the type graph for one parsed document.
pub fn infer(root: &Value) -> TypeGraph {
    let shape = observe(root);
    let mut graph = TypeGraph::new();
    let root_id = commit(&shape, &mut graph);
    graph.set_root(root_id);
    graph
}

// -------------------------------- Tests ----------------------------------- //

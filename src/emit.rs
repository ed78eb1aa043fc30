//! Code emission backends.
//!
//! Each backend is a pure function of the type graph and its resolved name
//! table: one type definition per distinct record, in discovery order, with
//! the target language's nullable form and serialization metadata carrying
//! the original JSON key whenever the identifier was renamed. Backends never
//! fail and never perform I/O.

pub mod csharp;
pub mod kotlin;
pub mod rust;

use crate::graph::TypeGraph;
use crate::names::{NameTable, NamingConvention};

/// Target language for one conversion. Exactly one backend per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Rust,
    CSharp,
    Kotlin,
}

impl Target {
    pub fn convention(self) -> &'static NamingConvention {
        match self {
            Target::Rust => &rust::NAMING,
            Target::CSharp => &csharp::NAMING,
            Target::Kotlin => &kotlin::NAMING,
        }
    }

    /// Render the annotated graph as a single block of source text.
    pub fn emit(self, graph: &TypeGraph, names: &NameTable) -> String {
        match self {
            Target::Rust => rust::emit(graph, names),
            Target::CSharp => csharp::emit(graph, names),
            Target::Kotlin => kotlin::emit(graph, names),
        }
    }
}

/// Join emitted blocks with blank lines and a single trailing newline.
fn assemble(blocks: Vec<String>) -> String {
    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

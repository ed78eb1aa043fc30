//! JSON-to-typed-code generator.
//!
//! Given one parsed JSON document, infer a deduplicated structural type
//! graph and emit equivalent type definitions in a chosen target language.
//!
//! Pipeline (each stage pure, no I/O, no shared state between requests):
//!
//! ```text
//! serde_json::Value ──infer──▶ TypeGraph ──resolve──▶ NameTable ──emit──▶ String
//! ```
//!
//! Inference never fails: ambiguous or irreconcilable shapes widen to a
//! placeholder `Unknown` type, so the caller always receives compilable
//! output to refine by hand.
//!
//! ```
//! use serde_json::json;
//! use json_modelgen::{generate, Target};
//!
//! let doc = json!({"id": 1, "tags": ["a", "b"]});
//! let source = generate(&doc, Target::Rust, "Root");
//! assert!(source.contains("pub struct Root"));
//! ```

pub mod cli;
pub mod emit;
pub mod error;
pub mod graph;
pub mod infer;
pub mod names;

pub use emit::Target;
pub use error::Error;
pub use graph::TypeGraph;
pub use infer::infer;
pub use names::{resolve, NameTable, NamingConvention};

/// Run the whole pipeline for one document against one backend.
pub fn generate(document: &serde_json::Value, target: Target, root_name: &str) -> String {
    let graph = infer::infer(document);
    let names = names::resolve(&graph, target.convention(), root_name);
    target.emit(&graph, &names)
}

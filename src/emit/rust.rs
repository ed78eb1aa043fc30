//! Rust backend: serde-ready structs.
//!
//! Nullable fields become `Option<T>`, renamed identifiers carry
//! `#[serde(rename = "…")]` with the original key, and `Unknown` renders as
//! `serde_json::Value`. A non-record root becomes a `pub type` alias instead
//! of an empty struct body.

use super::assemble;
use crate::graph::{Primitive, TypeGraph, TypeId, TypeNode};
use crate::names::{to_pascal_case, to_snake_case, NameTable, NamingConvention};

fn escape_keyword(name: &str) -> String {
    format!("{name}_")
}

pub static NAMING: NamingConvention = NamingConvention {
    type_name: to_pascal_case,
    field_name: to_snake_case,
    reserved_words: &[
        "abstract", "as", "async", "await", "become", "box", "break", "const",
        "continue", "crate", "do", "dyn", "else", "enum", "extern", "false",
        "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop",
        "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
        "ref", "return", "self", "static", "struct", "super", "trait", "true",
        "try", "type", "typeof", "unsafe", "unsized", "use", "virtual",
        "where", "while", "yield",
    ],
    escape_reserved: escape_keyword,
};

pub fn emit(graph: &TypeGraph, names: &NameTable) -> String {
    let mut blocks = Vec::new();

    if names.records().next().is_some() {
        blocks.push("use serde::{Deserialize, Serialize};".to_string());
    }

    if !graph.is_record(graph.root()) {
        blocks.push(format!(
            "pub type {} = {};",
            names.root_name(),
            type_expr(graph, names, graph.root())
        ));
    }

    for id in names.records() {
        blocks.push(record_block(graph, names, id));
    }

    assemble(blocks)
}

fn record_block(graph: &TypeGraph, names: &NameTable, id: TypeId) -> String {
    let TypeNode::Record { fields } = graph.node(id) else {
        return String::new();
    };
    let name = names.type_name(id);

    let mut out = String::from("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    if fields.is_empty() {
        out.push_str(&format!("pub struct {name} {{}}"));
        return out;
    }
    out.push_str(&format!("pub struct {name} {{\n"));
    for (index, field) in fields.iter().enumerate() {
        let field_name = names.field_name(id, index);
        if field_name != field.key {
            out.push_str(&format!("    #[serde(rename = \"{}\")]\n", field.key));
        }
        let mut ty = type_expr(graph, names, field.ty);
        if field.nullable {
            ty = format!("Option<{ty}>");
        }
        out.push_str(&format!("    pub {field_name}: {ty},\n"));
    }
    out.push('}');
    out
}

fn type_expr(graph: &TypeGraph, names: &NameTable, id: TypeId) -> String {
    match graph.node(id) {
        TypeNode::Primitive { kind } => match kind {
            Primitive::Bool => "bool".to_string(),
            Primitive::Integer => "i64".to_string(),
            Primitive::Unsigned => "u64".to_string(),
            Primitive::Float => "f64".to_string(),
            Primitive::String => "String".to_string(),
            Primitive::Null | Primitive::Unknown => "serde_json::Value".to_string(),
        },
        TypeNode::Array { element, element_nullable } => {
            let mut inner = type_expr(graph, names, *element);
            if *element_nullable {
                inner = format!("Option<{inner}>");
            }
            format!("Vec<{inner}>")
        }
        TypeNode::Record { .. } => names.type_name(id).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::emit::Target;
    use crate::generate;
    use serde_json::json;

    #[test]
    fn flat_object() {
        let doc = json!({"id": 1, "name": "a", "tags": ["x", "y"]});
        let out = generate(&doc, Target::Rust, "Root");
        let expected = r#"use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Root {
    pub id: i64,
    pub name: String,
    pub tags: Vec<String>,
}
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn merged_array_record_with_nullable_field() {
        let doc = json!({"items": [{"id": 1, "note": "x"}, {"id": 2}]});
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.contains("pub items: Vec<Item>,"));
        assert!(out.contains("pub struct Item {"));
        assert!(out.contains("pub note: Option<String>,"));
        assert!(out.contains("pub id: i64,"));
    }

    #[test]
    fn renamed_field_carries_serde_rename() {
        let doc = json!({"userName": "a"});
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.contains("#[serde(rename = \"userName\")]\n    pub user_name: String,"));
    }

    #[test]
    fn reserved_keyword_field() {
        let doc = json!({"type": "a"});
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.contains("#[serde(rename = \"type\")]\n    pub type_: String,"));
    }

    #[test]
    fn null_only_field_is_permissive_value() {
        let doc = json!({"value": null});
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.contains("pub value: Option<serde_json::Value>,"));
    }

    #[test]
    fn scalar_root_emits_type_alias() {
        let out = generate(&json!(3), Target::Rust, "Root");
        assert_eq!(out, "pub type Root = i64;\n");
    }

    #[test]
    fn empty_array_root_emits_permissive_alias() {
        let out = generate(&json!([]), Target::Rust, "Root");
        assert_eq!(out, "pub type Root = Vec<serde_json::Value>;\n");
    }

    #[test]
    fn array_of_records_root() {
        let doc = json!([{"id": 1}, {"id": 2, "tag": "a"}]);
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.starts_with("use serde::{Deserialize, Serialize};\n\npub type Root = Vec<RootElement>;\n"));
        assert!(out.contains("pub struct RootElement {"));
        assert!(out.contains("pub tag: Option<String>,"));
    }

    #[test]
    fn order_swapped_siblings_share_one_struct() {
        let doc = json!({"x": {"a": 1, "b": "s"}, "y": {"b": "s", "a": 1}});
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.contains("pub x: X,"));
        assert!(out.contains("pub y: X,"));
        assert!(!out.contains("pub struct Y"));
    }

    #[test]
    fn overflowing_integer_emits_u64() {
        let doc = json!({"big": 18_446_744_073_709_551_615u64});
        let out = generate(&doc, Target::Rust, "Root");
        assert!(out.contains("pub big: u64,"));
    }

    #[test]
    fn output_is_deterministic() {
        let doc = json!({"a": [{"x": 1}], "b": {"y": [true, null]}});
        assert_eq!(
            generate(&doc, Target::Rust, "Root"),
            generate(&doc, Target::Rust, "Root")
        );
    }
}

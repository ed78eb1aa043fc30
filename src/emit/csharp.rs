//! C# backend: System.Text.Json-ready classes.
//!
//! Properties are PascalCase auto-properties, nullable fields take the `T?`
//! suffix, renamed identifiers carry `[JsonPropertyName("…")]`, and
//! `Unknown` renders as `object`. A non-record root becomes a `using` alias.

use super::assemble;
use crate::graph::{Primitive, TypeGraph, TypeId, TypeNode};
use crate::names::{to_pascal_case, NameTable, NamingConvention};

fn escape_keyword(name: &str) -> String {
    format!("@{name}")
}

pub static NAMING: NamingConvention = NamingConvention {
    type_name: to_pascal_case,
    field_name: to_pascal_case,
    reserved_words: &[
        "abstract", "as", "base", "bool", "break", "byte", "case", "catch",
        "char", "checked", "class", "const", "continue", "decimal", "default",
        "delegate", "do", "double", "else", "enum", "event", "explicit",
        "extern", "false", "finally", "fixed", "float", "for", "foreach",
        "goto", "if", "implicit", "in", "int", "interface", "internal", "is",
        "lock", "long", "namespace", "new", "null", "object", "operator",
        "out", "override", "params", "private", "protected", "public",
        "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof",
        "stackalloc", "static", "string", "struct", "switch", "this", "throw",
        "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe",
        "ushort", "using", "virtual", "void", "volatile", "while",
    ],
    escape_reserved: escape_keyword,
};

pub fn emit(graph: &TypeGraph, names: &NameTable) -> String {
    let mut blocks = Vec::new();

    if names.records().next().is_some() {
        blocks.push(
            "using System.Collections.Generic;\nusing System.Text.Json.Serialization;"
                .to_string(),
        );
    }

    if !graph.is_record(graph.root()) {
        // Alias types must be fully qualified; they sit outside any usings'
        // scope once pasted into a project.
        blocks.push(format!(
            "using {} = {};",
            names.root_name(),
            type_expr(graph, names, graph.root(), true)
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

    let mut out = format!("public class {name}\n{{\n");
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let property = names.field_name(id, index);
        if property != field.key {
            out.push_str(&format!("    [JsonPropertyName(\"{}\")]\n", field.key));
        }
        let mut ty = type_expr(graph, names, field.ty, false);
        if field.nullable && !ty.ends_with('?') {
            ty.push('?');
        }
        out.push_str(&format!("    public {ty} {property} {{ get; set; }}\n"));
    }
    out.push('}');
    out
}

fn type_expr(graph: &TypeGraph, names: &NameTable, id: TypeId, qualify: bool) -> String {
    match graph.node(id) {
        TypeNode::Primitive { kind } => match kind {
            Primitive::Bool => "bool".to_string(),
            Primitive::Integer => "long".to_string(),
            Primitive::Unsigned => "ulong".to_string(),
            Primitive::Float => "double".to_string(),
            Primitive::String => "string".to_string(),
            Primitive::Null | Primitive::Unknown => "object".to_string(),
        },
        TypeNode::Array { element, element_nullable } => {
            let mut inner = type_expr(graph, names, *element, qualify);
            if *element_nullable && !inner.ends_with('?') {
                inner.push('?');
            }
            if qualify {
                format!("System.Collections.Generic.List<{inner}>")
            } else {
                format!("List<{inner}>")
            }
        }
        TypeNode::Record { .. } => names.type_name(id).to_string(),
    }
}

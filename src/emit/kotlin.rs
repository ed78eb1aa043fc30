//! Kotlin backend: Gson-ready data classes.
//!
//! Fields are camelCase constructor parameters, nullable fields take the
//! `T? = null` form, renamed identifiers carry `@SerializedName("…")`, and
//! `Unknown` renders as `Any?`. A non-record root becomes a `typealias`.

use super::assemble;
use crate::graph::{Primitive, TypeGraph, TypeId, TypeNode};
use crate::names::{to_camel_case, to_pascal_case, NameTable, NamingConvention};

fn escape_keyword(name: &str) -> String {
    format!("{name}_")
}

pub static NAMING: NamingConvention = NamingConvention {
    type_name: to_pascal_case,
    field_name: to_camel_case,
    reserved_words: &[
        "as", "break", "class", "continue", "do", "else", "false", "for",
        "fun", "if", "in", "interface", "is", "null", "object", "package",
        "return", "super", "this", "throw", "true", "try", "typealias",
        "typeof", "val", "var", "when", "while",
    ],
    escape_reserved: escape_keyword,
};

pub fn emit(graph: &TypeGraph, names: &NameTable) -> String {
    let mut blocks = Vec::new();
    let mut needs_import = false;

    if !graph.is_record(graph.root()) {
        blocks.push(format!(
            "typealias {} = {}",
            names.root_name(),
            type_expr(graph, names, graph.root())
        ));
    }

    for id in names.records() {
        blocks.push(record_block(graph, names, id, &mut needs_import));
    }

    if needs_import {
        blocks.insert(0, "import com.google.gson.annotations.SerializedName".to_string());
    }

    assemble(blocks)
}

fn record_block(
    graph: &TypeGraph,
    names: &NameTable,
    id: TypeId,
    needs_import: &mut bool,
) -> String {
    let TypeNode::Record { fields } = graph.node(id) else {
        return String::new();
    };
    let name = names.type_name(id);

    // Kotlin data classes need at least one constructor parameter.
    if fields.is_empty() {
        return format!("class {name}");
    }

    let mut out = format!("data class {name}(\n");
    for (index, field) in fields.iter().enumerate() {
        let param = names.field_name(id, index);
        if param != field.key {
            *needs_import = true;
            out.push_str(&format!("    @SerializedName(\"{}\")\n", field.key));
        }
        let mut ty = type_expr(graph, names, field.ty);
        if field.nullable {
            if !ty.ends_with('?') {
                ty.push('?');
            }
            out.push_str(&format!("    val {param}: {ty} = null,\n"));
        } else {
            out.push_str(&format!("    val {param}: {ty},\n"));
        }
    }
    out.push(')');
    out
}

fn type_expr(graph: &TypeGraph, names: &NameTable, id: TypeId) -> String {
    match graph.node(id) {
        TypeNode::Primitive { kind } => match kind {
            Primitive::Bool => "Boolean".to_string(),
            Primitive::Integer => "Long".to_string(),
            Primitive::Unsigned => "ULong".to_string(),
            Primitive::Float => "Double".to_string(),
            Primitive::String => "String".to_string(),
            Primitive::Null | Primitive::Unknown => "Any?".to_string(),
        },
        TypeNode::Array { element, element_nullable } => {
            let mut inner = type_expr(graph, names, *element);
            if *element_nullable && !inner.ends_with('?') {
                inner.push('?');
            }
            format!("List<{inner}>")
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
        let doc = json!({"id": 1, "user_name": "a", "tags": ["x"]});
        let out = generate(&doc, Target::Kotlin, "Root");
        let expected = r#"import com.google.gson.annotations.SerializedName

data class Root(
    val id: Long,
    @SerializedName("user_name")
    val userName: String,
    val tags: List<String>,
)
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn no_rename_means_no_import() {
        let doc = json!({"id": 1, "name": "a"});
        let out = generate(&doc, Target::Kotlin, "Root");
        let expected = r#"data class Root(
    val id: Long,
    val name: String,
)
"#;
        assert_eq!(out, expected);
    }

    #[test]
    fn nullable_field_defaults_to_null() {
        let doc = json!([{"id": 1, "note": "x"}, {"id": 2}]);
        let out = generate(&doc, Target::Kotlin, "Root");
        assert!(out.contains("val note: String? = null,"));
        assert!(out.contains("val id: Long,"));
    }

    #[test]
    fn unknown_field_is_permissive_any() {
        let doc = json!({"value": null});
        let out = generate(&doc, Target::Kotlin, "Root");
        assert!(out.contains("val value: Any? = null,"));
    }

    #[test]
    fn reserved_word_field_is_escaped_and_renamed() {
        let doc = json!({"object": 1});
        let out = generate(&doc, Target::Kotlin, "Root");
        assert!(out.contains("@SerializedName(\"object\")\n    val object_: Long,"));
    }

    #[test]
    fn scalar_root_emits_typealias() {
        let out = generate(&json!(true), Target::Kotlin, "Root");
        assert_eq!(out, "typealias Root = Boolean\n");
    }

    #[test]
    fn array_root_references_element_record() {
        let doc = json!([{"id": 1}]);
        let out = generate(&doc, Target::Kotlin, "Root");
        assert!(out.starts_with("typealias Root = List<RootElement>\n"));
        assert!(out.contains("data class RootElement(\n    val id: Long,\n)"));
    }
}

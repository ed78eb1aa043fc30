//! Identifier resolution.
//!
//! Converts raw JSON keys and structural positions into target-language
//! legal, collision-free names without touching graph structure. Naming is
//! parameterized by a per-backend [`NamingConvention`] (casing functions,
//! reserved words, escape rule); everything else is shared.
//!
//! Record naming: the root record takes the caller-supplied root name;
//! a record discovered through a field is named from that field's key,
//! singularized when the path crosses an array. A record reachable through
//! several paths keeps the name of its first discovery (depth-first,
//! field order), so output is reproducible for identical input. Type-name
//! collisions get numeric suffixes (`Name2`, `Name3`, …) in discovery order.

use std::collections::{HashMap, HashSet};

use crate::graph::{TypeGraph, TypeId, TypeNode};

// ---------------------------- Conventions --------------------------------- //

/// Target-language naming rules. Const-constructible so each backend can
/// expose a static instance.
pub struct NamingConvention {
    /// Casing for type names (e.g. PascalCase).
    pub type_name: fn(&str) -> String,
    /// Casing for field names (e.g. snake_case, camelCase).
    pub field_name: fn(&str) -> String,
    /// Words that cannot be used as field identifiers.
    pub reserved_words: &'static [&'static str],
    /// Deterministic escape applied when a field name hits a reserved word.
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    fn safe_field(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }
}

// ------------------------------- Casing ----------------------------------- //

/// Split a raw key into words: on non-alphanumeric separators and on
/// lower-to-upper case boundaries. Digits stick to their word.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_is_lower = false;
    for c in s.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_is_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_is_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_is_lower = c.is_lowercase() || c.is_numeric();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_camel_case(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            let mut chars = word.chars();
            if let Some(c) = chars.next() {
                out.extend(c.to_lowercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Best-effort English singular for a key crossed through an array. When no
/// plural suffix is recognizable, `_element` is appended instead so the
/// derived type name still differs from the field's own.
fn singular_hint(hint: &str) -> String {
    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if let Some(stem) = hint.strip_suffix(suffix) {
            if !stem.is_empty() {
                return format!("{stem}{}", &suffix[..suffix.len() - 2]);
            }
        }
    }
    if let Some(stem) = hint.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }
    if let Some(stem) = hint.strip_suffix('s') {
        if !stem.is_empty() && !stem.ends_with('s') {
            return stem.to_string();
        }
    }
    format!("{hint}_element")
}

/// Make a cased name a legal identifier: non-empty and not digit-leading.
fn legalize(name: String, fallback: &str) -> String {
    if name.is_empty() {
        return fallback.to_string();
    }
    if name.chars().next().is_some_and(|c| c.is_numeric()) {
        return format!("_{name}");
    }
    name
}

// ------------------------------ Name table -------------------------------- //

/// Resolved names for one graph: one type name per record, one field name
/// per record field, plus the deterministic emission order (first-discovery
/// depth-first from the root).
pub struct NameTable {
    root_name: String,
    order: Vec<TypeId>,
    type_names: HashMap<TypeId, String>,
    field_names: HashMap<TypeId, Vec<String>>,
}

impl NameTable {
    /// Name for the root type: the root record's name, or the alias name
    /// when the root is a scalar or an array.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Record ids in emission order.
    pub fn records(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.order.iter().copied()
    }

    pub fn type_name(&self, id: TypeId) -> &str {
        self.type_names
            .get(&id)
            .map(String::as_str)
            .expect("record was named during resolve")
    }

    pub fn field_name(&self, id: TypeId, index: usize) -> &str {
        self.field_names
            .get(&id)
            .and_then(|names| names.get(index))
            .map(String::as_str)
            .expect("record fields were named during resolve")
    }
}

// ------------------------------- Resolve ---------------------------------- //

/// Assign final names to every record and field reachable from the root.
pub fn resolve(graph: &TypeGraph, convention: &NamingConvention, root_hint: &str) -> NameTable {
    let mut resolver = Resolver {
        graph,
        convention,
        taken: HashSet::new(),
        order: Vec::new(),
        type_names: HashMap::new(),
        field_names: HashMap::new(),
    };

    let root = graph.root();
    let root_name = if graph.is_record(root) {
        resolver.visit(root, root_hint);
        resolver.type_names[&root].clone()
    } else {
        // Scalar or array root: claim the alias name first so nested records
        // cannot shadow it.
        let alias = resolver.claim_type(root_hint);
        resolver.visit(root, root_hint);
        alias
    };

    NameTable {
        root_name,
        order: resolver.order,
        type_names: resolver.type_names,
        field_names: resolver.field_names,
    }
}

struct Resolver<'g> {
    graph: &'g TypeGraph,
    convention: &'g NamingConvention,
    taken: HashSet<String>,
    order: Vec<TypeId>,
    type_names: HashMap<TypeId, String>,
    field_names: HashMap<TypeId, Vec<String>>,
}

impl Resolver<'_> {
    fn claim_type(&mut self, hint: &str) -> String {
        let base = legalize((self.convention.type_name)(hint), "Type");
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{base}{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    fn visit(&mut self, id: TypeId, hint: &str) {
        match self.graph.node(id) {
            TypeNode::Primitive { .. } => {}
            TypeNode::Array { element, .. } => {
                self.visit(*element, &singular_hint(hint));
            }
            TypeNode::Record { fields } => {
                // A record shared by several paths keeps its first name.
                if self.type_names.contains_key(&id) {
                    return;
                }
                let name = self.claim_type(hint);
                let field_names = self.name_fields(fields);
                self.order.push(id);
                self.type_names.insert(id, name);
                self.field_names.insert(id, field_names);
                for field in fields {
                    self.visit(field.ty, &field.key);
                }
            }
        }
    }

    fn name_fields(&self, fields: &[crate::graph::Field]) -> Vec<String> {
        let mut used = HashSet::new();
        let mut out = Vec::with_capacity(fields.len());
        for field in fields {
            let cased = legalize((self.convention.field_name)(&field.key), "field");
            let mut name = self.convention.safe_field(&cased);
            if !used.insert(name.clone()) {
                let mut n = 2u32;
                loop {
                    let candidate = format!("{name}{n}");
                    if used.insert(candidate.clone()) {
                        name = candidate;
                        break;
                    }
                    n += 1;
                }
            }
            out.push(name);
        }
        out
    }
}

// -------------------------------- Tests ----------------------------------- //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Target;
    use crate::infer::infer;
    use serde_json::json;

    #[test]
    fn casing_helpers() {
        assert_eq!(to_pascal_case("user_name"), "UserName");
        assert_eq!(to_pascal_case("userName"), "UserName");
        assert_eq!(to_pascal_case("user-id"), "UserId");
        assert_eq!(to_snake_case("userName"), "user_name");
        assert_eq!(to_snake_case("User ID"), "user_id");
        assert_eq!(to_camel_case("user_name"), "userName");
        assert_eq!(to_camel_case("UserName"), "userName");
        assert_eq!(to_camel_case("user"), "user");
    }

    #[test]
    fn singular_hints() {
        assert_eq!(singular_hint("items"), "item");
        assert_eq!(singular_hint("entries"), "entry");
        assert_eq!(singular_hint("boxes"), "box");
        assert_eq!(singular_hint("data"), "data_element");
        assert_eq!(singular_hint("address"), "address_element");
    }

    #[test]
    fn digit_leading_and_empty_keys_stay_legal() {
        assert_eq!(legalize(to_snake_case("2fa"), "field"), "_2fa");
        assert_eq!(legalize(to_snake_case("!!"), "field"), "field");
    }

    #[test]
    fn nested_record_named_from_field_key() {
        let doc = json!({"items": [{"id": 1}], "owner": {"name": "a"}});
        let graph = infer(&doc);
        let names = resolve(&graph, Target::Rust.convention(), "Root");
        let mut type_names: Vec<_> = names.records().map(|id| names.type_name(id).to_string()).collect();
        assert_eq!(names.root_name(), "Root");
        type_names.sort();
        assert_eq!(type_names, ["Item", "Owner", "Root"]);
    }

    #[test]
    fn colliding_type_names_get_numeric_suffixes() {
        // Same field key twice, but the two records differ structurally, so
        // both survive dedup and contend for the same name.
        let doc = json!({
            "entry": {"a": 1},
            "wrap": {"entry": {"b": "s"}}
        });
        let graph = infer(&doc);
        let names = resolve(&graph, Target::Rust.convention(), "Root");
        let type_names: Vec<_> = names.records().map(|id| names.type_name(id).to_string()).collect();
        assert_eq!(type_names, ["Root", "Entry", "Wrap", "Entry2"]);
    }

    #[test]
    fn shared_record_keeps_first_discovery_name() {
        let doc = json!({
            "primary": {"id": 1, "tag": "a"},
            "backup": {"id": 2, "tag": "b"}
        });
        let graph = infer(&doc);
        let names = resolve(&graph, Target::Rust.convention(), "Root");
        // Both fields point at the same deduplicated record.
        let type_names: Vec<_> = names.records().map(|id| names.type_name(id).to_string()).collect();
        assert_eq!(type_names, ["Root", "Primary"]);
    }

    #[test]
    fn array_root_alias_does_not_shadow_element_record() {
        let doc = json!([{"id": 1}]);
        let graph = infer(&doc);
        let names = resolve(&graph, Target::Rust.convention(), "Root");
        assert_eq!(names.root_name(), "Root");
        let type_names: Vec<_> = names.records().map(|id| names.type_name(id).to_string()).collect();
        assert_eq!(type_names, ["RootElement"]);
    }

    #[test]
    fn reserved_field_names_are_escaped() {
        let doc = json!({"type": "a", "self": "b"});
        let graph = infer(&doc);
        let names = resolve(&graph, Target::Rust.convention(), "Root");
        let root = graph.root();
        assert_eq!(names.field_name(root, 0), "type_");
        assert_eq!(names.field_name(root, 1), "self_");
    }

    #[test]
    fn field_names_colliding_after_casing_get_suffixes() {
        let doc = json!({"user name": 1, "user_name": 2});
        let graph = infer(&doc);
        let names = resolve(&graph, Target::Rust.convention(), "Root");
        let root = graph.root();
        assert_eq!(names.field_name(root, 0), "user_name");
        assert_eq!(names.field_name(root, 1), "user_name2");
    }

    #[test]
    fn resolution_is_deterministic() {
        let doc = json!({"a": [{"x": 1}], "b": [{"x": 1}], "c": {"x": 1}});
        let graph = infer(&doc);
        let collect = || {
            let names = resolve(&graph, Target::Kotlin.convention(), "Root");
            names
                .records()
                .map(|id| names.type_name(id).to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(collect(), collect());
    }
}

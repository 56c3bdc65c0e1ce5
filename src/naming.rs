//! Naming rules shared by the schema rewriter, the planner and the delegate.
//!
//! Generated paths and identifiers all derive from three inputs: the resource
//! (message) name, the protobuf package and the group namespace. Keeping the
//! derivations in one place guarantees that a file planned in one stage is
//! referenced under the same name by every other stage.

use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

/// Root directory of the generated API modules and native bindings
pub const APIS_ROOT: &str = "src/apis";

/// Prefix applied to a flagged message before it is handed to the delegate emitter
pub const INTERNAL_PREFIX: &str = "XXX_";

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "gen",
    "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Protobuf name of the internal binding for a flagged message
///
/// ```rust
/// assert_eq!(kubescaffold::naming::internal_name("Widget"), "XXX_Widget");
/// ```
pub fn internal_name(name: &str) -> String {
    format!("{INTERNAL_PREFIX}{name}")
}

/// Rust type identifier for a protobuf message name, following prost's rules
///
/// prost upper-camel-cases every message name and escapes `Self`.
pub fn type_ident(name: &str) -> String {
    let mut ident = name.to_upper_camel_case();
    if ident == "Self" {
        ident.push('_');
    }
    ident
}

/// Snake-case form of a resource name, used for file and module names
pub fn snake_name(name: &str) -> String {
    name.to_snake_case()
}

/// Prefix of the constants generated for a resource (`WIDGET_SET`)
pub fn const_prefix(name: &str) -> String {
    name.to_shouty_snake_case()
}

/// Kubernetes resource name: the message name lowercased
pub fn resource_name(name: &str) -> String {
    name.to_lowercase()
}

/// Plural resource name: the resource name with an `s` appended
pub fn plural_name(name: &str) -> String {
    format!("{}s", resource_name(name))
}

/// Rust module identifier for an arbitrary path segment (package, stem, namespace)
///
/// Characters that cannot appear in an identifier become `_`; keywords are
/// emitted as raw identifiers.
pub fn module_ident(segment: &str) -> String {
    let mut ident: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }
    ident
}

/// Module identifier a directory or file name resolves to without `#[path]`
///
/// Raw identifiers map to their bare name, so `r#type` resolves `type/`.
pub fn is_plain_module(module: &str, name: &str) -> bool {
    module.strip_prefix("r#").unwrap_or(module) == name
}

/// Identifier-safe key of a proto file, used as the `<key>_types.rs` prefix
pub fn file_key(proto_name: &str) -> String {
    let ident = module_ident(file_stem(proto_name));
    match ident.strip_prefix("r#") {
        Some(bare) => bare.to_string(),
        None => ident,
    }
}

/// Base name of a proto file without directories or the `.proto` extension
pub fn file_stem(proto_name: &str) -> &str {
    let base = proto_name.rsplit('/').next().unwrap_or(proto_name);
    base.strip_suffix(".proto").unwrap_or(base)
}

/// Final path component of a generated file name
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Path the delegate emitter uses for the bindings of one proto file
pub fn bindings_file_name(proto_name: &str) -> String {
    let without_ext = proto_name.strip_suffix(".proto").unwrap_or(proto_name);
    format!("{without_ext}.pb.rs")
}

/// Directory holding everything generated for one package of the group
pub fn package_dir(namespace: &str, package: &str) -> String {
    format!("{APIS_ROOT}/{namespace}/{package}")
}

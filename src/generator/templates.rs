use askama::Template;

use crate::error::{GeneratorError, Result};

/// A resource as seen by the per-resource templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    /// Rust type identifier of the resource (`WidgetSet`)
    pub name: String,
    /// Snake-case name used in file and module names
    pub snake: String,
    /// Prefix of the generated constants (`WIDGET_SET`)
    pub const_prefix: String,
    /// Kubernetes resource name
    pub resource: String,
    /// Kubernetes plural resource name
    pub plural: String,
    /// Rust identifier of the native binding wrapped by the resource spec
    pub binding: String,
    /// Preserved comment lines
    pub documentation: Vec<String>,
}

/// One subcommand of the generated root command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    /// Module identifier of `src/cmd/<snake>.rs`
    pub module: String,
    pub snake: String,
}

/// One proto file wired into its package module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFileEntry {
    /// Base name of the bindings file, included verbatim
    pub bindings: String,
    /// Key of the `<key>_types.rs` and `<key>_register.rs` files
    pub module: String,
}

/// One package wired into the group module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    /// Directory name, the raw protobuf package
    pub dir: String,
    /// Module identifier
    pub module: String,
    /// Whether the module needs `#[path]` to find its directory
    pub needs_path: bool,
}

/// A `name = value` line of the generated Cargo.toml
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLine {
    pub name: String,
    pub value: String,
}

#[derive(Template)]
#[template(path = "controller.rs.txt", escape = "none")]
pub struct ControllerTemplate {
    pub name: String,
    pub namespace_module: String,
    pub package_module: String,
    pub const_prefix: String,
    pub resource: String,
    pub group: String,
}

#[derive(Template)]
#[template(path = "entrypoint.rs.txt", escape = "none")]
pub struct EntrypointTemplate {
    pub name: String,
    pub snake: String,
}

#[derive(Template)]
#[template(path = "command.rs.txt", escape = "none")]
pub struct CommandTemplate {
    pub name: String,
    pub snake: String,
}

/// Template data for the root command aggregating every resource command
#[derive(Template)]
#[template(path = "command_root.rs.txt", escape = "none")]
pub struct CommandRootTemplate {
    pub crate_name: String,
    pub group: String,
    pub commands: Vec<CommandEntry>,
}

/// Template data for the API types of one proto file
#[derive(Template)]
#[template(path = "types.rs.txt", escape = "none")]
pub struct TypesTemplate {
    /// Proto file the resources come from
    pub file: String,
    pub group: String,
    /// Kubernetes API version, the protobuf package
    pub version: String,
    pub resources: Vec<ResourceEntry>,
}

#[derive(Template)]
#[template(path = "register.rs.txt", escape = "none")]
pub struct RegisterTemplate {
    pub file: String,
    pub group: String,
    pub version: String,
    pub resources: Vec<ResourceEntry>,
}

/// Template data for a package module: bindings, types and registration of every file
#[derive(Template)]
#[template(path = "package_doc.rs.txt", escape = "none")]
pub struct PackageDocTemplate {
    pub package: String,
    pub group: String,
    pub files: Vec<PackageFileEntry>,
}

#[derive(Template)]
#[template(path = "group_register.rs.txt", escape = "none")]
pub struct GroupRegisterTemplate {
    pub group: String,
    pub packages: Vec<PackageEntry>,
}

#[derive(Template)]
#[template(path = "apis_mod.rs.txt", escape = "none")]
pub struct ApisModTemplate {
    pub namespace: String,
    pub namespace_module: String,
    pub needs_path: bool,
}

#[derive(Template)]
#[template(path = "controller_mod.rs.txt", escape = "none")]
pub struct ControllerModTemplate {
    pub controllers: Vec<CommandEntry>,
}

#[derive(Template)]
#[template(path = "main.rs.txt", escape = "none")]
pub struct MainRsTemplate {
    pub crate_name: String,
    pub group: String,
}

#[derive(Template)]
#[template(path = "signals.rs.txt", escape = "none")]
pub struct SignalsTemplate;

/// Template data for the generated crate manifest
#[derive(Template)]
#[template(path = "Cargo.toml.txt", escape = "none")]
pub struct CargoTomlTemplate {
    pub crate_name: String,
    pub version: String,
    pub group: String,
    pub dependencies: Vec<DependencyLine>,
}

/// Render `data`, tagging failures with the template name
pub fn render<T: Template>(template: &'static str, data: &T) -> Result<String> {
    data.render()
        .map_err(|source| GeneratorError::Render { template, source })
}

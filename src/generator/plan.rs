//! Resource file planner.
//!
//! Maps the resources of a [`SchemaRequest`] onto the files of the generated
//! crate. Every stage is a pure function of the options, the parsed request and
//! the scaffold config; nothing here touches the filesystem.

use std::collections::HashSet;

use tracing::debug;

use super::assemble::OutputFile;
use super::scaffold_config::ScaffoldConfig;
use super::templates::{
    render, ApisModTemplate, CargoTomlTemplate, CommandEntry, CommandRootTemplate,
    CommandTemplate, ControllerModTemplate, ControllerTemplate, DependencyLine,
    EntrypointTemplate, GroupRegisterTemplate, MainRsTemplate, PackageDocTemplate,
    PackageEntry, PackageFileEntry, RegisterTemplate, ResourceEntry, SignalsTemplate,
    TypesTemplate,
};
use crate::error::Result;
use crate::naming;
use crate::plugin::GenerationOptions;
use crate::schema::{AnnotatedResource, SchemaFile, SchemaRequest};

pub const ROOT_COMMAND_PATH: &str = "src/cmd/mod.rs";
pub const MAIN_PATH: &str = "src/main.rs";
pub const SIGNALS_PATH: &str = "src/signals.rs";
pub const CONTROLLER_MOD_PATH: &str = "src/controller/mod.rs";
pub const APIS_MOD_PATH: &str = "src/apis/mod.rs";
pub const CARGO_TOML_PATH: &str = "Cargo.toml";

pub fn controller_path(snake: &str) -> String {
    format!("src/controller/{snake}_controller.rs")
}

pub fn entrypoint_path(snake: &str) -> String {
    format!("src/controller/{snake}_entrypoint.rs")
}

pub fn command_path(snake: &str) -> String {
    format!("src/cmd/{snake}.rs")
}

pub fn types_path(namespace: &str, file: &SchemaFile) -> String {
    format!(
        "{}/{}_types.rs",
        naming::package_dir(namespace, file.package()),
        naming::file_key(file.name())
    )
}

pub fn register_path(namespace: &str, file: &SchemaFile) -> String {
    format!(
        "{}/{}_register.rs",
        naming::package_dir(namespace, file.package()),
        naming::file_key(file.name())
    )
}

pub fn package_doc_path(namespace: &str, package: &str) -> String {
    format!("{}/mod.rs", naming::package_dir(namespace, package))
}

pub fn group_register_path(namespace: &str) -> String {
    format!("{}/{namespace}/mod.rs", naming::APIS_ROOT)
}

/// Plans every scaffold file of one run
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    options: &'a GenerationOptions,
    request: &'a SchemaRequest,
    config: &'a ScaffoldConfig,
}

impl<'a> Planner<'a> {
    pub fn new(
        options: &'a GenerationOptions,
        request: &'a SchemaRequest,
        config: &'a ScaffoldConfig,
    ) -> Self {
        Self {
            options,
            request,
            config,
        }
    }

    fn crate_name(&self) -> String {
        self.config.crate_name(self.options.namespace())
    }

    /// Controller scaffold and entrypoint of every resource
    pub fn controllers(&self) -> Result<Vec<OutputFile>> {
        let namespace_module = naming::module_ident(self.options.namespace());
        let mut files = Vec::new();
        for resource in self.request.resources() {
            let name = resource.message.type_ident();
            let snake = naming::snake_name(&name);
            let controller = ControllerTemplate {
                name: name.clone(),
                namespace_module: namespace_module.clone(),
                package_module: naming::module_ident(resource.file.package()),
                const_prefix: naming::const_prefix(&name),
                resource: naming::resource_name(resource.name()),
                group: self.options.group().to_string(),
            };
            files.push(OutputFile::new(
                controller_path(&snake),
                render("controller", &controller)?,
            ));

            let entrypoint = EntrypointTemplate {
                name,
                snake: snake.clone(),
            };
            files.push(OutputFile::new(
                entrypoint_path(&snake),
                render("entrypoint", &entrypoint)?,
            ));
        }
        debug!(count = files.len(), "planned controllers");
        Ok(files)
    }

    /// Root command followed by one command per resource
    ///
    /// The root command needs the complete name set, so names are collected
    /// before anything is rendered.
    pub fn commands(&self) -> Result<Vec<OutputFile>> {
        let commands = self.distinct_commands();
        let root = CommandRootTemplate {
            crate_name: self.crate_name(),
            group: self.options.group().to_string(),
            commands: commands.clone(),
        };
        let mut files = vec![OutputFile::new(
            ROOT_COMMAND_PATH,
            render("command_root", &root)?,
        )];

        for resource in self.request.resources() {
            let name = resource.message.type_ident();
            let snake = naming::snake_name(&name);
            let command = CommandTemplate {
                name,
                snake: snake.clone(),
            };
            files.push(OutputFile::new(
                command_path(&snake),
                render("command", &command)?,
            ));
        }
        debug!(count = files.len(), "planned commands");
        Ok(files)
    }

    /// Process entry point, shutdown handling and module indexes
    pub fn runtime(&self) -> Result<Vec<OutputFile>> {
        let namespace = self.options.namespace();
        let namespace_module = naming::module_ident(namespace);
        let main = MainRsTemplate {
            crate_name: self.crate_name(),
            group: self.options.group().to_string(),
        };
        let apis = ApisModTemplate {
            namespace: namespace.to_string(),
            needs_path: !naming::is_plain_module(&namespace_module, namespace),
            namespace_module,
        };
        let controllers = ControllerModTemplate {
            controllers: self.distinct_commands(),
        };
        Ok(vec![
            OutputFile::new(MAIN_PATH, render("main", &main)?),
            OutputFile::new(SIGNALS_PATH, render("signals", &SignalsTemplate)?),
            OutputFile::new(
                CONTROLLER_MOD_PATH,
                render("controller_mod", &controllers)?,
            ),
            OutputFile::new(APIS_MOD_PATH, render("apis_mod", &apis)?),
        ])
    }

    /// Group registration once, then per file its package doc (first file of
    /// each package only), API types and registration
    pub fn api_types(&self) -> Result<Vec<OutputFile>> {
        let namespace = self.options.namespace();
        let group = self.options.group().to_string();

        let mut packages = Vec::new();
        let mut seen = HashSet::new();
        for file in self.request.targets() {
            if seen.insert(file.package()) {
                let module = naming::module_ident(file.package());
                packages.push(PackageEntry {
                    dir: file.package().to_string(),
                    needs_path: !naming::is_plain_module(&module, file.package()),
                    module,
                });
            }
        }
        let mut files = vec![OutputFile::new(
            group_register_path(namespace),
            render(
                "group_register",
                &GroupRegisterTemplate {
                    group: group.clone(),
                    packages,
                },
            )?,
        )];

        let mut served: HashSet<&str> = HashSet::new();
        for file in self.request.targets() {
            if served.insert(file.package()) {
                let doc = PackageDocTemplate {
                    package: file.package().to_string(),
                    group: group.clone(),
                    files: self.package_files(file.package()),
                };
                files.push(OutputFile::new(
                    package_doc_path(namespace, file.package()),
                    render("package_doc", &doc)?,
                ));
            }

            let resources: Vec<ResourceEntry> = file.resources().map(resource_entry).collect();
            let types = TypesTemplate {
                file: file.name().to_string(),
                group: group.clone(),
                version: file.package().to_string(),
                resources: resources.clone(),
            };
            files.push(OutputFile::new(
                types_path(namespace, file),
                render("types", &types)?,
            ));

            let register = RegisterTemplate {
                file: file.name().to_string(),
                group: group.clone(),
                version: file.package().to_string(),
                resources,
            };
            files.push(OutputFile::new(
                register_path(namespace, file),
                render("register", &register)?,
            ));
        }
        debug!(count = files.len(), "planned api types");
        Ok(files)
    }

    /// Cargo.toml of the generated crate
    pub fn build_descriptor(&self) -> Result<OutputFile> {
        let dependencies = self
            .config
            .dependencies()
            .iter()
            .map(|(name, spec)| DependencyLine {
                name: name.clone(),
                value: spec.to_toml_value(),
            })
            .collect();
        let manifest = CargoTomlTemplate {
            crate_name: self.crate_name(),
            version: self.config.crate_version().to_string(),
            group: self.options.group().to_string(),
            dependencies,
        };
        Ok(OutputFile::new(
            CARGO_TOML_PATH,
            render("cargo_toml", &manifest)?,
        ))
    }

    /// Resource names of the run, deduplicated in first-seen order
    fn distinct_commands(&self) -> Vec<CommandEntry> {
        let mut seen = HashSet::new();
        self.request
            .resources()
            .map(|resource| resource.message.type_ident())
            .filter(|name| seen.insert(name.clone()))
            .map(|name| {
                let snake = naming::snake_name(&name);
                CommandEntry {
                    module: naming::module_ident(&snake),
                    snake,
                    name,
                }
            })
            .collect()
    }

    /// Every file to generate that belongs to `package`, in request order
    fn package_files(&self, package: &str) -> Vec<PackageFileEntry> {
        self.request
            .targets()
            .filter(|file| file.package() == package)
            .map(|file| PackageFileEntry {
                bindings: naming::base_name(&naming::bindings_file_name(file.name())).to_string(),
                module: naming::file_key(file.name()),
            })
            .collect()
    }
}

fn resource_entry(resource: AnnotatedResource<'_>) -> ResourceEntry {
    let name = resource.message.type_ident();
    ResourceEntry {
        snake: naming::snake_name(&name),
        const_prefix: naming::const_prefix(&name),
        resource: naming::resource_name(resource.name()),
        plural: naming::plural_name(resource.name()),
        binding: resource.message.binding_ident(),
        documentation: resource.documentation.to_vec(),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RESOURCE_MARKER;
    use prost_types::compiler::CodeGeneratorRequest;
    use prost_types::source_code_info::Location;
    use prost_types::{DescriptorProto, FileDescriptorProto, SourceCodeInfo};

    fn file(name: &str, package: &str, messages: &[(&str, bool)]) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(name.to_string()),
            package: Some(package.to_string()),
            message_type: messages
                .iter()
                .map(|(m, _)| DescriptorProto {
                    name: Some(m.to_string()),
                    ..Default::default()
                })
                .collect(),
            source_code_info: Some(SourceCodeInfo {
                location: messages
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, flagged))| *flagged)
                    .map(|(i, (m, _))| Location {
                        path: vec![4, i as i32],
                        leading_comments: Some(format!(" {m} docs.\n {RESOURCE_MARKER}\n")),
                        ..Default::default()
                    })
                    .collect(),
            }),
            ..Default::default()
        }
    }

    fn request(files: Vec<FileDescriptorProto>) -> SchemaRequest {
        SchemaRequest::from_plugin_request(CodeGeneratorRequest {
            file_to_generate: files.iter().map(|f| f.name().to_string()).collect(),
            proto_file: files,
            parameter: Some("group=foo.bar".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    fn paths(files: &[OutputFile]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_per_resource_paths() {
        let options = GenerationOptions::parse("group=foo.bar").unwrap();
        let request = request(vec![file(
            "shop/widgets.proto",
            "v1",
            &[("Widget", true), ("Part", false), ("WidgetSet", true)],
        )]);
        let config = ScaffoldConfig::default();
        let planner = Planner::new(&options, &request, &config);

        assert_eq!(
            paths(&planner.controllers().unwrap()),
            vec![
                "src/controller/widget_controller.rs",
                "src/controller/widget_entrypoint.rs",
                "src/controller/widget_set_controller.rs",
                "src/controller/widget_set_entrypoint.rs",
            ]
        );
        assert_eq!(
            paths(&planner.commands().unwrap()),
            vec!["src/cmd/mod.rs", "src/cmd/widget.rs", "src/cmd/widget_set.rs"]
        );
        assert_eq!(
            paths(&planner.api_types().unwrap()),
            vec![
                "src/apis/foobar/mod.rs",
                "src/apis/foobar/v1/mod.rs",
                "src/apis/foobar/v1/widgets_types.rs",
                "src/apis/foobar/v1/widgets_register.rs",
            ]
        );
    }

    #[test]
    fn test_package_doc_emitted_once_per_package() {
        let options = GenerationOptions::parse("group=foo.bar").unwrap();
        let request = request(vec![
            file("a.proto", "v1", &[("Widget", true)]),
            file("b.proto", "v1", &[("Gadget", true)]),
            file("c.proto", "v2", &[]),
        ]);
        let config = ScaffoldConfig::default();
        let files = Planner::new(&options, &request, &config).api_types().unwrap();

        assert_eq!(
            paths(&files),
            vec![
                "src/apis/foobar/mod.rs",
                "src/apis/foobar/v1/mod.rs",
                "src/apis/foobar/v1/a_types.rs",
                "src/apis/foobar/v1/a_register.rs",
                "src/apis/foobar/v1/b_types.rs",
                "src/apis/foobar/v1/b_register.rs",
                "src/apis/foobar/v2/mod.rs",
                "src/apis/foobar/v2/c_types.rs",
                "src/apis/foobar/v2/c_register.rs",
            ]
        );
        let doc = &files[1].content;
        assert!(doc.contains("include!(\"a.pb.rs\");"));
        assert!(doc.contains("include!(\"b.pb.rs\");"));
        assert!(files[0].content.contains("pub mod v2;"));
    }

    #[test]
    fn test_root_command_deduplicates_names() {
        let options = GenerationOptions::parse("group=foo.bar").unwrap();
        let request = request(vec![
            file("a.proto", "v1", &[("Widget", true)]),
            file("b.proto", "v2", &[("Widget", true)]),
        ]);
        let config = ScaffoldConfig::default();
        let files = Planner::new(&options, &request, &config).commands().unwrap();

        assert_eq!(files.len(), 3);
        let root = &files[0].content;
        assert_eq!(root.matches("pub mod widget;").count(), 1);
    }

    #[test]
    fn test_types_content() {
        let options = GenerationOptions::parse("group=foo.bar").unwrap();
        let request = request(vec![file("widgets.proto", "v1", &[("Widget", true)])]);
        let config = ScaffoldConfig::default();
        let files = Planner::new(&options, &request, &config).api_types().unwrap();

        let types = &files[2].content;
        assert!(types.contains("pub const WIDGET_RESOURCE: &str = \"widget\";"));
        assert!(types.contains("pub const WIDGET_RESOURCE_PLURAL: &str = \"widgets\";"));
        assert!(types.contains("/// Widget docs."));
        assert!(types.contains("pub spec: XxxWidget,"));
        assert!(!types.contains(RESOURCE_MARKER));
    }

    #[test]
    fn test_build_descriptor_uses_config() {
        let options = GenerationOptions::parse("group=foo.bar").unwrap();
        let request = request(vec![file("widgets.proto", "v1", &[("Widget", true)])]);
        let config: ScaffoldConfig = toml::from_str(
            r#"
            [package]
            name = "widgets"
            version = "0.2.0"
            "#,
        )
        .unwrap();
        let manifest = Planner::new(&options, &request, &config)
            .build_descriptor()
            .unwrap();
        assert_eq!(manifest.path, "Cargo.toml");
        assert!(manifest.content.contains("name = \"widgets\""));
        assert!(manifest.content.contains("version = \"0.2.0\""));
        assert!(manifest.content.contains("kube = "));
    }
}

use std::collections::HashSet;

use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorProto;

use super::scan::scan_file;
use crate::error::{GeneratorError, Result};
use crate::naming;

/// Resource annotation attached to every message when the schema is parsed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Annotation {
    /// No marker in the message's leading comment
    #[default]
    Unannotated,
    /// The message is a resource; `documentation` is its comment minus the marker
    Annotated {
        /// Preserved comment lines, in original order
        documentation: Vec<String>,
        /// Source location path of the marker comment (`[4, index]`)
        location: Vec<i32>,
    },
}

/// A top-level message of a schema file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    /// Position in the file's `message_type` list
    pub index: usize,
    /// Protobuf message name
    pub name: String,
    pub annotation: Annotation,
}

impl MessageDescriptor {
    /// Rust identifier of the resource wrapper type (`Widget`)
    pub fn type_ident(&self) -> String {
        naming::type_ident(&self.name)
    }

    /// Protobuf name the delegate sees for this message (`XXX_Widget`)
    pub fn internal_name(&self) -> String {
        naming::internal_name(&self.name)
    }

    /// Rust identifier the delegate emits for the renamed message (`XxxWidget`)
    pub fn binding_ident(&self) -> String {
        naming::type_ident(&self.internal_name())
    }
}

/// One protobuf file of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    name: String,
    package: String,
    messages: Vec<MessageDescriptor>,
    /// Indices of annotated messages, in source location order
    resource_order: Vec<usize>,
}

impl SchemaFile {
    /// Build a file to generate: scans its comments for resource markers
    pub fn parse(descriptor: &FileDescriptorProto) -> Result<Self> {
        let scanned = scan_file(descriptor)?;
        let mut file = Self::dependency(descriptor);
        for resource in scanned {
            file.messages[resource.message_index].annotation = Annotation::Annotated {
                documentation: resource.documentation,
                location: resource.path,
            };
            file.resource_order.push(resource.message_index);
        }
        Ok(file)
    }

    /// Build a dependency file: never scanned, every message unannotated
    pub fn dependency(descriptor: &FileDescriptorProto) -> Self {
        let messages = descriptor
            .message_type
            .iter()
            .enumerate()
            .map(|(index, message)| MessageDescriptor {
                index,
                name: message.name().to_string(),
                annotation: Annotation::Unannotated,
            })
            .collect();
        Self {
            name: descriptor.name().to_string(),
            package: descriptor.package().to_string(),
            messages,
            resource_order: Vec::new(),
        }
    }

    /// Proto path as given to protoc, e.g. `shop/widgets.proto`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// File name without directories or extension
    pub fn stem(&self) -> &str {
        naming::file_stem(&self.name)
    }

    pub fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }

    /// Flagged messages of this file, in source location order
    pub fn resources(&self) -> impl Iterator<Item = AnnotatedResource<'_>> + '_ {
        self.resource_order.iter().filter_map(move |&index| {
            let message = &self.messages[index];
            match &message.annotation {
                Annotation::Annotated {
                    documentation,
                    location,
                } => Some(AnnotatedResource {
                    file: self,
                    message,
                    documentation,
                    location,
                }),
                Annotation::Unannotated => None,
            }
        })
    }
}

/// A flagged message together with the file it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedResource<'a> {
    pub file: &'a SchemaFile,
    pub message: &'a MessageDescriptor,
    /// Comment lines without the marker
    pub documentation: &'a [String],
    /// Source location path the marker was found at
    pub location: &'a [i32],
}

impl AnnotatedResource<'_> {
    pub fn name(&self) -> &str {
        &self.message.name
    }
}

/// Parsed, read-only view of a `CodeGeneratorRequest`
///
/// Annotation scanning happens once here; every later stage borrows the result.
/// The original request is kept untouched so the rewriter can copy it.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRequest {
    raw: CodeGeneratorRequest,
    files: Vec<SchemaFile>,
    targets: Vec<usize>,
}

impl SchemaRequest {
    /// Parse the request, scanning every file listed in `file_to_generate`.
    ///
    /// Fails when a file to generate has no descriptor or no package, when a
    /// marker is misplaced, or when an internal binding name would collide with
    /// a resource name.
    pub fn from_plugin_request(raw: CodeGeneratorRequest) -> Result<Self> {
        let mut targets = Vec::with_capacity(raw.file_to_generate.len());
        for name in &raw.file_to_generate {
            let index = raw
                .proto_file
                .iter()
                .position(|f| f.name() == name)
                .ok_or_else(|| GeneratorError::UnknownFile(name.clone()))?;
            if raw.proto_file[index].package().is_empty() {
                return Err(GeneratorError::MissingPackage(name.clone()));
            }
            targets.push(index);
        }

        let files = raw
            .proto_file
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                if targets.contains(&index) {
                    SchemaFile::parse(descriptor)
                } else {
                    Ok(SchemaFile::dependency(descriptor))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let request = Self {
            raw,
            files,
            targets,
        };
        request.check_binding_names()?;
        Ok(request)
    }

    /// The request exactly as protoc sent it
    pub fn raw(&self) -> &CodeGeneratorRequest {
        &self.raw
    }

    /// Files to generate, in `file_to_generate` order
    pub fn targets(&self) -> impl Iterator<Item = &SchemaFile> + '_ {
        self.targets.iter().map(move |&i| &self.files[i])
    }

    /// Every resource of every file to generate
    pub fn resources(&self) -> impl Iterator<Item = AnnotatedResource<'_>> + '_ {
        self.targets().flat_map(|file| file.resources())
    }

    fn check_binding_names(&self) -> Result<()> {
        let resource_idents: HashSet<String> =
            self.resources().map(|r| r.message.type_ident()).collect();
        for resource in self.resources() {
            let binding = resource.message.binding_ident();
            if resource_idents.contains(&binding) {
                return Err(GeneratorError::NameCollision(binding));
            }
        }
        Ok(())
    }
}

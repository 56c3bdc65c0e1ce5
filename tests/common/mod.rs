#![allow(dead_code)]

use std::cell::RefCell;

use kubescaffold::delegate::BindingEmitter;
use kubescaffold::generator::OutputFile;
use kubescaffold::naming;
use kubescaffold::schema::RESOURCE_MARKER;
use kubescaffold::{GeneratorError, Result};
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::source_code_info::Location;
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, SourceCodeInfo};

/// Leading comment flagging a message as a resource
pub fn flagged(doc: &str) -> String {
    format!(" {doc}\n +k8s:deepcopy-gen:interfaces={RESOURCE_MARKER}\n")
}

/// Message with a single string field
pub fn message(name: &str) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![FieldDescriptorProto {
            name: Some("color".to_string()),
            number: Some(1),
            label: Some(Label::Optional as i32),
            r#type: Some(Type::String as i32),
            json_name: Some("color".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Message-typed field pointing at `type_name`, e.g. `.v1.Widget`
pub fn message_field(name: &str, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(2),
        label: Some(Label::Optional as i32),
        r#type: Some(Type::Message as i32),
        type_name: Some(type_name.to_string()),
        json_name: Some(name.to_string()),
        ..Default::default()
    }
}

/// Proto3 file whose messages carry the given leading comments
pub fn proto_file(name: &str, package: &str, messages: &[(&str, Option<String>)]) -> FileDescriptorProto {
    let location = messages
        .iter()
        .enumerate()
        .filter_map(|(i, (_, comment))| {
            comment.as_ref().map(|c| Location {
                path: vec![4, i as i32],
                span: vec![i as i32 * 4, 0, 3, 1],
                leading_comments: Some(c.clone()),
                ..Default::default()
            })
        })
        .collect();
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        syntax: Some("proto3".to_string()),
        message_type: messages.iter().map(|(m, _)| message(m)).collect(),
        source_code_info: Some(SourceCodeInfo { location }),
        ..Default::default()
    }
}

/// Request generating every file given
pub fn request(parameter: &str, files: Vec<FileDescriptorProto>) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: files.iter().map(|f| f.name().to_string()).collect(),
        parameter: Some(parameter.to_string()),
        proto_file: files,
        ..Default::default()
    }
}

/// `shop/widgets.proto` (package `v1`) with flagged `Widget` and `Gadget`
/// and an unflagged `Part`
pub fn widgets_request(parameter: &str) -> CodeGeneratorRequest {
    request(
        parameter,
        vec![proto_file(
            "shop/widgets.proto",
            "v1",
            &[
                ("Widget", Some(flagged("Widget is a widget."))),
                ("Part", Some(" Part of a widget.\n".to_string())),
                ("Gadget", Some(flagged("Gadget is a gadget."))),
            ],
        )],
    )
}

/// Emitter recording every request it sees and producing one small binding
/// file per target
#[derive(Default)]
pub struct RecordingEmitter {
    pub calls: RefCell<Vec<CodeGeneratorRequest>>,
}

impl BindingEmitter for RecordingEmitter {
    fn emit(&self, request: &CodeGeneratorRequest) -> Result<Vec<OutputFile>> {
        self.calls.borrow_mut().push(request.clone());
        let mut files = Vec::new();
        for name in &request.file_to_generate {
            let descriptor = request
                .proto_file
                .iter()
                .find(|f| f.name() == name)
                .ok_or_else(|| GeneratorError::UnknownFile(name.clone()))?;
            let content: String = descriptor
                .message_type
                .iter()
                .map(|m| format!("pub struct {} {{}}\n", naming::type_ident(m.name())))
                .collect();
            files.push(OutputFile::new(naming::bindings_file_name(name), content));
        }
        Ok(files)
    }
}

/// Emitter that always fails like a broken delegate would
pub struct FailingEmitter;

impl BindingEmitter for FailingEmitter {
    fn emit(&self, request: &CodeGeneratorRequest) -> Result<Vec<OutputFile>> {
        Err(GeneratorError::Delegate {
            file: request.file_to_generate.join(","),
            message: "unsupported syntax".to_string(),
        })
    }
}

pub fn paths(files: &[OutputFile]) -> Vec<&str> {
    files.iter().map(|f| f.path.as_str()).collect()
}

pub fn content<'a>(files: &'a [OutputFile], path: &str) -> &'a str {
    files
        .iter()
        .find(|f| f.path == path)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("{path} not generated"))
}

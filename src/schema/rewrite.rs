use prost_types::compiler::CodeGeneratorRequest;
use prost_types::{DescriptorProto, FieldDescriptorProto};

use super::scan::addressed_message;
use super::types::{SchemaFile, SchemaRequest};

/// Build the request handed to the delegate emitter for one target file.
///
/// The result is an independent copy of the whole request. In that copy every
/// flagged message of every file to generate is renamed to its internal name,
/// every type reference to a renamed message follows it, every leading comment
/// of those files is cleared so markers cannot leak into the bindings, and
/// `file_to_generate` lists only `target`.
///
/// The original request and its scan results are left untouched.
pub fn rewrite_for_target(request: &SchemaRequest, target: &SchemaFile) -> CodeGeneratorRequest {
    let mut copy = request.raw().clone();
    let mut renames = Vec::new();

    for file in request.targets() {
        let Some(descriptor) = copy.proto_file.iter_mut().find(|d| d.name() == file.name()) else {
            continue;
        };
        for resource in file.resources() {
            let count = descriptor.message_type.len();
            let Some(proto) = addressed_message(resource.location, count)
                .and_then(|index| descriptor.message_type.get_mut(index))
            else {
                continue;
            };
            let internal = resource.message.internal_name();
            renames.push((
                qualified_name(file.package(), resource.name()),
                qualified_name(file.package(), &internal),
            ));
            proto.name = Some(internal);
        }
        if let Some(info) = descriptor.source_code_info.as_mut() {
            for location in &mut info.location {
                location.leading_comments = None;
            }
        }
    }

    for descriptor in &mut copy.proto_file {
        for message in &mut descriptor.message_type {
            retarget_message(message, &renames);
        }
        for field in &mut descriptor.extension {
            retarget_field(field, &renames);
        }
        for service in &mut descriptor.service {
            for method in &mut service.method {
                retarget(&mut method.input_type, &renames);
                retarget(&mut method.output_type, &renames);
            }
        }
    }

    copy.file_to_generate = vec![target.name().to_string()];
    copy
}

/// Fully qualified protobuf type name, as used in `type_name` (`.v1.Widget`)
fn qualified_name(package: &str, name: &str) -> String {
    if package.is_empty() {
        format!(".{name}")
    } else {
        format!(".{package}.{name}")
    }
}

fn retarget_message(message: &mut DescriptorProto, renames: &[(String, String)]) {
    for field in message.field.iter_mut().chain(message.extension.iter_mut()) {
        retarget_field(field, renames);
    }
    for nested in &mut message.nested_type {
        retarget_message(nested, renames);
    }
}

fn retarget_field(field: &mut FieldDescriptorProto, renames: &[(String, String)]) {
    retarget(&mut field.type_name, renames);
    retarget(&mut field.extendee, renames);
}

/// Point a type reference at the renamed message, nested types included
/// (`.v1.Widget.Part` becomes `.v1.XXX_Widget.Part`).
fn retarget(type_name: &mut Option<String>, renames: &[(String, String)]) {
    let Some(name) = type_name.as_mut() else {
        return;
    };
    for (from, to) in renames {
        if let Some(rest) = name.strip_prefix(from.as_str()) {
            if rest.is_empty() || rest.starts_with('.') {
                *name = format!("{to}{rest}");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RESOURCE_MARKER;
    use prost_types::source_code_info::Location;
    use prost_types::{FileDescriptorProto, SourceCodeInfo};

    fn descriptor(name: &str, messages: &[&str], flagged: &[usize]) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some(name.to_string()),
            package: Some("v1".to_string()),
            message_type: messages
                .iter()
                .map(|m| DescriptorProto {
                    name: Some(m.to_string()),
                    ..Default::default()
                })
                .collect(),
            source_code_info: Some(SourceCodeInfo {
                location: (0..messages.len())
                    .map(|i| Location {
                        path: vec![4, i as i32],
                        leading_comments: Some(if flagged.contains(&i) {
                            format!(" Docs.\n {RESOURCE_MARKER}\n")
                        } else {
                            " Plain docs.\n".to_string()
                        }),
                        ..Default::default()
                    })
                    .collect(),
            }),
            ..Default::default()
        }
    }

    fn request() -> SchemaRequest {
        SchemaRequest::from_plugin_request(CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".to_string(), "b.proto".to_string()],
            proto_file: vec![
                descriptor("a.proto", &["Widget", "Part"], &[0]),
                descriptor("b.proto", &["Gadget"], &[0]),
            ],
            parameter: Some("group=foo.bar".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rewrite_renames_and_strips_comments() {
        let request = request();
        let target = request.targets().next().unwrap();
        let copy = rewrite_for_target(&request, target);

        assert_eq!(copy.file_to_generate, vec!["a.proto".to_string()]);
        let a = &copy.proto_file[0];
        assert_eq!(a.message_type[0].name(), "XXX_Widget");
        assert_eq!(a.message_type[1].name(), "Part");
        assert_eq!(copy.proto_file[1].message_type[0].name(), "XXX_Gadget");
        for file in &copy.proto_file {
            let info = file.source_code_info.as_ref().unwrap();
            assert!(info.location.iter().all(|l| l.leading_comments.is_none()));
        }
    }

    fn reference(name: &str, type_name: &str) -> FieldDescriptorProto {
        FieldDescriptorProto {
            name: Some(name.to_string()),
            number: Some(1),
            type_name: Some(type_name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_rewrite_follows_type_references() {
        let mut a = descriptor("a.proto", &["Widget", "Shelf"], &[0]);
        a.message_type[1].field = vec![
            reference("widget", ".v1.Widget"),
            reference("part", ".v1.Widget.Part"),
            reference("other", ".v1.WidgetSet"),
        ];
        a.message_type[1].nested_type = vec![DescriptorProto {
            name: Some("Slot".to_string()),
            field: vec![reference("gadget", ".v1.Gadget")],
            ..Default::default()
        }];
        let b = descriptor("b.proto", &["Gadget"], &[0]);
        let request = SchemaRequest::from_plugin_request(CodeGeneratorRequest {
            file_to_generate: vec!["a.proto".to_string(), "b.proto".to_string()],
            proto_file: vec![a, b],
            parameter: Some("group=foo.bar".to_string()),
            ..Default::default()
        })
        .unwrap();

        let target = request.targets().nth(1).unwrap();
        let copy = rewrite_for_target(&request, target);
        let shelf = &copy.proto_file[0].message_type[1];
        assert_eq!(shelf.name(), "Shelf");
        assert_eq!(shelf.field[0].type_name(), ".v1.XXX_Widget");
        assert_eq!(shelf.field[1].type_name(), ".v1.XXX_Widget.Part");
        assert_eq!(shelf.field[2].type_name(), ".v1.WidgetSet");
        assert_eq!(shelf.nested_type[0].field[0].type_name(), ".v1.XXX_Gadget");
        assert_eq!(
            request.raw().proto_file[0].message_type[1].field[0].type_name(),
            ".v1.Widget"
        );
    }

    #[test]
    fn test_rewrite_leaves_original_untouched() {
        let request = request();
        let before = request.clone();
        for target in request.targets() {
            let _copy = rewrite_for_target(&request, target);
        }
        assert_eq!(request, before);
        assert_eq!(request.raw().proto_file[0].message_type[0].name(), "Widget");
        let names: Vec<_> = request.resources().map(|r| r.name().to_string()).collect();
        assert_eq!(names, vec!["Widget".to_string(), "Gadget".to_string()]);
    }
}

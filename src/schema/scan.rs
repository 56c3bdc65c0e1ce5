use prost_types::FileDescriptorProto;

use crate::error::{GeneratorError, Result};

/// Documentation marker promoting a message to a generated resource
pub const RESOURCE_MARKER: &str = "k8s.io/apimachinery/pkg/runtime.Object";

/// `FileDescriptorProto.message_type` field number in source location paths
const MESSAGE_TYPE_FIELD: i32 = 4;

/// A top-level message whose leading comment carries the resource marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedResource {
    /// Index into the file's top-level message list
    pub message_index: usize,
    /// Source location path of the comment (`[4, message_index]`)
    pub path: Vec<i32>,
    /// Comment lines in original order, marker line removed
    pub documentation: Vec<String>,
}

/// Find every flagged message of one file, in source location order.
///
/// The marker is only accepted on a location addressing a top-level message
/// (`[4, index]`). A marker on any other node (nested message, field, enum,
/// package statement) or on an out-of-range index is rejected. A message
/// addressed by several locations is reported once.
pub fn scan_file(file: &FileDescriptorProto) -> Result<Vec<ScannedResource>> {
    let Some(info) = file.source_code_info.as_ref() else {
        return Ok(Vec::new());
    };

    let mut found: Vec<ScannedResource> = Vec::new();
    for location in &info.location {
        let comment = location.leading_comments();
        if !has_marker(comment) {
            continue;
        }
        let message_index = addressed_message(&location.path, file.message_type.len())
            .ok_or_else(|| GeneratorError::MisplacedMarker {
                file: file.name().to_string(),
                path: location.path.clone(),
            })?;
        if found.iter().any(|r| r.message_index == message_index) {
            continue;
        }
        found.push(ScannedResource {
            message_index,
            path: location.path.clone(),
            documentation: documentation_lines(comment),
        });
    }
    Ok(found)
}

/// True when any line of the comment contains the marker
pub fn has_marker(comment: &str) -> bool {
    comment.lines().any(|line| line.contains(RESOURCE_MARKER))
}

/// Comment lines without the marker line(s), trailing newline dropped
pub fn documentation_lines(comment: &str) -> Vec<String> {
    comment
        .lines()
        .filter(|line| !line.contains(RESOURCE_MARKER))
        .map(str::to_string)
        .collect()
}

/// Index of the top-level message a location path addresses, if it addresses one
pub(crate) fn addressed_message(path: &[i32], message_count: usize) -> Option<usize> {
    match path {
        [MESSAGE_TYPE_FIELD, index] => usize::try_from(*index)
            .ok()
            .filter(|i| *i < message_count),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::source_code_info::Location;
    use prost_types::{DescriptorProto, SourceCodeInfo};

    fn file_with(messages: &[&str], locations: Vec<(Vec<i32>, &str)>) -> FileDescriptorProto {
        FileDescriptorProto {
            name: Some("widgets.proto".to_string()),
            package: Some("v1".to_string()),
            message_type: messages
                .iter()
                .map(|m| DescriptorProto {
                    name: Some(m.to_string()),
                    ..Default::default()
                })
                .collect(),
            source_code_info: Some(SourceCodeInfo {
                location: locations
                    .into_iter()
                    .map(|(path, comment)| Location {
                        path,
                        leading_comments: Some(comment.to_string()),
                        ..Default::default()
                    })
                    .collect(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_marker_no_resources() {
        let file = file_with(&["Widget"], vec![(vec![4, 0], " Just a widget.\n")]);
        assert!(scan_file(&file).unwrap().is_empty());
    }

    #[test]
    fn test_missing_source_info() {
        let file = FileDescriptorProto::default();
        assert!(scan_file(&file).unwrap().is_empty());
    }

    #[test]
    fn test_marker_line_excluded_from_documentation() {
        let comment = " Widget is a thing.\n It has parts.\n +k8s:deepcopy-gen:interfaces=k8s.io/apimachinery/pkg/runtime.Object\n";
        let file = file_with(&["Gadget", "Widget"], vec![(vec![4, 1], comment)]);
        let found = scan_file(&file).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message_index, 1);
        assert_eq!(found[0].path, vec![4, 1]);
        assert_eq!(
            found[0].documentation,
            vec![" Widget is a thing.".to_string(), " It has parts.".to_string()]
        );
    }

    #[test]
    fn test_location_order_preserved() {
        let marker = format!(" {RESOURCE_MARKER}\n");
        let file = file_with(
            &["A", "B", "C"],
            vec![(vec![4, 2], marker.as_str()), (vec![4, 0], marker.as_str())],
        );
        let indices: Vec<_> = scan_file(&file)
            .unwrap()
            .into_iter()
            .map(|r| r.message_index)
            .collect();
        assert_eq!(indices, vec![2, 0]);
    }

    #[test]
    fn test_marker_on_field_rejected() {
        let marker = format!(" {RESOURCE_MARKER}\n");
        let file = file_with(&["Widget"], vec![(vec![4, 0, 2, 0], marker.as_str())]);
        let err = scan_file(&file).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::MisplacedMarker { ref path, .. } if path == &vec![4, 0, 2, 0]
        ));
    }

    #[test]
    fn test_marker_out_of_range_rejected() {
        let marker = format!(" {RESOURCE_MARKER}\n");
        let file = file_with(&["Widget"], vec![(vec![4, 3], marker.as_str())]);
        assert!(scan_file(&file).is_err());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let comment = format!(" Docs.\n {RESOURCE_MARKER}\n");
        let file = file_with(&["Widget"], vec![(vec![4, 0], comment.as_str())]);
        assert_eq!(scan_file(&file).unwrap(), scan_file(&file).unwrap());
    }
}

use crate::error::{GeneratorError, Result};

/// Option naming the Kubernetes API group of every generated resource
pub const GROUP_OPTION: &str = "group";

const KNOWN_OPTIONS: &[&str] = &[GROUP_OPTION];

/// Validated plugin options parsed from the `--kubescaffold_opt` parameter string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    group: String,
    namespace: String,
}

impl GenerationOptions {
    /// Parse and validate a comma-separated `key=value` parameter string.
    ///
    /// Tokens without `=` are ignored, a token is split on its first `=`, and a
    /// repeated key keeps its last value. The first key outside the recognized
    /// set fails the whole run, as does a missing or empty `group`.
    pub fn parse(parameter: &str) -> Result<Self> {
        let mut group = None;
        for token in parameter.split(',') {
            let Some((key, value)) = token.split_once('=') else {
                continue;
            };
            if !KNOWN_OPTIONS.contains(&key) {
                return Err(GeneratorError::UnknownOption(key.to_string()));
            }
            if key == GROUP_OPTION {
                group = Some(value.to_string());
            }
        }

        let group = group.ok_or(GeneratorError::MissingOption(GROUP_OPTION))?;
        let namespace = strip_dots(&group);
        if namespace.is_empty() {
            return Err(GeneratorError::MissingOption(GROUP_OPTION));
        }

        Ok(Self { group, namespace })
    }

    /// Raw API group, e.g. `drekle.example.io`
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Group with every `.` removed; the root namespace of generated paths and modules
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Remove every `.` from a group name
pub fn strip_dots(group: &str) -> String {
    group.replace('.', "")
}

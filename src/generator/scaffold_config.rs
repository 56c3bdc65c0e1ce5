//! Scaffold configuration for the generated crate
//!
//! Lets a project pin the generated crate's name and version and add
//! dependencies to its `Cargo.toml` through a small TOML file:
//!
//! ```toml
//! [package]
//! name = "widgets-controller"
//! version = "0.3.0"
//!
//! [dependencies]
//! chrono = "0.4"
//! serde_with = { version = "3", features = ["macros"] }
//! ```
//!
//! The file is selected with `KUBESCAFFOLD_CONFIG`. Entries in `[dependencies]`
//! override the scaffold's default dependency of the same name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{GeneratorError, Result};

/// Version written to the generated `Cargo.toml` when none is configured
pub const DEFAULT_CRATE_VERSION: &str = "0.1.0";

/// Dependency specification for the generated Cargo.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DependencySpec {
    /// Simple version string: "1.33"
    Version(String),
    /// Full specification: { version = "1.33", features = ["serde"] }
    Full {
        version: Option<String>,
        path: Option<String>,
        git: Option<String>,
        branch: Option<String>,
        features: Option<Vec<String>>,
        #[serde(rename = "default-features")]
        default_features: Option<bool>,
    },
}

impl DependencySpec {
    /// Version-only dependency
    pub fn version(v: &str) -> Self {
        DependencySpec::Version(v.to_string())
    }

    /// Versioned dependency with features
    pub fn with_features(v: &str, features: &[&str]) -> Self {
        DependencySpec::Full {
            version: Some(v.to_string()),
            path: None,
            git: None,
            branch: None,
            features: Some(features.iter().map(|f| f.to_string()).collect()),
            default_features: None,
        }
    }

    /// Render as the right-hand side of a `name = ...` line in Cargo.toml
    pub fn to_toml_value(&self) -> String {
        match self {
            DependencySpec::Version(v) => quote(v),
            DependencySpec::Full {
                version,
                path,
                git,
                branch,
                features,
                default_features,
            } => {
                let mut parts = Vec::new();
                for (key, value) in [
                    ("version", version),
                    ("path", path),
                    ("git", git),
                    ("branch", branch),
                ] {
                    if let Some(value) = value {
                        parts.push(format!("{key} = {}", quote(value)));
                    }
                }
                if let Some(default_features) = default_features {
                    parts.push(format!("default-features = {default_features}"));
                }
                if let Some(features) = features {
                    let list: Vec<String> = features.iter().map(|f| quote(f)).collect();
                    parts.push(format!("features = [{}]", list.join(", ")));
                }
                format!("{{ {} }}", parts.join(", "))
            }
        }
    }
}

fn quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

/// `[package]` overrides for the generated crate
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PackageConfig {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Scaffold configuration loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScaffoldConfig {
    #[serde(default)]
    pub package: PackageConfig,

    /// Dependencies added to (or overriding) the scaffold defaults
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencySpec>,
}

impl ScaffoldConfig {
    /// Crate name: configured, or `<namespace>-controller`
    pub fn crate_name(&self, namespace: &str) -> String {
        self.package
            .name
            .clone()
            .unwrap_or_else(|| format!("{namespace}-controller"))
    }

    pub fn crate_version(&self) -> &str {
        self.package
            .version
            .as_deref()
            .unwrap_or(DEFAULT_CRATE_VERSION)
    }

    /// Scaffold defaults merged with configured dependencies, sorted by name
    pub fn dependencies(&self) -> BTreeMap<String, DependencySpec> {
        let mut deps = default_dependencies();
        deps.extend(
            self.dependencies
                .iter()
                .map(|(name, spec)| (name.clone(), spec.clone())),
        );
        deps
    }
}

/// Dependencies every generated controller crate needs
pub fn default_dependencies() -> BTreeMap<String, DependencySpec> {
    BTreeMap::from([
        ("anyhow".to_string(), DependencySpec::version("1.0")),
        (
            "clap".to_string(),
            DependencySpec::with_features("4", &["derive"]),
        ),
        ("futures".to_string(), DependencySpec::version("0.3")),
        (
            "k8s-openapi".to_string(),
            DependencySpec::with_features("0.25", &["latest"]),
        ),
        (
            "kube".to_string(),
            DependencySpec::with_features("1", &["runtime", "derive", "client"]),
        ),
        ("prost".to_string(), DependencySpec::version("0.14")),
        ("schemars".to_string(), DependencySpec::version("0.8")),
        (
            "serde".to_string(),
            DependencySpec::with_features("1.0", &["derive"]),
        ),
        ("serde_json".to_string(), DependencySpec::version("1.0")),
        (
            "tokio".to_string(),
            DependencySpec::with_features("1", &["macros", "rt-multi-thread", "signal"]),
        ),
        ("tracing".to_string(), DependencySpec::version("0.1")),
        (
            "tracing-subscriber".to_string(),
            DependencySpec::with_features("0.3", &["env-filter"]),
        ),
    ])
}

/// Load the scaffold configuration from a TOML file
///
/// Unlike protoc inputs, the path comes from the environment, so a missing file
/// is reported instead of silently falling back to defaults.
pub fn load_scaffold_config(path: &Path) -> Result<ScaffoldConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| GeneratorError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&contents).map_err(|e| GeneratorError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

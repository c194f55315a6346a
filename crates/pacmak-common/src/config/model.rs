use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root configuration from pacmak.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacmakConfig {
    pub project: ProjectSection,

    /// Per-language target settings
    #[serde(default)]
    pub targets: TargetsSection,
}

impl PacmakConfig {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            project: ProjectSection {
                name: name.into(),
                version: version.into(),
                description: None,
                output_directory: default_output_dir(),
            },
            targets: TargetsSection::default(),
        }
    }

    /// Python target settings, defaulted when the section is absent.
    pub fn python(&self) -> PythonTarget {
        self.targets.python.clone().unwrap_or_default()
    }
}

/// [project] section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Assembly name, e.g. `jsii-calc` or `@scope/jsii-calc-lib`
    pub name: String,
    /// Semantic version
    pub version: String,
    pub description: Option<String>,
    /// Root of all generated output
    #[serde(default = "default_output_dir")]
    pub output_directory: String,
}

/// [targets] section
///
/// Only `python` is interpreted here; other targets are kept as raw tables
/// in declaration order so they survive a load/save cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsSection {
    #[serde(default)]
    pub python: Option<PythonTarget>,
    #[serde(flatten)]
    pub other: IndexMap<String, toml::Value>,
}

/// [targets.python] section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonTarget {
    /// Directory under the output directory holding the package sources
    #[serde(default = "default_source_dir")]
    pub source_directory: String,
    /// Spaces per indentation level
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    /// Name of the compiled assembly archive loaded by the root module
    #[serde(default)]
    pub payload: Option<String>,
}

impl Default for PythonTarget {
    fn default() -> Self {
        Self {
            source_directory: default_source_dir(),
            indent_width: default_indent_width(),
            payload: None,
        }
    }
}

pub(crate) fn default_source_dir() -> String {
    "src".to_string()
}

pub(crate) fn default_output_dir() -> String {
    "dist/python".to_string()
}

pub(crate) fn default_indent_width() -> usize {
    4
}

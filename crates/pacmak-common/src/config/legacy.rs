use super::model::{PacmakConfig, PythonTarget, default_output_dir};
use super::model::{default_indent_width, default_source_dir};
use serde::{Deserialize, Serialize};

/// Legacy `package.json` configuration, read from its `jsii` block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPackageJson {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    #[serde(default)]
    pub jsii: LegacyJsiiSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyJsiiSection {
    pub outdir: Option<String>,
    #[serde(default)]
    pub targets: LegacyTargets,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyTargets {
    pub python: Option<LegacyPythonTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPythonTarget {
    #[serde(default = "default_source_dir")]
    pub source_directory: String,
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    pub payload: Option<String>,
}

impl From<LegacyPackageJson> for PacmakConfig {
    fn from(legacy: LegacyPackageJson) -> Self {
        let mut config = PacmakConfig::new(legacy.name, legacy.version);
        config.project.description = legacy.description;
        // jsii.outdir names the root shared by every target
        config.project.output_directory = legacy
            .jsii
            .outdir
            .map(|dir| format!("{}/python", dir.trim_end_matches('/')))
            .unwrap_or_else(default_output_dir);
        config.targets.python = legacy.jsii.targets.python.map(|py| PythonTarget {
            source_directory: py.source_directory,
            indent_width: py.indent_width,
            payload: py.payload,
        });
        config
    }
}

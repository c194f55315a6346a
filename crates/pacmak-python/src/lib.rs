//! Python binding emitter.
//!
//! Lowers an [`Assembly`] into Python source that forwards every call to the
//! jsii runtime. Generation happens entirely in memory: the assembly is
//! walked once to index its data structs, walked again to build one module
//! per namespace, and only when every module rendered cleanly is anything
//! handed to a [`Vfs`].
//!
//! ```text
//! Assembly ──► StructRegistry ──► ForestBuilder ──► sort ──► render ──► files
//! ```

pub mod builder;
pub mod error;
pub mod forward;
pub mod lifting;
pub mod model;
pub mod module;
pub mod naming;
pub mod sort;
pub mod types;
pub mod writer;

pub use error::{EmitError, Result};

use builder::ForestBuilder;
use lifting::StructRegistry;
use module::AssemblyLoad;
use naming::{module_file_path, to_python_module};
use pacmak_assembly::Assembly;
use pacmak_assembly::traversal::Visitor;
use pacmak_common::config::PacmakConfig;
use pacmak_common::vfs::Vfs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Knobs of the Python target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonOptions {
    /// Root of the generated package, relative to the project directory
    pub output_directory: PathBuf,
    /// Directory, relative to the output directory, holding the packages
    pub source_directory: PathBuf,
    pub indent_width: usize,
    /// Archive name loaded by the root module; derived from the assembly
    /// name and version when unset
    pub payload: Option<String>,
}

impl Default for PythonOptions {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("dist/python"),
            source_directory: PathBuf::from("src"),
            indent_width: 4,
            payload: None,
        }
    }
}

impl PythonOptions {
    pub fn from_config(config: &PacmakConfig) -> Self {
        let target = config.python();
        Self {
            output_directory: PathBuf::from(&config.project.output_directory),
            source_directory: PathBuf::from(target.source_directory),
            indent_width: target.indent_width,
            payload: target.payload,
        }
    }
}

/// One emitted file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct PythonGenerator {
    options: PythonOptions,
}

impl PythonGenerator {
    pub fn new(options: PythonOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PythonOptions {
        &self.options
    }

    /// Emit every module of `assembly`, plus empty package markers for
    /// intermediate path segments, sorted by path.
    pub fn generate(&self, assembly: &Assembly) -> Result<Vec<GeneratedFile>> {
        let root = assembly.root_namespace()?;
        let registry = StructRegistry::build(assembly)?;

        let load = AssemblyLoad::new(
            &assembly.name,
            &assembly.version,
            self.options.payload.as_deref(),
        );
        let mut builder = ForestBuilder::new(
            &registry,
            self.options.source_directory.clone(),
            self.options.indent_width,
            load,
        );
        builder.traverse(assembly)?;
        let mut files = builder.into_files();

        for marker in package_markers(&to_python_module(&root.name)) {
            files.push(GeneratedFile {
                path: module_file_path(&self.options.source_directory, &marker),
                content: String::new(),
            });
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            assembly = %assembly.name,
            version = %assembly.version,
            structs = registry.len(),
            files = files.len(),
            "generated python bindings"
        );
        Ok(files)
    }

    /// Generate, then write everything under the output directory of the
    /// project at `project_dir`. Nothing is written when generation fails.
    pub fn write_to(
        &self,
        vfs: &impl Vfs,
        project_dir: &Path,
        assembly: &Assembly,
    ) -> Result<Vec<PathBuf>> {
        let files = self.generate(assembly)?;
        let out_dir = project_dir.join(&self.options.output_directory);
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            let path = out_dir.join(&file.path);
            vfs.write_from_string(&path, &file.content)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Proper prefixes of the root module path. Every module descends from the
/// root, so none of these is a module itself.
fn package_markers(root_module: &str) -> Vec<String> {
    let segments: Vec<&str> = root_module.split('.').collect();
    (1..segments.len())
        .map(|n| segments[..n].join("."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("jsii_calc", &[])]
    #[case("scope.jsii_calc_lib", &["scope"])]
    #[case("a.b.c", &["a", "a.b"])]
    fn test_package_markers(#[case] root: &str, #[case] expected: &[&str]) {
        assert_eq!(package_markers(root), expected);
    }

    #[test]
    fn test_options_from_config() {
        let mut config = PacmakConfig::new("jsii-calc", "1.0.0");
        assert_eq!(PythonOptions::from_config(&config), PythonOptions::default());

        config.targets.python = Some(pacmak_common::config::PythonTarget {
            source_directory: "pkg".into(),
            indent_width: 2,
            payload: Some("calc.tgz".into()),
        });
        config.project.output_directory = "build/py".into();
        let options = PythonOptions::from_config(&config);
        assert_eq!(options.output_directory, PathBuf::from("build/py"));
        assert_eq!(options.source_directory, PathBuf::from("pkg"));
        assert_eq!(options.indent_width, 2);
        assert_eq!(options.payload.as_deref(), Some("calc.tgz"));
    }
}

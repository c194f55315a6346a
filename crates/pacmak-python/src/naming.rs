//! Identifier normalization.
//!
//! Maps assembly names to Python identifiers. Every function here is a pure
//! function of its input, so the same name is escaped identically wherever
//! it occurs.

use crate::error::{EmitError, Result};
use pacmak_assembly::{Fqn, Name};
use std::path::{Path, PathBuf};

/// Python keywords, which cannot be used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name)
}

/// Append `_` to a reserved word; anything else is returned unchanged.
pub fn escape(name: &str) -> String {
    if is_reserved(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Method, property and parameter names: `snake_case`, escaped.
pub fn to_python_identifier(name: &str) -> String {
    escape(&Name::from(name).to_snake_case())
}

/// Static immutable properties: `SCREAMING_SNAKE_CASE`, escaped.
pub fn to_python_constant(name: &str) -> String {
    escape(&Name::from(name).to_screaming_snake_case())
}

/// Type names keep their spelling.
pub fn to_python_type_name(name: &str) -> String {
    escape(name)
}

/// Python module name of an assembly namespace.
///
/// The scope marker is dropped and scope, package and submodule segments are
/// each snake-cased and escaped: `@scope/jsii-calc-lib` becomes
/// `scope.jsii_calc_lib`.
pub fn to_python_module(namespace: &str) -> String {
    let unscoped = namespace.strip_prefix('@').unwrap_or(namespace);
    unscoped
        .split(['/', '.'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| escape(&Name::from(segment).to_snake_case()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Source file of a module: `a.b` lives at `<source_dir>/a/b/__init__.py`.
pub fn module_file_path(source_dir: &Path, module: &str) -> PathBuf {
    let mut path = source_dir.to_path_buf();
    for segment in module.split('.') {
        path.push(segment);
    }
    path.push("__init__.py");
    path
}

/// A reference to a Python type: its module and the (possibly nested) type
/// path within that module, both already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PyRef {
    /// Assembly FQN the reference was derived from
    pub fqn: String,
    pub module: String,
    pub type_path: Vec<String>,
}

impl PyRef {
    /// Normalize an assembly FQN. Fails when the FQN does not follow the
    /// `<module-path>.<type-path>` grammar.
    pub fn from_fqn(fqn: &str) -> Result<Self> {
        let parsed = Fqn::parse(fqn).ok_or_else(|| EmitError::InvalidReference {
            fqn: fqn.to_string(),
        })?;
        Ok(Self {
            fqn: fqn.to_string(),
            module: to_python_module(&parsed.module()),
            type_path: parsed
                .type_path
                .iter()
                .map(|segment| to_python_type_name(segment))
                .collect(),
        })
    }

    /// The type path joined with dots, without the module.
    pub fn local_name(&self) -> String {
        self.type_path.join(".")
    }

    pub fn is_nested(&self) -> bool {
        self.type_path.len() > 1
    }

    /// Fully qualified Python name.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.module, self.local_name())
    }
}

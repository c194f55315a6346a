use super::types::TypeDeclaration;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The complete API description of one library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

/// A namespace and the types it declares.
///
/// `name` is the full module path as it appears in type FQNs
/// (`jsii-calc.submodule`), so child namespaces repeat their parent's prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<Namespace>,
}

impl Assembly {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            namespaces: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The single top-level namespace, which must carry the assembly's name.
    pub fn root_namespace(&self) -> Result<&Namespace> {
        match self.namespaces.as_slice() {
            [root] if root.name == self.name => Ok(root),
            [root] => Err(Error::InvalidAssembly(format!(
                "root namespace '{}' does not match assembly '{}'",
                root.name, self.name
            ))),
            [] => Err(Error::InvalidAssembly(format!(
                "assembly '{}' has no root namespace",
                self.name
            ))),
            many => Err(Error::InvalidAssembly(format!(
                "assembly '{}' has {} root namespaces, expected exactly one",
                self.name,
                many.len()
            ))),
        }
    }
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, decl: TypeDeclaration) -> Self {
        self.types.push(decl);
        self
    }

    pub fn with_namespace(mut self, child: Namespace) -> Self {
        self.namespaces.push(child);
        self
    }
}

//! Rendering of one Python module file.

use crate::error::Result;
use crate::lifting::StructRegistry;
use crate::model::{Declaration, EmitContext};
use crate::sort::sort_declarations;
use crate::writer::CodeWriter;
use std::collections::BTreeSet;
use tracing::debug;

const HEADER: &[&str] = &[
    "import abc",
    "import datetime",
    "import enum",
    "import typing",
    "",
    "import jsii",
    "import jsii.compat",
    "import publication",
    "",
    "from jsii.python import classproperty",
];

/// What the root module loads at import time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyLoad {
    pub name: String,
    pub version: String,
    pub payload: String,
}

impl AssemblyLoad {
    pub fn new(name: &str, version: &str, payload: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            payload: payload
                .map(str::to_string)
                .unwrap_or_else(|| default_payload(name, version)),
        }
    }
}

/// `<name>@<version>.jsii.tgz`, with the scope marker dropped and the scope
/// separator flattened so the name is a single path segment.
pub fn default_payload(name: &str, version: &str) -> String {
    let flat = name.trim_start_matches('@').replace('/', "-");
    format!("{flat}@{version}.jsii.tgz")
}

/// A Python module being assembled while its namespace is open.
#[derive(Debug)]
pub struct PyModule {
    pub name: String,
    pub declarations: Vec<Declaration>,
    /// Local names of child modules
    pub submodules: Vec<String>,
    /// Set on the root module only
    pub assembly: Option<AssemblyLoad>,
}

impl PyModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            submodules: Vec::new(),
            assembly: None,
        }
    }

    pub fn root(name: impl Into<String>, assembly: AssemblyLoad) -> Self {
        Self {
            assembly: Some(assembly),
            ..Self::new(name)
        }
    }

    pub fn is_root(&self) -> bool {
        self.assembly.is_some()
    }

    /// Sort the declarations and render the module source.
    pub fn render(self, registry: &StructRegistry, indent_width: usize) -> Result<String> {
        let declarations = sort_declarations(&self.name, self.declarations)?;
        let ctx = EmitContext {
            module: &self.name,
            registry,
        };

        let mut imports = BTreeSet::new();
        for decl in &declarations {
            decl.collect_modules(&ctx, &mut imports);
        }

        let mut w = CodeWriter::new(indent_width);
        for line in HEADER {
            w.line(line);
        }
        if !imports.is_empty() {
            w.blank();
            for module in &imports {
                w.line(format!("import {module}"));
            }
        }
        if let Some(load) = &self.assembly {
            w.blank();
            w.line(format!(
                "__jsii_assembly__ = jsii.JSIIAssembly.load(\"{}\", \"{}\", __name__, \"{}\")",
                load.name, load.version, load.payload
            ));
        }

        for decl in &declarations {
            w.blank();
            w.blank();
            decl.emit(&mut w, &ctx);
        }

        if !self.submodules.is_empty() {
            w.blank();
            w.blank();
            for sub in &self.submodules {
                w.line(format!("from . import {sub}"));
            }
        }

        let mut exports: Vec<String> = declarations.iter().map(Declaration::name).collect();
        exports.extend(self.submodules.iter().cloned());
        exports.sort();
        let quoted: Vec<String> = exports.iter().map(|e| format!("\"{e}\"")).collect();
        w.blank();
        w.blank();
        w.line(format!("__all__ = [{}]", quoted.join(", ")));
        w.blank();
        w.line("publication.publish()");

        debug!(
            module = %self.name,
            declarations = declarations.len(),
            imports = imports.len(),
            "rendered module"
        );
        Ok(w.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PyEnum, PyInterface};
    use pacmak_assembly::{EnumType, InterfaceType};

    #[test]
    fn test_default_payload() {
        assert_eq!(default_payload("jsii-calc", "1.0.0"), "jsii-calc@1.0.0.jsii.tgz");
        assert_eq!(
            default_payload("@scope/jsii-calc-lib", "0.7.8"),
            "scope-jsii-calc-lib@0.7.8.jsii.tgz"
        );
        assert_eq!(AssemblyLoad::new("a", "1", Some("x.tgz")).payload, "x.tgz");
    }

    #[test]
    fn test_root_module_layout() {
        let mut module = PyModule::root("lib", AssemblyLoad::new("lib", "1.0.0", None));
        let mut derived = InterfaceType::new("lib.IDerived", "IDerived");
        derived.interfaces = vec!["lib.IBase".into(), "dep.IOther".into()];
        module
            .declarations
            .push(Declaration::Interface(PyInterface::new(&derived).unwrap()));
        module.declarations.push(Declaration::Interface(
            PyInterface::new(&InterfaceType::new("lib.IBase", "IBase")).unwrap(),
        ));
        module.submodules.push("sub".into());

        let out = module.render(&StructRegistry::default(), 4).unwrap();
        assert_eq!(
            out,
            concat!(
                "import abc\n",
                "import datetime\n",
                "import enum\n",
                "import typing\n",
                "\n",
                "import jsii\n",
                "import jsii.compat\n",
                "import publication\n",
                "\n",
                "from jsii.python import classproperty\n",
                "\n",
                "import dep\n",
                "\n",
                "__jsii_assembly__ = jsii.JSIIAssembly.load(\"lib\", \"1.0.0\", __name__, \"lib@1.0.0.jsii.tgz\")\n",
                "\n",
                "\n",
                "@jsii.interface(jsii_type=\"lib.IBase\")\n",
                "class IBase(jsii.compat.Protocol):\n",
                "    pass\n",
                "\n",
                "\n",
                "@jsii.interface(jsii_type=\"lib.IDerived\")\n",
                "class IDerived(IBase, dep.IOther, jsii.compat.Protocol):\n",
                "    pass\n",
                "\n",
                "\n",
                "from . import sub\n",
                "\n",
                "\n",
                "__all__ = [\"IBase\", \"IDerived\", \"sub\"]\n",
                "\n",
                "publication.publish()\n",
            )
        );
    }

    #[test]
    fn test_submodule_has_no_assembly_load() {
        let mut module = PyModule::new("lib.sub");
        module.declarations.push(Declaration::Enum(
            PyEnum::new(&EnumType {
                fqn: "lib.sub.Color".into(),
                name: "Color".into(),
                ..Default::default()
            })
            .unwrap(),
        ));
        let out = module.render(&StructRegistry::default(), 4).unwrap();
        assert!(!out.contains("__jsii_assembly__"));
        assert!(out.contains("    pass\n\n\n__all__ = [\"Color\"]\n"));
    }
}

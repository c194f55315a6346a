//! Forest builder: turns the walker's callbacks into rendered modules.
//!
//! A module is pushed when its namespace opens and popped, sorted and
//! rendered when it closes. At most one declaration is open at a time; its
//! members are attached as the walker reaches them.

use crate::error::{EmitError, Result};
use crate::lifting::{StructField, StructRegistry};
use crate::model::{
    Declaration, Member, PyClass, PyDataStruct, PyEnum, PyEnumMember, PyInterface, PyMethod,
    PyProperty,
};
use crate::module::{AssemblyLoad, PyModule};
use crate::naming::{module_file_path, to_python_module};
use crate::GeneratedFile;
use pacmak_assembly::traversal::{Cursor, Visitor};
use pacmak_assembly::{
    ClassType, EnumMember, EnumType, Initializer, InterfaceType, Method, Namespace, Property,
};
use std::path::PathBuf;
use tracing::{debug, trace};

pub struct ForestBuilder<'a> {
    registry: &'a StructRegistry,
    source_directory: PathBuf,
    indent_width: usize,
    /// Loaded by the first (root) module
    root_load: Option<AssemblyLoad>,
    stack: Vec<PyModule>,
    current: Option<Declaration>,
    files: Vec<GeneratedFile>,
}

impl<'a> ForestBuilder<'a> {
    pub fn new(
        registry: &'a StructRegistry,
        source_directory: PathBuf,
        indent_width: usize,
        root_load: AssemblyLoad,
    ) -> Self {
        Self {
            registry,
            source_directory,
            indent_width,
            root_load: Some(root_load),
            stack: Vec::new(),
            current: None,
            files: Vec::new(),
        }
    }

    /// The rendered module files, in the order their namespaces closed.
    pub fn into_files(self) -> Vec<GeneratedFile> {
        self.files
    }

    fn module_name(&self) -> &str {
        self.stack.last().map(|m| m.name.as_str()).unwrap_or_default()
    }

    fn locate(&self, err: EmitError, declaration: &str) -> EmitError {
        err.located(self.module_name(), declaration)
    }

    fn open(&mut self, declaration: Result<Declaration>, name: &str) -> Result<()> {
        if let Some(open) = &self.current {
            return Err(EmitError::InvalidAssembly(format!(
                "'{}' declared while '{}' is still open",
                name,
                open.fqn()
            )));
        }
        let declaration = declaration.map_err(|e| self.locate(e, name))?;
        if declaration.module() != self.module_name() {
            return Err(EmitError::InvalidAssembly(format!(
                "'{}' is declared in namespace module '{}'",
                declaration.fqn(),
                self.module_name()
            )));
        }
        trace!(fqn = declaration.fqn(), "open declaration");
        self.current = Some(declaration);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let declaration = self
            .current
            .take()
            .ok_or_else(|| EmitError::InvalidAssembly("no open declaration".to_string()))?;
        let module = self.stack.last_mut().ok_or_else(|| {
            EmitError::InvalidAssembly(format!("'{}' is outside any namespace", declaration.fqn()))
        })?;
        module.declarations.push(declaration);
        Ok(())
    }

    fn current_mut(&mut self, member: &str) -> Result<&mut Declaration> {
        self.current.as_mut().ok_or_else(|| {
            EmitError::InvalidAssembly(format!("member '{member}' outside of a type"))
        })
    }

    fn add_member(&mut self, member: Member, wire_name: &str) -> Result<()> {
        let result = self.current_mut(wire_name)?.add_member(member);
        result.map_err(|e| self.locate_current(e))
    }

    fn locate_current(&self, err: EmitError) -> EmitError {
        let declaration = self
            .current
            .as_ref()
            .map(Declaration::name)
            .unwrap_or_default();
        self.locate(err, &declaration)
    }
}

impl Visitor for ForestBuilder<'_> {
    type Error = EmitError;

    fn begin_namespace(&mut self, _cursor: &mut Cursor, namespace: &Namespace) -> Result<()> {
        let name = to_python_module(&namespace.name);
        let module = match self.stack.last_mut() {
            None => {
                let load = self.root_load.take().ok_or_else(|| {
                    EmitError::InvalidAssembly(format!(
                        "namespace '{}' is a second root",
                        namespace.name
                    ))
                })?;
                PyModule::root(name, load)
            }
            Some(parent) => {
                let local = name
                    .strip_prefix(parent.name.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
                    .filter(|rest| !rest.is_empty() && !rest.contains('.'))
                    .ok_or_else(|| {
                        EmitError::InvalidAssembly(format!(
                            "namespace '{}' is not a direct child of module '{}'",
                            namespace.name, parent.name
                        ))
                    })?;
                parent.submodules.push(local.to_string());
                PyModule::new(name)
            }
        };
        self.stack.push(module);
        Ok(())
    }

    fn end_namespace(&mut self, _cursor: &mut Cursor, namespace: &Namespace) -> Result<()> {
        let module = self.stack.pop().ok_or_else(|| {
            EmitError::InvalidAssembly(format!("namespace '{}' closed twice", namespace.name))
        })?;
        let path = module_file_path(&self.source_directory, &module.name);
        let content = module.render(self.registry, self.indent_width)?;
        debug!(path = %path.display(), "emitted module");
        self.files.push(GeneratedFile { path, content });
        Ok(())
    }

    fn begin_class(&mut self, _cursor: &mut Cursor, class: &ClassType) -> Result<()> {
        self.open(PyClass::new(class).map(Declaration::Class), &class.name)
    }

    fn end_class(&mut self, _cursor: &mut Cursor, _class: &ClassType) -> Result<()> {
        self.close()
    }

    fn begin_interface(&mut self, _cursor: &mut Cursor, iface: &InterfaceType) -> Result<()> {
        let declaration = if iface.datatype {
            PyDataStruct::new(iface).map(Declaration::DataStruct)
        } else {
            PyInterface::new(iface).map(Declaration::Interface)
        };
        self.open(declaration, &iface.name)
    }

    fn end_interface(&mut self, _cursor: &mut Cursor, _iface: &InterfaceType) -> Result<()> {
        self.close()
    }

    fn begin_enum(&mut self, _cursor: &mut Cursor, enum_type: &EnumType) -> Result<()> {
        self.open(PyEnum::new(enum_type).map(Declaration::Enum), &enum_type.name)
    }

    fn end_enum(&mut self, _cursor: &mut Cursor, _enum_type: &EnumType) -> Result<()> {
        self.close()
    }

    fn visit_initializer(&mut self, cursor: &mut Cursor, initializer: &Initializer) -> Result<()> {
        let method = PyMethod::from_initializer(initializer, self.registry, &cursor.location())
            .map_err(|e| self.locate_current(e))?;
        if let Some(lifted) = &method.lifted {
            debug!(location = %cursor.location(), lifted = %lifted.fqn, "lifted initializer");
        }
        self.add_member(Member::Method(method), "<initializer>")
    }

    fn visit_method(&mut self, cursor: &mut Cursor, method: &Method) -> Result<()> {
        let converted = PyMethod::from_method(method, self.registry, &cursor.location())
            .map_err(|e| self.locate_current(e))?;
        if let Some(lifted) = &converted.lifted {
            debug!(location = %cursor.location(), lifted = %lifted.fqn, "lifted method");
        }
        self.add_member(Member::Method(converted), &method.name)
    }

    fn visit_method_overload(&mut self, cursor: &mut Cursor, method: &Method) -> Result<()> {
        Err(EmitError::unsupported(
            format!("overloaded method '{}'", method.name),
            cursor.location(),
        ))
    }

    fn visit_property(&mut self, _cursor: &mut Cursor, property: &Property) -> Result<()> {
        if matches!(self.current_mut(&property.name)?, Declaration::DataStruct(_)) {
            let field =
                StructField::from_property(property).map_err(|e| self.locate_current(e))?;
            if let Some(Declaration::DataStruct(data)) = self.current.as_mut() {
                data.fields.push(field);
            }
            return Ok(());
        }
        let converted = PyProperty::from_property(property).map_err(|e| self.locate_current(e))?;
        self.add_member(Member::Property(converted), &property.name)
    }

    fn visit_union_property(&mut self, cursor: &mut Cursor, property: &Property) -> Result<()> {
        Err(EmitError::unsupported(
            format!("property '{}' of union type", property.name),
            cursor.location(),
        ))
    }

    fn visit_enum_member(&mut self, _cursor: &mut Cursor, member: &EnumMember) -> Result<()> {
        self.add_member(
            Member::EnumMember(PyEnumMember::from_member(member)),
            &member.name,
        )
    }
}

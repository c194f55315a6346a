//! Argument lifting.
//!
//! A callable whose last parameter is a data struct takes the struct's fields
//! as keyword-only parameters instead. The call site rebuilds the struct as a
//! dictionary literal and passes it where the original parameter went.

use crate::error::{EmitError, Result};
use crate::forward::RefScope;
use crate::naming::{PyRef, escape, to_python_identifier};
use crate::types::{PyType, map_type_unwrapped};
use crate::writer::CodeWriter;
use indexmap::{IndexMap, IndexSet};
use pacmak_assembly::traversal::{Cursor, Visitor};
use pacmak_assembly::{Assembly, InterfaceType, Property};
use std::collections::BTreeSet;

/// One field of a data struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// Name used by the runtime
    pub wire_name: String,
    /// Attribute name in the `TypedDict` body; the wire name, escaped only
    /// when reserved
    pub attribute: String,
    /// Keyword parameter name when lifted
    pub param_name: String,
    /// Field type without the optional wrapper
    pub ty: PyType,
    pub optional: bool,
    pub docs: Option<String>,
}

impl StructField {
    pub fn from_property(property: &Property) -> Result<Self> {
        Ok(Self {
            wire_name: property.name.clone(),
            attribute: escape(&property.name),
            param_name: to_python_identifier(&property.name),
            ty: map_type_unwrapped(&property.type_ref)?,
            optional: property.type_ref.optional,
            docs: property.docs.as_ref().and_then(|d| d.summary.clone()),
        })
    }

    /// Keyword parameter declaration, `name: T` or `name: typing.Optional[T]=None`.
    pub fn keyword_parameter(&self, scope: &RefScope<'_>) -> String {
        if self.optional {
            let ty = PyType::Optional(Box::new(self.ty.clone()));
            format!("{}: {}=None", self.param_name, ty.render(scope))
        } else {
            format!("{}: {}", self.param_name, self.ty.render(scope))
        }
    }
}

/// A data struct as seen by the registry.
#[derive(Debug, Clone)]
pub struct StructEntry {
    pub fqn: String,
    pub reference: PyRef,
    /// FQNs of the struct's base interfaces
    pub bases: Vec<String>,
    pub fields: Vec<StructField>,
}

/// Every data struct of an assembly, by FQN.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    entries: IndexMap<String, StructEntry>,
}

impl StructRegistry {
    /// Walk the assembly once and record every data-type interface.
    pub fn build(assembly: &Assembly) -> Result<Self> {
        let mut builder = RegistryBuilder::default();
        builder.traverse(assembly)?;
        Ok(builder.registry)
    }

    pub fn insert(&mut self, entry: StructEntry) {
        self.entries.insert(entry.fqn.clone(), entry);
    }

    pub fn get(&self, fqn: &str) -> Option<&StructEntry> {
        self.entries.get(fqn)
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.entries.contains_key(fqn)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fields of a struct: those inherited from registered bases first (in
    /// base order), then its own. A field redeclared further down keeps its
    /// first position.
    pub fn all_fields(&self, fqn: &str) -> Vec<&StructField> {
        let mut seen = IndexSet::new();
        let mut fields = Vec::new();
        self.collect_fields(fqn, &mut seen, &mut fields);
        fields
    }

    /// Fields in keyword-parameter order: required, then optional, each in
    /// [`StructRegistry::all_fields`] order.
    pub fn lifted_parameters(&self, fqn: &str) -> Vec<&StructField> {
        let (required, optional): (Vec<_>, Vec<_>) =
            self.all_fields(fqn).into_iter().partition(|f| !f.optional);
        required.into_iter().chain(optional).collect()
    }

    fn collect_fields<'a>(
        &'a self,
        fqn: &str,
        visited: &mut IndexSet<String>,
        out: &mut Vec<&'a StructField>,
    ) {
        if !visited.insert(fqn.to_string()) {
            return;
        }
        let Some(entry) = self.entries.get(fqn) else {
            return;
        };
        for base in &entry.bases {
            self.collect_fields(base, visited, out);
        }
        for field in &entry.fields {
            if !out.iter().any(|f| f.wire_name == field.wire_name) {
                out.push(field);
            }
        }
    }
}

#[derive(Default)]
struct RegistryBuilder {
    registry: StructRegistry,
    current: Option<StructEntry>,
}

impl Visitor for RegistryBuilder {
    type Error = EmitError;

    fn begin_interface(&mut self, _cursor: &mut Cursor, iface: &InterfaceType) -> Result<()> {
        if iface.datatype {
            self.current = Some(StructEntry {
                fqn: iface.fqn.clone(),
                reference: PyRef::from_fqn(&iface.fqn)?,
                bases: iface.interfaces.clone(),
                fields: Vec::new(),
            });
        }
        Ok(())
    }

    fn visit_property(&mut self, _cursor: &mut Cursor, property: &Property) -> Result<()> {
        if let Some(entry) = self.current.as_mut() {
            let field = StructField::from_property(property).map_err(|e| {
                e.located(&entry.reference.module, &entry.reference.local_name())
            })?;
            entry.fields.push(field);
        }
        Ok(())
    }

    fn visit_union_property(&mut self, cursor: &mut Cursor, property: &Property) -> Result<()> {
        self.visit_property(cursor, property)
    }

    fn end_interface(&mut self, _cursor: &mut Cursor, _iface: &InterfaceType) -> Result<()> {
        if let Some(entry) = self.current.take() {
            self.registry.insert(entry);
        }
        Ok(())
    }
}

/// The trailing struct parameter a callable lifts into keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftedStruct {
    pub fqn: String,
    pub reference: PyRef,
    /// Python name of the dropped parameter
    pub parameter: String,
}

impl LiftedStruct {
    /// Keyword parameter declarations, in order.
    pub fn keyword_parameters(
        &self,
        registry: &StructRegistry,
        scope: &RefScope<'_>,
    ) -> Vec<String> {
        registry
            .lifted_parameters(&self.fqn)
            .iter()
            .map(|f| f.keyword_parameter(scope))
            .collect()
    }

    pub fn collect_modules(
        &self,
        registry: &StructRegistry,
        current: &str,
        out: &mut BTreeSet<String>,
    ) {
        if self.reference.module != current {
            out.insert(self.reference.module.clone());
        }
        for field in registry.all_fields(&self.fqn) {
            field.ty.collect_modules(current, out);
        }
    }

    /// Write the struct literal and return the expression to pass in place of
    /// the dropped parameter. `taken` holds every other parameter name of the
    /// callable.
    pub fn emit_literal(
        &self,
        w: &mut CodeWriter,
        registry: &StructRegistry,
        module: &str,
        taken: &[String],
    ) -> String {
        let fields = registry.lifted_parameters(&self.fqn);
        if fields.is_empty() {
            return "{}".to_string();
        }

        let variable = literal_variable(&self.parameter, taken);
        let required: Vec<String> = fields
            .iter()
            .filter(|f| !f.optional)
            .map(|f| format!("\"{}\": {}", f.wire_name, f.param_name))
            .collect();
        w.line(format!(
            "{variable}: {} = {{{}}}",
            RefScope::real(module).resolve(&self.reference),
            required.join(", ")
        ));
        for field in fields.iter().filter(|f| f.optional) {
            w.open_block(format!("if {} is not None:", field.param_name));
            w.line(format!("{variable}[\"{}\"] = {}", field.wire_name, field.param_name));
            w.close_block();
        }
        w.blank();
        variable
    }
}

/// The literal takes the parameter's name, suffixed with `_` until it is free.
pub fn literal_variable(parameter: &str, taken: &[String]) -> String {
    let mut name = parameter.to_string();
    while taken.iter().any(|t| *t == name) {
        name.push('_');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pacmak_assembly::{Namespace, PrimitiveKind, TypeDeclaration, TypeReference};

    fn prop(name: &str, kind: PrimitiveKind, optional: bool) -> Property {
        let mut t = TypeReference::primitive(kind);
        t.optional = optional;
        Property::new(name, t)
    }

    fn assembly() -> Assembly {
        let mut base = InterfaceType::data_type("lib.BaseProps", "BaseProps");
        base.properties.push(prop("debug", PrimitiveKind::Boolean, true));
        base.properties.push(prop("id", PrimitiveKind::String, false));

        let mut props = InterfaceType::data_type("lib.CalculatorProps", "CalculatorProps");
        props.interfaces.push("lib.BaseProps".into());
        props.properties.push(prop("name", PrimitiveKind::String, false));
        props.properties.push(prop("count", PrimitiveKind::Number, true));

        let behavior = InterfaceType::new("lib.IFriendly", "IFriendly");

        let mut asm = Assembly::new("lib", "1.0.0");
        asm.namespaces.push(
            Namespace::new("lib")
                .with_type(TypeDeclaration::Interface(base))
                .with_type(TypeDeclaration::Interface(props))
                .with_type(TypeDeclaration::Interface(behavior)),
        );
        asm
    }

    #[test]
    fn test_registry_holds_only_data_types() {
        let registry = StructRegistry::build(&assembly()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("lib.CalculatorProps"));
        assert!(!registry.contains("lib.IFriendly"));
    }

    #[test]
    fn test_inherited_fields_first_then_required_first() {
        let registry = StructRegistry::build(&assembly()).unwrap();
        let all: Vec<&str> = registry
            .all_fields("lib.CalculatorProps")
            .iter()
            .map(|f| f.wire_name.as_str())
            .collect();
        assert_eq!(all, vec!["debug", "id", "name", "count"]);

        let lifted: Vec<&str> = registry
            .lifted_parameters("lib.CalculatorProps")
            .iter()
            .map(|f| f.wire_name.as_str())
            .collect();
        assert_eq!(lifted, vec!["id", "name", "debug", "count"]);
    }

    #[test]
    fn test_keyword_parameters() {
        let registry = StructRegistry::build(&assembly()).unwrap();
        let lifted = LiftedStruct {
            fqn: "lib.BaseProps".into(),
            reference: PyRef::from_fqn("lib.BaseProps").unwrap(),
            parameter: "props".into(),
        };
        assert_eq!(
            lifted.keyword_parameters(&registry, &RefScope::quoted("lib")),
            vec!["id: str", "debug: typing.Optional[bool]=None"]
        );
    }

    #[test]
    fn test_literal_includes_optional_only_when_set() {
        let registry = StructRegistry::build(&assembly()).unwrap();
        let lifted = LiftedStruct {
            fqn: "lib.BaseProps".into(),
            reference: PyRef::from_fqn("lib.BaseProps").unwrap(),
            parameter: "props".into(),
        };
        let mut w = CodeWriter::new(4);
        let var = lifted.emit_literal(&mut w, &registry, "lib", &["id".into(), "debug".into()]);
        assert_eq!(var, "props");
        assert_eq!(
            w.finish(),
            "props: BaseProps = {\"id\": id}\nif debug is not None:\n    props[\"debug\"] = debug\n"
        );
    }

    #[test]
    fn test_literal_keys_keep_wire_names() {
        let mut opts = InterfaceType::data_type("lib.Opts", "Opts");
        opts.properties.push(prop("from", PrimitiveKind::String, false));
        opts.properties.push(prop("import", PrimitiveKind::Number, true));
        let mut asm = Assembly::new("lib", "1.0.0");
        asm.namespaces
            .push(Namespace::new("lib").with_type(TypeDeclaration::Interface(opts)));
        let registry = StructRegistry::build(&asm).unwrap();

        let field = &registry.all_fields("lib.Opts")[0];
        assert_eq!(field.attribute, "from_");
        assert_eq!(field.param_name, "from_");

        let lifted = LiftedStruct {
            fqn: "lib.Opts".into(),
            reference: PyRef::from_fqn("lib.Opts").unwrap(),
            parameter: "opts".into(),
        };
        let mut w = CodeWriter::new(4);
        lifted.emit_literal(&mut w, &registry, "lib", &["from_".into(), "import_".into()]);
        assert_eq!(
            w.finish(),
            "opts: Opts = {\"from\": from_}\nif import_ is not None:\n    opts[\"import\"] = import_\n"
        );
    }

    #[test]
    fn test_empty_struct_passes_empty_literal() {
        let mut registry = StructRegistry::default();
        registry.insert(StructEntry {
            fqn: "lib.Empty".into(),
            reference: PyRef::from_fqn("lib.Empty").unwrap(),
            bases: vec![],
            fields: vec![],
        });
        let lifted = LiftedStruct {
            fqn: "lib.Empty".into(),
            reference: PyRef::from_fqn("lib.Empty").unwrap(),
            parameter: "options".into(),
        };
        let mut w = CodeWriter::new(4);
        assert_eq!(lifted.emit_literal(&mut w, &registry, "lib", &[]), "{}");
        assert_eq!(w.finish(), "");
    }

    #[test]
    fn test_literal_variable_avoids_collisions() {
        assert_eq!(literal_variable("props", &[]), "props");
        assert_eq!(
            literal_variable("props", &["props".into(), "props_".into()]),
            "props__"
        );
    }

    #[test]
    fn test_base_cycle_terminates() {
        let mut registry = StructRegistry::default();
        for (fqn, base) in [("lib.A", "lib.B"), ("lib.B", "lib.A")] {
            registry.insert(StructEntry {
                fqn: fqn.into(),
                reference: PyRef::from_fqn(fqn).unwrap(),
                bases: vec![base.into()],
                fields: vec![
                    StructField::from_property(&prop("x", PrimitiveKind::Any, false)).unwrap(),
                ],
            });
        }
        assert_eq!(registry.all_fields("lib.A").len(), 1);
    }
}

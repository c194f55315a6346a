use super::{EmitContext, declared_reference, render_real, same_module_dependencies};
use crate::error::Result;
use crate::forward::RefScope;
use crate::lifting::StructField;
use crate::naming::PyRef;
use crate::writer::CodeWriter;
use indexmap::IndexSet;
use pacmak_assembly::InterfaceType;

/// How a struct's fields are laid out over `TypedDict` declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructShape {
    /// One declaration; `total=False` when every field is optional.
    Single { total: bool },
    /// An all-optional `_Name` base followed by the all-required `Name`.
    Split,
}

/// A data-type interface, rendered as a typed dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct PyDataStruct {
    pub reference: PyRef,
    pub bases: Vec<PyRef>,
    pub fields: Vec<StructField>,
    pub docs: Option<String>,
    pub depends_on: IndexSet<String>,
}

impl PyDataStruct {
    pub fn new(iface: &InterfaceType) -> Result<Self> {
        let reference = declared_reference(&iface.fqn)?;
        let bases = iface
            .interfaces
            .iter()
            .map(|fqn| PyRef::from_fqn(fqn))
            .collect::<Result<Vec<_>>>()?;
        let depends_on = same_module_dependencies(&reference, &bases);
        Ok(Self {
            reference,
            bases,
            fields: Vec::new(),
            docs: iface.docs.as_ref().and_then(|d| d.summary.clone()),
            depends_on,
        })
    }

    pub fn shape(&self) -> StructShape {
        let optional = self.fields.iter().filter(|f| f.optional).count();
        let required = self.fields.len() - optional;
        match (required, optional) {
            (0, 0) => StructShape::Single { total: true },
            (0, _) => StructShape::Single { total: false },
            (_, 0) => StructShape::Single { total: true },
            _ => StructShape::Split,
        }
    }

    pub fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>) {
        let name = self.reference.local_name();
        let bases = render_real(ctx.module, &self.bases);

        match self.shape() {
            StructShape::Single { total } => {
                let mut parents = bases.clone();
                parents.push("jsii.compat.TypedDict".to_string());
                if !total {
                    parents.push("total=False".to_string());
                }
                w.line(format!(
                    "@jsii.data_type(jsii_type=\"{}\", jsii_struct_bases=[{}])",
                    self.reference.fqn,
                    bases.join(", ")
                ));
                w.open_block(format!("class {name}({}):", parents.join(", ")));
                w.docstring(self.docs.as_deref());
                self.emit_fields(w, ctx, |_| true);
                w.close_block();
            }
            StructShape::Split => {
                let optionals = format!("_{name}");
                let mut parents = bases.clone();
                parents.push("jsii.compat.TypedDict".to_string());
                parents.push("total=False".to_string());
                w.line(format!(
                    "@jsii.data_type_optionals(jsii_struct_bases=[{}])",
                    bases.join(", ")
                ));
                w.open_block(format!("class {optionals}({}):", parents.join(", ")));
                self.emit_fields(w, ctx, |f| f.optional);
                w.close_block();
                w.blank();
                w.blank();

                w.line(format!(
                    "@jsii.data_type(jsii_type=\"{}\", jsii_struct_bases=[{optionals}])",
                    self.reference.fqn
                ));
                w.open_block(format!("class {name}({optionals}):"));
                w.docstring(self.docs.as_deref());
                self.emit_fields(w, ctx, |f| !f.optional);
                w.close_block();
            }
        }
    }

    fn emit_fields(
        &self,
        w: &mut CodeWriter,
        ctx: &EmitContext<'_>,
        include: impl Fn(&StructField) -> bool,
    ) {
        let scope = RefScope::quoted(ctx.module);
        for field in self.fields.iter().filter(|f| include(f)) {
            w.line(format!("{}: {}", field.attribute, field.ty.render(&scope)));
            w.docstring(field.docs.as_deref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifting::StructRegistry;
    use pacmak_assembly::{PrimitiveKind, Property, TypeReference};

    fn field(name: &str, t: TypeReference) -> StructField {
        StructField::from_property(&Property::new(name, t)).unwrap()
    }

    fn render(s: &PyDataStruct) -> String {
        let registry = StructRegistry::default();
        let ctx = EmitContext {
            module: "lib",
            registry: &registry,
        };
        let mut w = CodeWriter::new(4);
        s.emit(&mut w, &ctx);
        w.finish()
    }

    fn props() -> PyDataStruct {
        PyDataStruct::new(&InterfaceType::data_type("lib.Props", "Props")).unwrap()
    }

    #[test]
    fn test_mixed_fields_split_in_two() {
        let mut s = props();
        s.fields.push(field("name", TypeReference::primitive(PrimitiveKind::String)));
        s.fields.push(field("from", TypeReference::named("lib.Other")));
        s.fields.push(field(
            "count",
            TypeReference::primitive(PrimitiveKind::Number).optional(),
        ));
        assert_eq!(s.shape(), StructShape::Split);
        assert_eq!(
            render(&s),
            concat!(
                "@jsii.data_type_optionals(jsii_struct_bases=[])\n",
                "class _Props(jsii.compat.TypedDict, total=False):\n",
                "    count: jsii.Number\n",
                "\n",
                "\n",
                "@jsii.data_type(jsii_type=\"lib.Props\", jsii_struct_bases=[_Props])\n",
                "class Props(_Props):\n",
                "    name: str\n",
                "    from_: \"Other\"\n",
            )
        );
    }

    #[test]
    fn test_all_required_is_one_declaration() {
        let mut s = props();
        s.fields.push(field("a", TypeReference::primitive(PrimitiveKind::String)));
        s.fields.push(field("b", TypeReference::primitive(PrimitiveKind::String)));
        assert_eq!(s.shape(), StructShape::Single { total: true });
        let out = render(&s);
        assert_eq!(out.matches("class ").count(), 1);
        assert!(out.contains("class Props(jsii.compat.TypedDict):"));
    }

    #[test]
    fn test_all_optional_is_one_declaration() {
        let mut s = props();
        s.fields.push(field(
            "a",
            TypeReference::primitive(PrimitiveKind::String).optional(),
        ));
        assert_eq!(s.shape(), StructShape::Single { total: false });
        let out = render(&s);
        assert_eq!(out.matches("class ").count(), 1);
        assert!(out.contains("class Props(jsii.compat.TypedDict, total=False):"));
        assert!(out.contains("    a: str\n"));
    }

    #[test]
    fn test_struct_bases() {
        let mut ir = InterfaceType::data_type("lib.Derived", "Derived");
        ir.interfaces = vec!["lib.Base".into(), "@scope/base.BaseProps".into()];
        let s = PyDataStruct::new(&ir).unwrap();
        assert_eq!(s.depends_on.iter().collect::<Vec<_>>(), vec!["lib.Base"]);
        assert_eq!(
            render(&s),
            concat!(
                "@jsii.data_type(jsii_type=\"lib.Derived\", jsii_struct_bases=[Base, scope.base.BaseProps])\n",
                "class Derived(Base, scope.base.BaseProps, jsii.compat.TypedDict):\n",
                "    pass\n",
            )
        );
    }
}

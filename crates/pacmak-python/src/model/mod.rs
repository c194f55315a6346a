//! Declaration node model.
//!
//! One node per emitted top-level declaration. Each node owns its members,
//! knows which same-module declarations it must follow, and renders its own
//! text.

pub mod class;
pub mod data_struct;
pub mod enumeration;
pub mod interface;
pub mod member;

pub use class::PyClass;
pub use data_struct::{PyDataStruct, StructShape};
pub use enumeration::PyEnum;
pub use interface::PyInterface;
pub use member::{Member, MethodKind, Owner, PyEnumMember, PyMethod, PyParameter, PyProperty};

use crate::error::{EmitError, Result};
use crate::forward::RefScope;
use crate::lifting::StructRegistry;
use crate::naming::PyRef;
use crate::writer::CodeWriter;
use indexmap::IndexSet;
use std::collections::BTreeSet;

/// What every node needs while rendering.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Python module being emitted
    pub module: &'a str,
    pub registry: &'a StructRegistry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(PyClass),
    Interface(PyInterface),
    DataStruct(PyDataStruct),
    Enum(PyEnum),
}

impl Declaration {
    fn reference(&self) -> &PyRef {
        match self {
            Declaration::Class(c) => &c.reference,
            Declaration::Interface(i) => &i.reference,
            Declaration::DataStruct(s) => &s.reference,
            Declaration::Enum(e) => &e.reference,
        }
    }

    /// Python name of the declaration.
    pub fn name(&self) -> String {
        self.reference().local_name()
    }

    /// Assembly FQN of the declaration.
    pub fn fqn(&self) -> &str {
        &self.reference().fqn
    }

    pub fn module(&self) -> &str {
        &self.reference().module
    }

    /// FQNs of same-module declarations that must be emitted first.
    pub fn depends_on(&self) -> &IndexSet<String> {
        match self {
            Declaration::Class(c) => &c.depends_on,
            Declaration::Interface(i) => &i.depends_on,
            Declaration::DataStruct(s) => &s.depends_on,
            Declaration::Enum(e) => &e.depends_on,
        }
    }

    pub fn add_member(&mut self, member: Member) -> Result<()> {
        let fqn = self.fqn().to_string();
        match self {
            Declaration::Class(c) => c.members.push(member),
            Declaration::Interface(i) => i.members.push(member),
            Declaration::Enum(e) => match member {
                Member::EnumMember(m) => e.members.push(m),
                other => {
                    return Err(EmitError::unsupported(
                        format!("member '{}' on an enum", other.name()),
                        fqn,
                    ));
                }
            },
            Declaration::DataStruct(_) => {
                return Err(EmitError::unsupported(
                    format!("member '{}' on a data type", member.name()),
                    fqn,
                ));
            }
        }
        Ok(())
    }

    pub fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>) {
        match self {
            Declaration::Class(c) => c.emit(w, ctx),
            Declaration::Interface(i) => i.emit(w, ctx),
            Declaration::DataStruct(s) => s.emit(w, ctx),
            Declaration::Enum(e) => e.emit(w),
        }
    }

    /// Modules other than the current one this declaration mentions.
    pub fn collect_modules(&self, ctx: &EmitContext<'_>, out: &mut BTreeSet<String>) {
        let (bases, members): (Vec<&PyRef>, &[Member]) = match self {
            Declaration::Class(c) => (c.bases().collect(), c.members.as_slice()),
            Declaration::Interface(i) => (i.bases.iter().collect(), i.members.as_slice()),
            Declaration::DataStruct(s) => {
                for field in &s.fields {
                    field.ty.collect_modules(ctx.module, out);
                }
                (s.bases.iter().collect(), &[][..])
            }
            Declaration::Enum(_) => (Vec::new(), &[][..]),
        };
        for base in bases {
            if base.module != ctx.module {
                out.insert(base.module.clone());
            }
        }
        for member in members {
            member.collect_modules(ctx, out);
        }
    }
}

/// Reject declarations whose own FQN names a nested type.
pub(crate) fn declared_reference(fqn: &str) -> Result<PyRef> {
    let reference = PyRef::from_fqn(fqn)?;
    if reference.is_nested() {
        return Err(EmitError::unsupported("nested type declaration", fqn));
    }
    Ok(reference)
}

/// Bases that live in the declaration's own module, minus itself.
pub(crate) fn same_module_dependencies<'a>(
    own: &PyRef,
    bases: impl IntoIterator<Item = &'a PyRef>,
) -> IndexSet<String> {
    bases
        .into_iter()
        .filter(|base| base.module == own.module && base.fqn != own.fqn)
        .map(|base| base.fqn.clone())
        .collect()
}

/// `A, b.B` for class-definition positions.
pub(crate) fn render_real<'a>(
    module: &str,
    refs: impl IntoIterator<Item = &'a PyRef>,
) -> Vec<String> {
    let scope = RefScope::real(module);
    refs.into_iter().map(|r| scope.resolve(r)).collect()
}

/// Members separated by a blank line.
pub(crate) fn emit_members(
    w: &mut CodeWriter,
    ctx: &EmitContext<'_>,
    owner: Owner<'_>,
    members: &[Member],
) {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        member.emit(w, ctx, owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(fqn: &str) -> PyRef {
        PyRef::from_fqn(fqn).unwrap()
    }

    #[test]
    fn test_dependencies_filter_other_modules_and_self() {
        let own = r("lib.Derived");
        let bases = [r("lib.Base"), r("dep.Other"), r("lib.Derived"), r("lib_ext.X")];
        let deps = same_module_dependencies(&own, &bases);
        assert_eq!(deps.into_iter().collect::<Vec<_>>(), vec!["lib.Base"]);
    }

    #[test]
    fn test_nested_declaration_rejected() {
        assert!(declared_reference("lib.Top").is_ok());
        let err = declared_reference("lib.Outer.Inner").unwrap_err();
        assert!(matches!(err, EmitError::UnsupportedConstruct { location, .. } if location == "lib.Outer.Inner"));
    }

    #[test]
    fn test_data_type_rejects_members() {
        let mut decl = Declaration::DataStruct(PyDataStruct::new(
            &pacmak_assembly::InterfaceType::data_type("lib.Props", "Props"),
        )
        .unwrap());
        let member = Member::EnumMember(PyEnumMember::from_member(&pacmak_assembly::EnumMember::new("X")));
        assert!(decl.add_member(member).is_err());
    }
}

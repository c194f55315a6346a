use super::{
    EmitContext, Member, Owner, declared_reference, emit_members, render_real,
    same_module_dependencies,
};
use crate::error::Result;
use crate::naming::PyRef;
use crate::writer::CodeWriter;
use indexmap::IndexSet;
use pacmak_assembly::ClassType;

/// A class backed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct PyClass {
    pub reference: PyRef,
    pub base: Option<PyRef>,
    pub interfaces: Vec<PyRef>,
    pub is_abstract: bool,
    pub members: Vec<Member>,
    pub docs: Option<String>,
    pub depends_on: IndexSet<String>,
}

impl PyClass {
    pub fn new(class: &ClassType) -> Result<Self> {
        let reference = declared_reference(&class.fqn)?;
        let base = class.base.as_deref().map(PyRef::from_fqn).transpose()?;
        let interfaces = class
            .interfaces
            .iter()
            .map(|fqn| PyRef::from_fqn(fqn))
            .collect::<Result<Vec<_>>>()?;
        let depends_on = same_module_dependencies(&reference, base.iter().chain(&interfaces));
        Ok(Self {
            reference,
            base,
            interfaces,
            is_abstract: class.is_abstract,
            members: Vec::new(),
            docs: class.docs.as_ref().and_then(|d| d.summary.clone()),
            depends_on,
        })
    }

    /// Base class, then implemented interfaces.
    pub fn bases(&self) -> impl Iterator<Item = &PyRef> {
        self.base.iter().chain(&self.interfaces)
    }

    pub fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>) {
        if !self.interfaces.is_empty() {
            let interfaces = render_real(ctx.module, &self.interfaces);
            w.line(format!("@jsii.implements({})", interfaces.join(", ")));
        }

        let metaclass = if self.is_abstract {
            "jsii.JSIIAbstractClass"
        } else {
            "jsii.JSIIMeta"
        };
        let mut parents = render_real(ctx.module, &self.base);
        parents.push(format!(
            "metaclass={metaclass}, jsii_type=\"{}\"",
            self.reference.fqn
        ));

        w.open_block(format!(
            "class {}({}):",
            self.reference.local_name(),
            parents.join(", ")
        ));
        w.docstring(self.docs.as_deref());
        if self.docs.is_some() && !self.members.is_empty() {
            w.blank();
        }
        emit_members(w, ctx, Owner::Class(&self.reference), &self.members);
        w.close_block();
    }
}

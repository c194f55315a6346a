use super::{
    EmitContext, Member, Owner, declared_reference, emit_members, render_real,
    same_module_dependencies,
};
use crate::error::Result;
use crate::naming::PyRef;
use crate::writer::CodeWriter;
use indexmap::IndexSet;
use pacmak_assembly::InterfaceType;

/// A behavioral interface, rendered as a runtime protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct PyInterface {
    pub reference: PyRef,
    pub bases: Vec<PyRef>,
    pub members: Vec<Member>,
    pub docs: Option<String>,
    pub depends_on: IndexSet<String>,
}

impl PyInterface {
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
            members: Vec::new(),
            docs: iface.docs.as_ref().and_then(|d| d.summary.clone()),
            depends_on,
        })
    }

    pub fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>) {
        let mut parents = render_real(ctx.module, &self.bases);
        parents.push("jsii.compat.Protocol".to_string());

        w.line(format!("@jsii.interface(jsii_type=\"{}\")", self.reference.fqn));
        w.open_block(format!(
            "class {}({}):",
            self.reference.local_name(),
            parents.join(", ")
        ));
        w.docstring(self.docs.as_deref());
        if self.docs.is_some() && !self.members.is_empty() {
            w.blank();
        }
        emit_members(w, ctx, Owner::Interface, &self.members);
        w.close_block();
    }
}

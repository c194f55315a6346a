use super::{PyEnumMember, declared_reference};
use crate::error::Result;
use crate::naming::PyRef;
use crate::writer::CodeWriter;
use indexmap::IndexSet;
use pacmak_assembly::EnumType;

#[derive(Debug, Clone, PartialEq)]
pub struct PyEnum {
    pub reference: PyRef,
    pub members: Vec<PyEnumMember>,
    pub docs: Option<String>,
    /// Always empty; enums have no bases.
    pub depends_on: IndexSet<String>,
}

impl PyEnum {
    pub fn new(enum_type: &EnumType) -> Result<Self> {
        Ok(Self {
            reference: declared_reference(&enum_type.fqn)?,
            members: Vec::new(),
            docs: enum_type.docs.as_ref().and_then(|d| d.summary.clone()),
            depends_on: IndexSet::new(),
        })
    }

    pub fn emit(&self, w: &mut CodeWriter) {
        w.line(format!("@jsii.enum(jsii_type=\"{}\")", self.reference.fqn));
        w.open_block(format!("class {}(enum.Enum):", self.reference.local_name()));
        w.docstring(self.docs.as_deref());
        for member in &self.members {
            member.emit(w);
        }
        w.close_block();
    }
}

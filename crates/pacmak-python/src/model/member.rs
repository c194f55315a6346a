use super::EmitContext;
use crate::error::{EmitError, Result};
use crate::forward::RefScope;
use crate::lifting::{LiftedStruct, StructRegistry, literal_variable};
use crate::naming::{PyRef, escape, to_python_constant, to_python_identifier};
use crate::types::{NONE, PyType, map_return, map_type, map_type_unwrapped};
use crate::writer::CodeWriter;
use pacmak_assembly::{Docs, EnumMember, Initializer, Method, Parameter, Property, TypeKind};
use std::collections::BTreeSet;

/// The declaration a member is emitted into.
#[derive(Debug, Clone, Copy)]
pub enum Owner<'a> {
    /// A concrete or abstract class; members call into the runtime.
    Class(&'a PyRef),
    /// A behavioral interface; every member is a stub.
    Interface,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Method(PyMethod),
    Property(PyProperty),
    EnumMember(PyEnumMember),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Property(p) => &p.name,
            Member::EnumMember(e) => &e.name,
        }
    }

    pub fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>, owner: Owner<'_>) {
        match self {
            Member::Method(m) => m.emit(w, ctx, owner),
            Member::Property(p) => p.emit(w, ctx, owner),
            Member::EnumMember(e) => e.emit(w),
        }
    }

    pub fn collect_modules(&self, ctx: &EmitContext<'_>, out: &mut BTreeSet<String>) {
        match self {
            Member::Method(m) => m.collect_modules(ctx, out),
            Member::Property(p) => p.ty.collect_modules(ctx.module, out),
            Member::EnumMember(_) => {}
        }
    }
}

fn summary(docs: &Option<Docs>) -> Option<String> {
    docs.as_ref().and_then(|d| d.summary.clone())
}

#[derive(Debug, Clone, PartialEq)]
pub struct PyParameter {
    pub name: String,
    pub ty: PyType,
    pub variadic: bool,
}

impl PyParameter {
    fn declaration(&self, scope: &RefScope<'_>) -> String {
        let star = if self.variadic { "*" } else { "" };
        format!("{star}{}: {}", self.name, self.ty.render(scope))
    }

    fn argument(&self) -> String {
        if self.variadic {
            format!("*{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Initializer,
    Method,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PyMethod {
    /// Name the runtime knows the method by
    pub wire_name: String,
    pub name: String,
    pub kind: MethodKind,
    pub is_static: bool,
    pub is_abstract: bool,
    pub parameters: Vec<PyParameter>,
    pub returns: PyType,
    pub docs: Option<String>,
    pub lifted: Option<LiftedStruct>,
}

impl PyMethod {
    pub fn from_method(
        method: &Method,
        registry: &StructRegistry,
        location: &str,
    ) -> Result<Self> {
        let (parameters, lifted) = convert_parameters(&method.parameters, registry, location)?;
        Ok(Self {
            wire_name: method.name.clone(),
            name: to_python_identifier(&method.name),
            kind: MethodKind::Method,
            is_static: method.is_static,
            is_abstract: method.is_abstract,
            parameters,
            returns: map_return(method.returns.as_ref())?,
            docs: summary(&method.docs),
            lifted,
        })
    }

    pub fn from_initializer(
        initializer: &Initializer,
        registry: &StructRegistry,
        location: &str,
    ) -> Result<Self> {
        let (parameters, lifted) = convert_parameters(&initializer.parameters, registry, location)?;
        Ok(Self {
            wire_name: "<initializer>".to_string(),
            name: "__init__".to_string(),
            kind: MethodKind::Initializer,
            is_static: false,
            is_abstract: false,
            parameters,
            returns: NONE,
            docs: summary(&initializer.docs),
            lifted,
        })
    }

    fn signature(&self, ctx: &EmitContext<'_>) -> String {
        let scope = RefScope::quoted(ctx.module);
        let receiver = if self.is_static { "cls" } else { "self" };
        let mut parts = vec![receiver.to_string()];
        parts.extend(self.parameters.iter().map(|p| p.declaration(&scope)));
        if let Some(lifted) = &self.lifted {
            let keywords = lifted.keyword_parameters(ctx.registry, &scope);
            if !keywords.is_empty() {
                parts.push("*".to_string());
                parts.extend(keywords);
            }
        }
        format!(
            "def {}({}) -> {}:",
            self.name,
            parts.join(", "),
            self.returns.render(&scope)
        )
    }

    /// Names the call-site literal must not shadow.
    fn taken_names(&self, ctx: &EmitContext<'_>) -> Vec<String> {
        let mut taken: Vec<String> = self.parameters.iter().map(|p| p.name.clone()).collect();
        if let Some(lifted) = &self.lifted {
            taken.extend(
                ctx.registry
                    .lifted_parameters(&lifted.fqn)
                    .iter()
                    .map(|f| f.param_name.clone()),
            );
        }
        taken
    }

    fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>, owner: Owner<'_>) {
        let class = match owner {
            Owner::Class(class) => Some(class),
            Owner::Interface => None,
        };
        let stub = class.is_none() || self.is_abstract;

        if self.kind == MethodKind::Method {
            if self.is_static {
                w.line("@classmethod");
            }
            w.line(format!("@jsii.member(jsii_name=\"{}\")", self.wire_name));
            if class.is_some() && self.is_abstract {
                w.line("@abc.abstractmethod");
            }
        }
        w.open_block(self.signature(ctx));
        w.docstring(self.docs.as_deref());

        match class {
            Some(class) if !stub => self.emit_call(w, ctx, class),
            _ => w.line("..."),
        }
        w.close_block();
    }

    fn emit_call(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>, class: &PyRef) {
        let mut args: Vec<String> = self.parameters.iter().map(PyParameter::argument).collect();
        if let Some(lifted) = &self.lifted {
            let taken = self.taken_names(ctx);
            args.push(lifted.emit_literal(w, ctx.registry, ctx.module, &taken));
        }
        let args = args.join(", ");

        match (self.kind, self.is_static) {
            (MethodKind::Initializer, _) => {
                let class = RefScope::real(ctx.module).resolve(class);
                w.line(format!("jsii.create({class}, self, [{args}])"));
            }
            (MethodKind::Method, true) => {
                w.line(format!("return jsii.sinvoke(cls, \"{}\", [{args}])", self.wire_name));
            }
            (MethodKind::Method, false) => {
                w.line(format!("return jsii.invoke(self, \"{}\", [{args}])", self.wire_name));
            }
        }
    }

    fn collect_modules(&self, ctx: &EmitContext<'_>, out: &mut BTreeSet<String>) {
        for parameter in &self.parameters {
            parameter.ty.collect_modules(ctx.module, out);
        }
        self.returns.collect_modules(ctx.module, out);
        if let Some(lifted) = &self.lifted {
            lifted.collect_modules(ctx.registry, ctx.module, out);
        }
    }
}

/// Method receivers; no other parameter may take these names.
const RECEIVERS: [&str; 2] = ["self", "cls"];

/// Convert parameters, lifting a trailing data-struct parameter.
///
/// Keyword names are fixed by the struct's fields, so a positional parameter
/// whose name clashes with one of them (or with a receiver) is suffixed with
/// `_` until it is free. A field that would shadow the receiver cannot be
/// lifted at all.
fn convert_parameters(
    parameters: &[Parameter],
    registry: &StructRegistry,
    location: &str,
) -> Result<(Vec<PyParameter>, Option<LiftedStruct>)> {
    let last = parameters.len().saturating_sub(1);
    if let Some((index, p)) = parameters
        .iter()
        .enumerate()
        .find(|(i, p)| p.variadic && *i != last)
    {
        return Err(EmitError::unsupported(
            format!("variadic parameter '{}' at position {} is not last", p.name, index),
            location,
        ));
    }

    let lifted = parameters
        .last()
        .filter(|p| !p.variadic)
        .and_then(|p| match p.type_ref.kind() {
            Some(TypeKind::Named(fqn)) if registry.contains(fqn) => Some((p, fqn)),
            _ => None,
        })
        .map(|(p, fqn)| -> Result<LiftedStruct> {
            Ok(LiftedStruct {
                fqn: fqn.to_string(),
                reference: PyRef::from_fqn(fqn)?,
                parameter: to_python_identifier(&p.name),
            })
        })
        .transpose()?;

    let mut taken: Vec<String> = RECEIVERS.iter().map(|r| r.to_string()).collect();
    if let Some(lifted) = &lifted {
        for field in registry.lifted_parameters(&lifted.fqn) {
            if RECEIVERS.contains(&field.param_name.as_str()) {
                return Err(EmitError::unsupported(
                    format!(
                        "field '{}' of '{}' shadows the method receiver",
                        field.wire_name, lifted.fqn
                    ),
                    location,
                ));
            }
            taken.push(field.param_name.clone());
        }
    }

    let positional = if lifted.is_some() {
        &parameters[..last]
    } else {
        parameters
    };
    let mut converted = Vec::with_capacity(positional.len());
    for p in positional {
        let name = literal_variable(&to_python_identifier(&p.name), &taken);
        taken.push(name.clone());
        converted.push(PyParameter {
            name,
            // variadic element types are never optional
            ty: if p.variadic {
                map_type_unwrapped(&p.type_ref)?
            } else {
                map_type(&p.type_ref)?
            },
            variadic: p.variadic,
        });
    }
    Ok((converted, lifted))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PyProperty {
    pub wire_name: String,
    pub name: String,
    pub ty: PyType,
    pub is_static: bool,
    pub immutable: bool,
    pub is_abstract: bool,
    pub docs: Option<String>,
}

impl PyProperty {
    pub fn from_property(property: &Property) -> Result<Self> {
        let name = if property.is_const() {
            to_python_constant(&property.name)
        } else {
            to_python_identifier(&property.name)
        };
        Ok(Self {
            wire_name: property.name.clone(),
            name,
            ty: map_type(&property.type_ref)?,
            is_static: property.is_static,
            immutable: property.immutable,
            is_abstract: property.is_abstract,
            docs: summary(&property.docs),
        })
    }

    fn emit(&self, w: &mut CodeWriter, ctx: &EmitContext<'_>, owner: Owner<'_>) {
        let scope = RefScope::quoted(ctx.module);
        let ty = self.ty.render(&scope);
        let stub = matches!(owner, Owner::Interface) || (self.is_abstract && !self.is_static);
        let abstract_marker = matches!(owner, Owner::Class(_)) && stub;
        let receiver = if self.is_static { "cls" } else { "self" };

        w.line(if self.is_static { "@classproperty" } else { "@property" });
        w.line(format!("@jsii.member(jsii_name=\"{}\")", self.wire_name));
        if abstract_marker {
            w.line("@abc.abstractmethod");
        }
        w.open_block(format!("def {}({receiver}) -> {ty}:", self.name));
        w.docstring(self.docs.as_deref());
        if stub {
            w.line("...");
        } else if self.is_static {
            w.line(format!("return jsii.sget(cls, \"{}\")", self.wire_name));
        } else {
            w.line(format!("return jsii.get(self, \"{}\")", self.wire_name));
        }
        w.close_block();

        if self.immutable {
            return;
        }
        w.blank();
        w.line(format!("@{}.setter", self.name));
        if abstract_marker {
            w.line("@abc.abstractmethod");
        }
        w.open_block(format!("def {}({receiver}, value: {ty}):", self.name));
        if stub {
            w.line("...");
        } else if self.is_static {
            w.line(format!("return jsii.sset(cls, \"{}\", value)", self.wire_name));
        } else {
            w.line(format!("return jsii.set(self, \"{}\", value)", self.wire_name));
        }
        w.close_block();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PyEnumMember {
    pub wire_name: String,
    pub name: String,
    pub docs: Option<String>,
}

impl PyEnumMember {
    pub fn from_member(member: &EnumMember) -> Self {
        Self {
            wire_name: member.name.clone(),
            name: escape(&member.name),
            docs: summary(&member.docs),
        }
    }

    pub(crate) fn emit(&self, w: &mut CodeWriter) {
        w.line(format!("{} = \"{}\"", self.name, self.wire_name));
        w.docstring(self.docs.as_deref());
    }
}

//! Forward-reference resolution.
//!
//! Declarations are emitted in dependency order, but annotations may still
//! mention a type of the same module that is defined later (or the type being
//! defined). Python defers such annotations when they are written as string
//! literals, so same-module references in annotation position are quoted.
//! Positions evaluated at class-definition time (bases, decorators, the class
//! passed to `jsii.create`) need the real name and rely on sort order.

use crate::naming::PyRef;

/// How same-module references are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardRefs {
    /// Annotation position: quote same-module types.
    Quoted,
    /// Evaluated position: bare names.
    Real,
}

/// The module being emitted plus the rendering mode.
#[derive(Debug, Clone, Copy)]
pub struct RefScope<'a> {
    pub module: &'a str,
    pub mode: ForwardRefs,
}

impl<'a> RefScope<'a> {
    pub fn quoted(module: &'a str) -> Self {
        Self {
            module,
            mode: ForwardRefs::Quoted,
        }
    }

    pub fn real(module: &'a str) -> Self {
        Self {
            module,
            mode: ForwardRefs::Real,
        }
    }

    pub fn resolve(&self, reference: &PyRef) -> String {
        resolve(reference, self.module, self.mode)
    }
}

/// Render a reference as seen from `current_module`.
///
/// Module equality is exact: `jsii_calc` is not a prefix match for
/// `jsii_calc_lib`.
pub fn resolve(reference: &PyRef, current_module: &str, mode: ForwardRefs) -> String {
    if reference.module != current_module {
        return reference.qualified();
    }
    let local = reference.local_name();
    let deferrable = local.starts_with(|c: char| c.is_ascii_uppercase());
    if deferrable && mode == ForwardRefs::Quoted {
        format!("\"{local}\"")
    } else {
        local
    }
}

//! Dependency ordering of sibling declarations.

use crate::error::{EmitError, Result};
use crate::model::Declaration;
use indexmap::IndexSet;

/// Reorder the declarations of one module so that each follows everything in
/// its `depends_on`.
///
/// Each round scans the remaining declarations from the start and places the
/// first one whose dependencies are all placed, then restarts. Ties therefore
/// keep their input order. A round that places nothing means a cycle (or a
/// dependency on a declaration the module does not have).
pub fn sort_declarations(module: &str, declarations: Vec<Declaration>) -> Result<Vec<Declaration>> {
    let mut remaining = declarations;
    let mut placed: IndexSet<String> = IndexSet::new();
    let mut sorted = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let ready = remaining
            .iter()
            .position(|decl| decl.depends_on().iter().all(|dep| placed.contains(dep)));
        let Some(index) = ready else {
            return Err(EmitError::UnorderableDeclarations {
                module: module.to_string(),
                declarations: remaining.iter().map(|d| d.fqn().to_string()).collect(),
            });
        };
        let decl = remaining.remove(index);
        placed.insert(decl.fqn().to_string());
        sorted.push(decl);
    }
    Ok(sorted)
}

use crate::vfs::Vfs;
use anyhow::{Context, Result};
use pacmak_assembly::Assembly;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the assembly inside a compiled package directory.
pub const ASSEMBLY_FILE: &str = ".jsii";

/// Load an assembly from a JSON file, or from `<dir>/.jsii` when given a
/// package directory.
pub fn load_assembly(vfs: &impl Vfs, path: &Path) -> Result<Assembly> {
    let file = resolve_assembly_path(vfs, path);
    let content = vfs
        .read_to_string(&file)
        .with_context(|| format!("Failed to read assembly {}", file.display()))?;

    let assembly = Assembly::from_json(&content)
        .with_context(|| format!("Failed to parse assembly {}", file.display()))?;
    debug!(
        name = %assembly.name,
        version = %assembly.version,
        path = %file.display(),
        "loaded assembly"
    );
    Ok(assembly)
}

fn resolve_assembly_path(vfs: &impl Vfs, path: &Path) -> PathBuf {
    if vfs.is_dir(path) {
        path.join(ASSEMBLY_FILE)
    } else {
        path.to_path_buf()
    }
}

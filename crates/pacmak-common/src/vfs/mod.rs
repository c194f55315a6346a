use std::io::Result;
use std::path::Path;

/// Virtual File System trait
///
/// Abstraction over file system operations so that generated output can be
/// written to disk or kept in memory (for tests and dry runs).
///
/// # Contract
///
/// - **`exists(path)`**: `true` for a file OR a directory.
/// - **`is_dir(path)`**: `true` only for a directory. Implies `exists()`.
/// - **`read_to_string(path)`**: only succeeds for files.
/// - **`write_from_string(path, content)`**: creates parent directories as needed.
pub trait Vfs {
    /// Read a file to a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write a string to a file, overwriting it.
    fn write_from_string(&self, path: &Path, content: &str) -> Result<()>;

    /// Check if a path exists (file OR directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

// Re-export implementations
pub use memory::MemoryVfs;
pub use os::OsVfs;

mod memory;
mod os;

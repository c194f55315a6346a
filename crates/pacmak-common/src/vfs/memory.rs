use super::Vfs;
use std::collections::BTreeMap;
use std::io::{Error, ErrorKind, Result};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-Memory File System implementation
///
/// Directories exist implicitly as prefixes of stored files.
#[derive(Clone, Default, Debug)]
pub struct MemoryVfs {
    files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
}

impl MemoryVfs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in path.components() {
            if let Component::CurDir = component {
                continue;
            }
            normalized.push(component);
        }
        if normalized.as_os_str().is_empty() {
            return PathBuf::from(".");
        }
        normalized
    }

    fn is_root(path: &Path) -> bool {
        path == Path::new(".") || path == Path::new("/")
    }
}

impl Vfs for MemoryVfs {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = MemoryVfs::normalize_path(path);
        self.lock().get(&path).cloned().ok_or_else(|| {
            Error::new(ErrorKind::NotFound, format!("File not found: {:?}", path))
        })
    }

    fn write_from_string(&self, path: &Path, content: &str) -> Result<()> {
        let path = MemoryVfs::normalize_path(path);
        self.lock().insert(path, content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let normalized = MemoryVfs::normalize_path(path);
        let is_file = self.lock().contains_key(&normalized);
        is_file || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = MemoryVfs::normalize_path(path);
        let files = self.lock();
        if MemoryVfs::is_root(&path) {
            return !files.is_empty();
        }
        files.keys().any(|k| k.starts_with(&path) && k != &path)
    }
}

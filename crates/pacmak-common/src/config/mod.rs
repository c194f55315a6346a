//! Configuration module
//!
//! Handles loading of pacmak configuration files (pacmak.toml, and the
//! `jsii` block of a legacy package.json).

pub mod legacy;
pub mod model;

use self::legacy::LegacyPackageJson;
use crate::vfs::{OsVfs, Vfs};
use anyhow::{Context, bail};
use std::path::{Path, PathBuf};

pub use self::model::*;

pub const CONFIG_FILE: &str = "pacmak.toml";
pub const LEGACY_CONFIG_FILE: &str = "package.json";

impl PacmakConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> crate::Result<Self> {
        Self::load_from(&OsVfs, path)
    }

    /// Load configuration through a [`Vfs`]; the format follows the extension.
    pub fn load_from(vfs: &impl Vfs, path: &Path) -> crate::Result<Self> {
        let content = vfs
            .read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: PacmakConfig = if path.extension().is_some_and(|ext| ext == "json") {
            let legacy: LegacyPackageJson = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            legacy.into()
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        };
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Reject settings the emitter cannot honor.
    pub fn validate(&self) -> crate::Result<()> {
        if self.python().indent_width == 0 {
            bail!("targets.python.indent_width must be at least 1");
        }
        Ok(())
    }

    /// Find the configuration file of a project directory, preferring
    /// pacmak.toml over package.json.
    pub fn discover(vfs: &impl Vfs, dir: &Path) -> crate::Result<PathBuf> {
        for candidate in [CONFIG_FILE, LEGACY_CONFIG_FILE] {
            let path = dir.join(candidate);
            if vfs.exists(&path) {
                return Ok(path);
            }
        }
        bail!(
            "No {} or {} found in {}",
            CONFIG_FILE,
            LEGACY_CONFIG_FILE,
            dir.display()
        )
    }
}

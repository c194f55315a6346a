pub mod config;
pub mod loader;
pub mod vfs;

pub type Result<T> = anyhow::Result<T>;

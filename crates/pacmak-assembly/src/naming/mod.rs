pub mod fqn;
pub mod name;

// Re-export common types
pub use fqn::Fqn;
pub use name::Name;

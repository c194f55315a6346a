pub mod error;
pub mod ir;
pub mod naming;
pub mod traversal;

pub use error::{Error, Result};
pub use ir::{
    Assembly, ClassType, CollectionKind, Docs, EnumMember, EnumType, Initializer, InterfaceType,
    Method, Namespace, Parameter, PrimitiveKind, Property, TypeDeclaration, TypeKind,
    TypeReference,
};
pub use naming::{Fqn, Name};

// Re-export commonly used traversal items for convenience
pub mod visitor {
    pub use crate::traversal::*;
}

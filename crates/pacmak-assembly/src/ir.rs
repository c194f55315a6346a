//! Assembly IR.
//!
//! The language-neutral description of one library's public API, as handed
//! over by the front-end. Every type here deserializes from the assembly
//! JSON document; field names on the wire are camelCase.

pub mod assembly;
pub mod members;
pub mod type_ref;
pub mod types;

pub use assembly::{Assembly, Namespace};
pub use members::{Docs, EnumMember, Initializer, Method, Overload, Parameter, Property};
pub use type_ref::{
    CollectionKind, CollectionTypeReference, PrimitiveKind, TypeKind, TypeReference,
    UnionTypeReference,
};
pub use types::{ClassType, EnumType, InterfaceType, TypeDeclaration};

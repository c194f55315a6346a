//! Type references.
//!
//! On the wire a type reference is an object carrying exactly one of
//! `primitive`, `collection`, `fqn` or `union`, plus an independent
//! `optional` flag. [`TypeReference::kind`] gives the tagged view; a reference
//! with no tag set yields `None` and is reported by the consumer.

use serde::{Deserialize, Serialize};

/// A reference to a type, as found on parameters, return values and properties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReference {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primitive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionTypeReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union: Option<UnionTypeReference>,
}

/// `array` or `map` of a single element type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTypeReference {
    pub kind: String,
    pub element_type: Box<TypeReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionTypeReference {
    pub types: Vec<TypeReference>,
}

/// Borrowed, tagged view over a [`TypeReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'a> {
    Primitive(&'a str),
    Collection(&'a CollectionTypeReference),
    Named(&'a str),
    Union(&'a [TypeReference]),
}

/// Primitive kinds understood by every emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Date,
    Json,
    Number,
    String,
    Any,
}

impl PrimitiveKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "json" => Some(Self::Json),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Json => "json",
            Self::Number => "number",
            Self::String => "string",
            Self::Any => "any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Array,
    Map,
}

impl CollectionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "array" => Some(Self::Array),
            "map" => Some(Self::Map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::Map => "map",
        }
    }
}

impl TypeReference {
    /// The tag that is set, checked in primitive, collection, fqn, union order.
    pub fn kind(&self) -> Option<TypeKind<'_>> {
        if let Some(primitive) = &self.primitive {
            return Some(TypeKind::Primitive(primitive));
        }
        if let Some(collection) = &self.collection {
            return Some(TypeKind::Collection(collection));
        }
        if let Some(fqn) = &self.fqn {
            return Some(TypeKind::Named(fqn));
        }
        self.union.as_ref().map(|u| TypeKind::Union(&u.types))
    }

    pub fn is_union(&self) -> bool {
        matches!(self.kind(), Some(TypeKind::Union(_)))
    }

    /// Create a primitive reference
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self {
            primitive: Some(kind.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Create a reference to a named type
    pub fn named(fqn: impl Into<String>) -> Self {
        Self {
            fqn: Some(fqn.into()),
            ..Default::default()
        }
    }

    /// Create a collection reference
    pub fn collection(kind: CollectionKind, element: TypeReference) -> Self {
        Self {
            collection: Some(CollectionTypeReference {
                kind: kind.as_str().to_string(),
                element_type: Box::new(element),
            }),
            ..Default::default()
        }
    }

    pub fn array(element: TypeReference) -> Self {
        Self::collection(CollectionKind::Array, element)
    }

    pub fn map(element: TypeReference) -> Self {
        Self::collection(CollectionKind::Map, element)
    }

    /// Create a union reference
    pub fn union(types: Vec<TypeReference>) -> Self {
        Self {
            union: Some(UnionTypeReference { types }),
            ..Default::default()
        }
    }

    /// The same reference, marked optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

//! Error types for the Python emitter
//!
//! Every error is fatal for the assembly being emitted; nothing is written
//! once one is raised.

use thiserror::Error;

/// Result type alias for emitter operations
pub type Result<T> = std::result::Result<T, EmitError>;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("type reference has none of primitive, collection, fqn or union set")]
    MalformedTypeReference,

    #[error("invalid type reference '{fqn}'")]
    InvalidReference { fqn: String },

    #[error("unsupported type kind '{kind}'")]
    UnsupportedType { kind: String },

    #[error("cannot order declarations in module '{module}': {}", declarations.join(", "))]
    UnorderableDeclarations {
        module: String,
        declarations: Vec<String>,
    },

    #[error("unsupported construct at {location}: {construct}")]
    UnsupportedConstruct { construct: String, location: String },

    #[error("invalid assembly: {0}")]
    InvalidAssembly(String),

    #[error("{module}.{declaration}: {source}")]
    Located {
        module: String,
        declaration: String,
        source: Box<EmitError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    pub fn unsupported(construct: impl Into<String>, location: impl Into<String>) -> Self {
        EmitError::UnsupportedConstruct {
            construct: construct.into(),
            location: location.into(),
        }
    }

    /// Attach the module and declaration being emitted. Already located
    /// errors keep their innermost location.
    pub fn located(self, module: &str, declaration: &str) -> Self {
        match self {
            located @ EmitError::Located { .. } => located,
            other => EmitError::Located {
                module: module.to_string(),
                declaration: declaration.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error without any location wrapper.
    pub fn root(&self) -> &EmitError {
        match self {
            EmitError::Located { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<pacmak_assembly::Error> for EmitError {
    fn from(err: pacmak_assembly::Error) -> Self {
        match err {
            pacmak_assembly::Error::Io(io) => EmitError::Io(io),
            other => EmitError::InvalidAssembly(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_located_keeps_innermost() {
        let err = EmitError::MalformedTypeReference
            .located("lib", "Calc")
            .located("lib", "Outer");
        match &err {
            EmitError::Located { declaration, .. } => assert_eq!(declaration, "Calc"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(err.root(), EmitError::MalformedTypeReference));
    }

    #[test]
    fn test_unorderable_message_lists_declarations() {
        let err = EmitError::UnorderableDeclarations {
            module: "lib".into(),
            declarations: vec!["lib.A".into(), "lib.B".into()],
        };
        assert_eq!(
            err.to_string(),
            "cannot order declarations in module 'lib': lib.A, lib.B"
        );
    }
}

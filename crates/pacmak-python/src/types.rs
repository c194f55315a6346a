//! Type mapping from assembly type references to Python type expressions.

use crate::error::{EmitError, Result};
use crate::forward::RefScope;
use crate::naming::PyRef;
use pacmak_assembly::{CollectionKind, PrimitiveKind, TypeKind, TypeReference};
use std::collections::BTreeSet;

/// A Python type expression, rendered once the emitting module is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PyType {
    /// A fixed expression such as `str` or `jsii.Number`
    Builtin(&'static str),
    List(Box<PyType>),
    Mapping(Box<PyType>),
    Named(PyRef),
    Union(Vec<PyType>),
    Optional(Box<PyType>),
}

/// Rendered for callables without a return type.
pub const NONE: PyType = PyType::Builtin("None");

impl PyType {
    pub fn render(&self, scope: &RefScope<'_>) -> String {
        match self {
            PyType::Builtin(expr) => expr.to_string(),
            PyType::List(element) => format!("typing.List[{}]", element.render(scope)),
            PyType::Mapping(element) => format!("typing.Mapping[str, {}]", element.render(scope)),
            PyType::Named(reference) => scope.resolve(reference),
            PyType::Union(variants) => {
                let rendered: Vec<String> = variants.iter().map(|v| v.render(scope)).collect();
                format!("typing.Union[{}]", rendered.join(", "))
            }
            PyType::Optional(inner) => format!("typing.Optional[{}]", inner.render(scope)),
        }
    }

    /// Collect the modules other than `current` this type mentions.
    pub fn collect_modules(&self, current: &str, out: &mut BTreeSet<String>) {
        match self {
            PyType::Builtin(_) => {}
            PyType::List(inner) | PyType::Mapping(inner) | PyType::Optional(inner) => {
                inner.collect_modules(current, out)
            }
            PyType::Named(reference) => {
                if reference.module != current {
                    out.insert(reference.module.clone());
                }
            }
            PyType::Union(variants) => {
                for variant in variants {
                    variant.collect_modules(current, out);
                }
            }
        }
    }
}

/// Map a type reference, wrapping optional references in `typing.Optional`.
pub fn map_type(type_ref: &TypeReference) -> Result<PyType> {
    let mapped = map_type_unwrapped(type_ref)?;
    Ok(if type_ref.optional {
        PyType::Optional(Box::new(mapped))
    } else {
        mapped
    })
}

/// Map a type reference ignoring its top-level `optional` flag.
pub fn map_type_unwrapped(type_ref: &TypeReference) -> Result<PyType> {
    match type_ref.kind().ok_or(EmitError::MalformedTypeReference)? {
        TypeKind::Primitive(kind) => map_primitive(kind),
        TypeKind::Collection(collection) => {
            let element = Box::new(map_type(&collection.element_type)?);
            match CollectionKind::parse(&collection.kind) {
                Some(CollectionKind::Array) => Ok(PyType::List(element)),
                // map keys are always strings
                Some(CollectionKind::Map) => Ok(PyType::Mapping(element)),
                None => Err(EmitError::UnsupportedType {
                    kind: collection.kind.clone(),
                }),
            }
        }
        TypeKind::Named(fqn) => Ok(PyType::Named(PyRef::from_fqn(fqn)?)),
        TypeKind::Union(variants) => variants
            .iter()
            .map(map_type)
            .collect::<Result<Vec<_>>>()
            .map(PyType::Union),
    }
}

/// Map an optional return type; absent renders `None`.
pub fn map_return(returns: Option<&TypeReference>) -> Result<PyType> {
    returns.map_or(Ok(NONE), map_type)
}

fn map_primitive(kind: &str) -> Result<PyType> {
    let expr = match PrimitiveKind::parse(kind) {
        Some(PrimitiveKind::Boolean) => "bool",
        Some(PrimitiveKind::Date) => "datetime.datetime",
        Some(PrimitiveKind::Json) => "typing.Mapping[typing.Any, typing.Any]",
        Some(PrimitiveKind::Number) => "jsii.Number",
        Some(PrimitiveKind::String) => "str",
        Some(PrimitiveKind::Any) => "typing.Any",
        None => {
            return Err(EmitError::UnsupportedType {
                kind: kind.to_string(),
            });
        }
    };
    Ok(PyType::Builtin(expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn prim(kind: PrimitiveKind) -> TypeReference {
        TypeReference::primitive(kind)
    }

    fn render(type_ref: &TypeReference, module: &str) -> String {
        map_type(type_ref).unwrap().render(&RefScope::quoted(module))
    }

    #[rstest]
    #[case(PrimitiveKind::Boolean, "bool")]
    #[case(PrimitiveKind::Date, "datetime.datetime")]
    #[case(PrimitiveKind::Json, "typing.Mapping[typing.Any, typing.Any]")]
    #[case(PrimitiveKind::Number, "jsii.Number")]
    #[case(PrimitiveKind::String, "str")]
    #[case(PrimitiveKind::Any, "typing.Any")]
    fn test_primitives(#[case] kind: PrimitiveKind, #[case] expected: &str) {
        assert_eq!(render(&prim(kind), "lib"), expected);
    }

    #[test]
    fn test_optional_string() {
        let t = prim(PrimitiveKind::String).optional();
        assert_eq!(render(&t, "lib"), "typing.Optional[str]");
        assert_eq!(
            map_type_unwrapped(&t).unwrap().render(&RefScope::quoted("lib")),
            "str"
        );
    }

    #[test]
    fn test_map_of_same_module_type() {
        let t = TypeReference::map(TypeReference::named("ns.Foo"));
        assert_eq!(render(&t, "ns"), "typing.Mapping[str, \"Foo\"]");
        assert_eq!(render(&t, "other"), "typing.Mapping[str, ns.Foo]");
    }

    #[test]
    fn test_union_order_preserved() {
        let t = TypeReference::union(vec![prim(PrimitiveKind::Number), prim(PrimitiveKind::String)]);
        assert_eq!(render(&t, "lib"), "typing.Union[jsii.Number, str]");
    }

    #[test]
    fn test_list_of_optional_union() {
        let t = TypeReference::array(TypeReference::union(vec![
            TypeReference::named("lib.A"),
            TypeReference::named("dep.B"),
        ]))
        .optional();
        assert_eq!(
            render(&t, "lib"),
            "typing.Optional[typing.List[typing.Union[\"A\", dep.B]]]"
        );
    }

    #[test]
    fn test_collect_foreign_modules() {
        let t = TypeReference::union(vec![
            TypeReference::named("lib.A"),
            TypeReference::array(TypeReference::named("@scope/dep.B")),
        ]);
        let mut modules = BTreeSet::new();
        map_type(&t).unwrap().collect_modules("lib", &mut modules);
        assert_eq!(modules.into_iter().collect::<Vec<_>>(), vec!["scope.dep"]);
    }

    #[test]
    fn test_missing_return_is_none() {
        assert_eq!(map_return(None).unwrap().render(&RefScope::quoted("lib")), "None");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            map_type(&TypeReference::default()),
            Err(EmitError::MalformedTypeReference)
        ));

        let bigint = TypeReference {
            primitive: Some("bigint".into()),
            ..Default::default()
        };
        assert!(matches!(map_type(&bigint), Err(EmitError::UnsupportedType { kind }) if kind == "bigint"));

        let mut set = TypeReference::array(prim(PrimitiveKind::String));
        if let Some(c) = set.collection.as_mut() {
            c.kind = "set".into();
        }
        assert!(matches!(map_type(&set), Err(EmitError::UnsupportedType { kind }) if kind == "set"));

        assert!(matches!(
            map_type(&TypeReference::named("not a fqn")),
            Err(EmitError::InvalidReference { .. })
        ));
    }
}

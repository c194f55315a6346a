use super::members::{Docs, EnumMember, Initializer, Method, Property};
use serde::{Deserialize, Serialize};

/// A type declared by an assembly, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeDeclaration {
    Class(ClassType),
    Interface(InterfaceType),
    Enum(EnumType),
}

impl TypeDeclaration {
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Class(c) => &c.name,
            TypeDeclaration::Interface(i) => &i.name,
            TypeDeclaration::Enum(e) => &e.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassType {
    pub fqn: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<Docs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Initializer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, rename = "abstract", skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
}

impl ClassType {
    pub fn new(fqn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A behavioral interface, or a data type when `datatype` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceType {
    pub fqn: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<Docs>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub datatype: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl InterfaceType {
    pub fn new(fqn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            fqn: fqn.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn data_type(fqn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            datatype: true,
            ..Self::new(fqn, name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnumType {
    pub fqn: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<Docs>,
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_tagged_by_kind() {
        let json = r#"[
            { "kind": "class", "fqn": "lib.Calc", "name": "Calc", "base": "lib.Base", "interfaces": ["lib.IFriendly"] },
            { "kind": "interface", "fqn": "lib.Props", "name": "Props", "datatype": true },
            { "kind": "enum", "fqn": "lib.Color", "name": "Color", "members": [{ "name": "RED" }] }
        ]"#;
        let decls: Vec<TypeDeclaration> = serde_json::from_str(json).unwrap();
        assert_eq!(decls.len(), 3);
        assert_eq!(decls[2].name(), "Color");

        let TypeDeclaration::Class(class) = &decls[0] else {
            panic!("expected class");
        };
        assert_eq!(class.base.as_deref(), Some("lib.Base"));
        assert_eq!(class.interfaces, vec!["lib.IFriendly"]);
        assert!(matches!(&decls[1], TypeDeclaration::Interface(i) if i.datatype));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let json = r#"{ "kind": "union", "fqn": "lib.U", "name": "U" }"#;
        assert!(serde_json::from_str::<TypeDeclaration>(json).is_err());
    }
}

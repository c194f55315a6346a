//! Pre-order walk functions.
//!
//! Per namespace: `begin_namespace`, its types in order, its child namespaces
//! in order, `end_namespace`. Per class: `begin_class`, the initializer,
//! methods, properties, `end_class`. Interfaces: `begin_interface`, methods,
//! properties, `end_interface`. Enums: `begin_enum`, members, `end_enum`.

use super::cursor::Cursor;
use super::visitor::Visitor;
use crate::ir::*;

pub fn walk_assembly<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    assembly: &Assembly,
) -> Result<(), V::Error> {
    for namespace in &assembly.namespaces {
        visitor.visit_namespace(cursor, namespace)?;
    }
    Ok(())
}

pub fn walk_namespace<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    namespace: &Namespace,
) -> Result<(), V::Error> {
    cursor.enter_namespace(&namespace.name);
    visitor.begin_namespace(cursor, namespace)?;
    for decl in &namespace.types {
        visitor.visit_type(cursor, decl)?;
    }
    for child in &namespace.namespaces {
        visitor.visit_namespace(cursor, child)?;
    }
    visitor.end_namespace(cursor, namespace)?;
    cursor.exit();
    Ok(())
}

pub fn walk_type<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    decl: &TypeDeclaration,
) -> Result<(), V::Error> {
    cursor.enter(decl.name());
    match decl {
        TypeDeclaration::Class(class) => walk_class(visitor, cursor, class)?,
        TypeDeclaration::Interface(iface) => walk_interface(visitor, cursor, iface)?,
        TypeDeclaration::Enum(enum_type) => walk_enum(visitor, cursor, enum_type)?,
    }
    cursor.exit();
    Ok(())
}

pub fn walk_class<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    class: &ClassType,
) -> Result<(), V::Error> {
    visitor.begin_class(cursor, class)?;
    if let Some(initializer) = &class.initializer {
        visitor.visit_initializer(cursor, initializer)?;
    }
    walk_methods(visitor, cursor, &class.methods)?;
    walk_properties(visitor, cursor, &class.properties)?;
    visitor.end_class(cursor, class)
}

pub fn walk_interface<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    iface: &InterfaceType,
) -> Result<(), V::Error> {
    visitor.begin_interface(cursor, iface)?;
    walk_methods(visitor, cursor, &iface.methods)?;
    walk_properties(visitor, cursor, &iface.properties)?;
    visitor.end_interface(cursor, iface)
}

pub fn walk_enum<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    enum_type: &EnumType,
) -> Result<(), V::Error> {
    visitor.begin_enum(cursor, enum_type)?;
    for member in &enum_type.members {
        cursor.enter(&member.name);
        visitor.visit_enum_member(cursor, member)?;
        cursor.exit();
    }
    visitor.end_enum(cursor, enum_type)
}

fn walk_methods<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    methods: &[Method],
) -> Result<(), V::Error> {
    for method in methods {
        cursor.enter(&method.name);
        if method.has_overloads() {
            visitor.visit_method_overload(cursor, method)?;
        } else {
            visitor.visit_method(cursor, method)?;
        }
        cursor.exit();
    }
    Ok(())
}

fn walk_properties<V: Visitor>(
    visitor: &mut V,
    cursor: &mut Cursor,
    properties: &[Property],
) -> Result<(), V::Error> {
    for property in properties {
        cursor.enter(&property.name);
        if property.type_ref.is_union() {
            visitor.visit_union_property(cursor, property)?;
        } else {
            visitor.visit_property(cursor, property)?;
        }
        cursor.exit();
    }
    Ok(())
}

use super::cursor::Cursor;
use super::walker;
use crate::ir::*;

/// A Visitor over the assembly tree.
///
/// Callbacks arrive in a fixed pre-order (see [`walker`]) and return a
/// `Result`; the walk stops at the first error. The `visit_*` methods that
/// have children delegate to the matching `walk_*` function, so overriding
/// one of them without calling the walker prunes that subtree.
pub trait Visitor: Sized {
    type Error;

    /// Entry point for traversal - automatically initializes a Cursor.
    fn traverse(&mut self, assembly: &Assembly) -> Result<(), Self::Error> {
        let mut cursor = Cursor::new();
        self.visit_assembly(&mut cursor, assembly)
    }

    fn visit_assembly(
        &mut self,
        cursor: &mut Cursor,
        assembly: &Assembly,
    ) -> Result<(), Self::Error> {
        walker::walk_assembly(self, cursor, assembly)
    }

    fn visit_namespace(
        &mut self,
        cursor: &mut Cursor,
        namespace: &Namespace,
    ) -> Result<(), Self::Error> {
        walker::walk_namespace(self, cursor, namespace)
    }

    fn visit_type(
        &mut self,
        cursor: &mut Cursor,
        decl: &TypeDeclaration,
    ) -> Result<(), Self::Error> {
        walker::walk_type(self, cursor, decl)
    }

    // Namespace callbacks
    fn begin_namespace(
        &mut self,
        _cursor: &mut Cursor,
        _namespace: &Namespace,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end_namespace(
        &mut self,
        _cursor: &mut Cursor,
        _namespace: &Namespace,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    // Type callbacks
    fn begin_class(&mut self, _cursor: &mut Cursor, _class: &ClassType) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end_class(&mut self, _cursor: &mut Cursor, _class: &ClassType) -> Result<(), Self::Error> {
        Ok(())
    }

    fn begin_interface(
        &mut self,
        _cursor: &mut Cursor,
        _iface: &InterfaceType,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end_interface(
        &mut self,
        _cursor: &mut Cursor,
        _iface: &InterfaceType,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn begin_enum(
        &mut self,
        _cursor: &mut Cursor,
        _enum_type: &EnumType,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end_enum(&mut self, _cursor: &mut Cursor, _enum_type: &EnumType) -> Result<(), Self::Error> {
        Ok(())
    }

    // Member callbacks
    fn visit_initializer(
        &mut self,
        _cursor: &mut Cursor,
        _initializer: &Initializer,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_method(&mut self, _cursor: &mut Cursor, _method: &Method) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called instead of [`Visitor::visit_method`] when the method has overloads.
    fn visit_method_overload(
        &mut self,
        _cursor: &mut Cursor,
        _method: &Method,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_property(
        &mut self,
        _cursor: &mut Cursor,
        _property: &Property,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called instead of [`Visitor::visit_property`] when the property type is a union.
    fn visit_union_property(
        &mut self,
        _cursor: &mut Cursor,
        _property: &Property,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_enum_member(
        &mut self,
        _cursor: &mut Cursor,
        _member: &EnumMember,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

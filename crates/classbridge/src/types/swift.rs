//! Swift side of type translation.

use super::{ANY, primitive_from_swift, swift_generic_base, swift_primitive};
use crate::ir::{Primitive, TypeExpr};
use classbridge_syntax::swift::TypeSyntax;

/// Reads a Swift type into a [`TypeExpr`].
pub fn read_type(ty: &TypeSyntax) -> TypeExpr {
    match ty {
        TypeSyntax::Identifier { name, generic_args } if generic_args.is_empty() => {
            read_name(name)
        }
        TypeSyntax::Identifier { name, generic_args } => {
            match (name.as_str(), generic_args.as_slice()) {
                ("Optional", [inner]) => TypeExpr::optional(read_type(inner)),
                ("Array", [element]) => TypeExpr::array(read_type(element)),
                ("Set", [element]) => TypeExpr::set(read_type(element)),
                ("Dictionary", [key, value]) => TypeExpr::map(read_type(key), read_type(value)),
                ("Optional" | "Array" | "Set" | "Dictionary", _) => TypeExpr::Unknown,
                (base, args) => TypeExpr::generic(base, args.iter().map(read_type).collect()),
            }
        }
        TypeSyntax::Optional(inner) | TypeSyntax::ImplicitlyUnwrapped(inner) => {
            TypeExpr::optional(read_type(inner))
        }
        TypeSyntax::Array(element) => TypeExpr::array(read_type(element)),
        TypeSyntax::Dictionary { key, value } => TypeExpr::map(read_type(key), read_type(value)),
        TypeSyntax::Tuple(items) => match items.as_slice() {
            [] => TypeExpr::Primitive(Primitive::Void),
            [single] => read_type(single),
            items => TypeExpr::Tuple(items.iter().map(read_type).collect()),
        },
        TypeSyntax::Function { .. } | TypeSyntax::Composition(_) => TypeExpr::Unknown,
    }
}

fn read_name(name: &str) -> TypeExpr {
    // `Foundation.Date` and `Swift.Int` spell the same primitives.
    let last = name.rsplit('.').next().unwrap_or(name);
    if let Some(primitive) = primitive_from_swift(name).or_else(|| primitive_from_swift(last)) {
        return TypeExpr::Primitive(primitive);
    }
    match name {
        ANY | "AnyObject" => TypeExpr::Unknown,
        _ => TypeExpr::Named(name.to_string()),
    }
}

/// Writes a [`TypeExpr`] as Swift type syntax.
pub fn write_type(ty: &TypeExpr) -> TypeSyntax {
    match ty {
        TypeExpr::Primitive(p) => TypeSyntax::ident(swift_primitive(*p)),
        TypeExpr::Optional(inner) => TypeSyntax::optional(write_type(inner)),
        TypeExpr::Array(element) => TypeSyntax::array(write_type(element)),
        TypeExpr::Map { key, value } => TypeSyntax::dictionary(write_type(key), write_type(value)),
        TypeExpr::Set(element) => TypeSyntax::generic("Set", vec![write_type(element)]),
        TypeExpr::Tuple(items) => TypeSyntax::Tuple(items.iter().map(write_type).collect()),
        TypeExpr::Generic { base, args } => {
            TypeSyntax::generic(swift_generic_base(base), args.iter().map(write_type).collect())
        }
        TypeExpr::Named(name) => TypeSyntax::ident(name.as_str()),
        TypeExpr::Unknown => TypeSyntax::ident(ANY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> TypeSyntax {
        TypeSyntax::ident(name)
    }

    #[test]
    fn test_primitives() {
        assert_eq!(read_type(&ident("String")), Primitive::Text.into());
        assert_eq!(read_type(&ident("Int64")), Primitive::WholeNumber.into());
        assert_eq!(read_type(&ident("Foundation.Date")), Primitive::Timestamp.into());
        assert_eq!(read_type(&TypeSyntax::Tuple(vec![])), Primitive::Void.into());
        assert_eq!(write_type(&Primitive::Decimal.into()), ident("Double"));
    }

    #[test]
    fn test_optional_spellings() {
        let expected = TypeExpr::optional(Primitive::Text.into());
        assert_eq!(read_type(&TypeSyntax::optional(ident("String"))), expected);
        assert_eq!(
            read_type(&TypeSyntax::ImplicitlyUnwrapped(Box::new(ident("String")))),
            expected
        );
        assert_eq!(
            read_type(&TypeSyntax::generic("Optional", vec![ident("String")])),
            expected
        );
    }

    #[test]
    fn test_collections() {
        assert_eq!(
            read_type(&TypeSyntax::generic("Array", vec![ident("Int")])),
            read_type(&TypeSyntax::array(ident("Int")))
        );
        assert_eq!(
            read_type(&TypeSyntax::dictionary(ident("String"), ident("Bool"))),
            TypeExpr::map(Primitive::Text.into(), Primitive::Flag.into())
        );
        assert_eq!(
            write_type(&TypeExpr::set(Primitive::WholeNumber.into())),
            TypeSyntax::generic("Set", vec![ident("Int")])
        );
    }

    #[test]
    fn test_wrong_arity_is_unknown() {
        assert_eq!(
            read_type(&TypeSyntax::generic("Dictionary", vec![ident("String")])),
            TypeExpr::Unknown
        );
    }

    #[test]
    fn test_generic_and_named_pass_through() {
        let ty = TypeSyntax::generic("Result", vec![ident("Person"), ident("Error")]);
        let expr = read_type(&ty);
        assert_eq!(
            expr,
            TypeExpr::generic(
                "Result",
                vec![TypeExpr::Named("Person".into()), TypeExpr::Named("Error".into())]
            )
        );
        assert_eq!(write_type(&expr), ty);
    }

    #[test]
    fn test_unrepresentable_types_are_unknown() {
        let func = TypeSyntax::Function {
            params: vec![ident("Int")],
            ret: Box::new(ident("Void")),
        };
        assert_eq!(read_type(&func), TypeExpr::Unknown);
        assert_eq!(
            read_type(&TypeSyntax::Composition(vec![ident("A"), ident("B")])),
            TypeExpr::Unknown
        );
        assert_eq!(read_type(&ident("Any")), TypeExpr::Unknown);
        assert_eq!(write_type(&TypeExpr::Unknown), ident("Any"));
    }

    #[test]
    fn test_range_base_from_python_spelling() {
        let expr = TypeExpr::generic("range", vec![Primitive::WholeNumber.into()]);
        assert_eq!(
            write_type(&expr),
            TypeSyntax::generic("Range", vec![ident("Int")])
        );
    }
}

//! Python side of type translation.

use super::{ANY, primitive_from_python, python_generic_base, python_primitive};
use crate::ir::{Primitive, TypeExpr};
use classbridge_syntax::python::{Constant, Expr, Operator};
use serde::{Deserialize, Serialize};

/// How an optional type is spelled in emitted annotations.
///
/// Every style reads back as [`TypeExpr::Optional`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalStyle {
    /// `T | None`
    #[default]
    UnionNullLast,
    /// `None | T`
    UnionNullFirst,
    /// `Optional[T]`
    Typing,
}

/// Subscriptable names with dedicated meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    List,
    Dict,
    Set,
    Tuple,
    Optional,
    Union,
}

impl Container {
    fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix("typing.").unwrap_or(name);
        match name {
            "list" | "List" => Some(Container::List),
            "dict" | "Dict" => Some(Container::Dict),
            "set" | "Set" => Some(Container::Set),
            "tuple" | "Tuple" => Some(Container::Tuple),
            "Optional" => Some(Container::Optional),
            "Union" => Some(Container::Union),
            _ => None,
        }
    }
}

/// Reads a Python annotation into a [`TypeExpr`].
pub fn read_type(annotation: &Expr) -> TypeExpr {
    if annotation.is_none() {
        return TypeExpr::Primitive(Primitive::Void);
    }
    match annotation {
        Expr::Name(_) | Expr::Attribute { .. } => match annotation.dotted_name() {
            Some(name) => read_name(&name),
            None => TypeExpr::Unknown,
        },
        // Forward reference: `"Person"`.
        Expr::Constant(Constant::Str(name)) => read_name(name.trim()),
        Expr::Subscript { value, slice } => read_subscript(value, slice),
        Expr::BinOp {
            op: Operator::BitOr,
            ..
        } => {
            let mut members = Vec::new();
            flatten_union(annotation, &mut members);
            read_union(&members)
        }
        // `[T]` is an alternate spelling of `list[T]`.
        Expr::List(items) => match items.as_slice() {
            [element] => TypeExpr::array(read_type(element)),
            _ => TypeExpr::Unknown,
        },
        _ => TypeExpr::Unknown,
    }
}

fn read_name(name: &str) -> TypeExpr {
    if let Some(primitive) = primitive_from_python(name) {
        return TypeExpr::Primitive(primitive);
    }
    if name == ANY || name == "typing.Any" {
        return TypeExpr::Unknown;
    }
    // Unparameterized containers keep their shape with unknown elements.
    match Container::from_name(name) {
        Some(Container::List) => TypeExpr::array(TypeExpr::Unknown),
        Some(Container::Dict) => TypeExpr::map(TypeExpr::Unknown, TypeExpr::Unknown),
        Some(Container::Set) => TypeExpr::set(TypeExpr::Unknown),
        Some(_) => TypeExpr::Unknown,
        None if name.is_empty() => TypeExpr::Unknown,
        None => TypeExpr::Named(name.to_string()),
    }
}

fn read_subscript(value: &Expr, slice: &Expr) -> TypeExpr {
    let Some(base) = value.dotted_name() else {
        return TypeExpr::Unknown;
    };
    let args: Vec<&Expr> = match slice {
        Expr::Tuple(items) => items.iter().collect(),
        single => vec![single],
    };

    match (Container::from_name(&base), args.as_slice()) {
        (Some(Container::List), [element]) => TypeExpr::array(read_type(element)),
        (Some(Container::Set), [element]) => TypeExpr::set(read_type(element)),
        (Some(Container::Dict), [key, value]) => TypeExpr::map(read_type(key), read_type(value)),
        // `tuple[T, ...]` is a homogeneous sequence of any length.
        (Some(Container::Tuple), [element, Expr::Constant(Constant::Ellipsis)]) => {
            TypeExpr::array(read_type(element))
        }
        // Swift has no one-element tuples; `(T)` is just `T`.
        (Some(Container::Tuple), [_]) => TypeExpr::Unknown,
        (Some(Container::Tuple), items)
            if !items
                .iter()
                .any(|item| matches!(item, Expr::Constant(Constant::Ellipsis))) =>
        {
            TypeExpr::Tuple(items.iter().map(|item| read_type(item)).collect())
        }
        (Some(Container::Optional), [inner]) => optional_of(read_type(inner)),
        (Some(Container::Union), members) => read_union(members),
        (Some(_), _) => TypeExpr::Unknown,
        (None, args) => TypeExpr::generic(base, args.iter().map(|arg| read_type(arg)).collect()),
    }
}

fn flatten_union<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::BinOp {
            left,
            op: Operator::BitOr,
            right,
        } => {
            flatten_union(left, out);
            flatten_union(right, out);
        }
        other => out.push(other),
    }
}

/// A union is optional only when exactly one member is not `None`; the
/// position of `None` does not matter. Anything wider has no counterpart.
fn read_union(members: &[&Expr]) -> TypeExpr {
    let (nulls, rest): (Vec<&Expr>, Vec<&Expr>) =
        members.iter().copied().partition(|m| m.is_none());
    match rest.as_slice() {
        [] => TypeExpr::Primitive(Primitive::Void),
        [single] if !nulls.is_empty() => optional_of(read_type(single)),
        [single] => read_type(single),
        _ => TypeExpr::Unknown,
    }
}

/// Python has no nested optionals.
fn optional_of(inner: TypeExpr) -> TypeExpr {
    match inner {
        TypeExpr::Optional(_) => inner,
        other => TypeExpr::optional(other),
    }
}

/// Writes a [`TypeExpr`] as a Python annotation.
pub fn write_type(ty: &TypeExpr, style: OptionalStyle) -> Expr {
    match ty {
        TypeExpr::Primitive(Primitive::Void) => Expr::none(),
        TypeExpr::Primitive(p) => Expr::dotted(python_primitive(*p)),
        TypeExpr::Optional(inner) => {
            let inner_expr = write_type(inner.without_optional(), style);
            match style {
                OptionalStyle::UnionNullLast => Expr::union(inner_expr, Expr::none()),
                OptionalStyle::UnionNullFirst => Expr::union(Expr::none(), inner_expr),
                OptionalStyle::Typing => Expr::generic("Optional", vec![inner_expr]),
            }
        }
        TypeExpr::Array(element) => Expr::generic("list", vec![write_type(element, style)]),
        TypeExpr::Map { key, value } => Expr::generic(
            "dict",
            vec![write_type(key, style), write_type(value, style)],
        ),
        TypeExpr::Set(element) => Expr::generic("set", vec![write_type(element, style)]),
        // `tuple[()]` is the empty tuple.
        TypeExpr::Tuple(items) if items.is_empty() => {
            Expr::generic("tuple", vec![Expr::Tuple(Vec::new())])
        }
        TypeExpr::Tuple(items) => Expr::generic(
            "tuple",
            items.iter().map(|item| write_type(item, style)).collect(),
        ),
        TypeExpr::Generic { base, args } if args.is_empty() => {
            Expr::dotted(python_generic_base(base))
        }
        TypeExpr::Generic { base, args } => Expr::generic(
            python_generic_base(base),
            args.iter().map(|arg| write_type(arg, style)).collect(),
        ),
        TypeExpr::Named(name) => Expr::dotted(name),
        TypeExpr::Unknown => Expr::name(ANY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(id: &str) -> Expr {
        Expr::name(id)
    }

    #[test]
    fn test_primitives() {
        assert_eq!(read_type(&name("str")), Primitive::Text.into());
        assert_eq!(read_type(&Expr::dotted("datetime.datetime")), Primitive::Timestamp.into());
        assert_eq!(read_type(&name("None")), Primitive::Void.into());
        assert_eq!(read_type(&Expr::none()), Primitive::Void.into());
        assert_eq!(
            write_type(&Primitive::Timestamp.into(), OptionalStyle::default()),
            Expr::dotted("datetime.datetime")
        );
    }

    #[test]
    fn test_optional_either_position() {
        let expected = TypeExpr::optional(Primitive::WholeNumber.into());
        assert_eq!(read_type(&Expr::union(name("int"), Expr::none())), expected);
        assert_eq!(read_type(&Expr::union(Expr::none(), name("int"))), expected);
        assert_eq!(read_type(&Expr::generic("Optional", vec![name("int")])), expected);
        assert_eq!(
            read_type(&Expr::generic("typing.Union", vec![name("int"), name("None")])),
            expected
        );
    }

    #[test]
    fn test_wide_unions_are_unknown() {
        let union = Expr::union(Expr::union(name("int"), name("str")), Expr::none());
        assert_eq!(read_type(&union), TypeExpr::Unknown);
        assert_eq!(read_type(&Expr::union(name("int"), name("str"))), TypeExpr::Unknown);
    }

    #[test]
    fn test_collections() {
        assert_eq!(
            read_type(&Expr::generic("List", vec![name("str")])),
            TypeExpr::array(Primitive::Text.into())
        );
        assert_eq!(
            read_type(&Expr::List(vec![name("str")])),
            TypeExpr::array(Primitive::Text.into())
        );
        assert_eq!(
            read_type(&Expr::generic("dict", vec![name("str"), name("float")])),
            TypeExpr::map(Primitive::Text.into(), Primitive::Decimal.into())
        );
        assert_eq!(read_type(&name("list")), TypeExpr::array(TypeExpr::Unknown));
        assert_eq!(
            read_type(&Expr::generic("dict", vec![name("str")])),
            TypeExpr::Unknown
        );
    }

    #[test]
    fn test_tuples() {
        let pair = TypeExpr::Tuple(vec![Primitive::Text.into(), Primitive::Flag.into()]);
        let written = write_type(&pair, OptionalStyle::default());
        assert_eq!(
            written,
            Expr::generic("tuple", vec![name("str"), name("bool")])
        );
        assert_eq!(read_type(&written), pair);

        let empty = TypeExpr::Tuple(Vec::new());
        assert_eq!(read_type(&write_type(&empty, OptionalStyle::default())), empty);
    }

    #[test]
    fn test_variable_length_and_single_tuples() {
        let ellipsis = Expr::Constant(Constant::Ellipsis);
        assert_eq!(
            read_type(&Expr::generic("tuple", vec![name("int"), ellipsis.clone()])),
            TypeExpr::array(Primitive::WholeNumber.into())
        );
        assert_eq!(
            read_type(&Expr::generic("tuple", vec![name("int")])),
            TypeExpr::Unknown
        );
        assert_eq!(
            read_type(&Expr::generic("tuple", vec![ellipsis, name("int")])),
            TypeExpr::Unknown
        );
        assert_eq!(
            crate::types::python_to_swift(&Expr::generic(
                "tuple",
                vec![name("str"), Expr::Constant(Constant::Ellipsis)]
            )),
            classbridge_syntax::swift::TypeSyntax::array(classbridge_syntax::swift::TypeSyntax::ident(
                "String"
            ))
        );
    }

    #[test]
    fn test_forward_reference_and_named() {
        assert_eq!(
            read_type(&Expr::Constant(Constant::Str("Person".into()))),
            TypeExpr::Named("Person".into())
        );
        assert_eq!(
            write_type(&TypeExpr::Named("Person".into()), OptionalStyle::default()),
            name("Person")
        );
    }

    #[test]
    fn test_optional_styles() {
        let ty = TypeExpr::optional(Primitive::Text.into());
        for style in [
            OptionalStyle::UnionNullLast,
            OptionalStyle::UnionNullFirst,
            OptionalStyle::Typing,
        ] {
            assert_eq!(read_type(&write_type(&ty, style)), ty);
        }
        assert_eq!(
            write_type(&ty, OptionalStyle::UnionNullFirst),
            Expr::union(Expr::none(), name("str"))
        );
    }

    #[test]
    fn test_unknown_renders_any() {
        assert_eq!(write_type(&TypeExpr::Unknown, OptionalStyle::default()), name("Any"));
        assert_eq!(read_type(&name("Any")), TypeExpr::Unknown);
        assert_eq!(read_type(&Expr::Constant(Constant::Int(3))), TypeExpr::Unknown);
    }
}

//! Target conventions: which parts of a [`ClassModel`](crate::ClassModel)
//! are emitted, and how.

use crate::ir::{Primitive, TypeExpr};
use classbridge_syntax::python::{Constant, Expr, Keyword};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// Full mirror: properties, initializer and methods.
    #[default]
    Bridged,
    /// A handle whose state lives elsewhere: methods only.
    Container,
    /// Properties become reactive property declarations on an event
    /// dispatcher base.
    Reactive,
}

impl Convention {
    pub fn emits_properties(self) -> bool {
        !matches!(self, Convention::Container)
    }

    pub fn emits_initializer(self) -> bool {
        matches!(self, Convention::Bridged)
    }

    pub fn name(self) -> &'static str {
        match self {
            Convention::Bridged => "bridged",
            Convention::Container => "container",
            Convention::Reactive => "reactive",
        }
    }
}

/// Reactive property constructors, in import order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReactiveKind {
    Text,
    Numeric,
    Flag,
    List,
    Mapping,
    Object,
}

impl ReactiveKind {
    pub const ALL: [ReactiveKind; 6] = [
        ReactiveKind::Text,
        ReactiveKind::Numeric,
        ReactiveKind::Flag,
        ReactiveKind::List,
        ReactiveKind::Mapping,
        ReactiveKind::Object,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReactiveKind::Text => "StringProperty",
            ReactiveKind::Numeric => "NumericProperty",
            ReactiveKind::Flag => "BooleanProperty",
            ReactiveKind::List => "ListProperty",
            ReactiveKind::Mapping => "DictProperty",
            ReactiveKind::Object => "ObjectProperty",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ReactiveKind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The constructor for a property of type `ty`. Optionals use their
    /// inner type's kind.
    pub fn for_type(ty: &TypeExpr) -> Self {
        match ty {
            TypeExpr::Primitive(Primitive::Text | Primitive::UriString) => ReactiveKind::Text,
            TypeExpr::Primitive(Primitive::WholeNumber | Primitive::Decimal) => {
                ReactiveKind::Numeric
            }
            TypeExpr::Primitive(Primitive::Flag) => ReactiveKind::Flag,
            TypeExpr::Array(_) | TypeExpr::Set(_) => ReactiveKind::List,
            TypeExpr::Map { .. } => ReactiveKind::Mapping,
            TypeExpr::Optional(inner) => ReactiveKind::for_type(inner),
            TypeExpr::Primitive(
                Primitive::BinaryBlob | Primitive::Timestamp | Primitive::RawHandle | Primitive::Void,
            )
            | TypeExpr::Tuple(_)
            | TypeExpr::Generic { .. }
            | TypeExpr::Named(_)
            | TypeExpr::Unknown => ReactiveKind::Object,
        }
    }
}

/// `Kind(default)` for a property, with `allownone=True` for optionals.
pub(crate) fn reactive_python_value(ty: &TypeExpr) -> (ReactiveKind, Expr) {
    let kind = ReactiveKind::for_type(ty);
    let optional = matches!(ty, TypeExpr::Optional(_));
    let default = if optional {
        Expr::none()
    } else {
        python_default(kind, ty)
    };

    let keywords = if optional {
        vec![Keyword {
            name: "allownone".into(),
            value: Expr::Constant(Constant::Bool(true)),
        }]
    } else {
        Vec::new()
    };
    let call = Expr::Call {
        func: Box::new(Expr::name(kind.name())),
        args: vec![default],
        keywords,
    };
    (kind, call)
}

fn python_default(kind: ReactiveKind, ty: &TypeExpr) -> Expr {
    match kind {
        ReactiveKind::Text => Expr::Constant(Constant::Str(String::new())),
        ReactiveKind::Numeric if *ty == TypeExpr::Primitive(Primitive::Decimal) => {
            Expr::Constant(Constant::Float(0.0))
        }
        ReactiveKind::Numeric => Expr::Constant(Constant::Int(0)),
        ReactiveKind::Flag => Expr::Constant(Constant::Bool(false)),
        ReactiveKind::List => Expr::List(Vec::new()),
        ReactiveKind::Mapping => Expr::Dict(Vec::new()),
        ReactiveKind::Object => Expr::none(),
    }
}

/// Swift initial value for a reactive property, if the kind has one.
pub(crate) fn reactive_swift_default(ty: &TypeExpr) -> Option<&'static str> {
    if matches!(ty, TypeExpr::Optional(_)) {
        return Some("nil");
    }
    match ReactiveKind::for_type(ty) {
        ReactiveKind::Text => Some("\"\""),
        ReactiveKind::Numeric if *ty == TypeExpr::Primitive(Primitive::Decimal) => Some("0.0"),
        ReactiveKind::Numeric => Some("0"),
        ReactiveKind::Flag => Some("false"),
        ReactiveKind::List => Some("[]"),
        ReactiveKind::Mapping => Some("[:]"),
        ReactiveKind::Object => None,
    }
}

/// Reads `Kind(default, allownone=...)` back into a type. `None` if `value`
/// is not a reactive property call.
pub(crate) fn read_reactive(value: &Expr) -> Option<TypeExpr> {
    let Expr::Call {
        func,
        args,
        keywords,
    } = value
    else {
        return None;
    };
    let kind = ReactiveKind::from_name(&func.dotted_name()?)?;
    let default = args.first();

    let ty = match kind {
        ReactiveKind::Text => Primitive::Text.into(),
        ReactiveKind::Numeric => match default {
            Some(Expr::Constant(Constant::Float(_))) => Primitive::Decimal.into(),
            _ => Primitive::WholeNumber.into(),
        },
        ReactiveKind::Flag => Primitive::Flag.into(),
        ReactiveKind::List => TypeExpr::array(TypeExpr::Unknown),
        ReactiveKind::Mapping => TypeExpr::map(TypeExpr::Unknown, TypeExpr::Unknown),
        ReactiveKind::Object => TypeExpr::Unknown,
    };

    let allows_none = keywords
        .iter()
        .any(|k| k.name == "allownone" && k.value == Expr::Constant(Constant::Bool(true)));
    if allows_none && kind != ReactiveKind::Object {
        Some(TypeExpr::optional(ty))
    } else {
        Some(ty)
    }
}

//! Python class definition tree.
//!
//! The dynamically-typed side of the bridge. Type annotations are ordinary
//! expressions (`list[int]`, `int | None`, `datetime.datetime`), so the tree
//! carries the small expression subset annotations and stub bodies need.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub body: Vec<Statement>,
}

impl Module {
    pub fn new(body: Vec<Statement>) -> Self {
        Self { body }
    }

    /// Class definitions at module level, in source order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.body.iter().filter_map(|stmt| match stmt {
            Statement::ClassDef(class) => Some(class),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    ClassDef(ClassDef),
    FunctionDef(FunctionDef),
    /// `target: annotation [= value]`
    AnnAssign(AnnAssign),
    /// `target = value`
    Assign(Assign),
    /// `from module import a, b`
    ImportFrom { module: String, names: Vec<String> },
    Pass,
    Expr(Expr),
}

impl Statement {
    pub fn ann_assign(name: impl Into<String>, annotation: Expr) -> Self {
        Statement::AnnAssign(AnnAssign {
            target: Expr::name(name),
            annotation,
            value: None,
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Statement::Assign(Assign {
            targets: vec![Expr::name(name)],
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub decorators: Vec<Expr>,
    pub name: String,
    pub bases: Vec<Expr>,
    pub body: Vec<Statement>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, body: Vec<Statement>) -> Self {
        Self {
            decorators: Vec::new(),
            name: name.into(),
            bases: Vec::new(),
            body,
        }
    }

    pub fn with_base(mut self, base: Expr) -> Self {
        self.bases.push(base);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub decorators: Vec<Expr>,
    pub name: String,
    /// Positional parameters, including a leading `self`/`cls`.
    pub args: Vec<Arg>,
    /// `*args`
    pub vararg: Option<Arg>,
    /// `**kwargs`
    pub kwarg: Option<Arg>,
    pub returns: Option<Expr>,
    pub body: Vec<Statement>,
}

impl FunctionDef {
    pub fn new(name: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            decorators: Vec::new(),
            name: name.into(),
            args,
            vararg: None,
            kwarg: None,
            returns: None,
            body: vec![Statement::Pass],
        }
    }

    pub fn returning(mut self, returns: Expr) -> Self {
        self.returns = Some(returns);
        self
    }

    pub fn decorated(mut self, decorator: Expr) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// True when a decorator is the bare name `name` (e.g. `@property`).
    pub fn has_name_decorator(&self, name: &str) -> bool {
        self.decorators
            .iter()
            .any(|d| matches!(d, Expr::Name(id) if id == name))
    }

    /// The `x` of an `@x.<attr>` decorator, if present (e.g. `@x.setter`).
    pub fn attribute_decorator_target(&self, attr: &str) -> Option<&str> {
        self.decorators.iter().find_map(|d| match d {
            Expr::Attribute { value, attr: a } if a == attr => match value.as_ref() {
                Expr::Name(target) => Some(target.as_str()),
                _ => None,
            },
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub name: String,
    pub annotation: Option<Expr>,
}

impl Arg {
    pub fn new(name: impl Into<String>, annotation: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            annotation,
        }
    }

    pub fn typed(name: impl Into<String>, annotation: Expr) -> Self {
        Self::new(name, Some(annotation))
    }

    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnAssign {
    pub target: Expr,
    pub annotation: Expr,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub targets: Vec<Expr>,
    pub value: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// `|`, the union operator in annotations.
    BitOr,
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::BitOr => "|",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constant {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Name(String),
    /// `value.attr`
    Attribute { value: Box<Expr>, attr: String },
    /// `value[slice]`; a multi-argument slice is a `Tuple`.
    Subscript { value: Box<Expr>, slice: Box<Expr> },
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
    BinOp {
        left: Box<Expr>,
        op: Operator,
        right: Box<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
    Constant(Constant),
}

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name(id.into())
    }

    /// Builds a (possibly dotted) name: `"datetime.datetime"` becomes an
    /// attribute chain.
    pub fn dotted(path: &str) -> Self {
        let mut parts = path.split('.');
        let first = parts.next().unwrap_or_default();
        parts.fold(Expr::name(first), |value, attr| Expr::attribute(value, attr))
    }

    pub fn attribute(value: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            value: Box::new(value),
            attr: attr.into(),
        }
    }

    pub fn subscript(value: Expr, slice: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            slice: Box::new(slice),
        }
    }

    /// `base[a]` for one argument, `base[a, b]` for several.
    pub fn generic(base: &str, mut args: Vec<Expr>) -> Self {
        let slice = if args.len() == 1 {
            args.remove(0)
        } else {
            Expr::Tuple(args)
        };
        Expr::subscript(Expr::dotted(base), slice)
    }

    pub fn union(left: Expr, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op: Operator::BitOr,
            right: Box::new(right),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn none() -> Self {
        Expr::Constant(Constant::None)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Expr::Constant(Constant::None)) || matches!(self, Expr::Name(n) if n == "None")
    }

    /// Flattens a dotted name (`a.b.c`) back into a string.
    pub fn dotted_name(&self) -> Option<String> {
        match self {
            Expr::Name(id) => Some(id.clone()),
            Expr::Attribute { value, attr } => {
                value.dotted_name().map(|prefix| format!("{}.{}", prefix, attr))
            }
            _ => None,
        }
    }
}

//! Swift class declaration tree.
//!
//! This is the statically-typed side of the bridge: nominal primitive types,
//! an explicit optional wrapper, `Name<Args>` generic instantiation and
//! accessor blocks that distinguish stored, computed and read-only members.
//!
//! The tree only models what a class *declaration* needs. Statement bodies are
//! kept as opaque lines of source text because nothing downstream inspects
//! them.

use serde::{Deserialize, Serialize};

/// A parsed Swift file reduced to its class-like declarations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub classes: Vec<ClassDecl>,
}

impl SourceFile {
    pub fn new(classes: Vec<ClassDecl>) -> Self {
        Self { classes }
    }
}

/// Which keyword introduced the declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
}

impl ClassKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Struct => "struct",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub kind: ClassKind,
    pub name: String,
    /// Superclass and protocol conformances, in source order.
    pub inherits: Vec<TypeSyntax>,
    pub members: Vec<Member>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            kind: ClassKind::Class,
            name: name.into(),
            inherits: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        has_attribute(&self.attributes, name)
    }
}

/// An `@Name` attribute. Arguments are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub arguments: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: None,
        }
    }
}

pub(crate) fn has_attribute(attributes: &[Attribute], name: &str) -> bool {
    attributes.iter().any(|a| a.name == name)
}

/// Declaration modifiers the bridge cares about. Anything else is kept as
/// `Other` so it survives a read/write cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Open,
    Internal,
    Private,
    Fileprivate,
    Static,
    /// `class func` / `class var`: type-level, overridable.
    Class,
    Final,
    Override,
    Lazy,
    Other(String),
}

impl Modifier {
    pub fn parse(text: &str) -> Self {
        match text {
            "public" => Modifier::Public,
            "open" => Modifier::Open,
            "internal" => Modifier::Internal,
            "private" => Modifier::Private,
            "fileprivate" => Modifier::Fileprivate,
            "static" => Modifier::Static,
            "class" => Modifier::Class,
            "final" => Modifier::Final,
            "override" => Modifier::Override,
            "lazy" => Modifier::Lazy,
            other => Modifier::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Modifier::Public => "public",
            Modifier::Open => "open",
            Modifier::Internal => "internal",
            Modifier::Private => "private",
            Modifier::Fileprivate => "fileprivate",
            Modifier::Static => "static",
            Modifier::Class => "class",
            Modifier::Final => "final",
            Modifier::Override => "override",
            Modifier::Lazy => "lazy",
            Modifier::Other(s) => s,
        }
    }

    /// True for modifiers that make a member type-level.
    pub fn is_type_level(&self) -> bool {
        matches!(self, Modifier::Static | Modifier::Class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Variable(VariableDecl),
    Initializer(InitializerDecl),
    Function(FunctionDecl),
    /// A member the tree does not model (subscript, nested type, deinit...).
    Unsupported { kind: String },
}

impl From<VariableDecl> for Member {
    fn from(decl: VariableDecl) -> Self {
        Member::Variable(decl)
    }
}

impl From<InitializerDecl> for Member {
    fn from(decl: InitializerDecl) -> Self {
        Member::Initializer(decl)
    }
}

impl From<FunctionDecl> for Member {
    fn from(decl: FunctionDecl) -> Self {
        Member::Function(decl)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingSpecifier {
    Let,
    Var,
}

impl BindingSpecifier {
    pub fn keyword(self) -> &'static str {
        match self {
            BindingSpecifier::Let => "let",
            BindingSpecifier::Var => "var",
        }
    }
}

/// The left-hand side of a property binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Identifier(String),
    Tuple(Vec<Pattern>),
    Wildcard,
    /// `if let`-style binding; never a plain stored property.
    OptionalBinding(String),
}

impl Pattern {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Pattern::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Get,
    Set,
    WillSet,
    DidSet,
    Modify,
}

impl AccessorKind {
    pub fn keyword(self) -> &'static str {
        match self {
            AccessorKind::Get => "get",
            AccessorKind::Set => "set",
            AccessorKind::WillSet => "willSet",
            AccessorKind::DidSet => "didSet",
            AccessorKind::Modify => "_modify",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorBlock {
    /// `var x: T { ... }` with statements directly inside the braces.
    Getter,
    /// An explicit `{ get ... set ... }` or observer block.
    Accessors(Vec<AccessorKind>),
}

impl AccessorBlock {
    pub fn has(&self, kind: AccessorKind) -> bool {
        match self {
            AccessorBlock::Getter => kind == AccessorKind::Get,
            AccessorBlock::Accessors(kinds) => kinds.contains(&kind),
        }
    }
}

/// A single-binding `let`/`var` member.
///
/// Multi-binding declarations (`var a = 1, b = 2`) are split by readers into
/// one `VariableDecl` per binding, each carrying the shared attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub binding: BindingSpecifier,
    pub pattern: Pattern,
    pub type_annotation: Option<TypeSyntax>,
    pub accessors: Option<AccessorBlock>,
    /// Initial value expression, verbatim.
    pub initializer: Option<String>,
}

impl VariableDecl {
    pub fn new(binding: BindingSpecifier, name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            binding,
            pattern: Pattern::Identifier(name.into()),
            type_annotation: Some(ty),
            accessors: None,
            initializer: None,
        }
    }

    pub fn var(name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self::new(BindingSpecifier::Var, name, ty)
    }

    pub fn let_(name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self::new(BindingSpecifier::Let, name, ty)
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_accessors(mut self, accessors: AccessorBlock) -> Self {
        self.accessors = Some(accessors);
        self
    }

    pub fn with_initializer(mut self, value: impl Into<String>) -> Self {
        self.initializer = Some(value.into());
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        has_attribute(&self.attributes, name)
    }
}

/// A function parameter: `label name: Type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// External argument label when it differs from `name` (`_` included).
    pub label: Option<String>,
    pub name: String,
    pub ty: TypeSyntax,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self {
            label: None,
            name: name.into(),
            ty,
        }
    }

    pub fn labeled(label: impl Into<String>, name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self {
            label: Some(label.into()),
            name: name.into(),
            ty,
        }
    }
}

/// A brace-delimited body. Statements are opaque source lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub statements: Vec<String>,
}

impl CodeBlock {
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializerDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    /// `init?`
    pub failable: bool,
    pub parameters: Vec<Parameter>,
    pub body: Option<CodeBlock>,
}

impl InitializerDecl {
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            failable: false,
            parameters,
            body: Some(CodeBlock::empty()),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name));
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        has_attribute(&self.attributes, name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<Modifier>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeSyntax>,
    /// `None` for a bodiless requirement-style declaration.
    pub body: Option<CodeBlock>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            name: name.into(),
            parameters,
            return_type: None,
            body: Some(CodeBlock::empty()),
        }
    }

    pub fn returning(mut self, ty: TypeSyntax) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name));
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        has_attribute(&self.attributes, name)
    }

    pub fn is_type_level(&self) -> bool {
        self.modifiers.iter().any(Modifier::is_type_level)
    }
}

/// A Swift type as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSyntax {
    /// `Name` or `Name<Args>`; dotted names (`Foundation.Date`) kept whole.
    Identifier {
        name: String,
        generic_args: Vec<TypeSyntax>,
    },
    /// `T?`
    Optional(Box<TypeSyntax>),
    /// `T!`
    ImplicitlyUnwrapped(Box<TypeSyntax>),
    /// `[T]`
    Array(Box<TypeSyntax>),
    /// `[K: V]`
    Dictionary {
        key: Box<TypeSyntax>,
        value: Box<TypeSyntax>,
    },
    /// `(A, B)`; `()` is the empty tuple.
    Tuple(Vec<TypeSyntax>),
    /// `(A) -> R`
    Function {
        params: Vec<TypeSyntax>,
        ret: Box<TypeSyntax>,
    },
    /// `A & B`
    Composition(Vec<TypeSyntax>),
}

impl TypeSyntax {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeSyntax::Identifier {
            name: name.into(),
            generic_args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeSyntax>) -> Self {
        TypeSyntax::Identifier {
            name: name.into(),
            generic_args: args,
        }
    }

    pub fn optional(inner: TypeSyntax) -> Self {
        TypeSyntax::Optional(Box::new(inner))
    }

    pub fn array(element: TypeSyntax) -> Self {
        TypeSyntax::Array(Box::new(element))
    }

    pub fn dictionary(key: TypeSyntax, value: TypeSyntax) -> Self {
        TypeSyntax::Dictionary {
            key: Box::new(key),
            value: Box::new(value),
        }
    }
}

//! Language-neutral class model.
//!
//! A [`ClassModel`] is the only thing passed from extraction to emission. It
//! holds no reference to either syntax tree, so an emitter only needs the
//! model plus a [`Convention`](crate::Convention).

use serde::{Deserialize, Serialize};

/// A primitive type with one canonical spelling on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Text,
    WholeNumber,
    Decimal,
    Flag,
    BinaryBlob,
    Timestamp,
    UriString,
    /// An opaque handle to a foreign object.
    RawHandle,
    Void,
}

/// A type, independent of either representation's syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    Primitive(Primitive),
    Optional(Box<TypeExpr>),
    Array(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Set(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    /// Any other parameterized type. The base name goes through the generic
    /// base table on emission.
    Generic {
        base: String,
        args: Vec<TypeExpr>,
    },
    /// A bare custom type name, passed through untouched.
    Named(String),
    /// No rule applied. Rendered as `Any`, never as a guessed primitive.
    Unknown,
}

impl TypeExpr {
    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    pub fn array(element: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(element))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn set(element: TypeExpr) -> Self {
        TypeExpr::Set(Box::new(element))
    }

    pub fn generic(base: impl Into<String>, args: Vec<TypeExpr>) -> Self {
        TypeExpr::Generic {
            base: base.into(),
            args,
        }
    }

    /// True if `Unknown` appears anywhere in the tree.
    pub fn contains_unknown(&self) -> bool {
        match self {
            TypeExpr::Unknown => true,
            TypeExpr::Primitive(_) | TypeExpr::Named(_) => false,
            TypeExpr::Optional(inner) | TypeExpr::Array(inner) | TypeExpr::Set(inner) => {
                inner.contains_unknown()
            }
            TypeExpr::Map { key, value } => key.contains_unknown() || value.contains_unknown(),
            TypeExpr::Tuple(items) => items.iter().any(TypeExpr::contains_unknown),
            TypeExpr::Generic { args, .. } => args.iter().any(TypeExpr::contains_unknown),
        }
    }

    /// The wrapped type of an `Optional`, or `self`.
    pub fn without_optional(&self) -> &TypeExpr {
        match self {
            TypeExpr::Optional(inner) => inner,
            other => other,
        }
    }
}

impl From<Primitive> for TypeExpr {
    fn from(primitive: Primitive) -> Self {
        TypeExpr::Primitive(primitive)
    }
}

/// Whether an emitted property can be assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    #[default]
    ReadOnly,
    ReadWrite,
}

impl AccessKind {
    /// The wider of two capabilities.
    pub fn widen(self, other: AccessKind) -> AccessKind {
        if self == AccessKind::ReadWrite || other == AccessKind::ReadWrite {
            AccessKind::ReadWrite
        } else {
            AccessKind::ReadOnly
        }
    }

    pub fn is_writable(self) -> bool {
        self == AccessKind::ReadWrite
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    pub access: AccessKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterModel {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
}

impl ParameterModel {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModel {
    pub name: String,
    /// Receiver (`self`/`cls`) already removed.
    pub parameters: Vec<ParameterModel>,
    pub return_type: Option<TypeExpr>,
    pub is_static: bool,
    /// Overridable type-level method: `class func` / `@classmethod`.
    /// Implies `is_static`.
    #[serde(default)]
    pub class_bound: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializerModel {
    pub parameters: Vec<ParameterModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    pub properties: Vec<PropertyModel>,
    pub initializer: Option<InitializerModel>,
    pub methods: Vec<MethodModel>,
}

impl ClassModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            initializer: None,
            methods: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: TypeExpr, access: AccessKind) -> Self {
        self.properties.push(PropertyModel {
            name: name.into(),
            ty,
            access,
        });
        self
    }

    pub fn with_initializer(mut self, parameters: Vec<ParameterModel>) -> Self {
        self.initializer = Some(InitializerModel { parameters });
        self
    }

    pub fn with_method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn method(&self, name: &str) -> Option<&MethodModel> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.initializer.is_none() && self.methods.is_empty()
    }
}

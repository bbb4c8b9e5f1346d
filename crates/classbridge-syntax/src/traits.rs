//! Traits for language readers and writers.

use crate::{python, swift};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which declaration grammar a tree belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    Swift,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Swift, Language::Python];

    pub fn name(self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::Python => "python",
        }
    }

    /// Source file extensions, preferred output extension first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Language::Swift => &["swift"],
            Language::Python => &["py", "pyi"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed declaration tree in either representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxTree {
    Swift(swift::SourceFile),
    Python(python::Module),
}

impl SyntaxTree {
    pub fn language(&self) -> Language {
        match self {
            SyntaxTree::Swift(_) => Language::Swift,
            SyntaxTree::Python(_) => Language::Python,
        }
    }
}

impl From<swift::SourceFile> for SyntaxTree {
    fn from(file: swift::SourceFile) -> Self {
        SyntaxTree::Swift(file)
    }
}

impl From<python::Module> for SyntaxTree {
    fn from(module: python::Module) -> Self {
        SyntaxTree::Python(module)
    }
}

/// Error that can occur when reading source code into a declaration tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("unsupported syntax: {0}")]
    Unsupported(String),

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },
}

/// Error that can occur when rendering a declaration tree.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("{writer} writer cannot render a {got} tree")]
    Representation { writer: Language, got: Language },
}

/// A reader parses source code into a declaration tree.
pub trait Reader: Send + Sync {
    /// The language this reader parses. One reader per language is registered.
    fn language(&self) -> Language;

    /// Parse source code into a declaration tree.
    fn read(&self, source: &str) -> Result<SyntaxTree, ReadError>;
}

/// A writer renders a declaration tree as source code.
pub trait Writer: Send + Sync {
    fn language(&self) -> Language;

    /// File extension for output.
    fn extension(&self) -> &'static str {
        self.language().extensions()[0]
    }

    /// Render the tree. Fails only when handed the other representation.
    fn write(&self, tree: &SyntaxTree) -> Result<String, WriteError>;
}

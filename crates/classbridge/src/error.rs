//! Errors and diagnostics.
//!
//! Per-member problems are [`Diagnostic`]s and never stop a class from
//! translating. An [`ExtractError`] fails one class only.

use classbridge_syntax::{Language, ReadError, WriteError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The class cannot be modeled at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("malformed class: {reason}")]
    MalformedClass { reason: String },

    #[error("malformed member in {class}: {reason}")]
    MalformedMember { class: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The binding pattern does not name a single property.
    UnbindablePattern,
    /// A second initializer; only the first is modeled.
    DuplicateInitializer,
    UnsupportedMember,
    /// `*args`/`**kwargs` have no counterpart and are dropped.
    VariadicParameter,
    /// `@x.setter` with no `@property` getter.
    OrphanSetter,
    /// A type fell back to `Unknown`.
    UnknownType,
}

impl DiagnosticKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnbindablePattern => "unbindable-pattern",
            DiagnosticKind::DuplicateInitializer => "duplicate-initializer",
            DiagnosticKind::UnsupportedMember => "unsupported-member",
            DiagnosticKind::VariadicParameter => "variadic-parameter",
            DiagnosticKind::OrphanSetter => "orphan-setter",
            DiagnosticKind::UnknownType => "unknown-type",
        }
    }
}

/// A non-fatal problem found while modeling a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub class: String,
    pub member: Option<String>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(
                f,
                "{}.{}: {} ({})",
                self.class,
                member,
                self.message,
                self.kind.as_str()
            ),
            None => write!(f, "{}: {} ({})", self.class, self.message, self.kind.as_str()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a whole-source translation. Per-class failures are reported in
/// [`ClassReport`](crate::ClassReport) instead.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("no reader registered for {0}")]
    NoReader(Language),

    #[error("no writer registered for {0}")]
    NoWriter(Language),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

//! Class declaration translation between Swift and Python.
//!
//! `classbridge` takes a class declared on one side of a Swift/Python bridge
//! and re-expresses its public shape on the other: properties with the right
//! read/write capability, the initializer signature, and method signatures.
//! Bodies are never translated; emitted members get placeholder bodies.
//!
//! # Architecture
//!
//! ```text
//! Source tree              Model                 Target tree
//! ─────────────       ─────────────────       ─────────────────
//! swift::ClassDecl ─┐                      ┌─> python::ClassDef
//!                   ├─> ClassModel ────────┤   (Bridged, Container,
//! python::ClassDef ─┘   (ir.rs)            └─> swift::ClassDecl  Reactive)
//!        │                  ▲
//!        └── access.rs ─────┤
//!        └── types/ ────────┘   TypeExpr, shared by both directions
//! ```
//!
//! # Example
//!
//! ```
//! use classbridge::{Convention, TranslateConfig, translate_tree};
//! use classbridge_syntax::SyntaxTree;
//! use classbridge_syntax::output::PythonWriter;
//! use classbridge_syntax::swift::{ClassDecl, SourceFile, TypeSyntax, VariableDecl};
//!
//! let file = SourceFile::new(vec![
//!     ClassDecl::new("Person").with_member(VariableDecl::let_("id", TypeSyntax::ident("Int"))),
//! ]);
//! let config = TranslateConfig::default();
//! assert_eq!(config.convention, Convention::Bridged);
//!
//! let translation = translate_tree(&SyntaxTree::from(file), &config);
//! let SyntaxTree::Python(module) = &translation.tree else { unreachable!() };
//! let source = PythonWriter::emit(module);
//! assert!(source.contains("@property\n    def id(self) -> int:"));
//! ```
//!
//! # Feature Flags
//!
//! Source readers are off by default (they pull in tree-sitter grammars):
//! - `read-swift` - parse Swift source in [`translate_source`]
//! - `read-python` - parse Python source in [`translate_source`]
//! - `read-all` - both
//!
//! Everything that works on trees needs no features.

pub mod access;
pub mod config;
pub mod convention;
pub mod emit;
pub mod error;
pub mod extract;
pub mod ir;
pub mod markers;
pub mod translate;
pub mod types;

// Re-export the model
pub use ir::{
    AccessKind, ClassModel, InitializerModel, MethodModel, ParameterModel, Primitive,
    PropertyModel, TypeExpr,
};

// Re-export pipeline stages
pub use access::infer_access;
pub use convention::{Convention, ReactiveKind};
pub use emit::{EmitOptions, emit_python_class, emit_python_module, emit_swift_class, emit_swift_file};
pub use extract::{
    ExtractOptions, Extraction, extract_python_class, extract_swift_class, merge_behavior,
};
pub use markers::Marker;
pub use types::{OptionalStyle, python_to_swift, swift_to_python};

// Re-export drivers
pub use config::{Direction, TranslateConfig};
pub use error::{ConfigError, Diagnostic, DiagnosticKind, ExtractError, TranslateError};
pub use translate::{
    ClassReport, SourceTranslation, Translation, translate_batch, translate_python_with_behavior,
    translate_source, translate_tree,
};

//! Class declaration trees for the two sides of a language bridge.
//!
//! `classbridge-syntax` models just enough of Swift and Python to describe a
//! class surface: properties, initializers and method signatures. Bodies are
//! opaque. Readers parse source into these trees with tree-sitter; writers
//! render them back.
//!
//! # Architecture
//!
//! ```text
//! Source             Trees                 Output
//! ──────────    ──────────────────    ──────────────
//! .swift   ─┐   swift::SourceFile  ─┐  ┌─> .swift
//!           ├─>                     ├──┤
//! .py/.pyi ─┘   python::Module     ─┘  └─> .py
//!               (SyntaxTree)
//! ```
//!
//! Translating between the two trees (type mapping, accessor inference,
//! conventions) lives in the `classbridge` crate; this crate knows nothing
//! about the other side.
//!
//! # Example
//!
//! ```
//! use classbridge_syntax::python::{Arg, ClassDef, Expr, FunctionDef, Statement};
//! use classbridge_syntax::output::PythonWriter;
//!
//! let class = ClassDef::new(
//!     "Point",
//!     vec![
//!         Statement::ann_assign("x", Expr::name("float")),
//!         Statement::FunctionDef(FunctionDef::new("norm", vec![Arg::bare("self")])),
//!     ],
//! );
//! let source = PythonWriter::emit_class(&class);
//! assert!(source.starts_with("class Point:\n    x: float\n"));
//! ```
//!
//! Readers (`read-swift`, `read-python`) pull in tree-sitter grammars.
//! Everything is on by default; depend with `default-features = false` for
//! tree-only use.

pub mod python;
pub mod registry;
pub mod swift;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: Traits
pub use traits::{Language, ReadError, Reader, SyntaxTree, WriteError, Writer};

// Re-exports: Registry
pub use registry::{
    reader_for, reader_for_path, register_reader, register_writer, translatable_languages,
    writer_for,
};

// Re-exports: Built-in readers
#[cfg(feature = "read-python")]
pub use input::python::PythonReader;
#[cfg(feature = "read-python")]
pub use input::read_python;
#[cfg(feature = "read-swift")]
pub use input::read_swift;
#[cfg(feature = "read-swift")]
pub use input::swift::SwiftReader;

// Re-exports: Built-in writers
#[cfg(feature = "write-python")]
pub use output::PythonWriter;
#[cfg(feature = "write-python")]
pub use output::python::PythonWriterImpl;
#[cfg(feature = "write-swift")]
pub use output::SwiftWriter;
#[cfg(feature = "write-swift")]
pub use output::swift::SwiftWriterImpl;

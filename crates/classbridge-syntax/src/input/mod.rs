//! Input readers - parse source code into declaration trees.

#[cfg(feature = "read-swift")]
pub mod swift;

#[cfg(feature = "read-swift")]
pub use swift::{SWIFT_READER, SwiftReader, read_swift};

#[cfg(feature = "read-python")]
pub mod python;

#[cfg(feature = "read-python")]
pub use python::{PYTHON_READER, PythonReader, read_python};

//! Output writers - render declaration trees as source code.

#[cfg(feature = "write-swift")]
pub mod swift;

#[cfg(feature = "write-swift")]
pub use swift::{SWIFT_WRITER, SwiftWriter, SwiftWriterImpl};

#[cfg(feature = "write-python")]
pub mod python;

#[cfg(feature = "write-python")]
pub use python::{PYTHON_WRITER, PythonWriter, PythonWriterImpl};

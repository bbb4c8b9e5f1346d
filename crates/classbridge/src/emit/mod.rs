//! Declaration emission: a [`ClassModel`](crate::ClassModel) plus a
//! [`Convention`](crate::Convention) in, a target declaration tree out.
//!
//! Members are always emitted as properties, then the initializer, then
//! methods, each group in model order.

pub mod python;
pub mod swift;

pub use python::{emit_python_class, emit_python_module};
pub use swift::{emit_swift_class, emit_swift_file};

use crate::types::OptionalStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REACTIVE_BASE: &str = "EventDispatcher";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    pub optional_style: OptionalStyle,
    /// Bridged Python output: `name: T` for read-write properties instead of
    /// a getter/setter pair.
    pub python_stored_fields: bool,
    /// Base class injected by the reactive convention.
    pub reactive_base: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            optional_style: OptionalStyle::default(),
            python_stored_fields: false,
            reactive_base: DEFAULT_REACTIVE_BASE.to_string(),
        }
    }
}

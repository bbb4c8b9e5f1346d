//! Type expression translation.
//!
//! Each side has a reader (syntax → [`TypeExpr`]) and a writer
//! ([`TypeExpr`] → syntax). Both directions are driven by the tables in this
//! module, so adding a primitive spelling here makes it readable and
//! writable on both sides at once.
//!
//! Translation is pure: no state, no I/O, and the same input always yields
//! the same output.

pub mod python;
pub mod swift;

pub use python::OptionalStyle;

use crate::ir::Primitive;

/// Spellings of one primitive. The first spelling per side is canonical and
/// is what writers emit; aliases are only read.
pub(crate) struct PrimitiveSpelling {
    pub primitive: Primitive,
    pub swift: &'static str,
    pub swift_aliases: &'static [&'static str],
    pub python: &'static str,
    pub python_aliases: &'static [&'static str],
}

pub(crate) const PRIMITIVES: &[PrimitiveSpelling] = &[
    PrimitiveSpelling {
        primitive: Primitive::Text,
        swift: "String",
        swift_aliases: &["Substring"],
        python: "str",
        python_aliases: &[],
    },
    PrimitiveSpelling {
        primitive: Primitive::WholeNumber,
        swift: "Int",
        swift_aliases: &[
            "Int8", "Int16", "Int32", "Int64", "UInt", "UInt8", "UInt16", "UInt32", "UInt64",
        ],
        python: "int",
        python_aliases: &[],
    },
    PrimitiveSpelling {
        primitive: Primitive::Decimal,
        swift: "Double",
        swift_aliases: &["Float", "Float16", "Float32", "Float64", "CGFloat"],
        python: "float",
        python_aliases: &[],
    },
    PrimitiveSpelling {
        primitive: Primitive::Flag,
        swift: "Bool",
        swift_aliases: &[],
        python: "bool",
        python_aliases: &[],
    },
    PrimitiveSpelling {
        primitive: Primitive::BinaryBlob,
        swift: "Data",
        swift_aliases: &[],
        python: "bytes",
        python_aliases: &["bytearray"],
    },
    PrimitiveSpelling {
        primitive: Primitive::Timestamp,
        swift: "Date",
        swift_aliases: &["DateComponents"],
        python: "datetime.datetime",
        python_aliases: &["datetime"],
    },
    PrimitiveSpelling {
        primitive: Primitive::UriString,
        swift: "URL",
        swift_aliases: &[],
        python: "url",
        python_aliases: &[],
    },
    PrimitiveSpelling {
        primitive: Primitive::RawHandle,
        swift: "PyPointer",
        swift_aliases: &[],
        python: "object",
        python_aliases: &[],
    },
    PrimitiveSpelling {
        primitive: Primitive::Void,
        swift: "Void",
        swift_aliases: &[],
        python: "None",
        python_aliases: &[],
    },
];

/// Generic base names that differ between the sides: (swift, python).
/// Every other base name passes through verbatim.
const GENERIC_BASES: &[(&str, &str)] = &[("Range", "range"), ("ClosedRange", "range")];

/// Spelling of the neutral placeholder type on both sides.
pub(crate) const ANY: &str = "Any";

fn spelling(primitive: Primitive) -> &'static PrimitiveSpelling {
    PRIMITIVES
        .iter()
        .find(|s| s.primitive == primitive)
        .unwrap_or(&PRIMITIVES[0])
}

pub(crate) fn primitive_from_swift(name: &str) -> Option<Primitive> {
    PRIMITIVES
        .iter()
        .find(|s| s.swift == name || s.swift_aliases.contains(&name))
        .map(|s| s.primitive)
}

pub(crate) fn primitive_from_python(name: &str) -> Option<Primitive> {
    PRIMITIVES
        .iter()
        .find(|s| s.python == name || s.python_aliases.contains(&name))
        .map(|s| s.primitive)
}

pub(crate) fn swift_primitive(primitive: Primitive) -> &'static str {
    spelling(primitive).swift
}

pub(crate) fn python_primitive(primitive: Primitive) -> &'static str {
    spelling(primitive).python
}

pub(crate) fn swift_generic_base(base: &str) -> &str {
    GENERIC_BASES
        .iter()
        .find(|(_, python)| *python == base)
        .map(|(swift, _)| *swift)
        .unwrap_or(base)
}

pub(crate) fn python_generic_base(base: &str) -> &str {
    GENERIC_BASES
        .iter()
        .find(|(swift, _)| *swift == base)
        .map(|(_, python)| *python)
        .unwrap_or(base)
}

/// Translates a Swift type into the equivalent Python annotation.
pub fn swift_to_python(
    ty: &classbridge_syntax::swift::TypeSyntax,
    style: OptionalStyle,
) -> classbridge_syntax::python::Expr {
    python::write_type(&swift::read_type(ty), style)
}

/// Translates a Python annotation into the equivalent Swift type.
pub fn python_to_swift(
    annotation: &classbridge_syntax::python::Expr,
) -> classbridge_syntax::swift::TypeSyntax {
    swift::write_type(&python::read_type(annotation))
}

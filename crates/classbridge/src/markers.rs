//! Exposure markers recognized on the Swift side.
//!
//! Markers are matched by attribute name against this closed set, never by
//! searching attribute text.

use classbridge_syntax::swift::Attribute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    PyClass,
    PyContainer,
    PyProperty,
    PyInit,
    PyMethod,
    PyCall,
    DynamicMemberLookup,
}

impl Marker {
    pub const ALL: [Marker; 7] = [
        Marker::PyClass,
        Marker::PyContainer,
        Marker::PyProperty,
        Marker::PyInit,
        Marker::PyMethod,
        Marker::PyCall,
        Marker::DynamicMemberLookup,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Marker::PyClass => "PyClass",
            Marker::PyContainer => "PyContainer",
            Marker::PyProperty => "PyProperty",
            Marker::PyInit => "PyInit",
            Marker::PyMethod => "PyMethod",
            Marker::PyCall => "PyCall",
            Marker::DynamicMemberLookup => "dynamicMemberLookup",
        }
    }

    pub fn parse(name: &str) -> Option<Marker> {
        Marker::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn attribute(self) -> Attribute {
        Attribute::new(self.name())
    }

    /// True if any attribute is one of `markers`.
    pub fn any_in(attributes: &[Attribute], markers: &[Marker]) -> bool {
        attributes
            .iter()
            .filter_map(|a| Marker::parse(&a.name))
            .any(|m| markers.contains(&m))
    }
}

/// Python decorators with bridge meaning.
pub(crate) mod decorators {
    pub const PROPERTY: &str = "property";
    pub const SETTER: &str = "setter";
    pub const DELETER: &str = "deleter";
    pub const STATICMETHOD: &str = "staticmethod";
    pub const CLASSMETHOD: &str = "classmethod";
    pub const INIT: &str = "__init__";
}

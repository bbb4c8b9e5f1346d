//! Translation settings, loadable from TOML.
//!
//! ```toml
//! direction = "python_to_swift"
//! convention = "reactive"
//!
//! [extract]
//! marked_only = true
//!
//! [emit]
//! optional_style = "typing"
//! reactive_base = "EventDispatcher"
//! ```

use crate::convention::Convention;
use crate::emit::EmitOptions;
use crate::error::ConfigError;
use crate::extract::ExtractOptions;
use classbridge_syntax::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    SwiftToPython,
    PythonToSwift,
}

impl Direction {
    pub fn source(self) -> Language {
        match self {
            Direction::SwiftToPython => Language::Swift,
            Direction::PythonToSwift => Language::Python,
        }
    }

    pub fn target(self) -> Language {
        match self {
            Direction::SwiftToPython => Language::Python,
            Direction::PythonToSwift => Language::Swift,
        }
    }

    /// The direction that reads `language`.
    pub fn from_source(language: Language) -> Self {
        match language {
            Language::Swift => Direction::SwiftToPython,
            Language::Python => Direction::PythonToSwift,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateConfig {
    pub direction: Direction,
    pub convention: Convention,
    pub extract: ExtractOptions,
    pub emit: EmitOptions,
}

impl TranslateConfig {
    pub fn new(direction: Direction, convention: Convention) -> Self {
        Self {
            direction,
            convention,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config.direction, ?config.convention, "loaded config");
        Ok(config)
    }
}

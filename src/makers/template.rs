// src/makers/template.rs
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarative description of one metric maker to build.
///
/// Parsed from external configuration. `name` is the case-insensitive key
/// the built maker registers under; `kind` selects the builder in the
/// registry; `params` carries literal values keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub params: IndexMap<String, String>,
}

impl MakerTemplate {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            params: IndexMap::new(),
        }
    }

    /// Add a literal parameter, builder-style. Used mostly by tests.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

use crate::path::NamePath;
use serde::Serialize;
use std::collections::BTreeMap;

/// Documentation attached to a declaration.
///
/// The serde form of a `Doc` is its digest: empty sections are skipped so
/// the output carries only what the protocol description actually wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doc {
    /// Path of the documented declaration.
    pub name: NamePath,
    /// One-line summary.
    pub brief: String,
    /// Long-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-field descriptions.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    /// Per-error descriptions.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
    /// Cross references to related declarations.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub see: BTreeMap<String, String>,
    /// Usage example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl Doc {
    /// Documentation with only a brief summary.
    pub fn brief(name: impl Into<NamePath>, brief: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brief: brief.into(),
            description: None,
            fields: BTreeMap::new(),
            errors: BTreeMap::new(),
            see: BTreeMap::new(),
            example: None,
        }
    }
}

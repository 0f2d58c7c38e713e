use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered identifier sequence uniquely locating a declared item.
///
/// Name paths are provider-resolved: the front end has already qualified
/// every declaration (e.g. `xcb.xkb.SelectEvents`), so equality is plain
/// path equality and paths serve directly as lookup and dedup keys.
/// Serializes as a JSON array of the identifier segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamePath(Vec<String>);

impl NamePath {
    /// Creates a path from identifier segments.
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The path's segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, if the path is non-empty.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Dot-joined rendering, the run-wide dedup key form.
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }
}

impl fmt::Display for NamePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

impl From<Vec<String>> for NamePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<const N: usize> From<[&str; N]> for NamePath {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

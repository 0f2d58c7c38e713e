//! Canonical serialization of the finished document.

use serde_json::Value;
use thiserror::Error;

/// Error returned when canonical serialization fails.
#[derive(Error, Debug)]
pub enum EmitError {
    /// The document could not be rendered as canonical JSON.
    #[error("canonical serialization failed: {0}")]
    Serialization(String),
}

/// Renders the document as RFC 8785 canonical JSON.
///
/// Digest objects are built on sorted maps, so this is a pure encoding
/// step: two runs producing equal documents produce identical bytes.
pub fn to_canonical_string(document: &Value) -> Result<String, EmitError> {
    canonical_json::to_string(document).map_err(|err| EmitError::Serialization(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn emission_orders_keys() {
        let value = json!({ "b": 1, "a": { "nested": 2 } });
        assert_eq!(
            to_canonical_string(&value).unwrap(),
            r#"{"a":{"nested":2},"b":1}"#
        );
    }
}

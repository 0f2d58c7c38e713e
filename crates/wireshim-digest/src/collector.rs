//! Simple-type deduplication across one run.

use crate::digester::base_digest;
use crate::error::DigestError;
use serde_json::Value;
use std::collections::BTreeSet;
use wireshim_graph::{NamePath, TypeNode};

/// Collects one canonical digest per distinct primitive type referenced
/// anywhere in the run.
///
/// The dedup key is the dotted name path; the first occurrence wins and
/// fixes the entry's position (first-seen order is contractual for the
/// output's `simple_types` list). Repeats are assumed content-identical
/// and are not re-digested or re-verified.
#[derive(Default)]
pub struct SimpleTypeCollector {
    seen: BTreeSet<String>,
    digests: Vec<Value>,
}

impl SimpleTypeCollector {
    /// Empty collector for a fresh run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `node` if its name path is unseen; idempotent on repeats.
    ///
    /// `owner` is the nearest enclosing named item, used to report
    /// unnamed nodes, which cannot be collected.
    pub fn push(&mut self, node: &TypeNode, owner: &NamePath) -> Result<(), DigestError> {
        let name = node.name.as_ref().ok_or_else(|| DigestError::MissingTypeName {
            path: owner.clone(),
        })?;
        if self.seen.insert(name.dotted()) {
            self.digests.push(Value::Object(base_digest(node)?));
        }
        Ok(())
    }

    /// Collected digests in first-seen order.
    pub fn digests(&self) -> &[Value] {
        &self.digests
    }

    /// Consumes the collector, yielding the digests in first-seen order.
    pub fn into_digests(self) -> Vec<Value> {
        self.digests
    }
}

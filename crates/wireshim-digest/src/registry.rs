//! Cross-item back-reference resolution.
//!
//! Top-level items are digested in whatever order their modules deliver
//! them, but some digests depend on items that may not have been seen
//! yet: a field documented by an enum must append its wire-type path to
//! that enum's `wiretypes` list whether the enum was declared before or
//! after the field, possibly in another module. The registry makes that
//! order-independent: digests are recorded by name path, hooks are bound
//! to a name path, and each hook fires exactly once per registration
//! event — immediately if the digest is already known, otherwise when it
//! arrives. `register` and `add_hook` are the only mutators.

use crate::error::DigestError;
use serde_json::Value;
use std::collections::BTreeMap;
use wireshim_graph::NamePath;

/// Callback applied in place to the digest registered under a name path.
pub type Hook = Box<dyn FnMut(&mut Value)>;

#[derive(Default)]
struct Entry {
    digest: Option<Value>,
    hooks: Vec<Hook>,
}

/// Run-scoped map from name path to (digest-so-far, pending hooks).
#[derive(Default)]
pub struct CrossReferenceRegistry {
    entries: BTreeMap<NamePath, Entry>,
}

impl CrossReferenceRegistry {
    /// Empty registry for a fresh run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `digest` under `name`, firing every hook already bound to
    /// that path against it.
    ///
    /// Name paths are unique run-wide; a second registration under the
    /// same path is fatal.
    pub fn register(&mut self, name: NamePath, digest: Value) -> Result<(), DigestError> {
        let entry = self.entries.entry(name.clone()).or_default();
        if entry.digest.is_some() {
            return Err(DigestError::DuplicateName { path: name });
        }
        let mut digest = digest;
        for hook in &mut entry.hooks {
            hook(&mut digest);
        }
        entry.digest = Some(digest);
        Ok(())
    }

    /// Binds `hook` to `name`: fires it against the digest already
    /// recorded there, if any, then retains it for future registrations.
    pub fn add_hook(&mut self, name: NamePath, mut hook: Hook) {
        let entry = self.entries.entry(name).or_default();
        if let Some(digest) = entry.digest.as_mut() {
            hook(digest);
        }
        entry.hooks.push(hook);
    }

    /// The digest currently recorded under `name`, with every hook fired
    /// so far applied.
    pub fn digest(&self, name: &NamePath) -> Option<&Value> {
        self.entries.get(name).and_then(|entry| entry.digest.as_ref())
    }
}

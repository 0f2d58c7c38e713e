//! Digest engine turning resolved protocol type graphs into one canonical,
//! order-independent, serializable document.
//!
//! The input is the `wireshim-graph` model a protocol-description front
//! end produces: per-module streams of resolved type nodes. The output is
//! a single `{modules, simple_types}` JSON document, the stable
//! interchange artifact downstream code generators and validators
//! consume. Its content never depends on the order modules were
//! processed in; only each module's own item order and the run's
//! first-seen simple-type order are contractual.
//!
//! Cross-item back references (an enum and the fields that use it may be
//! declared in either order, in different modules) resolve through the
//! [`CrossReferenceRegistry`], the one order-sensitive subsystem: hooks
//! registered against a name path fire exactly once per registration,
//! whether they were added before or after it.
//!
//! All failures are fatal and name the offending path; the engine never
//! emits a partial document.
//!
#![deny(missing_docs)]

/// Simple-type deduplication across one run.
pub mod collector;
/// Recursive type-to-digest transformation.
pub mod digester;
/// Canonical serialization of the finished document.
pub mod emit;
/// Error types for digest runs.
pub mod error;
/// Expression canonicalization.
pub mod expr;
/// Field canonicalization, name synthesis, and enum wiring.
pub mod field;
/// Cross-item back-reference resolution.
pub mod registry;
/// Per-module translation and whole-run orchestration.
pub mod translator;

pub use collector::SimpleTypeCollector;
pub use digester::{digest_type, digest_type_or_typeref, DigestContext};
pub use emit::{to_canonical_string, EmitError};
pub use error::DigestError;
pub use expr::digest_expr;
pub use field::digest_field;
pub use registry::{CrossReferenceRegistry, Hook};
pub use translator::{digest_protocol, ModuleRecord, ModuleTranslator};

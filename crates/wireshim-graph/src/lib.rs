//! Resolved protocol type-graph model consumed by the wireshim digest engine.
//!
//! A protocol-description front end parses and resolves a binary wire
//! protocol's message and type grammar, then hands the result over as the
//! types in this crate: per-module item registration streams of
//! [`TypeNode`] trees with names, sizes, and alignment already computed.
//! The digest engine (`wireshim-digest`) treats all of it as read-only
//! input; nothing in this crate digests or serializes protocol data
//! itself, apart from [`Doc`] nodes whose serde form is their digest.
//!
#![deny(missing_docs)]

/// Documentation nodes attached to declarations.
pub mod doc;
/// Length, condition, and discriminator expressions.
pub mod expr;
/// Fields of aggregate types.
pub mod field;
/// Modules, namespaces, and item registration streams.
pub mod module;
/// Name paths locating declared items.
pub mod path;
/// Type nodes and the closed kind vocabulary.
pub mod types;

pub use doc::Doc;
pub use expr::{ExprOp, ExpressionNode};
pub use field::FieldNode;
pub use module::{ItemKind, ItemRegistration, ModuleNode, Namespace, NamespaceMeta};
pub use path::NamePath;
pub use types::{Aggregate, TypeKind, TypeNode};

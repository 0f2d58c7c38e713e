use thiserror::Error;
use wireshim_graph::NamePath;

/// Fatal digest-run failures.
///
/// Every variant names the offending path. These are structural
/// consistency defects in the input graph or in engine kind coverage,
/// not transient conditions; a run either completes or fails with one of
/// these and produces no partial document.
#[derive(Error, Debug)]
pub enum DigestError {
    /// Two top-level items registered under the same name path.
    #[error("duplicate registration of {path}")]
    DuplicateName {
        /// The colliding path.
        path: NamePath,
    },
    /// A provider stream declared one item kind but delivered another.
    #[error("item kind does not match the registered node for {path}")]
    ItemKindMismatch {
        /// The mismatched item's path.
        path: NamePath,
    },
    /// A switch member that is neither a case nor a bitcase.
    #[error("switch {path} has a member that is neither case nor bitcase")]
    ForeignSwitchMember {
        /// The switch's path.
        path: NamePath,
    },
    /// A switch mixing single- and multiple-match members, or with none.
    #[error("switch {path} mixes single- and multiple-match members or has none")]
    MixedSwitchMembers {
        /// The switch's path.
        path: NamePath,
    },
    /// A switch whose declared size is not exactly zero.
    #[error("switch {path} must have declared size 0, found {found}")]
    NonzeroSwitchSize {
        /// The switch's path.
        path: NamePath,
        /// The declared size, or `none` when undeclared.
        found: String,
    },
    /// A switch whose discriminator is neither a bare field reference nor
    /// covered by the per-protocol exception table.
    #[error("cannot determine the discriminator of switch {path}")]
    UnknownDiscriminator {
        /// The switch's path.
        path: NamePath,
    },
    /// An expression matching none of the recognized shapes.
    #[error("expression in {path} matches no recognized shape")]
    UnhandledExpression {
        /// Path of the nearest enclosing named item.
        path: NamePath,
    },
    /// A type occurrence that must be referenced by name but has none.
    #[error("unnamed type cannot be referenced from {path}")]
    MissingTypeName {
        /// Path of the nearest enclosing named item.
        path: NamePath,
    },
    /// An item recorded by a module but absent from the registry at
    /// assembly time.
    #[error("no digest registered for {path}")]
    MissingRegistration {
        /// The missing item's path.
        path: NamePath,
    },
    /// Documentation attached to a declaration could not be serialized.
    #[error("documentation for {path} could not be serialized: {detail}")]
    UnserializableDoc {
        /// Path of the documented declaration.
        path: NamePath,
        /// Underlying serialization failure.
        detail: String,
    },
}

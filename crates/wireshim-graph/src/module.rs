use crate::path::NamePath;
use crate::types::{TypeKind, TypeNode};

/// Top-level item kinds a provider registers, in its resolved order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Primitive or opaque type declaration.
    Simple,
    /// Enumeration declaration.
    Enum,
    /// Struct declaration.
    Struct,
    /// Union declaration.
    Union,
    /// Request declaration.
    Request,
    /// Event declaration.
    Event,
    /// Error declaration.
    Error,
    /// Event-struct declaration.
    EventStruct,
}

impl ItemKind {
    /// True when `kind` is a type node this item kind may register.
    ///
    /// Simple items cover both primitives and the fd pseudo-type; every
    /// other item kind maps one-to-one.
    pub fn admits(self, kind: &TypeKind) -> bool {
        match self {
            ItemKind::Simple => matches!(kind, TypeKind::Simple | TypeKind::Fd),
            ItemKind::Enum => matches!(kind, TypeKind::Enum { .. }),
            ItemKind::Struct => matches!(kind, TypeKind::Struct(_)),
            ItemKind::Union => matches!(kind, TypeKind::Union(_)),
            ItemKind::Request => matches!(kind, TypeKind::Request { .. }),
            ItemKind::Event => matches!(kind, TypeKind::Event { .. }),
            ItemKind::Error => matches!(kind, TypeKind::Error { .. }),
            ItemKind::EventStruct => matches!(kind, TypeKind::EventStruct(_)),
        }
    }
}

/// One entry of a module's resolved item-registration stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRegistration {
    /// Declared item kind.
    pub kind: ItemKind,
    /// Definition path the item is registered under.
    pub name: NamePath,
    /// The resolved type node.
    pub node: TypeNode,
}

impl ItemRegistration {
    /// Registration of `node` under `name`.
    pub fn new(kind: ItemKind, name: impl Into<NamePath>, node: TypeNode) -> Self {
        Self {
            kind,
            name: name.into(),
            node,
        }
    }
}

/// Core-module marker or extension version metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMeta {
    /// The protocol's core module.
    Core,
    /// An extension module.
    Extension {
        /// Extension major version.
        major_version: u32,
        /// Extension minor version.
        minor_version: u32,
        /// Wire name, as sent in the setup handshake.
        xname: String,
        /// Human-readable extension name.
        name: String,
    },
}

/// Module namespace metadata from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    /// Qualification root for names declared in this module
    /// (e.g. `xcb` for the core module, `xcb.xkb` for an extension).
    pub prefix: NamePath,
    /// Core marker or extension metadata.
    pub meta: NamespaceMeta,
}

impl Namespace {
    /// Core-module namespace rooted at `prefix`.
    pub fn core(prefix: impl Into<NamePath>) -> Self {
        Self {
            prefix: prefix.into(),
            meta: NamespaceMeta::Core,
        }
    }

    /// Extension namespace rooted at `prefix`.
    pub fn extension(
        prefix: impl Into<NamePath>,
        major_version: u32,
        minor_version: u32,
        xname: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            meta: NamespaceMeta::Extension {
                major_version,
                minor_version,
                xname: xname.into(),
                name: name.into(),
            },
        }
    }

    /// Fully qualifies an unqualified declaration name from this module.
    pub fn qualify(&self, name: &str) -> NamePath {
        self.prefix.child(name)
    }
}

/// One module of the protocol description, resolved by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleNode {
    /// Source description file name, the module's identity downstream.
    pub xmlfilename: String,
    /// Namespace metadata.
    pub namespace: Namespace,
    /// Item registrations in provider-resolved order.
    pub items: Vec<ItemRegistration>,
}

impl ModuleNode {
    /// Module with the given identity and namespace and no items yet.
    pub fn new(xmlfilename: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            xmlfilename: xmlfilename.into(),
            namespace,
            items: Vec::new(),
        }
    }

    /// Appends an item registration.
    pub fn push(&mut self, item: ItemRegistration) {
        self.items.push(item);
    }
}

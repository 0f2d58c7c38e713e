use crate::doc::Doc;
use crate::expr::ExpressionNode;
use crate::field::FieldNode;
use crate::path::NamePath;

/// Field list shared by every aggregate kind, with an optional expression
/// giving the aggregate's trailing length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregate {
    /// Fields in declaration order.
    pub fields: Vec<FieldNode>,
    /// Trailing length expression, when the aggregate declares one.
    pub length_expr: Option<ExpressionNode>,
}

impl Aggregate {
    /// Aggregate over `fields` with no trailing length expression.
    pub fn new(fields: Vec<FieldNode>) -> Self {
        Self {
            fields,
            length_expr: None,
        }
    }
}

/// Closed kind vocabulary for resolved type nodes.
///
/// One variant per digest `class`; the digest engine dispatches with a
/// single exhaustive match, so adding a kind here is an intentional
/// breaking change for every downstream consumer of the document.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive or opaque fixed-width type.
    Simple,
    /// File-descriptor pseudo-type.
    Fd,
    /// Value enumeration.
    Enum {
        /// `(name, value)` pairs in declaration order.
        values: Vec<(String, i64)>,
        /// `(name, bit position)` pairs in declaration order.
        bits: Vec<(String, i64)>,
    },
    /// Homogeneous sequence with a computed length.
    List {
        /// Element type.
        member: Box<TypeNode>,
        /// Length expression.
        length: ExpressionNode,
    },
    /// A computed value occupying wire space.
    Expr {
        /// The computed expression.
        expr: ExpressionNode,
    },
    /// Alignment or explicit padding.
    Pad {
        /// Required alignment in bytes; 1 for plain pad bytes.
        align: u64,
    },
    /// Product type.
    Struct(Aggregate),
    /// Overlay of alternatives sharing storage.
    Union(Aggregate),
    /// Struct selecting among a set of event wire images.
    EventStruct(Aggregate),
    /// Tagged union discriminated by an expression over sibling fields.
    Switch {
        /// Discriminating expression.
        expr: ExpressionNode,
        /// Case or bitcase members, each wrapped in a field occurrence.
        cases: Vec<FieldNode>,
    },
    /// Switch member matched by exact discriminator value.
    Case {
        /// Discriminator-value expressions in declaration order.
        matches: Vec<ExpressionNode>,
        /// Member payload.
        body: Aggregate,
    },
    /// Switch member matched by discriminator bits.
    Bitcase {
        /// Discriminator-bit expressions in declaration order.
        matches: Vec<ExpressionNode>,
        /// Member payload.
        body: Aggregate,
    },
    /// Client-to-server message.
    Request {
        /// Major opcode.
        opcode: i64,
        /// Reply wire image, when the request has one.
        reply: Option<Box<TypeNode>>,
        /// Request payload.
        body: Aggregate,
    },
    /// Server reply to a request.
    Reply(Aggregate),
    /// Asynchronous server-to-client message.
    Event {
        /// `(name, opcode)` pairs in declaration order.
        opcodes: Vec<(String, i64)>,
        /// Set for generic (extended-length) events.
        generic: bool,
        /// Event payload.
        body: Aggregate,
    },
    /// Server error report.
    Error {
        /// `(name, opcode)` pairs in declaration order.
        opcodes: Vec<(String, i64)>,
        /// Error payload.
        body: Aggregate,
    },
}

impl TypeKind {
    /// The digest `class` tag for this kind.
    pub fn class_tag(&self) -> &'static str {
        match self {
            TypeKind::Simple => "simple",
            TypeKind::Fd => "fd",
            TypeKind::Enum { .. } => "enum",
            TypeKind::List { .. } => "list",
            TypeKind::Expr { .. } => "expr",
            TypeKind::Pad { .. } => "pad",
            TypeKind::Struct(_) => "struct",
            TypeKind::Union(_) => "union",
            TypeKind::EventStruct(_) => "eventstruct",
            TypeKind::Switch { .. } => "switch",
            TypeKind::Case { .. } => "case",
            TypeKind::Bitcase { .. } => "bitcase",
            TypeKind::Request { .. } => "request",
            TypeKind::Reply(_) => "reply",
            TypeKind::Event { .. } => "event",
            TypeKind::Error { .. } => "error",
        }
    }

    /// True for kinds whose occurrences digest inline rather than by
    /// type reference.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            TypeKind::Pad { .. }
                | TypeKind::Expr { .. }
                | TypeKind::List { .. }
                | TypeKind::Switch { .. }
                | TypeKind::Case { .. }
                | TypeKind::Bitcase { .. }
        )
    }
}

/// One resolved node of the type graph.
///
/// Owned by the front end and read-only for the lifetime of a digest run.
/// Sizes, alignment, and names are already computed upstream.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    /// Resolved name path, absent for anonymous structural nodes.
    pub name: Option<NamePath>,
    /// Wire size of one occurrence, when defined.
    pub size: Option<u64>,
    /// Alignment offset within the enclosing aggregate; 0 when aligned.
    pub align_offset: u64,
    /// Total wire size when the type is fixed-size; absent otherwise.
    pub fixed_total_size: Option<u64>,
    /// Repeat count, when the node occurs more than a fixed once.
    pub nmemb: Option<u64>,
    /// Attached documentation.
    pub doc: Option<Doc>,
    /// Kind tag with kind-specific children.
    pub kind: TypeKind,
}

impl TypeNode {
    /// Anonymous node of the given kind with nothing else populated.
    pub fn anonymous(kind: TypeKind) -> Self {
        Self {
            name: None,
            size: None,
            align_offset: 0,
            fixed_total_size: None,
            nmemb: None,
            doc: None,
            kind,
        }
    }

    /// Named node of the given kind.
    pub fn named(name: impl Into<NamePath>, kind: TypeKind) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::anonymous(kind)
        }
    }

    /// Named primitive of the given wire size.
    pub fn simple(name: impl Into<NamePath>, size: u64) -> Self {
        Self {
            size: Some(size),
            fixed_total_size: Some(size),
            ..Self::named(name, TypeKind::Simple)
        }
    }

    /// Named enumeration over `values`, with no bit declarations.
    pub fn enumeration(name: impl Into<NamePath>, values: Vec<(String, i64)>) -> Self {
        Self::named(
            name,
            TypeKind::Enum {
                values,
                bits: Vec::new(),
            },
        )
    }

    /// Sets the wire size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the repeat count.
    pub fn with_nmemb(mut self, nmemb: u64) -> Self {
        self.nmemb = Some(nmemb);
        self
    }

    /// Attaches documentation.
    pub fn with_doc(mut self, doc: Doc) -> Self {
        self.doc = Some(doc);
        self
    }
}

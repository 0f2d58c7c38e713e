use crate::path::NamePath;
use crate::types::TypeNode;

/// Named or anonymous occurrence of a type inside an aggregate.
///
/// The front end resolves each field's on-the-wire type separately from
/// its declared type: a field declared against an enum carries the enum
/// under [`enum_ref`](Self::enum_ref) and the transmitted integer type
/// under [`wire_type`](Self::wire_type).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    /// Declared field name; absent for synthesized occurrences such as
    /// pads and switch members.
    pub name: Option<String>,
    /// The field's type node.
    pub ty: TypeNode,
    /// Resolved on-the-wire type path, when it differs from (or
    /// disambiguates) the type node's own name.
    pub wire_type: Option<NamePath>,
    /// Field appears in client-visible APIs.
    pub visible: bool,
    /// Field occupies wire space.
    pub wire: bool,
    /// Field value is computed automatically rather than supplied.
    pub auto: bool,
    /// Field transports a file descriptor.
    pub isfd: bool,
    /// Unqualified name of the enum documenting this field's values.
    pub enum_ref: Option<String>,
}

impl FieldNode {
    /// Ordinary visible wire field.
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            wire_type: None,
            visible: true,
            wire: true,
            auto: false,
            isfd: false,
            enum_ref: None,
        }
    }

    /// Anonymous wire occurrence (pads, switch members).
    pub fn anonymous(ty: TypeNode) -> Self {
        Self {
            name: None,
            ty,
            wire_type: None,
            visible: false,
            wire: true,
            auto: false,
            isfd: false,
            enum_ref: None,
        }
    }

    /// Sets the resolved wire-type path.
    pub fn with_wire_type(mut self, wire_type: impl Into<NamePath>) -> Self {
        self.wire_type = Some(wire_type.into());
        self
    }

    /// Associates the named enum with this field.
    pub fn with_enum(mut self, enum_ref: impl Into<String>) -> Self {
        self.enum_ref = Some(enum_ref.into());
        self
    }

    /// Marks the field as a file-descriptor transport.
    pub fn with_fd(mut self) -> Self {
        self.isfd = true;
        self
    }
}

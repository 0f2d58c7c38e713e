use crate::types::TypeNode;

/// Operator vocabulary for resolved expressions.
///
/// Closed by design: the digest engine dispatches exhaustively, and a new
/// operator is an intentional breaking change for downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprOp {
    /// Addition, `+`.
    Add,
    /// Subtraction, `-`.
    Sub,
    /// Multiplication, `*`.
    Mul,
    /// Integer division, `/`.
    Div,
    /// Bitwise and, `&`.
    And,
    /// Left shift, `<<`.
    Shl,
    /// Bitwise complement, `~`.
    Complement,
    /// Population count of the operand.
    PopCount,
    /// Reference to a named enum value.
    EnumRef,
    /// Sum over the elements of a list field.
    SumOf,
    /// The current element inside a sum-of body.
    ListElementRef,
}

impl ExprOp {
    /// The operator token used in digest output.
    pub fn token(self) -> &'static str {
        match self {
            ExprOp::Add => "+",
            ExprOp::Sub => "-",
            ExprOp::Mul => "*",
            ExprOp::Div => "/",
            ExprOp::And => "&",
            ExprOp::Shl => "<<",
            ExprOp::Complement => "~",
            ExprOp::PopCount => "popcount",
            ExprOp::EnumRef => "enumref",
            ExprOp::SumOf => "sumof",
            ExprOp::ListElementRef => "listelement-ref",
        }
    }
}

/// A resolved length, condition, or discriminator expression.
///
/// Record form as delivered by the front end: an optional operator with
/// up to two operands, plus length-field linkage for field references,
/// enum-value references, and sums. Exactly one of the shapes recognized
/// by the digest engine must be populated; anything else is a structural
/// defect in the input graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpressionNode {
    /// Operator, when the expression is not a bare reference or count.
    pub op: Option<ExprOp>,
    /// Left operand.
    pub lhs: Option<Box<ExpressionNode>>,
    /// Right operand. For `sumof`, the per-element expression.
    pub rhs: Option<Box<ExpressionNode>>,
    /// Referenced field name: the bare field reference, the value name of
    /// an `enumref`, or the summed list field of a `sumof`.
    pub lenfield_name: Option<String>,
    /// Referenced field's type: the enum for an `enumref`, the list
    /// element type for a `sumof`.
    pub lenfield_type: Option<Box<TypeNode>>,
    /// Literal element count.
    pub nmemb: Option<i64>,
    /// Set when the expression counts bits rather than elements.
    pub bitfield: bool,
}

impl ExpressionNode {
    /// Bare reference to a sibling field.
    pub fn fieldref(name: impl Into<String>) -> Self {
        Self {
            lenfield_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Literal count.
    pub fn value(nmemb: i64) -> Self {
        Self {
            nmemb: Some(nmemb),
            ..Self::default()
        }
    }

    /// Binary operator application.
    pub fn binary(op: ExprOp, lhs: ExpressionNode, rhs: ExpressionNode) -> Self {
        Self {
            op: Some(op),
            lhs: Some(Box::new(lhs)),
            rhs: Some(Box::new(rhs)),
            ..Self::default()
        }
    }

    /// Unary operator application (operand on the right, as resolved).
    pub fn unary(op: ExprOp, rhs: ExpressionNode) -> Self {
        Self {
            op: Some(op),
            rhs: Some(Box::new(rhs)),
            ..Self::default()
        }
    }

    /// Reference to the named value of an enum type.
    pub fn enumref(enum_type: TypeNode, value: impl Into<String>) -> Self {
        Self {
            op: Some(ExprOp::EnumRef),
            lenfield_name: Some(value.into()),
            lenfield_type: Some(Box::new(enum_type)),
            ..Self::default()
        }
    }

    /// Sum over the elements of the named list field.
    pub fn sumof(
        field: impl Into<String>,
        element_type: Option<TypeNode>,
        element_expr: Option<ExpressionNode>,
    ) -> Self {
        Self {
            op: Some(ExprOp::SumOf),
            lenfield_name: Some(field.into()),
            lenfield_type: element_type.map(Box::new),
            rhs: element_expr.map(Box::new),
            ..Self::default()
        }
    }

    /// Marks the expression as bit-level.
    pub fn bitfield(mut self) -> Self {
        self.bitfield = true;
        self
    }
}

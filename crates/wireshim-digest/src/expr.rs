//! Expression canonicalization.
//!
//! Forms in priority order: sum-of marker, operator sequence, bare field
//! reference, bare count. Anything else is a structural defect. A
//! bit-level expression wraps its digest in a `{"bitfield": …}` marker.

use crate::digester::{digest_type_or_typeref, DigestContext};
use crate::error::DigestError;
use serde_json::{Map, Value};
use wireshim_graph::{ExprOp, ExpressionNode, NamePath};

/// Digests one expression; scalar output for the bare forms.
///
/// `enumref` sequences carry the referenced enum's type-or-reference and
/// the referenced value name after the operands, so consumers can resolve
/// the value without access to the input graph.
pub fn digest_expr(
    expr: &ExpressionNode,
    owner: &NamePath,
    ctx: &mut DigestContext<'_>,
) -> Result<Value, DigestError> {
    let digest = if expr.op == Some(ExprOp::SumOf) {
        let field = expr
            .lenfield_name
            .as_ref()
            .ok_or_else(|| DigestError::UnhandledExpression {
                path: owner.clone(),
            })?;
        let mut marker = Map::new();
        marker.insert("sumof".into(), Value::from(field.as_str()));
        if let Some(element_type) = &expr.lenfield_type {
            marker.insert(
                "element_type".into(),
                digest_type_or_typeref(element_type, None, owner, ctx)?,
            );
        }
        if let Some(element_expr) = &expr.rhs {
            marker.insert("element_expr".into(), digest_expr(element_expr, owner, ctx)?);
        }
        Value::Object(marker)
    } else if let Some(op) = expr.op {
        let mut sequence = vec![Value::from(op.token())];
        if let Some(lhs) = &expr.lhs {
            sequence.push(digest_expr(lhs, owner, ctx)?);
        }
        if let Some(rhs) = &expr.rhs {
            sequence.push(digest_expr(rhs, owner, ctx)?);
        }
        if op == ExprOp::EnumRef {
            let enum_type =
                expr.lenfield_type
                    .as_ref()
                    .ok_or_else(|| DigestError::UnhandledExpression {
                        path: owner.clone(),
                    })?;
            sequence.push(digest_type_or_typeref(enum_type, None, owner, ctx)?);
            let value_name =
                expr.lenfield_name
                    .as_ref()
                    .ok_or_else(|| DigestError::UnhandledExpression {
                        path: owner.clone(),
                    })?;
            sequence.push(Value::from(value_name.as_str()));
        }
        Value::Array(sequence)
    } else if let Some(name) = &expr.lenfield_name {
        Value::from(name.as_str())
    } else if let Some(nmemb) = expr.nmemb {
        Value::from(nmemb)
    } else {
        return Err(DigestError::UnhandledExpression {
            path: owner.clone(),
        });
    };

    if expr.bitfield {
        let mut marker = Map::new();
        marker.insert("bitfield".into(), digest);
        Ok(Value::Object(marker))
    } else {
        Ok(digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::SimpleTypeCollector;
    use crate::registry::CrossReferenceRegistry;
    use serde_json::json;
    use wireshim_graph::{Namespace, TypeNode};

    fn with_ctx<T>(run: impl FnOnce(&mut DigestContext<'_>) -> T) -> T {
        let mut registry = CrossReferenceRegistry::new();
        let mut simple_types = SimpleTypeCollector::new();
        let namespace = Namespace::core(["xcb"]);
        let mut ctx = DigestContext {
            registry: &mut registry,
            simple_types: &mut simple_types,
            namespace: &namespace,
        };
        run(&mut ctx)
    }

    fn owner() -> NamePath {
        NamePath::from(["xcb", "Owner"])
    }

    #[test]
    fn bare_field_reference_digests_to_string() {
        let value = with_ctx(|ctx| digest_expr(&ExpressionNode::fieldref("len"), &owner(), ctx));
        assert_eq!(value.unwrap(), json!("len"));
    }

    #[test]
    fn bare_count_digests_to_integer() {
        let value = with_ctx(|ctx| digest_expr(&ExpressionNode::value(4), &owner(), ctx));
        assert_eq!(value.unwrap(), json!(4));
    }

    #[test]
    fn operator_sequence_carries_both_operands() {
        let expr = ExpressionNode::binary(
            ExprOp::Mul,
            ExpressionNode::fieldref("width"),
            ExpressionNode::fieldref("height"),
        );
        let value = with_ctx(|ctx| digest_expr(&expr, &owner(), ctx)).unwrap();
        assert_eq!(value, json!(["*", "width", "height"]));
    }

    #[test]
    fn unary_complement_has_single_operand() {
        let expr = ExpressionNode::unary(ExprOp::Complement, ExpressionNode::fieldref("mask"));
        let value = with_ctx(|ctx| digest_expr(&expr, &owner(), ctx)).unwrap();
        assert_eq!(value, json!(["~", "mask"]));
    }

    #[test]
    fn enumref_appends_type_reference_and_value_name() {
        let expr = ExpressionNode::enumref(
            TypeNode::enumeration(["xcb", "EventType"], vec![("KeyPress".into(), 1)]),
            "KeyPress",
        );
        let value = with_ctx(|ctx| digest_expr(&expr, &owner(), ctx)).unwrap();
        assert_eq!(value, json!(["enumref", ["xcb", "EventType"], "KeyPress"]));
    }

    #[test]
    fn sumof_digests_to_marker_object() {
        let expr = ExpressionNode::sumof(
            "pad_lengths",
            Some(TypeNode::simple(["CARD32"], 4)),
            Some(ExpressionNode::binary(
                ExprOp::Add,
                ExpressionNode { op: Some(ExprOp::ListElementRef), ..ExpressionNode::default() },
                ExpressionNode::value(1),
            )),
        );
        let value = with_ctx(|ctx| digest_expr(&expr, &owner(), ctx)).unwrap();
        assert_eq!(
            value,
            json!({
                "sumof": "pad_lengths",
                "element_type": ["CARD32"],
                "element_expr": ["+", ["listelement-ref"], 1],
            })
        );
    }

    #[test]
    fn bitfield_flag_wraps_any_form() {
        let expr = ExpressionNode::fieldref("mask").bitfield();
        let value = with_ctx(|ctx| digest_expr(&expr, &owner(), ctx)).unwrap();
        assert_eq!(value, json!({ "bitfield": "mask" }));
    }

    #[test]
    fn empty_expression_is_fatal_and_names_the_owner() {
        let err =
            with_ctx(|ctx| digest_expr(&ExpressionNode::default(), &owner(), ctx)).unwrap_err();
        assert!(matches!(err, DigestError::UnhandledExpression { path } if path == owner()));
    }
}

//! Recursive type-to-digest transformation.
//!
//! One exhaustive dispatch over the closed kind vocabulary. Every digest
//! carries exactly one `class` key; per-kind keys are the binding
//! contract for downstream consumers, so a changed key set is a breaking
//! change. Digest objects are `serde_json::Map`s, whose sorted keys make
//! serialized key order canonical by construction.

use crate::collector::SimpleTypeCollector;
use crate::error::DigestError;
use crate::expr::digest_expr;
use crate::field::digest_field;
use crate::registry::CrossReferenceRegistry;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use wireshim_graph::{Aggregate, ExpressionNode, Namespace, NamePath, TypeKind, TypeNode};

/// Shared mutable state of one digest run, passed explicitly through the
/// whole transformation; the engine has no ambient globals.
pub struct DigestContext<'a> {
    /// Cross-item back-reference registry shared across all modules.
    pub registry: &'a mut CrossReferenceRegistry,
    /// Simple-type collector shared across all modules.
    pub simple_types: &'a mut SimpleTypeCollector,
    /// Namespace of the module currently being translated.
    pub namespace: &'a Namespace,
}

/// Switch discriminators that cannot be read off the switch expression as
/// a bare field reference, keyed by the switch's dotted path.
///
/// Data, not logic: a protocol whose switch discriminates on a computed
/// expression gets one row here naming the discriminating field.
const DISCRIMINATOR_EXCEPTIONS: &[(&str, &str)] = &[
    // xkb's SelectEvents masks affectWhich with clear and selectAll
    // instead of referencing it bare.
    ("xcb.xkb.SelectEvents.details", "affectWhich"),
];

/// Renders a name path as its digest form, a JSON array of segments.
pub(crate) fn path_value(path: &NamePath) -> Value {
    Value::Array(
        path.segments()
            .iter()
            .map(|segment| Value::String(segment.clone()))
            .collect(),
    )
}

fn pairs_value(pairs: &[(String, i64)]) -> Value {
    Value::Array(
        pairs
            .iter()
            .map(|(name, value)| Value::Array(vec![Value::String(name.clone()), Value::from(*value)]))
            .collect(),
    )
}

/// Keys shared by every kind: name, class, size, doc, alignment offset,
/// fixed total size (presence-as-flag), and repeat count when ≠ 1.
pub(crate) fn base_digest(node: &TypeNode) -> Result<Map<String, Value>, DigestError> {
    let mut digest = Map::new();
    if let Some(name) = &node.name {
        digest.insert("name".into(), path_value(name));
    }
    digest.insert("class".into(), Value::from(node.kind.class_tag()));
    if let Some(size) = node.size {
        digest.insert("size".into(), Value::from(size));
    }
    if let Some(doc) = &node.doc {
        let value = serde_json::to_value(doc).map_err(|err| DigestError::UnserializableDoc {
            path: doc.name.clone(),
            detail: err.to_string(),
        })?;
        digest.insert("doc".into(), value);
    }
    if node.align_offset != 0 {
        digest.insert("align_offset".into(), Value::from(node.align_offset));
    }
    if let Some(total) = node.fixed_total_size {
        if total != 0 {
            digest.insert("fixed_total_size".into(), Value::from(total));
        }
    }
    if let Some(nmemb) = node.nmemb {
        if nmemb != 1 {
            digest.insert("nmemb".into(), Value::from(nmemb));
        }
    }
    Ok(digest)
}

fn digest_aggregate(
    digest: &mut Map<String, Value>,
    body: &Aggregate,
    owner: &NamePath,
    ctx: &mut DigestContext<'_>,
) -> Result<(), DigestError> {
    let mut all_field_names = BTreeSet::new();
    let mut fields = Vec::with_capacity(body.fields.len());
    for field in &body.fields {
        fields.push(digest_field(field, &mut all_field_names, owner, ctx)?);
    }
    digest.insert("fields".into(), Value::Array(fields));
    if let Some(length_expr) = &body.length_expr {
        digest.insert("length_expr".into(), digest_expr(length_expr, owner, ctx)?);
    }
    Ok(())
}

fn infer_discriminator(path: &NamePath, expr: &ExpressionNode) -> Result<String, DigestError> {
    if expr.op.is_none() {
        if let Some(name) = &expr.lenfield_name {
            return Ok(name.clone());
        }
    }
    let dotted = path.dotted();
    DISCRIMINATOR_EXCEPTIONS
        .iter()
        .find(|(switch, _)| *switch == dotted)
        .map(|(_, discriminator)| (*discriminator).to_string())
        .ok_or_else(|| DigestError::UnknownDiscriminator { path: path.clone() })
}

/// Digests one type node.
///
/// `owner` is the nearest enclosing named item, used for error reporting;
/// a named node becomes the owner of everything beneath it.
pub fn digest_type(
    node: &TypeNode,
    owner: &NamePath,
    ctx: &mut DigestContext<'_>,
) -> Result<Value, DigestError> {
    let owner = node.name.as_ref().unwrap_or(owner);
    let mut digest = base_digest(node)?;

    match &node.kind {
        TypeKind::Simple | TypeKind::Fd => {}
        TypeKind::Enum { values, bits } => {
            // Storage size is an in-memory artifact; enums have no wire
            // size of their own.
            digest.remove("size");
            digest.remove("fixed_total_size");
            digest.insert("values".into(), pairs_value(values));
            digest.insert("bits".into(), pairs_value(bits));
            digest.insert("wiretypes".into(), Value::Array(Vec::new()));
        }
        TypeKind::List { member, length } => {
            digest.remove("name");
            digest.insert(
                "member".into(),
                digest_type_or_typeref(member, None, owner, ctx)?,
            );
            digest.insert("expr".into(), digest_expr(length, owner, ctx)?);
            if let Some(nmemb) = node.nmemb {
                digest.insert("nmemb".into(), Value::from(nmemb));
            }
        }
        TypeKind::Expr { expr } => {
            digest.insert("expr".into(), digest_expr(expr, owner, ctx)?);
        }
        TypeKind::Pad { align } => {
            digest.remove("nmemb");
            if *align != 1 {
                digest.insert("align".into(), Value::from(*align));
            }
        }
        TypeKind::Struct(body)
        | TypeKind::Union(body)
        | TypeKind::EventStruct(body)
        | TypeKind::Reply(body) => {
            digest_aggregate(&mut digest, body, owner, ctx)?;
        }
        TypeKind::Switch { expr, cases } => {
            let mut single = false;
            let mut multiple = false;
            for case in cases {
                match &case.ty.kind {
                    TypeKind::Case { .. } => single = true,
                    TypeKind::Bitcase { .. } => multiple = true,
                    _ => {
                        return Err(DigestError::ForeignSwitchMember {
                            path: owner.clone(),
                        })
                    }
                }
            }
            let switch_type = match (single, multiple) {
                (true, false) => "single",
                (false, true) => "multiple",
                _ => {
                    return Err(DigestError::MixedSwitchMembers {
                        path: owner.clone(),
                    })
                }
            };
            match node.size {
                Some(0) => {
                    digest.remove("size");
                }
                other => {
                    return Err(DigestError::NonzeroSwitchSize {
                        path: owner.clone(),
                        found: other.map_or_else(|| "none".to_string(), |n| n.to_string()),
                    })
                }
            }
            digest.insert("switch_type".into(), Value::from(switch_type));
            digest.insert("switch_expr".into(), digest_expr(expr, owner, ctx)?);
            digest.insert(
                "discriminator".into(),
                Value::from(infer_discriminator(owner, expr)?),
            );
            let mut all_field_names = BTreeSet::new();
            let mut case_digests = Vec::with_capacity(cases.len());
            for case in cases {
                case_digests.push(digest_field(case, &mut all_field_names, owner, ctx)?);
            }
            digest.insert("cases".into(), Value::Array(case_digests));
        }
        TypeKind::Case { matches, body } | TypeKind::Bitcase { matches, body } => {
            digest_aggregate(&mut digest, body, owner, ctx)?;
            let mut match_digests = Vec::with_capacity(matches.len());
            for expr in matches {
                match_digests.push(digest_expr(expr, owner, ctx)?);
            }
            digest.insert("matches".into(), Value::Array(match_digests));
        }
        TypeKind::Request {
            opcode,
            reply,
            body,
        } => {
            digest_aggregate(&mut digest, body, owner, ctx)?;
            digest.insert("opcode".into(), Value::from(*opcode));
            if let Some(reply) = reply {
                digest.insert("reply".into(), digest_type(reply, owner, ctx)?);
            }
        }
        TypeKind::Event {
            opcodes,
            generic,
            body,
        } => {
            digest_aggregate(&mut digest, body, owner, ctx)?;
            digest.insert("opcodes".into(), pairs_value(opcodes));
            if *generic {
                digest.insert("generic_event".into(), Value::Bool(true));
            }
        }
        TypeKind::Error { opcodes, body } => {
            digest_aggregate(&mut digest, body, owner, ctx)?;
            digest.insert("opcodes".into(), pairs_value(opcodes));
        }
    }

    Ok(Value::Object(digest))
}

/// Digests a type occurrence either inline or as a reference.
///
/// Structural kinds (pad, expr, list, switch, case, bitcase) have no
/// identity of their own and digest inline. Everything else is referenced
/// by path — `wire_type` when the enclosing field resolved one, else the
/// node's own name — and simple kinds are additionally pushed through the
/// collector so the document's `simple_types` list covers them.
pub fn digest_type_or_typeref(
    node: &TypeNode,
    wire_type: Option<&NamePath>,
    owner: &NamePath,
    ctx: &mut DigestContext<'_>,
) -> Result<Value, DigestError> {
    if node.kind.is_structural() {
        return digest_type(node, owner, ctx);
    }
    if matches!(node.kind, TypeKind::Simple) {
        ctx.simple_types.push(node, owner)?;
    }
    let path = wire_type
        .or(node.name.as_ref())
        .ok_or_else(|| DigestError::MissingTypeName {
            path: owner.clone(),
        })?;
    Ok(path_value(path))
}

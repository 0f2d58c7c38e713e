//! Field canonicalization.
//!
//! Handles name synthesis for anonymous switch members, flag digesting,
//! file-descriptor type replacement, and the enum/wiretype wiring through
//! the cross-reference registry.

use crate::digester::{digest_type_or_typeref, path_value, DigestContext};
use crate::error::DigestError;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use wireshim_graph::{ExprOp, FieldNode, NamePath, TypeKind};

/// Appends `wire` to the digest's `wiretypes` list, keeping the list
/// sorted and duplicate-free so its content is independent of the order
/// referencing fields were processed in.
fn append_wiretype(digest: &mut Value, wire: &[String]) {
    let Some(list) = digest.get_mut("wiretypes").and_then(Value::as_array_mut) else {
        return;
    };
    let probe = |entry: &Value| -> Vec<String> {
        entry
            .as_array()
            .map(|segments| {
                segments
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };
    let key: Vec<String> = wire.to_vec();
    match list.binary_search_by(|entry| probe(entry).cmp(&key)) {
        Ok(_) => {}
        Err(index) => list.insert(
            index,
            Value::Array(wire.iter().map(|s| Value::from(s.as_str())).collect()),
        ),
    }
}

/// Picks a name for an anonymous case/bitcase member: the first
/// `enumref` match whose value name is not already taken in the
/// enclosing aggregate.
fn synthesize_name(field: &FieldNode, all_field_names: &BTreeSet<String>) -> Option<String> {
    let matches = match &field.ty.kind {
        TypeKind::Case { matches, .. } | TypeKind::Bitcase { matches, .. } => matches,
        _ => return None,
    };
    matches
        .iter()
        .filter(|expr| expr.op == Some(ExprOp::EnumRef))
        .filter_map(|expr| expr.lenfield_name.as_deref())
        .find(|candidate| !all_field_names.contains(*candidate))
        .map(str::to_string)
}

/// Digests one field of an aggregate.
///
/// `all_field_names` is shared write-through across the whole aggregate's
/// field list: every chosen name is recorded so later synthesis cannot
/// collide with it.
pub fn digest_field(
    field: &FieldNode,
    all_field_names: &mut BTreeSet<String>,
    owner: &NamePath,
    ctx: &mut DigestContext<'_>,
) -> Result<Value, DigestError> {
    let mut digest = Map::new();

    let mut synthesized = None;
    match &field.name {
        Some(name) => {
            digest.insert("name".into(), Value::from(name.as_str()));
        }
        None => {
            if let Some(name) = synthesize_name(field, all_field_names) {
                digest.insert("name".into(), Value::from(name.as_str()));
                synthesized = Some(name);
            }
        }
    }
    if let Some(Value::String(name)) = digest.get("name") {
        all_field_names.insert(name.clone());
    }

    let mut flags = Vec::new();
    if field.visible {
        flags.push(Value::from("visible"));
    }
    if field.wire {
        flags.push(Value::from("wire"));
    }
    if field.auto {
        flags.push(Value::from("auto"));
    }
    if field.isfd {
        flags.push(Value::from("isfd"));
    }
    digest.insert("flags".into(), Value::Array(flags));

    // A single descriptor transmits out of band; its declared type is a
    // placeholder and digests as a reference to the conventional "fd"
    // type. A *list* of descriptors keeps its list digest.
    let ty_digest = if field.isfd && matches!(field.ty.kind, TypeKind::Fd) {
        Value::Array(vec![Value::from("fd")])
    } else {
        let mut ty_digest =
            digest_type_or_typeref(&field.ty, field.wire_type.as_ref(), owner, ctx)?;
        if let Some(name) = &synthesized {
            // The front end synthesized a placeholder trailing component
            // for the anonymous member; make it match the chosen name.
            if let Some(Value::Array(segments)) = ty_digest.get_mut("name") {
                if let Some(last) = segments.last_mut() {
                    *last = Value::from(name.as_str());
                }
            }
        }
        ty_digest
    };
    digest.insert("type".into(), ty_digest);

    if let Some(enum_name) = &field.enum_ref {
        let resolved = ctx.namespace.qualify(enum_name);
        if let Some(wire_type) = field.wire_type.as_ref().or(field.ty.name.as_ref()) {
            let wire: Vec<String> = wire_type.segments().to_vec();
            ctx.registry.add_hook(
                resolved.clone(),
                Box::new(move |digest| append_wiretype(digest, &wire)),
            );
        }
        digest.insert("enum".into(), path_value(&resolved));
    }

    Ok(Value::Object(digest))
}

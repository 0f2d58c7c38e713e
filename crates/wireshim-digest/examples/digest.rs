use wireshim_digest::{digest_protocol, to_canonical_string};
use wireshim_graph::{
    Aggregate, ExpressionNode, FieldNode, ItemKind, ItemRegistration, ModuleNode, Namespace,
    TypeKind, TypeNode,
};

fn main() {
    let mut module = ModuleNode::new("xproto.xml", Namespace::core(["xcb"]));
    module.push(ItemRegistration::new(
        ItemKind::Simple,
        ["xcb", "CARD8"],
        TypeNode::simple(["CARD8"], 1),
    ));
    module.push(ItemRegistration::new(
        ItemKind::Enum,
        ["xcb", "Mode"],
        TypeNode::enumeration(["xcb", "Mode"], vec![("Sync".into(), 0), ("Async".into(), 1)]),
    ));
    module.push(ItemRegistration::new(
        ItemKind::Struct,
        ["xcb", "Str"],
        TypeNode::named(
            ["xcb", "Str"],
            TypeKind::Struct(Aggregate::new(vec![
                FieldNode::new("name_len", TypeNode::simple(["CARD8"], 1)),
                FieldNode::new(
                    "name",
                    TypeNode::anonymous(TypeKind::List {
                        member: Box::new(TypeNode::simple(["char"], 1)),
                        length: ExpressionNode::fieldref("name_len"),
                    }),
                ),
            ])),
        ),
    ));

    let document = match digest_protocol(&[module]) {
        Ok(document) => document,
        Err(err) => {
            eprintln!("digest failed: {}", err);
            std::process::exit(1);
        }
    };
    match to_canonical_string(&document) {
        Ok(canonical) => println!("{}", canonical),
        Err(err) => {
            eprintln!("emission failed: {}", err);
            std::process::exit(1);
        }
    }
}

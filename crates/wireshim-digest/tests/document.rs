use serde_json::{json, Value};
use wireshim_digest::{
    digest_protocol, to_canonical_string, CrossReferenceRegistry, DigestError, ModuleTranslator,
    SimpleTypeCollector,
};
use wireshim_graph::{
    Aggregate, FieldNode, ItemKind, ItemRegistration, ModuleNode, NamePath, Namespace,
    NamespaceMeta, TypeKind, TypeNode,
};

fn enum_e() -> TypeNode {
    TypeNode::enumeration(["xcb", "E"], vec![("A".into(), 1), ("B".into(), 2)])
}

fn counted_struct(name: [&str; 2], wire_type: &str) -> TypeNode {
    TypeNode::named(
        name,
        TypeKind::Struct(Aggregate::new(vec![FieldNode::new(
            "count",
            TypeNode::simple([wire_type], 1),
        )
        .with_wire_type([wire_type])
        .with_enum("E")])),
    )
}

fn core_module(xmlfilename: &str, items: Vec<ItemRegistration>) -> ModuleNode {
    let mut module = ModuleNode::new(xmlfilename, Namespace::core(["xcb"]));
    module.items = items;
    module
}

fn item_digest<'a>(document: &'a Value, definition: &Value) -> &'a Value {
    document["modules"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|module| module["items"].as_array().unwrap())
        .find(|item| &item["definition"] == definition)
        .map(|item| &item["type"])
        .expect("item present")
}

#[test]
fn enum_and_referencing_struct_produce_the_documented_digest() {
    let module = core_module(
        "xproto.xml",
        vec![
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
            ItemRegistration::new(ItemKind::Struct, ["xcb", "S"], counted_struct(["xcb", "S"], "CARD8")),
        ],
    );
    let document = digest_protocol(&[module]).unwrap();

    let module_value = &document["modules"][0];
    assert_eq!(module_value["xmlfilename"], json!("xproto.xml"));
    assert_eq!(module_value["core"], json!(true));

    assert_eq!(
        item_digest(&document, &json!(["xcb", "E"])),
        &json!({
            "name": ["xcb", "E"],
            "class": "enum",
            "values": [["A", 1], ["B", 2]],
            "bits": [],
            "wiretypes": [["CARD8"]],
        })
    );

    let field = &item_digest(&document, &json!(["xcb", "S"]))["fields"][0];
    assert_eq!(field["name"], json!("count"));
    assert_eq!(field["enum"], json!(["xcb", "E"]));
    assert_eq!(field["type"], json!(["CARD8"]));

    let simple_types = document["simple_types"].as_array().unwrap();
    assert_eq!(simple_types.len(), 1);
    assert_eq!(simple_types[0]["name"], json!(["CARD8"]));
}

#[test]
fn field_before_enum_declaration_still_lands_its_wiretype() {
    let module = core_module(
        "xproto.xml",
        vec![
            ItemRegistration::new(ItemKind::Struct, ["xcb", "S"], counted_struct(["xcb", "S"], "CARD8")),
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
        ],
    );
    let document = digest_protocol(&[module]).unwrap();
    assert_eq!(
        item_digest(&document, &json!(["xcb", "E"]))["wiretypes"],
        json!([["CARD8"]])
    );
}

#[test]
fn unreferenced_enum_keeps_an_empty_wiretypes_list() {
    let module = core_module(
        "xproto.xml",
        vec![ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e())],
    );
    let document = digest_protocol(&[module]).unwrap();
    assert_eq!(
        item_digest(&document, &json!(["xcb", "E"]))["wiretypes"],
        json!([])
    );
}

#[test]
fn distinct_wiretypes_appear_exactly_once_regardless_of_module_order() {
    let declaring = core_module(
        "a.xml",
        vec![
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
            ItemRegistration::new(ItemKind::Struct, ["xcb", "A"], counted_struct(["xcb", "A"], "CARD8")),
        ],
    );
    let referencing = core_module(
        "b.xml",
        vec![ItemRegistration::new(
            ItemKind::Struct,
            ["xcb", "B"],
            counted_struct(["xcb", "B"], "CARD16"),
        )],
    );

    let forward = digest_protocol(&[declaring.clone(), referencing.clone()]).unwrap();
    let reversed = digest_protocol(&[referencing, declaring]).unwrap();

    let expected = json!([["CARD16"], ["CARD8"]]);
    assert_eq!(
        item_digest(&forward, &json!(["xcb", "E"]))["wiretypes"],
        expected
    );
    assert_eq!(
        item_digest(&reversed, &json!(["xcb", "E"]))["wiretypes"],
        expected
    );
}

#[test]
fn module_reordering_changes_nothing_but_the_contractual_orders() {
    let declaring = core_module(
        "a.xml",
        vec![
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
            ItemRegistration::new(ItemKind::Struct, ["xcb", "A"], counted_struct(["xcb", "A"], "CARD8")),
        ],
    );
    let referencing = core_module(
        "b.xml",
        vec![ItemRegistration::new(
            ItemKind::Struct,
            ["xcb", "B"],
            counted_struct(["xcb", "B"], "CARD16"),
        )],
    );

    let forward = digest_protocol(&[declaring.clone(), referencing.clone()]).unwrap();
    let reversed = digest_protocol(&[referencing, declaring]).unwrap();

    // Each module's value is identical wherever the module landed.
    let find_module = |document: &Value, xmlfilename: &str| -> Value {
        document["modules"]
            .as_array()
            .unwrap()
            .iter()
            .find(|module| module["xmlfilename"] == json!(xmlfilename))
            .cloned()
            .expect("module present")
    };
    assert_eq!(find_module(&forward, "a.xml"), find_module(&reversed, "a.xml"));
    assert_eq!(find_module(&forward, "b.xml"), find_module(&reversed, "b.xml"));

    // The simple-types list follows each run's first-encounter order but
    // covers the same set.
    let sorted_simple_types = |document: &Value| -> Vec<String> {
        let mut keys: Vec<String> = document["simple_types"]
            .as_array()
            .unwrap()
            .iter()
            .map(|digest| digest["name"].to_string())
            .collect();
        keys.sort();
        keys
    };
    assert_eq!(sorted_simple_types(&forward), sorted_simple_types(&reversed));
    assert_eq!(
        sorted_simple_types(&forward),
        vec![r#"["CARD16"]"#.to_string(), r#"["CARD8"]"#.to_string()]
    );
}

#[test]
fn module_translator_reports_its_registrations() {
    let module = core_module(
        "xproto.xml",
        vec![ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e())],
    );
    let mut registry = CrossReferenceRegistry::new();
    let mut simple_types = SimpleTypeCollector::new();
    let record = ModuleTranslator::new(&module, &mut registry, &mut simple_types)
        .run()
        .unwrap();
    assert_eq!(record.xmlfilename(), "xproto.xml");
    assert!(matches!(record.meta(), NamespaceMeta::Core));
    assert_eq!(record.items(), &[NamePath::from(["xcb", "E"])][..]);
    // The digests themselves stay in the shared registry.
    assert!(registry.digest(&NamePath::from(["xcb", "E"])).is_some());
}

#[test]
fn extension_module_records_version_and_both_name_forms() {
    let mut module = ModuleNode::new(
        "xkb.xml",
        Namespace::extension(["xcb", "xkb"], 1, 0, "XKEYBOARD", "xkb"),
    );
    module.push(ItemRegistration::new(
        ItemKind::Enum,
        ["xcb", "xkb", "EventType"],
        TypeNode::enumeration(["xcb", "xkb", "EventType"], vec![("NewKeyboardNotify".into(), 1)]),
    ));
    let document = digest_protocol(&[module]).unwrap();
    let module_value = &document["modules"][0];
    assert!(module_value.get("core").is_none());
    assert_eq!(module_value["major_version"], json!(1));
    assert_eq!(module_value["minor_version"], json!(0));
    assert_eq!(module_value["ext_xname"], json!("XKEYBOARD"));
    assert_eq!(module_value["ext_name"], json!("xkb"));
}

#[test]
fn colliding_name_paths_are_fatal() {
    let module = core_module(
        "xproto.xml",
        vec![
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
        ],
    );
    let err = digest_protocol(&[module]).unwrap_err();
    assert!(
        matches!(err, DigestError::DuplicateName { path } if path == NamePath::from(["xcb", "E"]))
    );
}

#[test]
fn declared_item_kind_must_match_the_node() {
    let module = core_module(
        "xproto.xml",
        vec![ItemRegistration::new(
            ItemKind::Struct,
            ["xcb", "E"],
            enum_e(),
        )],
    );
    let err = digest_protocol(&[module]).unwrap_err();
    assert!(
        matches!(err, DigestError::ItemKindMismatch { path } if path == NamePath::from(["xcb", "E"]))
    );
}

#[test]
fn canonical_emission_is_byte_stable_across_runs() {
    let module = core_module(
        "xproto.xml",
        vec![
            ItemRegistration::new(ItemKind::Enum, ["xcb", "E"], enum_e()),
            ItemRegistration::new(ItemKind::Struct, ["xcb", "S"], counted_struct(["xcb", "S"], "CARD8")),
        ],
    );
    let first = to_canonical_string(&digest_protocol(&[module.clone()]).unwrap()).unwrap();
    let second = to_canonical_string(&digest_protocol(&[module]).unwrap()).unwrap();
    assert_eq!(first, second);
}

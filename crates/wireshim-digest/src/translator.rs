//! Per-module translation and whole-run orchestration.

use crate::collector::SimpleTypeCollector;
use crate::digester::{digest_type, path_value, DigestContext};
use crate::error::DigestError;
use crate::registry::CrossReferenceRegistry;
use serde_json::{Map, Value};
use wireshim_graph::{ModuleNode, NamePath, NamespaceMeta};

/// One translated module: its identity, metadata, and item paths in
/// declaration order. The item digests stay in the registry until
/// assembly so that hooks from later modules still apply to them.
pub struct ModuleRecord {
    xmlfilename: String,
    meta: NamespaceMeta,
    items: Vec<NamePath>,
}

impl ModuleRecord {
    /// Source description file name of the translated module.
    pub fn xmlfilename(&self) -> &str {
        &self.xmlfilename
    }

    /// Core marker or extension metadata.
    pub fn meta(&self) -> &NamespaceMeta {
        &self.meta
    }

    /// Registered item paths in declaration order; their digests live in
    /// the registry the translator ran against.
    pub fn items(&self) -> &[NamePath] {
        &self.items
    }
}

/// Drives one module's item-registration stream.
pub struct ModuleTranslator<'a> {
    module: &'a ModuleNode,
    registry: &'a mut CrossReferenceRegistry,
    simple_types: &'a mut SimpleTypeCollector,
}

impl<'a> ModuleTranslator<'a> {
    /// Translator for `module` sharing the run's registry and collector.
    pub fn new(
        module: &'a ModuleNode,
        registry: &'a mut CrossReferenceRegistry,
        simple_types: &'a mut SimpleTypeCollector,
    ) -> Self {
        Self {
            module,
            registry,
            simple_types,
        }
    }

    /// Digests and registers every item in provider order.
    pub fn run(mut self) -> Result<ModuleRecord, DigestError> {
        let mut items = Vec::with_capacity(self.module.items.len());
        for item in &self.module.items {
            if !item.kind.admits(&item.node.kind) {
                return Err(DigestError::ItemKindMismatch {
                    path: item.name.clone(),
                });
            }
            let mut ctx = DigestContext {
                registry: &mut *self.registry,
                simple_types: &mut *self.simple_types,
                namespace: &self.module.namespace,
            };
            let digest = digest_type(&item.node, &item.name, &mut ctx)?;
            self.registry.register(item.name.clone(), digest)?;
            items.push(item.name.clone());
        }
        Ok(ModuleRecord {
            xmlfilename: self.module.xmlfilename.clone(),
            meta: self.module.namespace.meta.clone(),
            items,
        })
    }
}

fn assemble_module(
    record: ModuleRecord,
    registry: &CrossReferenceRegistry,
) -> Result<Value, DigestError> {
    let mut module = Map::new();
    module.insert("xmlfilename".into(), Value::from(record.xmlfilename));
    let mut items = Vec::with_capacity(record.items.len());
    for name in record.items {
        let digest = registry
            .digest(&name)
            .cloned()
            .ok_or_else(|| DigestError::MissingRegistration { path: name.clone() })?;
        let mut item = Map::new();
        item.insert("definition".into(), path_value(&name));
        item.insert("type".into(), digest);
        items.push(Value::Object(item));
    }
    module.insert("items".into(), Value::Array(items));
    match record.meta {
        NamespaceMeta::Core => {
            module.insert("core".into(), Value::Bool(true));
        }
        NamespaceMeta::Extension {
            major_version,
            minor_version,
            xname,
            name,
        } => {
            module.insert("major_version".into(), Value::from(major_version));
            module.insert("minor_version".into(), Value::from(minor_version));
            module.insert("ext_xname".into(), Value::from(xname));
            module.insert("ext_name".into(), Value::from(name));
        }
    }
    Ok(Value::Object(module))
}

/// Digests a whole protocol description into its canonical document.
///
/// All modules share one registry and one collector, so cross-module
/// back references resolve no matter which module declares the enum and
/// which the referencing field. Assembly happens only after every module
/// has been translated, ensuring every hook has applied; apart from each
/// module's own item order and the first-seen simple-type order, the
/// document's content does not depend on module order.
pub fn digest_protocol(modules: &[ModuleNode]) -> Result<Value, DigestError> {
    let mut registry = CrossReferenceRegistry::new();
    let mut simple_types = SimpleTypeCollector::new();

    let mut records = Vec::with_capacity(modules.len());
    for module in modules {
        records.push(ModuleTranslator::new(module, &mut registry, &mut simple_types).run()?);
    }

    let mut module_values = Vec::with_capacity(records.len());
    for record in records {
        module_values.push(assemble_module(record, &registry)?);
    }

    let mut document = Map::new();
    document.insert("modules".into(), Value::Array(module_values));
    document.insert(
        "simple_types".into(),
        Value::Array(simple_types.into_digests()),
    );
    Ok(Value::Object(document))
}

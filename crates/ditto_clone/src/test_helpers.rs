//! Shared class fixtures for unit tests.

use std::sync::Arc;

use ditto_model::{ClassBuilder, ClassId, Object, Registry, Ty, Value};

use crate::{CloneConfig, Cloner};

/// A private registry with a cloner over it.
pub(crate) struct Fixture {
    pub registry: Arc<Registry>,
    pub cloner: Cloner,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(CloneConfig::default())
    }

    pub fn with_config(config: CloneConfig) -> Self {
        let registry = Arc::new(Registry::new());
        let cloner = Cloner::with_config(Arc::clone(&registry), config);
        Fixture { registry, cloner }
    }

    /// `Point { x: int, y: int }`
    pub fn point(&self) -> ClassId {
        self.registry
            .register(
                ClassBuilder::new("Point")
                    .field("x", Ty::Int)
                    .field("y", Ty::Int),
            )
            .unwrap()
    }

    /// `Node { label: str, child: Node }`
    pub fn node(&self) -> ClassId {
        let node = self.registry.declare("Node");
        self.registry
            .define(
                node,
                ClassBuilder::new("Node")
                    .field("label", Ty::Str)
                    .field("child", Ty::Class(node)),
            )
            .unwrap();
        node
    }

    pub fn make_point(&self, class: ClassId, x: i64, y: i64) -> Object {
        let p = self.registry.instantiate(class).unwrap();
        p.set("x", x).unwrap();
        p.set("y", y).unwrap();
        p
    }

    /// Linked list of `Node`s labelled `labels[0] -> labels[1] -> ...`.
    pub fn make_chain(&self, class: ClassId, labels: &[&str]) -> Object {
        let mut next = Value::Null;
        for label in labels.iter().rev() {
            let node = self.registry.instantiate(class).unwrap();
            node.set("label", *label).unwrap();
            node.set("child", next).unwrap();
            next = Value::Object(node);
        }
        match next {
            Value::Object(head) => head,
            _ => self.registry.instantiate(class).unwrap(),
        }
    }
}

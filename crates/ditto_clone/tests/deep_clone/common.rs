//! Shared class definitions.

use std::sync::Arc;

use ditto_clone::Cloner;
use ditto_model::{ClassBuilder, ClassId, Object, Registry, Ty, Value};

/// A fresh registry and a cloner over it.
pub fn setup() -> (Arc<Registry>, Cloner) {
    let registry = Arc::new(Registry::new());
    let cloner = Cloner::new(Arc::clone(&registry));
    (registry, cloner)
}

/// `Point { x: int, y: int }`
pub fn point_class(registry: &Registry) -> ClassId {
    registry
        .register(
            ClassBuilder::new("Point")
                .field("x", Ty::Int)
                .field("y", Ty::Int),
        )
        .unwrap()
}

/// `Node { label: str, child: Node }`
pub fn node_class(registry: &Registry) -> ClassId {
    let node = registry.declare("Node");
    registry
        .define(
            node,
            ClassBuilder::new("Node")
                .field("label", Ty::Str)
                .field("child", Ty::Class(node)),
        )
        .unwrap();
    node
}

pub fn point(registry: &Registry, class: ClassId, x: i64, y: i64) -> Object {
    let p = registry.instantiate(class).unwrap();
    p.set("x", x).unwrap();
    p.set("y", y).unwrap();
    p
}

/// `labels[0] -> labels[1] -> ... -> null`
pub fn chain(registry: &Registry, class: ClassId, labels: &[String]) -> Object {
    let head = registry.instantiate(class).unwrap();
    let mut tail = head.clone();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            let next = registry.instantiate(class).unwrap();
            tail.set("child", next.clone()).unwrap();
            tail = next;
        }
        tail.set("label", label.as_str()).unwrap();
    }
    head
}

/// Objects along the `child` links of `head`, head first.
pub fn links(head: &Object) -> Vec<Object> {
    let mut out = vec![head.clone()];
    loop {
        let child = out[out.len() - 1].get("child").unwrap();
        let Some(next) = child.as_object() else {
            return out;
        };
        out.push(next.clone());
    }
}

pub fn expect_object(value: Value) -> Object {
    match value {
        Value::Object(obj) => obj,
        other => panic!("expected an object, got {other:?}"),
    }
}


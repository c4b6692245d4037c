//! Behavior of single clone calls.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use ditto_clone::{CloneConfig, CloneError, CloneMode, Cloner};
use ditto_model::{AttrFlags, ClassBuilder, Ty, Value};

use crate::common::{chain, expect_object, links, node_class, point, point_class, setup};

#[test]
fn point_copy_is_equal_and_distinct() {
    let (registry, cloner) = setup();
    let class = point_class(&registry);
    let p = point(&registry, class, 1, 2);

    let copy = expect_object(cloner.clone_value(&Value::Object(p.clone())).unwrap());
    assert_eq!(copy.get("x").unwrap(), Value::int(1));
    assert_eq!(copy.get("y").unwrap(), Value::int(2));
    assert!(!copy.ptr_eq(&p));
}

#[test]
fn tree_copy_shares_no_nodes() {
    let (registry, cloner) = setup();
    let node = node_class(&registry);
    let root = chain(&registry, node, &["a".to_string(), "b".to_string()]);

    let copy = cloner.clone_object(&root).unwrap();
    let (orig, copied) = (links(&root), links(&copy));
    assert_eq!(copied.len(), 2);
    assert_eq!(copied[1].get("label").unwrap(), Value::string("b"));
    assert_eq!(copied[1].get("child").unwrap(), Value::Null);
    for (o, c) in orig.iter().zip(&copied) {
        assert!(!o.ptr_eq(c));
    }
}

#[test]
fn null_input_gives_null() {
    let (_, cloner) = setup();
    assert_eq!(cloner.clone_value(&Value::Null).unwrap(), Value::Null);
}

#[test]
fn self_typed_null_attribute_stays_null() {
    let (registry, cloner) = setup();
    let node = node_class(&registry);
    let leaf = chain(&registry, node, &["only".to_string()]);

    let copy = cloner.clone_object(&leaf).unwrap();
    assert_eq!(copy.get("label").unwrap(), Value::string("only"));
    assert_eq!(copy.get("child").unwrap(), Value::Null);
}

#[test]
fn callable_and_restricted_attributes_are_not_copied() {
    let (registry, cloner) = setup();
    let widget = registry
        .register(
            ClassBuilder::new("Widget")
                .field("name", Ty::Str)
                .field("on_click", Ty::Function)
                .attr("secret", Ty::Int, AttrFlags::PRIVATE, None)
                .attr("version", Ty::Int, AttrFlags::READ_ONLY, Some(Value::int(1))),
        )
        .unwrap();
    let w = registry.instantiate(widget).unwrap();
    w.set("name", "button").unwrap();
    w.set("on_click", Value::function(|_| Value::Bool(true)))
        .unwrap();
    w.set("secret", 7_i64).unwrap();
    w.set("version", 3_i64).unwrap();

    let copy = cloner.clone_object(&w).unwrap();
    assert_eq!(copy.get("name").unwrap(), Value::string("button"));
    assert_eq!(copy.get("on_click").unwrap(), Value::Null);
    assert_eq!(copy.get("secret").unwrap(), Value::int(0));
    assert_eq!(copy.get("version").unwrap(), Value::int(1));

    let plan = cloner.plan_for(widget).unwrap();
    let skipped: Vec<&str> = plan.skipped().iter().map(|s| &*s.name).collect();
    assert_eq!(skipped, ["on_click", "secret", "version"]);
}

#[test]
fn mutating_the_copy_leaves_the_original_alone() {
    let (registry, cloner) = setup();
    let node = node_class(&registry);
    let root = chain(&registry, node, &["a".to_string(), "b".to_string()]);

    let copy = cloner.clone_object(&root).unwrap();
    links(&copy)[1].set("label", "z").unwrap();
    copy.set("label", "y").unwrap();

    assert_eq!(root.get("label").unwrap(), Value::string("a"));
    assert_eq!(links(&root)[1].get("label").unwrap(), Value::string("b"));
}

#[test]
fn second_clone_reuses_the_plan() {
    let (registry, cloner) = setup();
    let class = point_class(&registry);
    let first = cloner.plan_for(class).unwrap();

    cloner
        .clone_object(&point(&registry, class, 5, 6))
        .unwrap();
    assert!(Arc::ptr_eq(&first, &cloner.plan_for(class).unwrap()));
    assert_eq!(cloner.cache().stats().builds, 1);
}

#[test]
fn missing_constructor_fails_every_time() {
    let (registry, cloner) = setup();
    let handle = registry
        .register(
            ClassBuilder::new("FileHandle")
                .field("fd", Ty::Int)
                .without_default_constructor(),
        )
        .unwrap();
    let owner = registry
        .register(ClassBuilder::new("Owner").field("handle", Ty::Class(handle)))
        .unwrap();
    let o = registry.instantiate(owner).unwrap();

    let expected = CloneError::ConstructionFailure {
        class: "FileHandle".to_string(),
    };
    assert_eq!(cloner.clone_object(&o).unwrap_err(), expected);
    assert_eq!(cloner.clone_object(&o).unwrap_err(), expected);
    assert!(cloner.cache().is_empty());
}

#[test]
fn long_chain_clones_compares_and_drops() {
    let (registry, cloner) = setup();
    let node = node_class(&registry);
    let labels: Vec<String> = (0..200_000).map(|i| i.to_string()).collect();
    let root = chain(&registry, node, &labels);

    let copy = cloner.clone_object(&root).unwrap();
    assert!(copy.deep_eq(&root));
    assert!(!copy.ptr_eq(&root));

    let copied = links(&copy);
    assert_eq!(copied.len(), labels.len());
    assert_eq!(copied[199_999].get("label").unwrap(), Value::string("199999"));

    drop(copied);
    drop(copy);
    drop(root);
}

#[test]
fn graph_mode_keeps_diamonds_and_cycles() {
    let registry = Arc::new(ditto_model::Registry::new());
    let cloner = Cloner::with_config(
        Arc::clone(&registry),
        CloneConfig::new().with_mode(CloneMode::Graph),
    );
    let node = node_class(&registry);
    let root = chain(&registry, node, &["a".to_string(), "b".to_string()]);
    let last = links(&root)[1].clone();
    last.set("child", root.clone()).unwrap();

    let copy = cloner.clone_object(&root).unwrap();
    let tail = expect_object(copy.get("child").unwrap());
    let back = expect_object(tail.get("child").unwrap());
    assert!(back.ptr_eq(&copy));
    assert!(!tail.ptr_eq(&last));
}

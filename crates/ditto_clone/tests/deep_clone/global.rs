//! The process-wide entry point.

use pretty_assertions::assert_eq;

use ditto_clone::{clone_deep, Cloner};
use ditto_model::{ClassBuilder, Registry, Ty, Value};

use crate::common::expect_object;

#[test]
fn clone_deep_uses_the_global_registry() {
    ditto_clone::init_tracing();
    let registry = Registry::global();
    let account = registry
        .register(
            ClassBuilder::new("GlobalAccount")
                .field("owner", Ty::Str)
                .field("balance", Ty::Int),
        )
        .unwrap();
    let a = registry.instantiate(account).unwrap();
    a.set("owner", "ada").unwrap();
    a.set("balance", 100_i64).unwrap();

    let copy = expect_object(clone_deep(&Value::Object(a.clone())).unwrap());
    assert!(!copy.ptr_eq(&a));
    assert!(copy.deep_eq(&a));
    assert!(Cloner::global().cache().contains(account));
}

#[test]
fn clone_deep_passes_scalars_through() {
    assert_eq!(clone_deep(&Value::int(9)).unwrap(), Value::int(9));
    assert_eq!(clone_deep(&Value::Null).unwrap(), Value::Null);
}

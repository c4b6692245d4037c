use std::time::Duration;

use super::*;
use crate::EnumId;

#[test]
fn null_conforms_only_to_references() {
    assert!(Value::Null.conforms_to(Ty::Str));
    assert!(Value::Null.conforms_to(Ty::Function));
    assert!(!Value::Null.conforms_to(Ty::Int));
    assert!(!Value::Null.conforms_to(Ty::Duration));
}

#[test]
fn scalars_conform_to_their_type() {
    assert!(Value::int(3).conforms_to(Ty::Int));
    assert!(Value::float(1.5).conforms_to(Ty::Float));
    assert!(Value::string("x").conforms_to(Ty::Str));
    assert!(Value::Duration(Duration::from_secs(1)).conforms_to(Ty::Duration));
    assert!(!Value::int(3).conforms_to(Ty::Float));
    assert!(!Value::string("x").conforms_to(Ty::Char));
}

#[test]
fn enum_values_check_their_enum() {
    let a = EnumId::fresh();
    let b = EnumId::fresh();
    let v = Value::Enum(EnumValue { ty: a, variant: 1 });
    assert!(v.conforms_to(Ty::Enum(a)));
    assert!(!v.conforms_to(Ty::Enum(b)));
}

#[test]
fn zero_values() {
    assert_eq!(Value::zero(Ty::Int), Value::Int(0));
    assert_eq!(Value::zero(Ty::Bool), Value::Bool(false));
    assert!(Value::zero(Ty::Str).is_null());
    assert!(Value::zero(Ty::Function).is_null());
}

#[test]
fn callables_compare_by_identity() {
    let f = Callable::new(|_| Value::int(1));
    let g = Callable::new(|_| Value::int(1));
    assert_eq!(Value::Function(f.clone()), Value::Function(f.clone()));
    assert_ne!(Value::Function(f), Value::Function(g));
}

#[test]
fn callable_invokes_body() {
    let add = Callable::new(|args| {
        Value::int(args.iter().filter_map(Value::as_int).sum())
    });
    assert_eq!(add.call(&[Value::int(2), Value::int(3)]), Value::int(5));
}

#[test]
fn text_equality_is_by_content() {
    assert_eq!(Value::string("abc"), Value::from("abc"));
    assert_eq!(Value::string("abc").as_str(), Some("abc"));
}

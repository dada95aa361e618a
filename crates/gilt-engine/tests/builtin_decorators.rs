//! Integration tests for the builtin decorator library

mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::body;
use gilt_engine::{
    register_builtins, ClassDecl, ClassElement, DecoratorExpr, Engine, Environment, Expr,
    NativeFunction, ObjectLiteral, ObjectRef, PropertyDefinition, Value,
};

fn builtins() -> Environment {
    let mut env = Environment::new();
    register_builtins(&mut env);
    env
}

fn prototype_of(ctor: &ObjectRef) -> ObjectRef {
    ctor.get(&"prototype".into())
        .unwrap()
        .as_object()
        .cloned()
        .unwrap()
}

#[test]
fn test_readonly_method() {
    let mut env = builtins();
    let decl = ClassDecl::new("Person").element(
        ClassElement::method("kidCount", body("kidCount", Value::from(3)))
            .decorator(DecoratorExpr::bare("readonly")),
    );
    let person = Engine::new().define_class(&decl, &mut env).unwrap();

    let instance = person.instantiate().unwrap();
    assert_eq!(instance.invoke("kidCount", &[]).unwrap().as_number(), Some(3.0));
    assert!(instance.put("kidCount", Value::from(0)).is_err());
}

#[test]
fn test_enumerable_flag_and_nonconfigurable() {
    let env = builtins();
    let decl = ClassDecl::new("C").element(
        ClassElement::method("m", body("m", Value::Null))
            .decorator(DecoratorExpr::bare("nonconfigurable"))
            .decorator(DecoratorExpr::call("enumerable", vec![Expr::bool(true)])),
    );
    let ctor = Engine::new().evaluate_class(&decl, &env).unwrap();

    let desc = prototype_of(&ctor).get_own_property(&"m".into()).unwrap();
    assert!(desc.is_enumerable());
    assert!(!desc.is_configurable());
}

#[test]
fn test_memoize_getter_per_instance() {
    let env = builtins();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let getter = Rc::new(NativeFunction::new("get total", move |_, _| {
        counter.set(counter.get() + 1);
        Ok(Value::from(42))
    }));

    let decl = ClassDecl::new("Cart").element(
        ClassElement::getter("total", getter).decorator(DecoratorExpr::bare("memoize")),
    );
    let cart = Engine::new().evaluate_class(&decl, &env).unwrap();

    let a = cart.instantiate().unwrap();
    let b = cart.instantiate().unwrap();
    for _ in 0..3 {
        assert_eq!(a.get(&"total".into()).unwrap().as_number(), Some(42.0));
    }
    b.get(&"total".into()).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_deprecate_keeps_behavior() {
    let env = builtins();
    let decl = ClassDecl::new("Api").element(
        ClassElement::method("old", body("old", Value::from("still works")))
            .decorator(DecoratorExpr::call("deprecate", vec![Expr::string("use new()")])),
    );
    let api = Engine::new().evaluate_class(&decl, &env).unwrap();
    let instance = api.instantiate().unwrap();
    assert_eq!(instance.invoke("old", &[]).unwrap().as_str(), Some("still works"));
}

#[test]
fn test_class_builtins() {
    let env = builtins();
    let decl = ClassDecl::new("Suite")
        .decorator(DecoratorExpr::bare("annotation"))
        .decorator(DecoratorExpr::call("isTestable", vec![Expr::bool(true)]));
    let suite = Engine::new().evaluate_class(&decl, &env).unwrap();

    assert_eq!(suite.get(&"annotated".into()).unwrap().as_bool(), Some(true));
    assert_eq!(suite.get(&"isTestable".into()).unwrap().as_bool(), Some(true));
}

#[test]
fn test_provide_on_object_literal() {
    let env = builtins();
    let literal = ObjectLiteral::new().property(
        PropertyDefinition::init("color", Expr::string("ignored"))
            .decorator(DecoratorExpr::bare("readonly"))
            .decorator(DecoratorExpr::call("provide", vec![Expr::string("red")])),
    );
    let object = Engine::new().evaluate_object_literal(&literal, &env).unwrap();

    let desc = object.get_own_property(&"color".into()).unwrap();
    assert_eq!(desc.value().and_then(Value::as_str), Some("red"));
    assert!(desc.is_enumerable());
    assert_eq!(desc.writable(), Some(false));
}

#[test]
fn test_descriptor_builtin_alone_on_literal_installs_nothing() {
    let env = builtins();
    let literal = ObjectLiteral::new().property(
        PropertyDefinition::init("p", Expr::number(1.0)).decorator(DecoratorExpr::bare("readonly")),
    );
    let object = Engine::new().evaluate_object_literal(&literal, &env).unwrap();
    assert!(!object.has_own_property(&"p".into()));
}

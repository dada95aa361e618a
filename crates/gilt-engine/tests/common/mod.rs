//! Shared helpers for engine integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use gilt_engine::{
    Callable, Environment, NativeFunction, ObjectRef, ObjectResult, OrdinaryStore,
    PropertyDescriptor, PropertyKey, PropertyStore, Value,
};

/// Shared, append-only event log
pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::default()
}

pub fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

/// Store that records every install as `"<target>.<key>"` before applying
/// ordinary semantics
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: OrdinaryStore,
    pub installs: Vec<String>,
}

impl CountingStore {
    pub fn count(&self, site: &str) -> usize {
        self.installs.iter().filter(|s| *s == site).count()
    }
}

impl PropertyStore for CountingStore {
    fn define_own_property(
        &mut self,
        target: &ObjectRef,
        key: &PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> ObjectResult<()> {
        self.installs.push(format!("{}.{}", target.describe(), key));
        self.inner.define_own_property(target, key, descriptor)
    }

    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropertyKey,
    ) -> Option<PropertyDescriptor> {
        self.inner.get_own_property_descriptor(target, key)
    }
}

/// Body for a method, getter or setter that returns a constant
pub fn body(name: &str, result: Value) -> Rc<dyn Callable> {
    Rc::new(NativeFunction::new(name, move |_, _| Ok(result.clone())))
}

/// Bind a capability under `name`
pub fn bind<F>(env: &mut Environment, name: &str, func: F)
where
    F: Fn(&Value, &[Value]) -> ObjectResult<Value> + 'static,
{
    env.define(name, Value::Object(ObjectRef::native(name, func)));
}

/// Bind a decorator that logs `"<name>"` and returns `undefined`
pub fn bind_recorder(env: &mut Environment, name: &str, log: &Log) {
    let log = log.clone();
    let tag = name.to_string();
    bind(env, name, move |_, _| {
        log.borrow_mut().push(tag.clone());
        Ok(Value::Undefined)
    });
}

/// Bind a decorator that stores its full argument list into `slot`
pub fn bind_capture(env: &mut Environment, name: &str, slot: &Rc<RefCell<Vec<Value>>>) {
    let slot = slot.clone();
    bind(env, name, move |_, args| {
        *slot.borrow_mut() = args.to_vec();
        Ok(Value::Undefined)
    });
}

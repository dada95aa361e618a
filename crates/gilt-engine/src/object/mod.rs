//! Object model
//!
//! The decorator engine sits on a small prototype-based object model:
//! reference-counted objects with ordered own-property tables, property
//! descriptors, and callable capabilities. Identity is pointer identity;
//! every object also carries a process-unique id that side tables (such as
//! memoization caches) key on.

mod descriptor;
mod function;
mod store;
mod value;

pub use descriptor::{DescriptorRef, PropertyDescriptor};
pub use function::{call, Callable, NativeFn, NativeFunction};
pub use store::{OrdinaryStore, PropertyStore};
pub use value::Value;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::BuildHasherDefault;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use rustc_hash::FxHasher;

/// Global counter for generating unique object IDs
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a new unique object ID
fn generate_object_id() -> u64 {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Errors raised by object model operations and by callables
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ObjectError {
    /// Operation applied to a value of the wrong shape
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Unbound identifier
    #[error("ReferenceError: {0}")]
    ReferenceError(String),

    /// Failure raised by user code (a native function or decorator)
    #[error("{0}")]
    Thrown(String),
}

/// Result of an object model operation
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Name of an own property
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropertyKey(Rc<str>);

impl PropertyKey {
    /// Create a property key from a name
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        Self(Rc::from(name))
    }
}

/// What an object is, beyond its property table
#[derive(Clone)]
pub enum ObjectKind {
    /// Plain object (object literals, instance prototypes, instances)
    Ordinary,
    /// Function object wrapping a callable capability
    Function(Rc<dyn Callable>),
    /// Class constructor value
    Class {
        /// Declared class name
        name: String,
    },
}

impl fmt::Debug for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Ordinary => write!(f, "Ordinary"),
            ObjectKind::Function(callable) => write!(f, "Function({})", callable.name()),
            ObjectKind::Class { name } => write!(f, "Class({})", name),
        }
    }
}

/// Own property table, in insertion order
pub type PropertyTable = IndexMap<PropertyKey, PropertyDescriptor, BuildHasherDefault<FxHasher>>;

/// Heap object
#[derive(Debug)]
pub struct Object {
    /// Unique object ID (assigned on creation)
    pub id: u64,
    /// Object kind
    pub kind: ObjectKind,
    /// `[[Prototype]]`
    pub prototype: Option<ObjectRef>,
    /// `[[Extensible]]`
    pub extensible: bool,
    /// Own properties
    pub properties: PropertyTable,
}

impl Object {
    /// Create an extensible object with no own properties
    pub fn new(kind: ObjectKind, prototype: Option<ObjectRef>) -> Self {
        Self {
            id: generate_object_id(),
            kind,
            prototype,
            extensible: true,
            properties: PropertyTable::default(),
        }
    }

    /// `[[DefineOwnProperty]]`: define or replace an own property.
    ///
    /// Replacing a configurable property always succeeds. A non-configurable
    /// property only accepts a redefinition that changes nothing observable
    /// beyond lowering `writable` or rewriting the value of a writable data
    /// property.
    pub fn define_own_property(
        &mut self,
        key: PropertyKey,
        desc: PropertyDescriptor,
    ) -> ObjectResult<()> {
        match self.properties.get(&key) {
            Some(current) => {
                if !current.is_configurable() && !redefinition_allowed(current, &desc) {
                    return Err(ObjectError::TypeError(format!(
                        "Cannot redefine property: {}",
                        key
                    )));
                }
            }
            None => {
                if !self.extensible {
                    return Err(ObjectError::TypeError(format!(
                        "Cannot define property {}, object is not extensible",
                        key
                    )));
                }
            }
        }
        self.properties.insert(key, desc);
        Ok(())
    }
}

fn redefinition_allowed(current: &PropertyDescriptor, desc: &PropertyDescriptor) -> bool {
    if desc.is_configurable() || desc.is_enumerable() != current.is_enumerable() {
        return false;
    }
    match (current, desc) {
        (
            PropertyDescriptor::Value {
                value: current_value,
                writable: current_writable,
                ..
            },
            PropertyDescriptor::Value {
                value, writable, ..
            },
        ) => *current_writable || (!*writable && current_value.same_value(value)),
        (
            PropertyDescriptor::Accessor {
                get: current_get,
                set: current_set,
                ..
            },
            PropertyDescriptor::Accessor { get, set, .. },
        ) => same_optional(current_get, get) && same_optional(current_set, set),
        _ => false,
    }
}

fn same_optional(a: &Option<Value>, b: &Option<Value>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_value(b),
        (None, None) => true,
        _ => false,
    }
}

/// Shared handle to a heap object
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    /// Wrap an object
    pub fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    /// Allocate a plain object with the given prototype
    pub fn ordinary(prototype: Option<ObjectRef>) -> Self {
        Self::new(Object::new(ObjectKind::Ordinary, prototype))
    }

    /// Allocate a function object for a callable capability
    pub fn function(callable: Rc<dyn Callable>) -> Self {
        Self::new(Object::new(ObjectKind::Function(callable), None))
    }

    /// Allocate a function object for a native closure
    pub fn native<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> ObjectResult<Value> + 'static,
    {
        Self::function(Rc::new(NativeFunction::new(name, func)))
    }

    /// Unique object id
    pub fn id(&self) -> u64 {
        self.0.borrow().id
    }

    /// Pointer identity
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Immutable borrow of the underlying object
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    /// Mutable borrow of the underlying object
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    /// Callable capability, if this is a function object
    pub fn callable(&self) -> Option<Rc<dyn Callable>> {
        match &self.0.borrow().kind {
            ObjectKind::Function(callable) => Some(callable.clone()),
            _ => None,
        }
    }

    /// Class name, if this is a constructor value
    pub fn class_name(&self) -> Option<String> {
        match &self.0.borrow().kind {
            ObjectKind::Class { name } => Some(name.clone()),
            _ => None,
        }
    }

    /// `[[Prototype]]`
    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.borrow().prototype.clone()
    }

    /// `[[GetOwnProperty]]`: a copy of the own descriptor under `key`
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// Whether an own property exists under `key`
    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// `[[HasProperty]]`: own or inherited
    pub fn has_property(&self, key: &PropertyKey) -> bool {
        self.find_property(key).is_some()
    }

    /// Own property keys in insertion order
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// `[[DefineOwnProperty]]`
    pub fn define_own_property(
        &self,
        key: PropertyKey,
        desc: PropertyDescriptor,
    ) -> ObjectResult<()> {
        self.0.borrow_mut().define_own_property(key, desc)
    }

    /// `[[PreventExtensions]]`
    pub fn prevent_extensions(&self) {
        self.0.borrow_mut().extensible = false;
    }

    /// `[[IsExtensible]]`
    pub fn is_extensible(&self) -> bool {
        self.0.borrow().extensible
    }

    /// `[[Get]]`: look `key` up along the prototype chain, running getters
    /// against this object as the receiver.
    pub fn get(&self, key: &PropertyKey) -> ObjectResult<Value> {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            // Copy the descriptor out so no borrow is held while a getter runs
            if let Some(desc) = object.get_own_property(key) {
                return match desc {
                    PropertyDescriptor::Value { value, .. } => Ok(value),
                    PropertyDescriptor::Accessor { get: Some(getter), .. } => {
                        call(&getter, &Value::Object(self.clone()), &[])
                    }
                    PropertyDescriptor::Accessor { get: None, .. } => Ok(Value::Undefined),
                };
            }
            current = object.prototype();
        }
        Ok(Value::Undefined)
    }

    /// `[[Set]]` on an own or new property, strict-mode flavoured: writes to
    /// a read-only property or a getter-only accessor fail instead of being
    /// silently dropped.
    pub fn put(&self, key: impl Into<PropertyKey>, value: Value) -> ObjectResult<()> {
        let key = key.into();
        match self.find_property(&key) {
            Some(PropertyDescriptor::Accessor { set: Some(setter), .. }) => {
                call(&setter, &Value::Object(self.clone()), &[value]).map(|_| ())
            }
            Some(PropertyDescriptor::Accessor { set: None, .. }) => Err(ObjectError::TypeError(
                format!("Cannot set property {} which has only a getter", key),
            )),
            Some(PropertyDescriptor::Value { writable: false, .. }) => Err(ObjectError::TypeError(
                format!("Cannot assign to read only property '{}'", key),
            )),
            _ => {
                let mut object = self.0.borrow_mut();
                if let Some(PropertyDescriptor::Value { value: slot, .. }) =
                    object.properties.get_mut(&key)
                {
                    *slot = value;
                    return Ok(());
                }
                object.define_own_property(key, PropertyDescriptor::data(value))
            }
        }
    }

    /// Call the method stored under `key` with this object as receiver
    pub fn invoke(&self, key: impl Into<PropertyKey>, args: &[Value]) -> ObjectResult<Value> {
        let key = key.into();
        let method = self.get(&key)?;
        if method.as_callable().is_none() {
            return Err(ObjectError::TypeError(format!("{} is not a function", key)));
        }
        call(&method, &Value::Object(self.clone()), args)
    }

    /// Create an instance of this constructor value: a plain object whose
    /// prototype is the constructor's `prototype` property.
    pub fn instantiate(&self) -> ObjectResult<ObjectRef> {
        let name = self
            .class_name()
            .ok_or_else(|| ObjectError::TypeError("value is not a constructor".to_string()))?;
        match self.get(&PropertyKey::from("prototype"))? {
            Value::Object(prototype) => Ok(ObjectRef::ordinary(Some(prototype))),
            _ => Err(ObjectError::TypeError(format!(
                "class {} has no prototype object",
                name
            ))),
        }
    }

    fn find_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        let mut current = Some(self.clone());
        while let Some(object) = current {
            if let Some(desc) = object.get_own_property(key) {
                return Some(desc);
            }
            current = object.prototype();
        }
        None
    }

    /// Short human-readable label, used in diagnostics and traces
    pub fn describe(&self) -> String {
        let object = self.0.borrow();
        match &object.kind {
            ObjectKind::Class { name } => name.clone(),
            ObjectKind::Function(callable) => format!("[function {}]", callable.name()),
            ObjectKind::Ordinary => {
                let constructor = object
                    .properties
                    .get(&PropertyKey::from("constructor"))
                    .and_then(|desc| desc.value().and_then(Value::as_object).cloned());
                match constructor.and_then(|ctor| ctor.class_name()) {
                    Some(name) => format!("{}.prototype", name),
                    None => format!("[object #{}]", object.id),
                }
            }
        }
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Properties may point back at this object (prototype.constructor)
        write!(f, "ObjectRef(#{})", self.id())
    }
}

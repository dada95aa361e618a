//! Runtime values

use std::fmt;
use std::rc::Rc;

use super::{Callable, DescriptorRef, ObjectRef, PropertyDescriptor};

/// Runtime value flowing through decorator chains.
///
/// Property descriptors handed to decorators are values too
/// ([`Value::Descriptor`]), so a decorator can read and mutate the very
/// descriptor the engine will install.
#[derive(Clone, Default)]
pub enum Value {
    /// `undefined`
    #[default]
    Undefined,
    /// `null`
    Null,
    /// Boolean
    Bool(bool),
    /// IEEE-754 number
    Number(f64),
    /// Immutable string
    String(Rc<str>),
    /// Heap object (plain object, function, or class)
    Object(ObjectRef),
    /// Shared, mutable property descriptor
    Descriptor(DescriptorRef),
}

impl Value {
    /// Wrap a descriptor into a fresh shared handle
    pub fn descriptor(desc: PropertyDescriptor) -> Self {
        Value::Descriptor(desc.into_ref())
    }

    /// Stable type name (used in error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(obj) if obj.callable().is_some() => "function",
            Value::Object(_) => "object",
            Value::Descriptor(_) => "descriptor",
        }
    }

    /// Truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) | Value::Descriptor(_) => true,
        }
    }

    /// Whether this is `undefined`
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Borrow the object handle, if any
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Borrow the descriptor handle, if any
    pub fn as_descriptor(&self) -> Option<&DescriptorRef> {
        match self {
            Value::Descriptor(desc) => Some(desc),
            _ => None,
        }
    }

    /// Callable capability behind a function object
    pub fn as_callable(&self) -> Option<Rc<dyn Callable>> {
        self.as_object().and_then(ObjectRef::callable)
    }

    /// Number payload
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean payload
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String payload
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// `SameValue`: primitives by value (NaN equals NaN), references by identity
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Descriptor(a), Value::Descriptor(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Object(obj) => write!(f, "{}", obj.describe()),
            Value::Descriptor(desc) => match desc.try_borrow() {
                Ok(desc) => write!(f, "{}", desc),
                Err(_) => write!(f, "[descriptor]"),
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Object(ObjectRef::ordinary(None)).is_truthy());
        assert!(Value::descriptor(PropertyDescriptor::data(Value::Undefined)).is_truthy());
    }

    #[test]
    fn test_same_value() {
        assert!(Value::from(f64::NAN).same_value(&Value::from(f64::NAN)));
        assert!(!Value::from(0.0).same_value(&Value::from(-0.0)));
        let obj = ObjectRef::ordinary(None);
        assert!(Value::Object(obj.clone()).same_value(&Value::Object(obj)));
        assert!(!Value::Object(ObjectRef::ordinary(None))
            .same_value(&Value::Object(ObjectRef::ordinary(None))));
    }
}

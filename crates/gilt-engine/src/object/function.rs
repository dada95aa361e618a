//! Callable capabilities

use std::fmt;

use super::{ObjectError, ObjectResult, Value};

/// A capability that can be called as a function or invoked as a
/// constructor.
///
/// Decorators are always invoked through [`Callable::construct`]. A
/// capability that wants to specialize a base behavior holds that behavior
/// by composition and delegates to it.
pub trait Callable {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Ordinary call with an explicit receiver
    fn call(&self, this: &Value, args: &[Value]) -> ObjectResult<Value>;

    /// Constructor-style invocation. Defaults to a call with an
    /// `undefined` receiver.
    fn construct(&self, args: &[Value]) -> ObjectResult<Value> {
        self.call(&Value::Undefined, args)
    }
}

/// Signature of a native closure
pub type NativeFn = dyn Fn(&Value, &[Value]) -> ObjectResult<Value>;

/// Callable backed by a Rust closure
pub struct NativeFunction {
    name: String,
    func: Box<NativeFn>,
}

impl NativeFunction {
    /// Wrap a closure under a diagnostic name
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> ObjectResult<Value> + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, this: &Value, args: &[Value]) -> ObjectResult<Value> {
        (self.func)(this, args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// Call `callee` with `this` as receiver
pub fn call(callee: &Value, this: &Value, args: &[Value]) -> ObjectResult<Value> {
    match callee.as_callable() {
        Some(callable) => callable.call(this, args),
        None => Err(ObjectError::TypeError(format!(
            "{} is not a function",
            callee
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;

    #[test]
    fn test_call_native_function() {
        let add = Value::Object(ObjectRef::native("add", |_, args| {
            let sum = args.iter().filter_map(Value::as_number).sum::<f64>();
            Ok(Value::Number(sum))
        }));
        let result = call(&add, &Value::Undefined, &[Value::from(2), Value::from(3)]).unwrap();
        assert_eq!(result.as_number(), Some(5.0));
    }

    #[test]
    fn test_call_non_function_is_type_error() {
        let err = call(&Value::from(1), &Value::Undefined, &[]).unwrap_err();
        assert_eq!(err, ObjectError::TypeError("1 is not a function".into()));
    }

    #[test]
    fn test_construct_defaults_to_call() {
        let f = NativeFunction::new("f", |this, _| Ok(Value::Bool(this.is_undefined())));
        assert_eq!(f.construct(&[]).unwrap().as_bool(), Some(true));
    }
}

//! Class decorators
//!
//! [`ClassDecorator`] is the base capability for class-level decorators.
//! It accepts `(constructor, ...extra)` and hands the constructor value to a
//! [`ClassTransform`].

use std::fmt;

use crate::object::{Callable, ObjectError, ObjectRef, ObjectResult, Value};

/// The editing step of a class decorator
pub trait ClassTransform {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Edit the constructor value
    fn apply(&self, constructor: &ObjectRef, extra: &[Value]) -> ObjectResult<()>;
}

/// Base capability for class-level decorators
pub struct ClassDecorator<T> {
    transform: T,
}

impl<T: ClassTransform> ClassDecorator<T> {
    /// Wrap a transform
    pub fn new(transform: T) -> Self {
        Self { transform }
    }
}

impl<T: ClassTransform> Callable for ClassDecorator<T> {
    fn name(&self) -> &str {
        self.transform.name()
    }

    fn call(&self, _this: &Value, args: &[Value]) -> ObjectResult<Value> {
        self.construct(args)
    }

    fn construct(&self, args: &[Value]) -> ObjectResult<Value> {
        let constructor = args.first().and_then(Value::as_object).ok_or_else(|| {
            ObjectError::TypeError(format!("@{} can only decorate a class", self.name()))
        })?;
        self.transform
            .apply(constructor, args.get(1..).unwrap_or_default())?;
        Ok(Value::Undefined)
    }
}

impl<T: ClassTransform> fmt::Debug for ClassDecorator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDecorator({})", self.transform.name())
    }
}

/// `@annotation`: sets `annotated = true` on the class
#[derive(Debug, Default, Clone, Copy)]
pub struct Annotation;

impl ClassTransform for Annotation {
    fn name(&self) -> &str {
        "annotation"
    }

    fn apply(&self, constructor: &ObjectRef, _extra: &[Value]) -> ObjectResult<()> {
        constructor.put("annotated", Value::Bool(true))
    }
}

/// `@isTestable(flag)`: sets `isTestable` to `flag`
#[derive(Debug, Default, Clone, Copy)]
pub struct IsTestable;

impl ClassTransform for IsTestable {
    fn name(&self) -> &str {
        "isTestable"
    }

    fn apply(&self, constructor: &ObjectRef, extra: &[Value]) -> ObjectResult<()> {
        constructor.put("isTestable", extra.first().cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_testable_sets_flag() {
        let ctor = ObjectRef::ordinary(None);
        ClassDecorator::new(IsTestable)
            .construct(&[Value::Object(ctor.clone()), Value::Bool(true)])
            .unwrap();
        assert_eq!(ctor.get(&"isTestable".into()).unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_rejects_primitive_target() {
        let err = ClassDecorator::new(Annotation)
            .construct(&[Value::from(1)])
            .unwrap_err();
        assert_eq!(
            err,
            ObjectError::TypeError("@annotation can only decorate a class".into())
        );
    }
}

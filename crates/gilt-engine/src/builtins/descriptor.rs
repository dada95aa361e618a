//! Descriptor decorators
//!
//! [`DescriptorDecorator`] is the base capability for member decorators that
//! edit a descriptor. Concrete decorators supply a [`DescriptorTransform`]
//! and inherit the calling convention by composition.

use std::fmt;

use crate::object::{Callable, ObjectResult, PropertyDescriptor, Value};

/// The editing step of a descriptor decorator
pub trait DescriptorTransform {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Edit `descriptor` in place. `key` is the decorated property name and
    /// `extra` the arguments written in call position.
    fn apply(
        &self,
        key: &str,
        descriptor: &mut PropertyDescriptor,
        extra: &[Value],
    ) -> ObjectResult<()>;

    /// Descriptor to start from when the chain has produced none yet
    /// (object literals). Most transforms have nothing to offer.
    fn initial(&self, _extra: &[Value]) -> Option<PropertyDescriptor> {
        None
    }
}

/// Base capability for descriptor-editing decorators.
///
/// Accepts `(target, name, descriptor, ...extra)`. A shared descriptor
/// handle is edited in place and handed back; a plain descriptor-like object
/// (from an object-literal chain) is converted, edited and returned as a new
/// descriptor. The return value therefore works under both composition
/// disciplines.
pub struct DescriptorDecorator<T> {
    transform: T,
}

impl<T: DescriptorTransform> DescriptorDecorator<T> {
    /// Wrap a transform
    pub fn new(transform: T) -> Self {
        Self { transform }
    }

    /// The wrapped transform
    pub fn transform(&self) -> &T {
        &self.transform
    }
}

impl<T: DescriptorTransform> Callable for DescriptorDecorator<T> {
    fn name(&self) -> &str {
        self.transform.name()
    }

    fn call(&self, _this: &Value, args: &[Value]) -> ObjectResult<Value> {
        self.construct(args)
    }

    fn construct(&self, args: &[Value]) -> ObjectResult<Value> {
        let key = args.get(1).and_then(Value::as_str).unwrap_or_default();
        let extra = args.get(3..).unwrap_or_default();
        match args.get(2) {
            Some(Value::Descriptor(handle)) => {
                self.transform.apply(key, &mut handle.borrow_mut(), extra)?;
                Ok(Value::Descriptor(handle.clone()))
            }
            Some(Value::Undefined) | None => match self.transform.initial(extra) {
                Some(mut desc) => {
                    self.transform.apply(key, &mut desc, extra)?;
                    Ok(Value::descriptor(desc))
                }
                None => Ok(Value::Undefined),
            },
            Some(other) => {
                let mut desc = PropertyDescriptor::from_value(other)?;
                self.transform.apply(key, &mut desc, extra)?;
                Ok(Value::descriptor(desc))
            }
        }
    }
}

impl<T: DescriptorTransform> fmt::Debug for DescriptorDecorator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DescriptorDecorator({})", self.transform.name())
    }
}

/// `@readonly`: clears `writable`
#[derive(Debug, Default, Clone, Copy)]
pub struct Readonly;

impl DescriptorTransform for Readonly {
    fn name(&self) -> &str {
        "readonly"
    }

    fn apply(
        &self,
        _key: &str,
        descriptor: &mut PropertyDescriptor,
        _extra: &[Value],
    ) -> ObjectResult<()> {
        descriptor.set_writable(false);
        Ok(())
    }
}

/// `@nonenumerable`
#[derive(Debug, Default, Clone, Copy)]
pub struct NonEnumerable;

impl DescriptorTransform for NonEnumerable {
    fn name(&self) -> &str {
        "nonenumerable"
    }

    fn apply(
        &self,
        _key: &str,
        descriptor: &mut PropertyDescriptor,
        _extra: &[Value],
    ) -> ObjectResult<()> {
        descriptor.set_enumerable(false);
        Ok(())
    }
}

/// `@enumerable(flag)`: sets `enumerable` to the truthiness of `flag`
#[derive(Debug, Default, Clone, Copy)]
pub struct Enumerable;

impl DescriptorTransform for Enumerable {
    fn name(&self) -> &str {
        "enumerable"
    }

    fn apply(
        &self,
        _key: &str,
        descriptor: &mut PropertyDescriptor,
        extra: &[Value],
    ) -> ObjectResult<()> {
        descriptor.set_enumerable(extra.first().is_some_and(Value::is_truthy));
        Ok(())
    }
}

/// `@nonconfigurable`
#[derive(Debug, Default, Clone, Copy)]
pub struct NonConfigurable;

impl DescriptorTransform for NonConfigurable {
    fn name(&self) -> &str {
        "nonconfigurable"
    }

    fn apply(
        &self,
        _key: &str,
        descriptor: &mut PropertyDescriptor,
        _extra: &[Value],
    ) -> ObjectResult<()> {
        descriptor.set_configurable(false);
        Ok(())
    }
}

/// `@provide(value)`: stores `value` in a data descriptor. On an object
/// literal property with no descriptor yet, starts from an enumerable,
/// writable, configurable one.
#[derive(Debug, Default, Clone, Copy)]
pub struct Provide;

impl DescriptorTransform for Provide {
    fn name(&self) -> &str {
        "provide"
    }

    fn apply(
        &self,
        _key: &str,
        descriptor: &mut PropertyDescriptor,
        extra: &[Value],
    ) -> ObjectResult<()> {
        descriptor.set_value(extra.first().cloned().unwrap_or_default());
        Ok(())
    }

    fn initial(&self, _extra: &[Value]) -> Option<PropertyDescriptor> {
        Some(PropertyDescriptor::data(Value::Undefined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;

    fn member_args(desc: &Value, extra: &[Value]) -> Vec<Value> {
        let mut args = vec![
            Value::Object(ObjectRef::ordinary(None)),
            Value::from("m"),
            desc.clone(),
        ];
        args.extend(extra.iter().cloned());
        args
    }

    #[test]
    fn test_readonly_edits_shared_handle() {
        let desc = Value::descriptor(PropertyDescriptor::data(Value::Null));
        let result = DescriptorDecorator::new(Readonly)
            .construct(&member_args(&desc, &[]))
            .unwrap();
        assert!(result.same_value(&desc));
        assert_eq!(desc.as_descriptor().unwrap().borrow().writable(), Some(false));
    }

    #[test]
    fn test_enumerable_reads_flag() {
        let desc = Value::descriptor(PropertyDescriptor::data(Value::Null));
        DescriptorDecorator::new(Enumerable)
            .construct(&member_args(&desc, &[Value::Bool(false)]))
            .unwrap();
        assert!(!desc.as_descriptor().unwrap().borrow().is_enumerable());
    }

    #[test]
    fn test_without_descriptor_returns_undefined() {
        let args = member_args(&Value::Undefined, &[]);
        let result = DescriptorDecorator::new(NonConfigurable).construct(&args).unwrap();
        assert!(result.is_undefined());
    }

    #[test]
    fn test_provide_creates_descriptor_when_none() {
        let args = member_args(&Value::Undefined, &[Value::from("red")]);
        let result = DescriptorDecorator::new(Provide).construct(&args).unwrap();
        let desc = PropertyDescriptor::from_value(&result).unwrap();
        assert_eq!(desc.value().and_then(Value::as_str), Some("red"));
        assert!(desc.is_enumerable());
    }

    #[test]
    fn test_plain_object_is_converted() {
        let obj = ObjectRef::ordinary(None);
        obj.put("value", Value::from(1)).unwrap();
        obj.put("configurable", Value::Bool(true)).unwrap();
        let result = DescriptorDecorator::new(NonConfigurable)
            .construct(&member_args(&Value::Object(obj), &[]))
            .unwrap();
        let desc = PropertyDescriptor::from_value(&result).unwrap();
        assert!(!desc.is_configurable());
        assert_eq!(desc.value().and_then(Value::as_number), Some(1.0));
    }
}

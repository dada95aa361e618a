//! `@deprecate(message?)`

use tracing::warn;

use super::descriptor::DescriptorTransform;
use crate::object::{call, ObjectError, ObjectRef, ObjectResult, PropertyDescriptor, Value};

const DEFAULT_MESSAGE: &str = "This function will be removed in future versions.";

/// Wraps a method so every call logs a deprecation warning first
#[derive(Debug, Default, Clone, Copy)]
pub struct Deprecate;

impl DescriptorTransform for Deprecate {
    fn name(&self) -> &str {
        "deprecate"
    }

    fn apply(
        &self,
        key: &str,
        descriptor: &mut PropertyDescriptor,
        extra: &[Value],
    ) -> ObjectResult<()> {
        let message = extra
            .first()
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_MESSAGE)
            .to_string();

        match descriptor {
            PropertyDescriptor::Value { value, .. } if value.as_callable().is_some() => {
                let original = value.clone();
                let method = key.to_string();
                *value = Value::Object(ObjectRef::native(
                    format!("deprecated {}", key),
                    move |this, args| {
                        warn!(method = %method, "DEPRECATION {}: {}", method, message);
                        call(&original, this, args)
                    },
                ));
                Ok(())
            }
            _ => Err(ObjectError::TypeError(format!(
                "@deprecate can only decorate a method ('{}')",
                key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_method_still_returns() {
        let mut desc = PropertyDescriptor::data(Value::Object(ObjectRef::native("old", |_, _| {
            Ok(Value::from("ok"))
        })));
        Deprecate
            .apply("old", &mut desc, &[Value::from("use new()")])
            .unwrap();
        let wrapped = desc.value().cloned().unwrap();
        assert_eq!(wrapped.as_callable().unwrap().name(), "deprecated old");
        assert_eq!(
            call(&wrapped, &Value::Undefined, &[]).unwrap().as_str(),
            Some("ok")
        );
    }

    #[test]
    fn test_rejects_accessor() {
        let mut desc = PropertyDescriptor::Accessor {
            get: None,
            set: None,
            enumerable: false,
            configurable: true,
        };
        assert!(Deprecate.apply("x", &mut desc, &[]).is_err());
    }
}

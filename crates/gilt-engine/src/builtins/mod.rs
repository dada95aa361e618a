//! Builtin decorator library
//!
//! Registers a small set of ready-made decorator capabilities into an
//! [`Environment`] by name, so declarations can use `@readonly`,
//! `@enumerable(false)`, `@memoize` and friends without defining them.

pub mod class;
pub mod deprecate;
pub mod descriptor;
pub mod memoize;

pub use class::{Annotation, ClassDecorator, ClassTransform, IsTestable};
pub use deprecate::Deprecate;
pub use descriptor::{
    DescriptorDecorator, DescriptorTransform, Enumerable, NonConfigurable, NonEnumerable,
    Provide, Readonly,
};
pub use memoize::Memoize;

use std::rc::Rc;

use crate::eval::Environment;
use crate::object::{Callable, ObjectRef, Value};

/// Register all builtin decorators into the given environment.
///
/// After calling this, `env` binds `readonly`, `nonenumerable`,
/// `enumerable`, `nonconfigurable`, `provide`, `memoize`, `deprecate`,
/// `annotation` and `isTestable`.
pub fn register_builtins(env: &mut Environment) {
    register_descriptor_decorators(env);
    register_class_decorators(env);
}

/// Register member decorators
fn register_descriptor_decorators(env: &mut Environment) {
    define(env, DescriptorDecorator::new(Readonly));
    define(env, DescriptorDecorator::new(NonEnumerable));
    define(env, DescriptorDecorator::new(Enumerable));
    define(env, DescriptorDecorator::new(NonConfigurable));
    define(env, DescriptorDecorator::new(Provide));
    define(env, DescriptorDecorator::new(Memoize::new()));
    define(env, DescriptorDecorator::new(Deprecate));
}

/// Register class-level decorators
fn register_class_decorators(env: &mut Environment) {
    define(env, ClassDecorator::new(Annotation));
    define(env, ClassDecorator::new(IsTestable));
}

fn define(env: &mut Environment, capability: impl Callable + 'static) {
    let name = capability.name().to_string();
    env.define(name, Value::Object(ObjectRef::function(Rc::new(capability))));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins() {
        let mut env = Environment::new();
        register_builtins(&mut env);
        for name in [
            "readonly",
            "nonenumerable",
            "enumerable",
            "nonconfigurable",
            "provide",
            "memoize",
            "deprecate",
            "annotation",
            "isTestable",
        ] {
            let value = env.lookup(name).unwrap_or_else(|| panic!("{} not registered", name));
            assert_eq!(value.as_callable().unwrap().name(), name);
        }
    }
}

//! Object literal evaluation
//!
//! Undecorated properties are defined the ordinary way: enumerable,
//! writable, configurable data properties, or accessors merged by name.
//! Decorated properties follow the legacy fallback discipline instead and
//! are never defined ordinarily; their own value expression is not
//! evaluated. Only what the decorator chain produces is installed.

use tracing::{debug, debug_span};

use super::{
    apply_fallback_chain, collect, install, resolve, DeclarationContext, DecorateError,
    DecorateResult, Target,
};
use crate::engine::Engine;
use crate::eval::{evaluate, Environment};
use crate::object::{ObjectRef, PropertyDescriptor, PropertyStore, Value};
use crate::syntax::{ObjectLiteral, PropertyDefinition, PropertyKind};

impl<S: PropertyStore> Engine<S> {
    /// Evaluate an object literal and return the new object
    pub fn evaluate_object_literal(
        &mut self,
        literal: &ObjectLiteral,
        env: &Environment,
    ) -> DecorateResult<ObjectRef> {
        let span = debug_span!("object_literal", properties = literal.properties.len());
        let _guard = span.enter();

        let object = ObjectRef::ordinary(None);
        let target = resolve(&DeclarationContext::ObjectLiteralProperty { object: &object });
        for property in &literal.properties {
            if property.decorators.is_empty() {
                self.define_literal_property(&target, property, env)?;
            } else {
                self.decorate_literal_property(&target, property, env)?;
            }
        }
        Ok(object)
    }

    fn define_literal_property(
        &mut self,
        target: &Target,
        property: &PropertyDefinition,
        env: &Environment,
    ) -> DecorateResult<()> {
        let function = |body| Value::Object(ObjectRef::function(body));
        let descriptor = match &property.kind {
            PropertyKind::Init(expr) => {
                let value = evaluate(expr, env).map_err(|source| DecorateError::Initializer {
                    name: property.key.to_string(),
                    source,
                })?;
                PropertyDescriptor::data(value)
            }
            PropertyKind::Method(body) => PropertyDescriptor::data(function(body.clone())),
            PropertyKind::Getter(body) => {
                let (_, set) = self.existing_accessor(target, property);
                PropertyDescriptor::Accessor {
                    get: Some(function(body.clone())),
                    set,
                    enumerable: true,
                    configurable: true,
                }
            }
            PropertyKind::Setter(body) => {
                let (get, _) = self.existing_accessor(target, property);
                PropertyDescriptor::Accessor {
                    get,
                    set: Some(function(body.clone())),
                    enumerable: true,
                    configurable: true,
                }
            }
        };
        install(&mut self.store, target, &property.key, descriptor)
    }

    /// Halves of an accessor already defined under the same key
    fn existing_accessor(
        &self,
        target: &Target,
        property: &PropertyDefinition,
    ) -> (Option<Value>, Option<Value>) {
        match self
            .store
            .get_own_property_descriptor(target.object(), &property.key)
        {
            Some(PropertyDescriptor::Accessor { get, set, .. }) => (get, set),
            _ => (None, None),
        }
    }

    fn decorate_literal_property(
        &mut self,
        target: &Target,
        property: &PropertyDefinition,
        env: &Environment,
    ) -> DecorateResult<()> {
        let span = debug_span!("literal_property", name = %property.key);
        let _guard = span.enter();

        if !self.config.engine.object_literal_decorators {
            return Err(DecorateError::ObjectLiteralDecoratorsDisabled(
                property.key.to_string(),
            ));
        }

        let decorators = collect(&property.decorators, env)?;
        let result = apply_fallback_chain(
            &decorators,
            target,
            &property.key,
            self.observer.as_mut(),
        )?;

        if result.is_undefined() {
            debug!("decorators produced no descriptor; property not installed");
            return Ok(());
        }

        let descriptor =
            PropertyDescriptor::from_value(&result).map_err(|source| {
                DecorateError::InstallRejected {
                    name: property.key.to_string(),
                    target: target.describe(),
                    source,
                }
            })?;
        install(&mut self.store, target, &property.key, descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::NativeFunction;
    use crate::syntax::{DecoratorExpr, Expr};
    use std::rc::Rc;

    #[test]
    fn test_undecorated_properties_are_ordinary() {
        let literal = ObjectLiteral::new()
            .property(PropertyDefinition::init("a", Expr::number(1.0)))
            .property(PropertyDefinition::method(
                "f",
                Rc::new(NativeFunction::new("f", |_, _| Ok(Value::Null))),
            ));
        let object = Engine::new()
            .evaluate_object_literal(&literal, &Environment::new())
            .unwrap();
        let a = object.get_own_property(&"a".into()).unwrap();
        assert!(a.is_enumerable());
        assert_eq!(a.writable(), Some(true));
        assert_eq!(object.own_keys().len(), 2);
    }

    #[test]
    fn test_getter_and_setter_merge() {
        let get = Rc::new(NativeFunction::new("get", |_, _| Ok(Value::from(5))));
        let set = Rc::new(NativeFunction::new("set", |_, _| Ok(Value::Undefined)));
        let literal = ObjectLiteral::new()
            .property(PropertyDefinition::getter("x", get))
            .property(PropertyDefinition::setter("x", set));
        let object = Engine::new()
            .evaluate_object_literal(&literal, &Environment::new())
            .unwrap();
        let desc = object.get_own_property(&"x".into()).unwrap();
        assert!(desc.getter().is_some());
        assert!(desc.setter().is_some());
        assert_eq!(object.get(&"x".into()).unwrap().as_number(), Some(5.0));
    }

    #[test]
    fn test_decorated_value_expression_is_not_evaluated() {
        let mut env = Environment::new();
        env.define(
            "skip",
            Value::Object(ObjectRef::native("skip", |_, _| Ok(Value::Undefined))),
        );
        // `missing` would be a ReferenceError if it were evaluated
        let literal = ObjectLiteral::new().property(
            PropertyDefinition::init("p", Expr::ident("missing"))
                .decorator(DecoratorExpr::bare("skip")),
        );
        let object = Engine::new().evaluate_object_literal(&literal, &env).unwrap();
        assert!(!object.has_own_property(&"p".into()));
    }

    #[test]
    fn test_truthy_primitive_result_is_rejected_at_install() {
        let mut env = Environment::new();
        env.define(
            "yes",
            Value::Object(ObjectRef::native("yes", |_, _| Ok(Value::Bool(true)))),
        );
        let literal = ObjectLiteral::new().property(
            PropertyDefinition::init("p", Expr::null()).decorator(DecoratorExpr::bare("yes")),
        );
        let err = Engine::new().evaluate_object_literal(&literal, &env).unwrap_err();
        assert!(matches!(err, DecorateError::InstallRejected { .. }));
    }
}

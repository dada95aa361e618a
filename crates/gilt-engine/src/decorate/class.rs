//! Class body evaluation
//!
//! Creates the constructor value and instance prototype, then processes the
//! planned elements in declaration order. Each element runs its own chain
//! and is installed before the next element starts; the class-level list is
//! collected and applied only after every element is installed.

use tracing::{debug, debug_span};

use super::{
    apply_class_chain, apply_member_chain, collect, install, plan_elements, resolve, synthesize,
    ClassObjects, DeclarationContext, DecorateResult, ElementPlan,
};
use crate::config::DescriptorSource;
use crate::engine::Engine;
use crate::eval::Environment;
use crate::object::{ObjectRef, PropertyStore};
use crate::syntax::ClassDecl;

impl<S: PropertyStore> Engine<S> {
    /// Evaluate a class declaration and return its constructor value.
    ///
    /// On failure, elements installed before the failing one stay on the
    /// (unreachable) class objects and nothing after it runs.
    pub fn evaluate_class(
        &mut self,
        decl: &ClassDecl,
        env: &Environment,
    ) -> DecorateResult<ObjectRef> {
        let span = debug_span!("class", name = %decl.name);
        let _guard = span.enter();

        let class = ClassObjects::create(&decl.name);
        let plans = plan_elements(&decl.elements)?;
        for plan in &plans {
            self.evaluate_element(&class, plan, env)?;
        }

        let decorators = collect(&decl.decorators, env)?;
        if !decorators.is_empty() {
            let target = resolve(&DeclarationContext::Class { class: &class });
            apply_class_chain(&decorators, &target, self.observer.as_mut())?;
        }

        debug!(
            elements = plans.len(),
            class_decorators = decorators.len(),
            "class evaluated"
        );
        Ok(class.constructor)
    }

    fn evaluate_element(
        &mut self,
        class: &ClassObjects,
        plan: &ElementPlan,
        env: &Environment,
    ) -> DecorateResult<()> {
        let span = debug_span!(
            "element",
            name = %plan.key,
            kind = plan.kind_name(),
            is_static = plan.is_static
        );
        let _guard = span.enter();

        let target = resolve(&DeclarationContext::ClassElement {
            class,
            is_static: plan.is_static,
        });
        let decorators = collect(&plan.decorators, env)?;
        let synthesized = synthesize(plan.source(env)?, &self.config);

        if decorators.is_empty() {
            return install(&mut self.store, &target, &plan.key, synthesized);
        }

        let initial = match self.config.engine.descriptor_source {
            DescriptorSource::Synthesize => synthesized,
            DescriptorSource::ReadBack => {
                install(&mut self.store, &target, &plan.key, synthesized.clone())?;
                self.store
                    .get_own_property_descriptor(target.object(), &plan.key)
                    .unwrap_or(synthesized)
            }
        };

        let descriptor = initial.into_ref();
        apply_member_chain(
            &decorators,
            &target,
            &plan.key,
            &descriptor,
            self.observer.as_mut(),
        )?;

        // Copy out so no borrow of the handle outlives the chain
        let finished = descriptor.borrow().clone();
        install(&mut self.store, &target, &plan.key, finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::DecorateError;
    use crate::object::{NativeFunction, Value};
    use crate::syntax::{ClassElement, DecoratorExpr};
    use std::rc::Rc;

    fn method_body() -> Rc<dyn crate::object::Callable> {
        Rc::new(NativeFunction::new("m", |_, _| Ok(Value::from(1))))
    }

    #[test]
    fn test_undecorated_class_installs_with_defaults() {
        let decl = ClassDecl::new("C")
            .element(ClassElement::method("m", method_body()))
            .element(ClassElement::method("s", method_body()).with_static());
        let ctor = Engine::new().evaluate_class(&decl, &Environment::new()).unwrap();

        let proto = ctor.get(&"prototype".into()).unwrap();
        let desc = proto.as_object().unwrap().get_own_property(&"m".into()).unwrap();
        assert_eq!(desc.writable(), Some(true));
        assert!(!desc.is_enumerable());
        assert!(desc.is_configurable());
        assert!(ctor.has_own_property(&"s".into()));
    }

    #[test]
    fn test_static_prototype_element_is_rejected() {
        let decl = ClassDecl::new("C").element(
            ClassElement::field("prototype", None)
                .with_static()
                .decorator(DecoratorExpr::bare("noop")),
        );
        let mut env = Environment::new();
        env.define(
            "noop",
            Value::Object(ObjectRef::native("noop", |_, _| Ok(Value::Undefined))),
        );
        let err = Engine::new().evaluate_class(&decl, &env).unwrap_err();
        assert!(matches!(
            err,
            DecorateError::InstallRejected { ref name, .. } if name == "prototype"
        ));
    }
}

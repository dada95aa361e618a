//! Engine facade
//!
//! [`Engine`] bundles the property store, the configuration and an optional
//! invocation observer. It holds no state across declarations; every
//! `evaluate_*` call is independent.

use std::fmt;

use crate::config::EngineConfig;
use crate::decorate::{DecorateResult, InvocationObserver, NoopObserver};
use crate::eval::Environment;
use crate::object::{ObjectRef, OrdinaryStore, PropertyStore, Value};
use crate::syntax::ClassDecl;

/// Decorator application engine
///
/// # Example
///
/// ```ignore
/// let mut env = Environment::new();
/// register_builtins(&mut env);
/// let mut engine = Engine::new();
/// let ctor = engine.define_class(&decl, &mut env)?;
/// ```
pub struct Engine<S: PropertyStore = OrdinaryStore> {
    pub(crate) store: S,
    pub(crate) config: EngineConfig,
    pub(crate) observer: Box<dyn InvocationObserver>,
}

impl Engine<OrdinaryStore> {
    /// Engine with ordinary property semantics and default configuration
    pub fn new() -> Self {
        Self::with_store(OrdinaryStore)
    }
}

impl Default for Engine<OrdinaryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PropertyStore> Engine<S> {
    /// Engine that installs through a custom store
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            observer: Box::new(NoopObserver),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Install an observer called before every decorator invocation
    pub fn with_observer(mut self, observer: impl InvocationObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The property store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The property store, mutably
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the engine, returning its store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Evaluate a class declaration and bind the constructor under the
    /// class name in `env`
    pub fn define_class(
        &mut self,
        decl: &ClassDecl,
        env: &mut Environment,
    ) -> DecorateResult<ObjectRef> {
        let constructor = self.evaluate_class(decl, env)?;
        env.define(decl.name.clone(), Value::Object(constructor.clone()));
        Ok(constructor)
    }
}

impl<S: PropertyStore + fmt::Debug> fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DescriptorSource;

    #[test]
    fn test_define_class_binds_name() {
        let mut env = Environment::new();
        let ctor = Engine::new()
            .define_class(&ClassDecl::new("Point"), &mut env)
            .unwrap();
        let bound = env.lookup("Point").unwrap();
        assert!(bound.as_object().unwrap().ptr_eq(&ctor));
    }

    #[test]
    fn test_with_config() {
        let mut config = EngineConfig::default();
        config.engine.descriptor_source = DescriptorSource::ReadBack;
        let engine = Engine::new().with_config(config);
        assert_eq!(engine.config().engine.descriptor_source, DescriptorSource::ReadBack);
    }
}

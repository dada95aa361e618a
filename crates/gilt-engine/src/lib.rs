//! Gilt Decorator Engine
//!
//! This crate applies decorators to class elements, class declarations and
//! object-literal properties:
//! - **Object model**: values, objects, property descriptors and the
//!   property store primitives (`object` module)
//! - **Declarations**: already-parsed classes, elements, literals and
//!   decorator expressions (`syntax` module)
//! - **Decorators**: collection, descriptor synthesis, target resolution,
//!   invocation and installation (`decorate` module)
//! - **Builtins**: ready-made decorators such as `@readonly` and
//!   `@memoize` (`builtins` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use gilt_engine::{
//!     register_builtins, ClassDecl, ClassElement, DecoratorExpr, Engine, Environment,
//! };
//!
//! let mut env = Environment::new();
//! register_builtins(&mut env);
//!
//! let decl = ClassDecl::new("Person")
//!     .element(ClassElement::method("kidCount", body).decorator(DecoratorExpr::bare("readonly")));
//!
//! let mut engine = Engine::new();
//! let person = engine.define_class(&decl, &mut env)?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// ============================================================================
// Core Modules
// ============================================================================

/// Object model: values, objects, descriptors, property store
pub mod object;

/// Declaration forms the engine consumes
pub mod syntax;

/// Environments and evaluation of decorator-position expressions
pub mod eval;

/// Engine configuration
pub mod config;

/// Decorator collection, invocation and installation
pub mod decorate;

/// Builtin decorator library
pub mod builtins;

mod engine;

// ============================================================================
// Re-exports
// ============================================================================

pub use builtins::register_builtins;
pub use config::{ConfigError, DescriptorSource, EngineConfig};
pub use decorate::{
    DecorateError, DecorateResult, Discipline, FailureKind, InvocationObserver, InvocationRecord,
};
pub use engine::Engine;
pub use eval::Environment;
pub use object::{
    Callable, NativeFunction, ObjectError, ObjectRef, ObjectResult, OrdinaryStore,
    PropertyDescriptor, PropertyKey, PropertyStore, Value,
};
pub use syntax::{ClassDecl, ClassElement, DecoratorExpr, Expr, ObjectLiteral, PropertyDefinition};

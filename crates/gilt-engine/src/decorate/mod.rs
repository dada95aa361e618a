//! Decorator application
//!
//! Given a declaration and its ordered decorator list, this module computes
//! and performs the sequence of decorator invocations that transform a
//! freshly synthesized descriptor (or a constructor value) before it is
//! committed to its target.
//!
//! Pipeline per declaration:
//!
//! 1. [`collect`] evaluates the decorator expressions, topmost first.
//! 2. [`synthesize`] builds the default descriptor for a class element.
//! 3. [`target`] picks the object the chain operates on.
//! 4. [`invoke`] replays the decorators bottom-up under one of two
//!    composition disciplines.
//! 5. [`install`] commits the result through the property store.
//!
//! [`class`] and [`literal`] orchestrate these steps for class bodies and
//! object literals.

pub mod class;
pub mod collect;
pub mod install;
pub mod invoke;
pub mod literal;
pub mod synthesize;
pub mod target;

pub use collect::{collect, Decorator};
pub use install::install;
pub use invoke::{
    apply_class_chain, apply_fallback_chain, apply_member_chain, Discipline, InvocationObserver,
    InvocationRecord, NoopObserver,
};
pub use synthesize::{plan_elements, synthesize, ElementPlan, ElementSource, PlannedShape};
pub use target::{resolve, ClassObjects, DeclarationContext, Target, TargetKind};

use crate::object::ObjectError;

/// The three failure classes a declaration can end in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A decorator expression did not evaluate to a usable capability
    Evaluation,
    /// A decorator capability failed while being invoked
    Invocation,
    /// The property store refused the finished descriptor
    InstallRejected,
}

/// Errors raised while evaluating a decorated declaration.
///
/// None of these are recovered locally. Declarations completed before the
/// failure stay installed; the failing declaration and everything after it
/// in the same body are not processed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecorateError {
    /// Decorator expression failed to evaluate, or is not callable
    #[error("cannot evaluate decorator `{expression}`: {source}")]
    Evaluation {
        /// Rendered decorator expression
        expression: String,
        /// Underlying failure
        #[source]
        source: ObjectError,
    },

    /// Decorator capability failed during its own invocation
    #[error("decorator `{decorator}` failed on {site}: {source}")]
    Invocation {
        /// Rendered decorator expression
        decorator: String,
        /// Declaration being decorated
        site: String,
        /// Failure raised by the capability
        #[source]
        source: ObjectError,
    },

    /// Property store refused the final descriptor
    #[error("cannot install `{name}` on {target}: {source}")]
    InstallRejected {
        /// Property name
        name: String,
        /// Target description
        target: String,
        /// Failure raised by the store
        #[source]
        source: ObjectError,
    },

    /// Both halves of a getter/setter pair carry decorators
    #[error("decorators cannot be applied to both the getter and the setter of `{0}`")]
    DuplicateAccessorDecorators(String),

    /// Decorated object-literal property while those are switched off
    #[error("decorators on object literal properties are disabled (property `{0}`)")]
    ObjectLiteralDecoratorsDisabled(String),

    /// Field initializer failed to evaluate
    #[error("cannot evaluate initializer of field `{name}`: {source}")]
    Initializer {
        /// Field name
        name: String,
        /// Underlying failure
        #[source]
        source: ObjectError,
    },
}

impl DecorateError {
    /// Classify into one of the three failure kinds
    pub fn kind(&self) -> FailureKind {
        match self {
            DecorateError::Invocation { .. } => FailureKind::Invocation,
            DecorateError::InstallRejected { .. } => FailureKind::InstallRejected,
            DecorateError::Evaluation { .. }
            | DecorateError::DuplicateAccessorDecorators(_)
            | DecorateError::ObjectLiteralDecoratorsDisabled(_)
            | DecorateError::Initializer { .. } => FailureKind::Evaluation,
        }
    }
}

/// Result of decorating a declaration
pub type DecorateResult<T> = Result<T, DecorateError>;

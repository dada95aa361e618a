//! Decorator list collection
//!
//! Evaluates the contiguous run of decorator expressions above one
//! declaration. Each callee is evaluated before its own arguments, and the
//! decorators are evaluated topmost first; the resulting list keeps that
//! declared order so the invocation engine can replay it in reverse.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::{DecorateError, DecorateResult};
use crate::eval::{evaluate, Environment};
use crate::object::{Callable, ObjectError, Value};
use crate::syntax::DecoratorExpr;

/// An evaluated decorator: the capability plus its curried arguments
#[derive(Clone)]
pub struct Decorator {
    /// Rendered source form, e.g. `@enumerable(false)`
    pub label: String,
    /// Capability to construct
    pub capability: Rc<dyn Callable>,
    /// Arguments written in call position, appended after the standard ones
    pub extra_args: Vec<Value>,
}

impl Decorator {
    /// Build a decorator from an already-evaluated capability
    pub fn new(
        label: impl Into<String>,
        capability: Rc<dyn Callable>,
        extra_args: Vec<Value>,
    ) -> Self {
        Self {
            label: label.into(),
            capability,
            extra_args,
        }
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("label", &self.label)
            .field("extra_args", &self.extra_args)
            .finish()
    }
}

/// Evaluate a declaration's decorator list, preserving declared order.
///
/// Stops at the first expression that fails to evaluate or whose callee is
/// not callable.
pub fn collect(exprs: &[DecoratorExpr], env: &Environment) -> DecorateResult<Vec<Decorator>> {
    exprs.iter().map(|expr| collect_one(expr, env)).collect()
}

fn collect_one(expr: &DecoratorExpr, env: &Environment) -> DecorateResult<Decorator> {
    let label = expr.to_string();
    let evaluation_error = |source: ObjectError| DecorateError::Evaluation {
        expression: label.clone(),
        source,
    };

    let callee = evaluate(&expr.callee, env).map_err(evaluation_error)?;
    let capability = callee.as_callable().ok_or_else(|| {
        evaluation_error(ObjectError::TypeError(format!(
            "{} is not a constructor",
            expr.callee
        )))
    })?;

    let extra_args = expr
        .arguments
        .iter()
        .map(|arg| evaluate(arg, env))
        .collect::<Result<Vec<_>, _>>()
        .map_err(evaluation_error)?;

    trace!(decorator = %label, args = extra_args.len(), "collected decorator");
    Ok(Decorator {
        label,
        capability,
        extra_args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectRef;
    use crate::syntax::Expr;

    fn env_with(names: &[&str]) -> Environment {
        let mut env = Environment::new();
        for name in names {
            let owned = name.to_string();
            env.define(
                *name,
                Value::Object(ObjectRef::native(owned, |_, _| Ok(Value::Undefined))),
            );
        }
        env
    }

    #[test]
    fn test_collect_preserves_declared_order() {
        let env = env_with(&["F", "G", "H"]);
        let list = collect(
            &[
                DecoratorExpr::bare("F"),
                DecoratorExpr::bare("G"),
                DecoratorExpr::bare("H"),
            ],
            &env,
        )
        .unwrap();
        let labels: Vec<&str> = list.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["@F", "@G", "@H"]);
    }

    #[test]
    fn test_collect_evaluates_call_arguments() {
        let mut env = env_with(&["F"]);
        env.define("flag", Value::Bool(true));
        let list = collect(
            &[DecoratorExpr::call(
                "F",
                vec![Expr::string("color"), Expr::ident("flag")],
            )],
            &env,
        )
        .unwrap();
        assert_eq!(list[0].extra_args.len(), 2);
        assert_eq!(list[0].extra_args[0].as_str(), Some("color"));
        assert_eq!(list[0].extra_args[1].as_bool(), Some(true));
    }

    #[test]
    fn test_bare_decorator_has_no_arguments() {
        let env = env_with(&["G"]);
        let list = collect(&[DecoratorExpr::bare("G")], &env).unwrap();
        assert!(list[0].extra_args.is_empty());
    }

    #[test]
    fn test_unbound_decorator_fails_evaluation() {
        let err = collect(&[DecoratorExpr::bare("missing")], &Environment::new()).unwrap_err();
        assert!(matches!(
            err,
            DecorateError::Evaluation {
                source: ObjectError::ReferenceError(_),
                ..
            }
        ));
    }

    #[test]
    fn test_non_callable_decorator_fails_evaluation() {
        let mut env = Environment::new();
        env.define("answer", Value::from(42));
        let err = collect(&[DecoratorExpr::bare("answer")], &env).unwrap_err();
        match err {
            DecorateError::Evaluation { expression, source } => {
                assert_eq!(expression, "@answer");
                assert_eq!(source, ObjectError::TypeError("answer is not a constructor".into()));
            }
            other => panic!("Expected evaluation failure, got {:?}", other),
        }
    }
}

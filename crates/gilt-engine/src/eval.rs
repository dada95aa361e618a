//! Environments and evaluation of decorator-position expressions

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::object::{ObjectError, ObjectResult, PropertyKey, Value};
use crate::syntax::{Expr, Literal};

/// Lexical environment the engine resolves identifiers against
#[derive(Debug, Default, Clone)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Create an empty, top-level environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child environment that falls back to `parent`
    pub fn with_parent(parent: Rc<Environment>) -> Self {
        Self {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this environment, shadowing any outer binding
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Resolve `name`, innermost binding first
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref().and_then(|parent| parent.lookup(name)),
        }
    }
}

/// Evaluate an expression
pub fn evaluate(expr: &Expr, env: &Environment) -> ObjectResult<Value> {
    match expr {
        Expr::Literal(literal) => Ok(literal_value(literal)),
        Expr::Identifier(name) => env
            .lookup(name)
            .ok_or_else(|| ObjectError::ReferenceError(format!("{} is not defined", name))),
        Expr::Member { object, property } => match evaluate(object, env)? {
            Value::Object(obj) => obj.get(&PropertyKey::from(property.as_str())),
            other => Err(ObjectError::TypeError(format!(
                "Cannot read properties of {} (reading '{}')",
                other, property
            ))),
        },
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Undefined => Value::Undefined,
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::from(s.as_str()),
    }
}

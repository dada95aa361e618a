//! Declaration forms
//!
//! The already-parsed shape of the declarations the engine evaluates: class
//! declarations with their elements, object literals, and the decorator
//! expressions attached to either. Method, getter and setter bodies arrive
//! as callable capabilities produced by the surrounding evaluator.

use std::fmt;
use std::rc::Rc;

use crate::object::{Callable, PropertyKey};

// ============================================================================
// Expressions
// ============================================================================

/// Literal in decorator or argument position
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
}

/// Expression subset allowed in decorator and argument position
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value
    Literal(Literal),
    /// Identifier reference, resolved against the environment
    Identifier(String),
    /// Property access `object.property`
    Member {
        /// Object expression
        object: Box<Expr>,
        /// Property name
        property: String,
    },
}

impl Expr {
    /// Identifier reference
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    /// Dotted path `a.b.c`
    pub fn path(path: &str) -> Self {
        let mut segments = path.split('.');
        let head = Expr::ident(segments.next().unwrap_or_default());
        segments.fold(head, |object, property| object.member(property))
    }

    /// Property access on this expression
    pub fn member(self, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(self),
            property: property.into(),
        }
    }

    /// Number literal
    pub fn number(n: f64) -> Self {
        Expr::Literal(Literal::Number(n))
    }

    /// String literal
    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(s.into()))
    }

    /// Boolean literal
    pub fn bool(b: bool) -> Self {
        Expr::Literal(Literal::Bool(b))
    }

    /// `null`
    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Undefined) => write!(f, "undefined"),
            Expr::Literal(Literal::Null) => write!(f, "null"),
            Expr::Literal(Literal::Bool(b)) => write!(f, "{}", b),
            Expr::Literal(Literal::Number(n)) => write!(f, "{}", n),
            Expr::Literal(Literal::String(s)) => write!(f, "{:?}", s),
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::Member { object, property } => write!(f, "{}.{}", object, property),
        }
    }
}

// ============================================================================
// Decorators
// ============================================================================

/// One `@Expr` unit: a capability reference plus arguments written in call
/// position. `@F(a, b)` has arguments `[a, b]`; bare `@G` has none.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorExpr {
    /// Expression naming the decorator capability
    pub callee: Expr,
    /// Trailing positional arguments
    pub arguments: Vec<Expr>,
}

impl DecoratorExpr {
    /// Bare `@name` (dotted paths allowed)
    pub fn bare(name: &str) -> Self {
        Self {
            callee: Expr::path(name),
            arguments: Vec::new(),
        }
    }

    /// `@name(args...)`
    pub fn call(name: &str, arguments: Vec<Expr>) -> Self {
        Self {
            callee: Expr::path(name),
            arguments,
        }
    }
}

impl fmt::Display for DecoratorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.callee)?;
        if !self.arguments.is_empty() {
            let args: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
            write!(f, "({})", args.join(", "))?;
        }
        Ok(())
    }
}

// ============================================================================
// Classes
// ============================================================================

/// Class declaration or expression
#[derive(Clone)]
pub struct ClassDecl {
    /// Class name
    pub name: String,
    /// Class-level decorators, topmost first
    pub decorators: Vec<DecoratorExpr>,
    /// Body elements in source order
    pub elements: Vec<ClassElement>,
}

impl ClassDecl {
    /// Undecorated, empty class
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decorators: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Append a class-level decorator (below the existing ones)
    pub fn decorator(mut self, decorator: DecoratorExpr) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Append a body element
    pub fn element(mut self, element: ClassElement) -> Self {
        self.elements.push(element);
        self
    }
}

/// One element of a class body
#[derive(Clone)]
pub struct ClassElement {
    /// Property name
    pub name: PropertyKey,
    /// `static` modifier
    pub is_static: bool,
    /// Decorators written directly above the element, topmost first
    pub decorators: Vec<DecoratorExpr>,
    /// Element kind
    pub kind: ElementKind,
}

/// Kind of class element
#[derive(Clone)]
pub enum ElementKind {
    /// `name() { ... }`
    Method(Rc<dyn Callable>),
    /// `get name() { ... }`
    Getter(Rc<dyn Callable>),
    /// `set name(v) { ... }`
    Setter(Rc<dyn Callable>),
    /// `name = initializer;`
    Field(Option<Expr>),
}

impl ClassElement {
    fn new(name: impl Into<PropertyKey>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            is_static: false,
            decorators: Vec::new(),
            kind,
        }
    }

    /// Method element
    pub fn method(name: impl Into<PropertyKey>, body: Rc<dyn Callable>) -> Self {
        Self::new(name, ElementKind::Method(body))
    }

    /// Getter element
    pub fn getter(name: impl Into<PropertyKey>, body: Rc<dyn Callable>) -> Self {
        Self::new(name, ElementKind::Getter(body))
    }

    /// Setter element
    pub fn setter(name: impl Into<PropertyKey>, body: Rc<dyn Callable>) -> Self {
        Self::new(name, ElementKind::Setter(body))
    }

    /// Field element
    pub fn field(name: impl Into<PropertyKey>, initializer: Option<Expr>) -> Self {
        Self::new(name, ElementKind::Field(initializer))
    }

    /// Mark as `static`
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Append a decorator (below the existing ones)
    pub fn decorator(mut self, decorator: DecoratorExpr) -> Self {
        self.decorators.push(decorator);
        self
    }
}

// ============================================================================
// Object literals
// ============================================================================

/// Object literal `{ ... }`
#[derive(Clone, Default)]
pub struct ObjectLiteral {
    /// Property definitions in source order
    pub properties: Vec<PropertyDefinition>,
}

impl ObjectLiteral {
    /// Empty literal
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property definition
    pub fn property(mut self, property: PropertyDefinition) -> Self {
        self.properties.push(property);
        self
    }
}

/// One property definition inside an object literal
#[derive(Clone)]
pub struct PropertyDefinition {
    /// Property name
    pub key: PropertyKey,
    /// Decorators written above the property, topmost first
    pub decorators: Vec<DecoratorExpr>,
    /// Definition kind
    pub kind: PropertyKind,
}

/// Kind of object-literal property definition
#[derive(Clone)]
pub enum PropertyKind {
    /// `key: expr`
    Init(Expr),
    /// `key() { ... }`
    Method(Rc<dyn Callable>),
    /// `get key() { ... }`
    Getter(Rc<dyn Callable>),
    /// `set key(v) { ... }`
    Setter(Rc<dyn Callable>),
}

impl PropertyDefinition {
    fn new(key: impl Into<PropertyKey>, kind: PropertyKind) -> Self {
        Self {
            key: key.into(),
            decorators: Vec::new(),
            kind,
        }
    }

    /// `key: expr`
    pub fn init(key: impl Into<PropertyKey>, value: Expr) -> Self {
        Self::new(key, PropertyKind::Init(value))
    }

    /// `key() { ... }`
    pub fn method(key: impl Into<PropertyKey>, body: Rc<dyn Callable>) -> Self {
        Self::new(key, PropertyKind::Method(body))
    }

    /// `get key() { ... }`
    pub fn getter(key: impl Into<PropertyKey>, body: Rc<dyn Callable>) -> Self {
        Self::new(key, PropertyKind::Getter(body))
    }

    /// `set key(v) { ... }`
    pub fn setter(key: impl Into<PropertyKey>, body: Rc<dyn Callable>) -> Self {
        Self::new(key, PropertyKind::Setter(body))
    }

    /// Append a decorator (below the existing ones)
    pub fn decorator(mut self, decorator: DecoratorExpr) -> Self {
        self.decorators.push(decorator);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorator_display() {
        assert_eq!(DecoratorExpr::bare("G").to_string(), "@G");
        assert_eq!(
            DecoratorExpr::call("F", vec![Expr::string("color"), Expr::bool(false)]).to_string(),
            "@F(\"color\", false)"
        );
        assert_eq!(DecoratorExpr::bare("ns.deco").to_string(), "@ns.deco");
    }

    #[test]
    fn test_path_builds_member_chain() {
        let expr = Expr::path("a.b.c");
        assert_eq!(
            expr,
            Expr::ident("a").member("b").member("c")
        );
    }
}

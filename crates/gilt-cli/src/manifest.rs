//! Declaration manifest (JSON)
//!
//! A manifest lists class declarations and object literals in evaluation
//! order:
//!
//! ```json
//! { "declarations": [
//!   { "class": "Person", "decorators": ["annotation"],
//!     "members": [{ "method": "kidCount", "returns": 3, "decorators": ["readonly"] }] },
//!   { "object": "config",
//!     "properties": [
//!       { "name": "color", "decorators": [{ "name": "provide", "args": ["red"] }] }
//!     ] }
//! ] }
//! ```

use std::path::Path;
use std::rc::Rc;

use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use serde_json::Value as Json;

use gilt_engine::{
    Callable, ClassDecl, ClassElement, DecoratorExpr, Expr, NativeFunction, ObjectLiteral,
    PropertyDefinition, Value,
};

/// Parsed manifest
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Declarations in evaluation order
    pub declarations: Vec<Declaration>,
}

/// One top-level declaration
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Declaration {
    /// `class Name { ... }`
    Class(ClassSpec),
    /// `const name = { ... }`
    Object(ObjectSpec),
}

/// Class declaration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSpec {
    /// Class name
    pub class: String,
    /// Class-level decorators, topmost first
    #[serde(default)]
    pub decorators: Vec<DecoratorSpec>,
    /// Body elements in source order
    #[serde(default)]
    pub members: Vec<MemberSpec>,
}

/// Object literal bound to a name
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectSpec {
    /// Binding name
    pub object: String,
    /// Property definitions in source order
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
}

/// `"name"` or `{ "name": ..., "args": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum DecoratorSpec {
    /// Bare `@name`
    Bare(String),
    /// `@name(args...)`
    Call {
        /// Decorator name (dotted paths allowed)
        name: String,
        /// Literal arguments
        #[serde(default)]
        args: Vec<Json>,
    },
}

/// Class element; exactly one of `method`, `getter`, `setter`, `field`
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberSpec {
    /// Method name
    pub method: Option<String>,
    /// Getter name
    pub getter: Option<String>,
    /// Setter name
    pub setter: Option<String>,
    /// Field name
    pub field: Option<String>,
    /// `static` modifier
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Value a method or getter returns
    #[serde(default)]
    pub returns: Json,
    /// Field initializer
    pub value: Option<Json>,
    /// Decorators, topmost first
    #[serde(default)]
    pub decorators: Vec<DecoratorSpec>,
}

/// Kind of object-literal property
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertySpecKind {
    /// `name: value`
    #[default]
    Init,
    /// `name() { return value }`
    Method,
    /// `get name() { return value }`
    Getter,
    /// `set name(v) {}`
    Setter,
}

/// Object-literal property
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySpec {
    /// Property name
    pub name: String,
    /// Definition kind
    #[serde(default)]
    pub kind: PropertySpecKind,
    /// Initial value, or what a method/getter returns
    #[serde(default)]
    pub value: Json,
    /// Decorators, topmost first
    #[serde(default)]
    pub decorators: Vec<DecoratorSpec>,
}

impl Manifest {
    /// Load a manifest from a file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }

    /// Parse a manifest from JSON text
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl ClassSpec {
    /// Build the class declaration
    pub fn to_decl(&self) -> anyhow::Result<ClassDecl> {
        let mut decl = ClassDecl::new(self.class.clone());
        for decorator in &self.decorators {
            decl = decl.decorator(decorator.to_expr()?);
        }
        for member in &self.members {
            decl = decl.element(member.to_element()?);
        }
        Ok(decl)
    }
}

impl ObjectSpec {
    /// Build the object literal
    pub fn to_literal(&self) -> anyhow::Result<ObjectLiteral> {
        let mut literal = ObjectLiteral::new();
        for property in &self.properties {
            literal = literal.property(property.to_definition()?);
        }
        Ok(literal)
    }
}

impl DecoratorSpec {
    /// Build the decorator expression
    pub fn to_expr(&self) -> anyhow::Result<DecoratorExpr> {
        match self {
            DecoratorSpec::Bare(name) => Ok(DecoratorExpr::bare(name)),
            DecoratorSpec::Call { name, args } => {
                let arguments = args.iter().map(json_to_expr).collect::<anyhow::Result<_>>()?;
                Ok(DecoratorExpr::call(name, arguments))
            }
        }
    }
}

impl MemberSpec {
    /// Build the class element
    pub fn to_element(&self) -> anyhow::Result<ClassElement> {
        let mut element = match (&self.method, &self.getter, &self.setter, &self.field) {
            (Some(name), None, None, None) => {
                ClassElement::method(name.as_str(), constant_body(name, &self.returns)?)
            }
            (None, Some(name), None, None) => {
                ClassElement::getter(name.as_str(), constant_body(name, &self.returns)?)
            }
            (None, None, Some(name), None) => {
                ClassElement::setter(name.as_str(), constant_body(name, &Json::Null)?)
            }
            (None, None, None, Some(name)) => {
                let initializer = self.value.as_ref().map(json_to_expr).transpose()?;
                ClassElement::field(name.as_str(), initializer)
            }
            _ => bail!("member must name exactly one of method, getter, setter or field"),
        };
        if self.is_static {
            element = element.with_static();
        }
        for decorator in &self.decorators {
            element = element.decorator(decorator.to_expr()?);
        }
        Ok(element)
    }
}

impl PropertySpec {
    /// Build the property definition
    pub fn to_definition(&self) -> anyhow::Result<PropertyDefinition> {
        let key = self.name.as_str();
        let mut definition = match self.kind {
            PropertySpecKind::Init => PropertyDefinition::init(key, json_to_expr(&self.value)?),
            PropertySpecKind::Method => {
                PropertyDefinition::method(key, constant_body(key, &self.value)?)
            }
            PropertySpecKind::Getter => {
                PropertyDefinition::getter(key, constant_body(key, &self.value)?)
            }
            PropertySpecKind::Setter => {
                PropertyDefinition::setter(key, constant_body(key, &Json::Null)?)
            }
        };
        for decorator in &self.decorators {
            definition = definition.decorator(decorator.to_expr()?);
        }
        Ok(definition)
    }
}

/// Function body that ignores its arguments and returns `result`
fn constant_body(name: &str, result: &Json) -> anyhow::Result<Rc<dyn Callable>> {
    let result = json_to_value(result)?;
    Ok(Rc::new(NativeFunction::new(name, move |_, _| Ok(result.clone()))))
}

fn json_to_expr(json: &Json) -> anyhow::Result<Expr> {
    match json {
        Json::Null => Ok(Expr::null()),
        Json::Bool(b) => Ok(Expr::bool(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Expr::number)
            .ok_or_else(|| anyhow!("number out of range: {}", n)),
        Json::String(s) => Ok(Expr::string(s.clone())),
        other => bail!("only literal arguments are supported, got {}", other),
    }
}

fn json_to_value(json: &Json) -> anyhow::Result<Value> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| anyhow!("number out of range: {}", n)),
        Json::String(s) => Ok(Value::from(s.as_str())),
        other => bail!("only literal return values are supported, got {}", other),
    }
}

//! Target resolution
//!
//! Decides which object a decorator chain operates on. The decision is
//! purely syntactic (static or not, class-level or element, class or
//! literal) and is made before any decorator runs.

use std::fmt;

use tracing::trace;

use crate::object::{Object, ObjectKind, ObjectRef, PropertyDescriptor, PropertyKey, Value};

/// Syntactic tag of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Instance prototype: owns non-static class members
    InstancePrototype,
    /// Constructor value: owns static members, receives class decorators
    ConstructorValue,
    /// Object literal under construction
    PlainObject,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::InstancePrototype => write!(f, "prototype"),
            TargetKind::ConstructorValue => write!(f, "constructor"),
            TargetKind::PlainObject => write!(f, "object"),
        }
    }
}

/// Object a decorator chain receives as its first argument
#[derive(Debug, Clone)]
pub enum Target {
    /// Instance prototype of a class
    InstancePrototype(ObjectRef),
    /// Constructor value of a class
    ConstructorValue(ObjectRef),
    /// Object literal under construction
    PlainObject(ObjectRef),
}

impl Target {
    /// Syntactic tag
    pub fn kind(&self) -> TargetKind {
        match self {
            Target::InstancePrototype(_) => TargetKind::InstancePrototype,
            Target::ConstructorValue(_) => TargetKind::ConstructorValue,
            Target::PlainObject(_) => TargetKind::PlainObject,
        }
    }

    /// The target object
    pub fn object(&self) -> &ObjectRef {
        match self {
            Target::InstancePrototype(obj)
            | Target::ConstructorValue(obj)
            | Target::PlainObject(obj) => obj,
        }
    }

    /// The target as a decorator argument
    pub fn to_value(&self) -> Value {
        Value::Object(self.object().clone())
    }

    /// Human-readable label for diagnostics
    pub fn describe(&self) -> String {
        self.object().describe()
    }
}

/// The constructor value and instance prototype created for a class body
#[derive(Debug, Clone)]
pub struct ClassObjects {
    /// Constructor value
    pub constructor: ObjectRef,
    /// Instance prototype
    pub prototype: ObjectRef,
}

impl ClassObjects {
    /// Allocate the constructor/prototype pair for a class and link them
    /// the way an undecorated class definition does: `C.prototype` is
    /// read-only and non-configurable, `C.prototype.constructor` is a
    /// writable, non-enumerable back reference.
    pub fn create(name: &str) -> Self {
        let prototype = ObjectRef::ordinary(None);
        let constructor = ObjectRef::new(Object::new(
            ObjectKind::Class {
                name: name.to_string(),
            },
            None,
        ));

        let mut ctor = constructor.borrow_mut();
        ctor.properties.insert(
            PropertyKey::from("prototype"),
            PropertyDescriptor::Value {
                value: Value::Object(prototype.clone()),
                writable: false,
                enumerable: false,
                configurable: false,
            },
        );
        drop(ctor);

        prototype.borrow_mut().properties.insert(
            PropertyKey::from("constructor"),
            PropertyDescriptor::Value {
                value: Value::Object(constructor.clone()),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );

        Self {
            constructor,
            prototype,
        }
    }
}

/// Syntactic position of a decorated declaration
#[derive(Debug, Clone, Copy)]
pub enum DeclarationContext<'a> {
    /// Class element, `static` or not
    ClassElement {
        /// Enclosing class objects
        class: &'a ClassObjects,
        /// `static` modifier
        is_static: bool,
    },
    /// Class-level decorator list
    Class {
        /// The class objects
        class: &'a ClassObjects,
    },
    /// Property of an object literal
    ObjectLiteralProperty {
        /// Literal under construction
        object: &'a ObjectRef,
    },
}

impl DeclarationContext<'_> {
    /// Target kind, from syntax alone
    pub fn target_kind(&self) -> TargetKind {
        match self {
            DeclarationContext::ClassElement {
                is_static: false, ..
            } => TargetKind::InstancePrototype,
            DeclarationContext::ClassElement {
                is_static: true, ..
            }
            | DeclarationContext::Class { .. } => TargetKind::ConstructorValue,
            DeclarationContext::ObjectLiteralProperty { .. } => TargetKind::PlainObject,
        }
    }
}

/// Resolve the target a declaration's chain operates on
pub fn resolve(context: &DeclarationContext<'_>) -> Target {
    let target = match *context {
        DeclarationContext::ClassElement {
            class,
            is_static: false,
        } => Target::InstancePrototype(class.prototype.clone()),
        DeclarationContext::ClassElement {
            class,
            is_static: true,
        }
        | DeclarationContext::Class { class } => {
            Target::ConstructorValue(class.constructor.clone())
        }
        DeclarationContext::ObjectLiteralProperty { object } => {
            Target::PlainObject(object.clone())
        }
    };
    trace!(kind = %target.kind(), "resolved target");
    target
}

//! Property descriptors

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::{ObjectError, ObjectResult, PropertyKey, Value};

/// Shared handle to a descriptor that is being threaded through a chain
pub type DescriptorRef = Rc<RefCell<PropertyDescriptor>>;

/// Complete property descriptor: either value-shaped or accessor-shaped.
#[derive(Debug, Clone)]
pub enum PropertyDescriptor {
    /// Data property (methods, fields, literal values)
    Value {
        /// Stored value
        value: Value,
        /// `[[Writable]]`
        writable: bool,
        /// `[[Enumerable]]`
        enumerable: bool,
        /// `[[Configurable]]`
        configurable: bool,
    },
    /// Accessor property (getter and/or setter)
    Accessor {
        /// Getter function, if one was declared
        get: Option<Value>,
        /// Setter function, if one was declared
        set: Option<Value>,
        /// `[[Enumerable]]`
        enumerable: bool,
        /// `[[Configurable]]`
        configurable: bool,
    },
}

impl PropertyDescriptor {
    /// Data descriptor as created by ordinary assignment or object literals:
    /// writable, enumerable, and configurable.
    pub fn data(value: Value) -> Self {
        PropertyDescriptor::Value {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Move into a shared handle
    pub fn into_ref(self) -> DescriptorRef {
        Rc::new(RefCell::new(self))
    }

    /// Whether this is accessor-shaped
    pub fn is_accessor(&self) -> bool {
        matches!(self, PropertyDescriptor::Accessor { .. })
    }

    /// `[[Enumerable]]`
    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Value { enumerable, .. }
            | PropertyDescriptor::Accessor { enumerable, .. } => *enumerable,
        }
    }

    /// `[[Configurable]]`
    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Value { configurable, .. }
            | PropertyDescriptor::Accessor { configurable, .. } => *configurable,
        }
    }

    /// `[[Writable]]`; `None` for accessors
    pub fn writable(&self) -> Option<bool> {
        match self {
            PropertyDescriptor::Value { writable, .. } => Some(*writable),
            PropertyDescriptor::Accessor { .. } => None,
        }
    }

    /// Stored value of a data descriptor
    pub fn value(&self) -> Option<&Value> {
        match self {
            PropertyDescriptor::Value { value, .. } => Some(value),
            PropertyDescriptor::Accessor { .. } => None,
        }
    }

    /// Getter of an accessor descriptor
    pub fn getter(&self) -> Option<&Value> {
        match self {
            PropertyDescriptor::Accessor { get, .. } => get.as_ref(),
            PropertyDescriptor::Value { .. } => None,
        }
    }

    /// Setter of an accessor descriptor
    pub fn setter(&self) -> Option<&Value> {
        match self {
            PropertyDescriptor::Accessor { set, .. } => set.as_ref(),
            PropertyDescriptor::Value { .. } => None,
        }
    }

    /// Set `[[Enumerable]]`
    pub fn set_enumerable(&mut self, flag: bool) {
        match self {
            PropertyDescriptor::Value { enumerable, .. }
            | PropertyDescriptor::Accessor { enumerable, .. } => *enumerable = flag,
        }
    }

    /// Set `[[Configurable]]`
    pub fn set_configurable(&mut self, flag: bool) {
        match self {
            PropertyDescriptor::Value { configurable, .. }
            | PropertyDescriptor::Accessor { configurable, .. } => *configurable = flag,
        }
    }

    /// Set `[[Writable]]`; no-op for accessors, which have no such attribute
    pub fn set_writable(&mut self, flag: bool) {
        if let PropertyDescriptor::Value { writable, .. } = self {
            *writable = flag;
        }
    }

    /// Replace the stored value; no-op for accessors
    pub fn set_value(&mut self, new_value: Value) {
        if let PropertyDescriptor::Value { value, .. } = self {
            *value = new_value;
        }
    }

    /// `"value"` or `"accessor"`
    pub fn shape_name(&self) -> &'static str {
        match self {
            PropertyDescriptor::Value { .. } => "value",
            PropertyDescriptor::Accessor { .. } => "accessor",
        }
    }

    /// `ToPropertyDescriptor`: interpret a decorator's result as a
    /// descriptor.
    ///
    /// A [`Value::Descriptor`] is copied as-is. A plain object is read field
    /// by field (`value`, `writable`, `get`, `set`, `enumerable`,
    /// `configurable`); absent attributes default to `false`. Anything else
    /// is rejected.
    pub fn from_value(value: &Value) -> ObjectResult<PropertyDescriptor> {
        let object = match value {
            Value::Descriptor(desc) => return Ok(desc.borrow().clone()),
            Value::Object(object) => object,
            other => {
                return Err(ObjectError::TypeError(format!(
                    "Property description must be an object: {}",
                    other
                )))
            }
        };

        let field = |name: &str| -> ObjectResult<Option<Value>> {
            let key = PropertyKey::from(name);
            if object.has_property(&key) {
                object.get(&key).map(Some)
            } else {
                Ok(None)
            }
        };

        let enumerable = field("enumerable")?.is_some_and(|v| v.is_truthy());
        let configurable = field("configurable")?.is_some_and(|v| v.is_truthy());
        let get = field("get")?;
        let set = field("set")?;

        for accessor in get.iter().chain(set.iter()) {
            if !accessor.is_undefined() && accessor.as_callable().is_none() {
                return Err(ObjectError::TypeError(format!(
                    "Getter or setter must be a function: {}",
                    accessor
                )));
            }
        }

        if get.is_some() || set.is_some() {
            if field("value")?.is_some() || field("writable")?.is_some() {
                return Err(ObjectError::TypeError(
                    "Invalid property descriptor. Cannot both specify accessors and a value \
                     or writable attribute"
                        .to_string(),
                ));
            }
            return Ok(PropertyDescriptor::Accessor {
                get: get.filter(|v| !v.is_undefined()),
                set: set.filter(|v| !v.is_undefined()),
                enumerable,
                configurable,
            });
        }

        Ok(PropertyDescriptor::Value {
            value: field("value")?.unwrap_or_default(),
            writable: field("writable")?.is_some_and(|v| v.is_truthy()),
            enumerable,
            configurable,
        })
    }
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyDescriptor::Value {
                value,
                writable,
                enumerable,
                configurable,
            } => write!(
                f,
                "{{ value: {}, writable: {}, enumerable: {}, configurable: {} }}",
                value, writable, enumerable, configurable
            ),
            PropertyDescriptor::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => write!(
                f,
                "{{ get: {}, set: {}, enumerable: {}, configurable: {} }}",
                get.as_ref().map_or("none".to_string(), |g| g.to_string()),
                set.as_ref().map_or("none".to_string(), |s| s.to_string()),
                enumerable,
                configurable
            ),
        }
    }
}

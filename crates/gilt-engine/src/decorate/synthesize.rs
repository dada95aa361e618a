//! Descriptor synthesis
//!
//! Builds the default descriptor a class element would be installed with if
//! it had no decorators. Getters and setters sharing a name are paired
//! first, so a pair yields one accessor descriptor and runs one chain.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{DecorateError, DecorateResult};
use crate::config::EngineConfig;
use crate::eval::{evaluate, Environment};
use crate::object::{Callable, ObjectRef, PropertyDescriptor, PropertyKey, Value};
use crate::syntax::{ClassElement, DecoratorExpr, ElementKind, Expr};

/// Shape of a planned element
#[derive(Clone)]
pub enum PlannedShape {
    /// Method
    Method(Rc<dyn Callable>),
    /// Field with optional initializer
    Field(Option<Expr>),
    /// Getter and/or setter under one name
    Accessor {
        /// Getter body
        get: Option<Rc<dyn Callable>>,
        /// Setter body
        set: Option<Rc<dyn Callable>>,
    },
}

/// One unit of class-body processing: one descriptor, one chain, one install
#[derive(Clone)]
pub struct ElementPlan {
    /// Property name
    pub key: PropertyKey,
    /// `static` modifier
    pub is_static: bool,
    /// Decorators attached to the unit, topmost first
    pub decorators: Vec<DecoratorExpr>,
    /// What gets synthesized
    pub shape: PlannedShape,
}

impl ElementPlan {
    /// Short kind label for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match &self.shape {
            PlannedShape::Method(_) => "method",
            PlannedShape::Field(_) => "field",
            PlannedShape::Accessor { .. } => "accessor",
        }
    }

    /// Materialize the element's runtime inputs: function objects for
    /// bodies, the evaluated initializer for fields.
    pub fn source(&self, env: &Environment) -> DecorateResult<ElementSource> {
        Ok(match &self.shape {
            PlannedShape::Method(body) => ElementSource::Method(function_value(body)),
            PlannedShape::Field(None) => ElementSource::Field(Value::Undefined),
            PlannedShape::Field(Some(init)) => {
                let value = evaluate(init, env).map_err(|source| DecorateError::Initializer {
                    name: self.key.to_string(),
                    source,
                })?;
                ElementSource::Field(value)
            }
            PlannedShape::Accessor { get, set } => ElementSource::Accessor {
                get: get.as_ref().map(function_value),
                set: set.as_ref().map(function_value),
            },
        })
    }
}

fn function_value(body: &Rc<dyn Callable>) -> Value {
    Value::Object(ObjectRef::function(body.clone()))
}

/// Runtime inputs of one planned element
#[derive(Debug, Clone)]
pub enum ElementSource {
    /// Method function value
    Method(Value),
    /// Field initial value
    Field(Value),
    /// Accessor halves; an absent half stays absent
    Accessor {
        /// Getter function value
        get: Option<Value>,
        /// Setter function value
        set: Option<Value>,
    },
}

/// Group class elements into processing units.
///
/// A getter and a setter with the same name and static-ness merge into the
/// unit of whichever came first. Decorators attach to the pair as a whole
/// and may sit on either half, but not on both. A repeated half (a second
/// getter for the same name) starts a new unit, which installs later and so
/// replaces the earlier one.
pub fn plan_elements(elements: &[ClassElement]) -> DecorateResult<Vec<ElementPlan>> {
    let mut plans: Vec<ElementPlan> = Vec::with_capacity(elements.len());
    let mut latest: FxHashMap<(PropertyKey, bool), usize> = FxHashMap::default();

    for element in elements {
        let slot = (element.name.clone(), element.is_static);
        let (get, set) = match &element.kind {
            ElementKind::Getter(body) => (Some(body), None),
            ElementKind::Setter(body) => (None, Some(body)),
            ElementKind::Method(body) => {
                latest.insert(slot, plans.len());
                plans.push(new_plan(element, PlannedShape::Method(body.clone())));
                continue;
            }
            ElementKind::Field(init) => {
                latest.insert(slot, plans.len());
                plans.push(new_plan(element, PlannedShape::Field(init.clone())));
                continue;
            }
        };

        if let Some(&index) = latest.get(&slot) {
            let plan = &mut plans[index];
            if let PlannedShape::Accessor {
                get: planned_get,
                set: planned_set,
            } = &mut plan.shape
            {
                let fits = (get.is_none() || planned_get.is_none())
                    && (set.is_none() || planned_set.is_none());
                if fits {
                    if !element.decorators.is_empty() {
                        if !plan.decorators.is_empty() {
                            return Err(DecorateError::DuplicateAccessorDecorators(
                                element.name.to_string(),
                            ));
                        }
                        plan.decorators = element.decorators.clone();
                    }
                    if let Some(body) = get {
                        *planned_get = Some(body.clone());
                    }
                    if let Some(body) = set {
                        *planned_set = Some(body.clone());
                    }
                    continue;
                }
            }
        }

        latest.insert(slot, plans.len());
        plans.push(new_plan(
            element,
            PlannedShape::Accessor {
                get: get.cloned(),
                set: set.cloned(),
            },
        ));
    }

    Ok(plans)
}

fn new_plan(element: &ClassElement, shape: PlannedShape) -> ElementPlan {
    ElementPlan {
        key: element.name.clone(),
        is_static: element.is_static,
        decorators: element.decorators.clone(),
        shape,
    }
}

/// Build the default descriptor for an element.
///
/// Methods and fields get the configured element attributes (by default
/// writable, non-enumerable, configurable); accessors get the configured
/// accessor attributes.
pub fn synthesize(source: ElementSource, config: &EngineConfig) -> PropertyDescriptor {
    match source {
        ElementSource::Method(value) | ElementSource::Field(value) => PropertyDescriptor::Value {
            value,
            writable: config.elements.writable,
            enumerable: config.elements.enumerable,
            configurable: config.elements.configurable,
        },
        ElementSource::Accessor { get, set } => PropertyDescriptor::Accessor {
            get,
            set,
            enumerable: config.accessors.enumerable,
            configurable: config.accessors.configurable,
        },
    }
}

//! Decorator invocation
//!
//! Replays a collected decorator list against a target. Both disciplines run
//! the list bottom-up: the decorator written closest to the declaration runs
//! first, the topmost one last.
//!
//! - **Mutation** (class elements and class-level lists): every decorator
//!   receives the same shared descriptor handle and edits it in place.
//!   Return values are ignored.
//! - **Fallback** (object-literal properties): the running descriptor starts
//!   `undefined`; a decorator's result replaces it only when truthy.

use std::fmt;

use tracing::trace;

use super::{DecorateError, DecorateResult, Decorator, Target};
use crate::object::{DescriptorRef, ObjectError, PropertyDescriptor, PropertyKey, Value};

/// Composition discipline of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Shared descriptor edited in place, results ignored
    Mutation,
    /// Truthy results replace the running descriptor
    Fallback,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::Mutation => write!(f, "mutation"),
            Discipline::Fallback => write!(f, "fallback"),
        }
    }
}

/// What an observer sees right before a decorator is invoked
#[derive(Debug)]
pub struct InvocationRecord<'a> {
    /// The decorator about to run
    pub decorator: &'a Decorator,
    /// Target passed as the first argument
    pub target: &'a Target,
    /// Property name; `None` for class-level decorators
    pub name: Option<&'a PropertyKey>,
    /// Snapshot of the shared descriptor (mutation chains on members)
    pub descriptor: Option<PropertyDescriptor>,
    /// Running value (fallback chains)
    pub accumulator: Option<Value>,
    /// Discipline of the chain
    pub discipline: Discipline,
    /// Index of the decorator in declared order (0 is topmost)
    pub position: usize,
}

/// Hook called once per decorator invocation, in invocation order
pub trait InvocationObserver {
    /// Called before the decorator is invoked
    fn on_invoke(&mut self, record: &InvocationRecord<'_>);
}

impl<F> InvocationObserver for F
where
    F: FnMut(&InvocationRecord<'_>),
{
    fn on_invoke(&mut self, record: &InvocationRecord<'_>) {
        self(record)
    }
}

/// Observer that ignores every invocation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl InvocationObserver for NoopObserver {
    fn on_invoke(&mut self, _record: &InvocationRecord<'_>) {}
}

fn site(target: &Target, name: Option<&PropertyKey>) -> String {
    match name {
        Some(name) => format!("{}.{}", target.describe(), name),
        None => target.describe(),
    }
}

fn invoke(
    decorator: &Decorator,
    target: &Target,
    name: Option<&PropertyKey>,
    args: &[Value],
) -> DecorateResult<Value> {
    decorator
        .capability
        .construct(args)
        .map_err(|source: ObjectError| DecorateError::Invocation {
            decorator: decorator.label.clone(),
            site: site(target, name),
            source,
        })
}

/// Run a member chain under the mutation discipline.
///
/// Each decorator is constructed with `(target, name, descriptor,
/// ...extra_args)`; all of them see the same `descriptor` handle, so edits
/// made by one are visible to the next and to the install that follows.
pub fn apply_member_chain(
    decorators: &[Decorator],
    target: &Target,
    name: &PropertyKey,
    descriptor: &DescriptorRef,
    observer: &mut dyn InvocationObserver,
) -> DecorateResult<()> {
    for (position, decorator) in decorators.iter().enumerate().rev() {
        let mut args = Vec::with_capacity(3 + decorator.extra_args.len());
        args.push(target.to_value());
        args.push(Value::from(name.as_str()));
        args.push(Value::Descriptor(descriptor.clone()));
        args.extend(decorator.extra_args.iter().cloned());

        // Snapshot taken and dropped before the call; decorators borrow the
        // handle mutably.
        let snapshot = descriptor.borrow().clone();
        observer.on_invoke(&InvocationRecord {
            decorator,
            target,
            name: Some(name),
            descriptor: Some(snapshot),
            accumulator: None,
            discipline: Discipline::Mutation,
            position,
        });
        trace!(
            decorator = %decorator.label,
            target_kind = %target.kind(),
            name = %name,
            position,
            "invoking member decorator"
        );

        invoke(decorator, target, Some(name), &args)?;
    }
    Ok(())
}

/// Run a class-level chain under the mutation discipline.
///
/// Each decorator is constructed with `(constructor, ...extra_args)`. Return
/// values are ignored; replacing the class is not possible.
pub fn apply_class_chain(
    decorators: &[Decorator],
    target: &Target,
    observer: &mut dyn InvocationObserver,
) -> DecorateResult<()> {
    for (position, decorator) in decorators.iter().enumerate().rev() {
        let mut args = Vec::with_capacity(1 + decorator.extra_args.len());
        args.push(target.to_value());
        args.extend(decorator.extra_args.iter().cloned());

        observer.on_invoke(&InvocationRecord {
            decorator,
            target,
            name: None,
            descriptor: None,
            accumulator: None,
            discipline: Discipline::Mutation,
            position,
        });
        trace!(
            decorator = %decorator.label,
            target_kind = %target.kind(),
            position,
            "invoking class decorator"
        );

        invoke(decorator, target, None, &args)?;
    }
    Ok(())
}

/// Run a chain under the fallback discipline and return the final running
/// value.
///
/// The running value starts `undefined`. Each decorator is constructed with
/// `(target, name, running, ...extra_args)` and a truthy result replaces the
/// running value. `undefined` at the end means nothing gets installed.
pub fn apply_fallback_chain(
    decorators: &[Decorator],
    target: &Target,
    name: &PropertyKey,
    observer: &mut dyn InvocationObserver,
) -> DecorateResult<Value> {
    let mut running = Value::Undefined;
    for (position, decorator) in decorators.iter().enumerate().rev() {
        let mut args = Vec::with_capacity(3 + decorator.extra_args.len());
        args.push(target.to_value());
        args.push(Value::from(name.as_str()));
        args.push(running.clone());
        args.extend(decorator.extra_args.iter().cloned());

        observer.on_invoke(&InvocationRecord {
            decorator,
            target,
            name: Some(name),
            descriptor: None,
            accumulator: Some(running.clone()),
            discipline: Discipline::Fallback,
            position,
        });
        trace!(
            decorator = %decorator.label,
            name = %name,
            position,
            "invoking object literal decorator"
        );

        let result = invoke(decorator, target, Some(name), &args)?;
        if result.is_truthy() {
            running = result;
        }
    }
    Ok(running)
}

//! Property install and read-back primitives
//!
//! The engine never writes a finished descriptor onto a target directly; it
//! goes through a [`PropertyStore`]. Hosts that need to observe or police
//! installs (counting, auditing, freezing) wrap or replace the store.

use super::{ObjectRef, ObjectResult, PropertyDescriptor, PropertyKey};

/// The two object-system primitives the decorator engine consumes
pub trait PropertyStore {
    /// Install `descriptor` as an own property of `target`, replacing any
    /// existing own property of that name.
    ///
    /// Fails with a `TypeError` when `target` is not extensible and has no
    /// such property, or when the existing property is non-configurable and
    /// the new descriptor is incompatible with it.
    fn define_own_property(
        &mut self,
        target: &ObjectRef,
        key: &PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> ObjectResult<()>;

    /// Read back a previously installed own descriptor
    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropertyKey,
    ) -> Option<PropertyDescriptor>;
}

/// Store that applies ordinary object semantics
#[derive(Debug, Default, Clone, Copy)]
pub struct OrdinaryStore;

impl PropertyStore for OrdinaryStore {
    fn define_own_property(
        &mut self,
        target: &ObjectRef,
        key: &PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> ObjectResult<()> {
        target.define_own_property(key.clone(), descriptor)
    }

    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropertyKey,
    ) -> Option<PropertyDescriptor> {
        target.get_own_property(key)
    }
}

impl<S: PropertyStore + ?Sized> PropertyStore for &mut S {
    fn define_own_property(
        &mut self,
        target: &ObjectRef,
        key: &PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> ObjectResult<()> {
        (**self).define_own_property(target, key, descriptor)
    }

    fn get_own_property_descriptor(
        &self,
        target: &ObjectRef,
        key: &PropertyKey,
    ) -> Option<PropertyDescriptor> {
        (**self).get_own_property_descriptor(target, key)
    }
}

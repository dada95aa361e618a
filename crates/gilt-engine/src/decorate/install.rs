//! Descriptor installation

use tracing::debug;

use super::{DecorateError, DecorateResult, Target};
use crate::object::{PropertyDescriptor, PropertyKey, PropertyStore};

/// Commit a finished descriptor to its target through `store`.
///
/// Called exactly once per declaration, after its chain has completed. A
/// store refusal surfaces as [`DecorateError::InstallRejected`].
pub fn install<S: PropertyStore + ?Sized>(
    store: &mut S,
    target: &Target,
    name: &PropertyKey,
    descriptor: PropertyDescriptor,
) -> DecorateResult<()> {
    debug!(
        target_object = %target.describe(),
        name = %name,
        shape = descriptor.shape_name(),
        enumerable = descriptor.is_enumerable(),
        configurable = descriptor.is_configurable(),
        "installing property"
    );
    store
        .define_own_property(target.object(), name, descriptor)
        .map_err(|source| DecorateError::InstallRejected {
            name: name.to_string(),
            target: target.describe(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectError, ObjectRef, OrdinaryStore, Value};

    #[test]
    fn test_install_defines_own_property() {
        let object = ObjectRef::ordinary(None);
        let target = Target::PlainObject(object.clone());
        install(
            &mut OrdinaryStore,
            &target,
            &"x".into(),
            PropertyDescriptor::data(Value::from(3)),
        )
        .unwrap();
        assert_eq!(object.get(&"x".into()).unwrap().as_number(), Some(3.0));
    }

    #[test]
    fn test_install_rejected_on_non_extensible_target() {
        let object = ObjectRef::ordinary(None);
        object.prevent_extensions();
        let err = install(
            &mut OrdinaryStore,
            &Target::PlainObject(object),
            &"x".into(),
            PropertyDescriptor::data(Value::Null),
        )
        .unwrap_err();
        match err {
            DecorateError::InstallRejected { name, source, .. } => {
                assert_eq!(name, "x");
                assert!(matches!(source, ObjectError::TypeError(_)));
            }
            other => panic!("Expected install rejection, got {:?}", other),
        }
    }
}

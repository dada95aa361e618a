//! `@memoize`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::descriptor::DescriptorTransform;
use crate::object::{call, ObjectError, ObjectRef, ObjectResult, PropertyDescriptor, Value};

/// Cache key: decorated site, receiver object id (0 for primitives), and
/// the argument list keyed by identity for objects and descriptors, by
/// type and rendering for primitives
type MemoKey = (u64, u64, String);

/// Caches results of a method or getter per receiver and argument list.
///
/// The table belongs to the capability: every site decorated through the
/// same `memoize` binding shares it, keyed apart by a per-site id.
///
/// Entries are never evicted. Receivers and object arguments are keyed by
/// id, not held, so a dropped object's entries stay until the capability
/// itself is dropped or [`Memoize::clear`] is called.
#[derive(Debug, Default)]
pub struct Memoize {
    table: Rc<RefCell<FxHashMap<MemoKey, Value>>>,
    next_site: Cell<u64>,
}

impl Memoize {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached results across all sites
    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }

    /// Drop every cached result
    pub fn clear(&self) {
        self.table.borrow_mut().clear();
    }

    fn wrap(&self, key: &str, original: Value) -> Value {
        let site = self.next_site.get();
        self.next_site.set(site + 1);
        let table = self.table.clone();

        Value::Object(ObjectRef::native(format!("memoized {}", key), move |this, args| {
            let memo_key = (site, receiver_id(this), render_args(args));
            let hit = table.borrow().get(&memo_key).cloned();
            if let Some(value) = hit {
                return Ok(value);
            }
            let value = call(&original, this, args)?;
            table.borrow_mut().insert(memo_key, value.clone());
            Ok(value)
        }))
    }
}

fn receiver_id(this: &Value) -> u64 {
    this.as_object().map_or(0, ObjectRef::id)
}

fn render_args(args: &[Value]) -> String {
    args.iter().map(arg_key).collect::<Vec<_>>().join(",")
}

fn arg_key(arg: &Value) -> String {
    match arg {
        Value::Object(obj) => format!("object#{}", obj.id()),
        Value::Descriptor(desc) => format!("descriptor@{:p}", Rc::as_ptr(desc)),
        primitive => format!("{}:{}", primitive.type_name(), primitive),
    }
}

impl DescriptorTransform for Memoize {
    fn name(&self) -> &str {
        "memoize"
    }

    fn apply(
        &self,
        key: &str,
        descriptor: &mut PropertyDescriptor,
        _extra: &[Value],
    ) -> ObjectResult<()> {
        match descriptor {
            PropertyDescriptor::Value { value, .. } if value.as_callable().is_some() => {
                *value = self.wrap(key, value.clone());
                Ok(())
            }
            PropertyDescriptor::Accessor {
                get: Some(getter), ..
            } => {
                *getter = self.wrap(key, getter.clone());
                Ok(())
            }
            _ => Err(ObjectError::TypeError(format!(
                "@memoize can only decorate a method or getter ('{}')",
                key
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_method(counter: &Rc<Cell<u32>>) -> Value {
        let counter = counter.clone();
        Value::Object(ObjectRef::native("square", move |_, args| {
            counter.set(counter.get() + 1);
            let n = args.first().and_then(Value::as_number).unwrap_or(0.0);
            Ok(Value::Number(n * n))
        }))
    }

    #[test]
    fn test_results_cached_per_receiver_and_arguments() {
        let calls = Rc::new(Cell::new(0));
        let memo = Memoize::new();
        let mut desc = PropertyDescriptor::data(counting_method(&calls));
        memo.apply("square", &mut desc, &[]).unwrap();
        let wrapped = desc.value().cloned().unwrap();

        let a = Value::Object(ObjectRef::ordinary(None));
        let b = Value::Object(ObjectRef::ordinary(None));
        let three = [Value::from(3)];

        assert_eq!(call(&wrapped, &a, &three).unwrap().as_number(), Some(9.0));
        assert_eq!(call(&wrapped, &a, &three).unwrap().as_number(), Some(9.0));
        assert_eq!(calls.get(), 1);

        call(&wrapped, &b, &three).unwrap();
        call(&wrapped, &a, &[Value::from(4)]).unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(memo.len(), 3);
    }

    #[test]
    fn test_string_and_number_arguments_do_not_collide() {
        let calls = Rc::new(Cell::new(0));
        let memo = Memoize::new();
        let mut desc = PropertyDescriptor::data(counting_method(&calls));
        memo.apply("square", &mut desc, &[]).unwrap();
        let wrapped = desc.value().cloned().unwrap();

        call(&wrapped, &Value::Undefined, &[Value::from(1)]).unwrap();
        call(&wrapped, &Value::Undefined, &[Value::from("1")]).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_distinct_object_arguments_do_not_collide() {
        let memo = Memoize::new();
        let invoke = Value::Object(ObjectRef::native("invoke", |_, args| {
            let callback = args.first().cloned().unwrap_or(Value::Undefined);
            call(&callback, &Value::Undefined, &[])
        }));
        let mut desc = PropertyDescriptor::data(invoke);
        memo.apply("invoke", &mut desc, &[]).unwrap();
        let wrapped = desc.value().cloned().unwrap();

        let one = Value::Object(ObjectRef::native("cb", |_, _| Ok(Value::from(1))));
        let two = Value::Object(ObjectRef::native("cb", |_, _| Ok(Value::from(2))));
        assert_eq!(one.to_string(), two.to_string());

        let first = call(&wrapped, &Value::Undefined, &[one.clone()]).unwrap();
        let second = call(&wrapped, &Value::Undefined, &[two]).unwrap();
        assert_eq!(first.as_number(), Some(1.0));
        assert_eq!(second.as_number(), Some(2.0));
        assert_eq!(memo.len(), 2);

        let again = call(&wrapped, &Value::Undefined, &[one]).unwrap();
        assert_eq!(again.as_number(), Some(1.0));
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn test_entries_outlive_receiver_until_cleared() {
        let calls = Rc::new(Cell::new(0));
        let memo = Memoize::new();
        let mut desc = PropertyDescriptor::data(counting_method(&calls));
        memo.apply("square", &mut desc, &[]).unwrap();
        let wrapped = desc.value().cloned().unwrap();

        {
            let receiver = Value::Object(ObjectRef::ordinary(None));
            call(&wrapped, &receiver, &[Value::from(2)]).unwrap();
        }
        assert_eq!(memo.len(), 1);

        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn test_rejects_plain_field() {
        let mut desc = PropertyDescriptor::data(Value::from(1));
        let err = Memoize::new().apply("n", &mut desc, &[]).unwrap_err();
        assert!(matches!(err, ObjectError::TypeError(_)));
    }
}

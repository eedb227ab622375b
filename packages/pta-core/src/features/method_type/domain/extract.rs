//! Value Extractor
//!
//! Total classification of abstract objects into the concrete values the
//! modeling layer understands. One tag check, never an error: ordinary
//! allocations and unrelated constants are simply not applicable.

use crate::features::pta::domain::{
    heap_object::HeapObject,
    value::{ConcreteValue, MethodSignature, TypeDescriptor},
};

/// The concrete value an abstract object denotes, if any
#[inline]
pub fn extract(object: &HeapObject) -> Option<&ConcreteValue> {
    object.as_value()
}

/// Extract a type descriptor, or `None` for anything else
#[inline]
pub fn extract_type(object: &HeapObject) -> Option<&TypeDescriptor> {
    match extract(object) {
        Some(ConcreteValue::Type(t)) => Some(t),
        _ => None,
    }
}

/// Extract a method signature, or `None` for anything else
#[inline]
pub fn extract_signature(object: &HeapObject) -> Option<&MethodSignature> {
    match extract(object) {
        Some(ConcreteValue::Signature(s)) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pta::domain::{context::Context, heap_object::HeapItem};

    fn alloc_obj() -> HeapObject {
        HeapObject::new(
            0,
            HeapItem::Allocation {
                site: 1,
                class: "Foo".to_string(),
            },
            Context::empty(0),
        )
    }

    fn type_obj(name: &str) -> HeapObject {
        HeapObject::new(
            1,
            HeapItem::Constant(ConcreteValue::Type(TypeDescriptor::new(name))),
            Context::empty(0),
        )
    }

    fn sig_obj() -> HeapObject {
        HeapObject::new(
            2,
            HeapItem::Constant(ConcreteValue::Signature(MethodSignature::new(
                vec![],
                TypeDescriptor::new("void"),
            ))),
            Context::empty(0),
        )
    }

    #[test]
    fn test_allocation_not_applicable() {
        assert!(extract(&alloc_obj()).is_none());
        assert!(extract_type(&alloc_obj()).is_none());
        assert!(extract_signature(&alloc_obj()).is_none());
    }

    #[test]
    fn test_type_descriptor_extraction() {
        let obj = type_obj("int");
        assert_eq!(extract_type(&obj).unwrap().name(), "int");
        assert!(extract_signature(&obj).is_none());
    }

    #[test]
    fn test_signature_extraction() {
        let obj = sig_obj();
        assert!(extract_signature(&obj).is_some());
        assert!(extract_type(&obj).is_none());
    }
}

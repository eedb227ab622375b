//! Heap Model
//!
//! Arena of interned abstract objects keyed by their underlying identity:
//! allocation objects by (site, heap context), constants by value.
//! Interning makes object identity stable for the whole run, so points-to
//! sets can store plain numeric IDs and equal concrete values always
//! resolve to the same object.

use crate::features::pta::domain::{
    context::Context,
    heap_object::{HeapItem, HeapObject, ObjectId},
    value::ConcreteValue,
};
use rustc_hash::FxHashMap;

/// Canonicalization table for abstract heap objects
#[derive(Debug)]
pub struct HeapModel {
    objects: Vec<HeapObject>,
    alloc_index: FxHashMap<(u32, Context), ObjectId>,
    const_index: FxHashMap<ConcreteValue, ObjectId>,
    default_hctx: Context,
}

impl Default for HeapModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapModel {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            alloc_index: FxHashMap::default(),
            const_index: FxHashMap::default(),
            default_hctx: Context::empty(0),
        }
    }

    /// Get or create the object for an allocation site in a heap context
    pub fn alloc(&mut self, site: u32, class: &str, heap_context: &Context) -> ObjectId {
        if let Some(&id) = self.alloc_index.get(&(site, heap_context.clone())) {
            return id;
        }
        let id = self.objects.len() as ObjectId;
        self.objects.push(HeapObject::new(
            id,
            HeapItem::Allocation {
                site,
                class: class.to_string(),
            },
            heap_context.clone(),
        ));
        self.alloc_index.insert((site, heap_context.clone()), id);
        id
    }

    /// Get or create the canonical object for a constant value
    ///
    /// Constants live in the default heap context and are shared by all
    /// calling contexts; interning is by value equality.
    pub fn constant(&mut self, value: ConcreteValue) -> ObjectId {
        if let Some(&id) = self.const_index.get(&value) {
            return id;
        }
        let id = self.objects.len() as ObjectId;
        self.objects.push(HeapObject::new(
            id,
            HeapItem::Constant(value.clone()),
            self.default_hctx.clone(),
        ));
        self.const_index.insert(value, id);
        id
    }

    #[inline]
    pub fn object(&self, id: ObjectId) -> &HeapObject {
        &self.objects[id as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

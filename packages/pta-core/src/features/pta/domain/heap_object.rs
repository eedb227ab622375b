//! Abstract Heap Objects
//!
//! Engine-owned identities standing in for runtime objects. An object is
//! either a program allocation site or an interned constant value; the
//! heap model guarantees that value-equal constants share one `ObjectId`
//! within a heap context, so identity checks never rely on pointers.

use super::context::Context;
use super::value::ConcreteValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for abstract heap objects
pub type ObjectId = u32;

/// What an abstract object stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeapItem {
    /// A program allocation site (`x = new T()`)
    Allocation { site: u32, class: String },

    /// An interned constant value (class literal or synthesized signature)
    Constant(ConcreteValue),
}

/// An abstract heap object: interned payload plus its heap context
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeapObject {
    pub id: ObjectId,
    pub item: HeapItem,
    pub heap_context: Context,
}

impl HeapObject {
    pub fn new(id: ObjectId, item: HeapItem, heap_context: Context) -> Self {
        Self {
            id,
            item,
            heap_context,
        }
    }

    /// The concrete value this object denotes, if it denotes one
    #[inline]
    pub fn as_value(&self) -> Option<&ConcreteValue> {
        match &self.item {
            HeapItem::Constant(v) => Some(v),
            HeapItem::Allocation { .. } => None,
        }
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        matches!(self.item, HeapItem::Constant(_))
    }
}

impl fmt::Display for HeapObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            HeapItem::Allocation { site, class } => write!(f, "alloc:{}:{}", site, class),
            HeapItem::Constant(v) => write!(f, "const:{}", v),
        }
    }
}

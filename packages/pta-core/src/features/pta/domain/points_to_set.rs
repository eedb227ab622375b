//! Points-to Sets
//!
//! Sorted sparse set of object IDs. Points-to sets only ever grow during
//! a run: union is idempotent and there is no removal operation.
//!
//! # Performance
//! - Insert: O(log n) search + O(n) shift
//! - Contains: O(log n)
//! - Union / difference: O(n + m) merge over sorted storage

use super::heap_object::ObjectId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Monotone set of abstract object IDs, sorted and deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointsToSet {
    elements: Vec<ObjectId>,
}

impl PointsToSet {
    /// Create an empty set
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set containing a single object
    #[inline]
    pub fn singleton(object: ObjectId) -> Self {
        Self {
            elements: vec![object],
        }
    }

    /// Insert an object; returns true if the set changed
    #[inline]
    pub fn insert(&mut self, object: ObjectId) -> bool {
        match self.elements.binary_search(&object) {
            Ok(_) => false,
            Err(pos) => {
                self.elements.insert(pos, object);
                true
            }
        }
    }

    #[inline]
    pub fn contains(&self, object: ObjectId) -> bool {
        self.elements.binary_search(&object).is_ok()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate in ascending ID order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.elements.iter().copied()
    }

    /// Union `other` into this set; returns true if anything was added
    pub fn union_with(&mut self, other: &Self) -> bool {
        if other.is_empty() {
            return false;
        }
        let mut merged = Vec::with_capacity(self.elements.len() + other.elements.len());
        let mut changed = false;
        let (mut i, mut j) = (0, 0);
        while i < self.elements.len() && j < other.elements.len() {
            match self.elements[i].cmp(&other.elements[j]) {
                Ordering::Less => {
                    merged.push(self.elements[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(other.elements[j]);
                    j += 1;
                    changed = true;
                }
                Ordering::Equal => {
                    merged.push(self.elements[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&self.elements[i..]);
        if j < other.elements.len() {
            merged.extend_from_slice(&other.elements[j..]);
            changed = true;
        }
        self.elements = merged;
        changed
    }

    /// Elements of this set not present in `other`
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            elements: self
                .elements
                .iter()
                .copied()
                .filter(|&e| !other.contains(e))
                .collect(),
        }
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.iter().all(|e| self.contains(e))
    }
}

impl FromIterator<ObjectId> for PointsToSet {
    fn from_iter<T: IntoIterator<Item = ObjectId>>(iter: T) -> Self {
        let mut elements: Vec<ObjectId> = iter.into_iter().collect();
        elements.sort_unstable();
        elements.dedup();
        Self { elements }
    }
}

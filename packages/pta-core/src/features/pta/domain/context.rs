//! Calling Contexts
//!
//! k-limited call-string abstraction of calling environments.
//! The empty context is the *default context*: constant-like objects
//! (class literals, synthesized signatures) live there and are shared
//! by all calling environments.

use super::ir::VarId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Call context: a k-limited sequence of context elements
///
/// Two contexts are equal iff their element sequences are equal; the depth
/// limit only governs how `push` truncates and does not affect identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Context elements (call sites or allocation sites)
    elements: Vec<u32>,

    /// Maximum depth for k-limiting
    max_depth: usize,
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl Eq for Context {}

impl Hash for Context {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

impl Context {
    /// Create the empty (default) context
    pub fn empty(max_depth: usize) -> Self {
        Self {
            elements: Vec::new(),
            max_depth,
        }
    }

    /// Create a context with a single element
    pub fn with_element(element: u32, max_depth: usize) -> Self {
        Self {
            elements: vec![element],
            max_depth,
        }
    }

    /// Push a new context element (with k-limiting)
    pub fn push(&self, element: u32) -> Self {
        let mut elements = self.elements.clone();
        elements.push(element);
        if elements.len() > self.max_depth {
            elements.remove(0);
        }
        Self {
            elements,
            max_depth: self.max_depth,
        }
    }

    /// Current depth
    #[inline]
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Whether this is the default (empty) context
    #[inline]
    pub fn is_default(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Context-qualified variable: (context, variable) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsVar {
    pub context: Context,
    pub var: VarId,
}

impl CsVar {
    pub fn new(context: Context, var: VarId) -> Self {
        Self { context, var }
    }
}

//! Concrete Values
//!
//! The value kinds the library-call modeling subsystem understands:
//! type descriptors (what a class literal denotes) and method signatures
//! (a return type plus an ordered parameter list). Everything else in the
//! heap is opaque to the modeling layer.
//!
//! Values use structural equality so the heap model can intern them:
//! equal values always canonicalize to the same abstract object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete type descriptor, recoverable from class-literal objects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor(String);

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A method signature: return type plus ordered parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    params: Vec<TypeDescriptor>,
    ret: TypeDescriptor,
}

impl MethodSignature {
    pub fn new(params: Vec<TypeDescriptor>, ret: TypeDescriptor) -> Self {
        Self { params, ret }
    }

    /// Derive a signature with the same parameter list and a new return type
    pub fn with_return(&self, ret: TypeDescriptor) -> Self {
        Self {
            params: self.params.clone(),
            ret,
        }
    }

    #[inline]
    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    #[inline]
    pub fn ret(&self) -> &TypeDescriptor {
        &self.ret
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

/// Tagged union over the concrete value kinds this subsystem understands
///
/// A single total match on this tag replaces scattered runtime type checks
/// when classifying heap objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcreteValue {
    /// A type descriptor (class literal)
    Type(TypeDescriptor),

    /// A composite method signature
    Signature(MethodSignature),
}

impl fmt::Display for ConcreteValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteValue::Type(t) => write!(f, "{}", t),
            ConcreteValue::Signature(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_display() {
        let sig = MethodSignature::new(
            vec![TypeDescriptor::new("int"), TypeDescriptor::new("String")],
            TypeDescriptor::new("void"),
        );
        assert_eq!(sig.to_string(), "(int,String) -> void");
    }

    #[test]
    fn test_empty_params_display() {
        let sig = MethodSignature::new(vec![], TypeDescriptor::new("void"));
        assert_eq!(sig.to_string(), "() -> void");
    }

    #[test]
    fn test_with_return_preserves_params() {
        let base = MethodSignature::new(
            vec![TypeDescriptor::new("int")],
            TypeDescriptor::new("Object"),
        );
        let derived = base.with_return(TypeDescriptor::new("String"));
        assert_eq!(derived.params(), base.params());
        assert_eq!(derived.ret().name(), "String");
        // The template itself is unchanged
        assert_eq!(base.ret().name(), "Object");
    }

    #[test]
    fn test_structural_equality() {
        let a = ConcreteValue::Signature(MethodSignature::new(
            vec![TypeDescriptor::new("int")],
            TypeDescriptor::new("void"),
        ));
        let b = ConcreteValue::Signature(MethodSignature::new(
            vec![TypeDescriptor::new("int")],
            TypeDescriptor::new("void"),
        ));
        assert_eq!(a, b);
    }
}

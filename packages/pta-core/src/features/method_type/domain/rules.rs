//! Synthesis Rules
//!
//! One pure rule per modeled overload shape, resolved to a rule ID once
//! at call registration and dispatched by tag thereafter. A rule maps a
//! tuple of concrete values to a method signature; any kind mismatch or
//! missing input yields `None` — an empty contribution, never an error.

use crate::features::pta::domain::value::{ConcreteValue, MethodSignature};
use serde::{Deserialize, Serialize};

/// Rule identifiers for the modeled `methodType` overloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// `methodType(Class ret)` → `() -> ret`
    ReturnOnly,

    /// `methodType(Class ret, Class param)` → `(param) -> ret`
    ReturnAndParam,

    /// `methodType(Class ret, MethodType template)` → template with its
    /// return type replaced; the rule that chains on synthesized objects
    ReturnFromSignature,
}

impl RuleKind {
    /// Number of argument slots the rule consumes
    #[inline]
    pub fn arity(self) -> usize {
        match self {
            RuleKind::ReturnOnly => 1,
            RuleKind::ReturnAndParam | RuleKind::ReturnFromSignature => 2,
        }
    }

    /// Apply the rule to one tuple of extracted values
    pub fn synthesize(self, inputs: &[&ConcreteValue]) -> Option<MethodSignature> {
        if inputs.len() != self.arity() {
            return None;
        }
        match self {
            RuleKind::ReturnOnly => match inputs[0] {
                ConcreteValue::Type(ret) => Some(MethodSignature::new(vec![], ret.clone())),
                _ => None,
            },
            RuleKind::ReturnAndParam => match (inputs[0], inputs[1]) {
                (ConcreteValue::Type(ret), ConcreteValue::Type(param)) => {
                    Some(MethodSignature::new(vec![param.clone()], ret.clone()))
                }
                _ => None,
            },
            RuleKind::ReturnFromSignature => match (inputs[0], inputs[1]) {
                (ConcreteValue::Type(ret), ConcreteValue::Signature(template)) => {
                    Some(template.with_return(ret.clone()))
                }
                _ => None,
            },
        }
    }
}

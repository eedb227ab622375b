//! MethodType Library-Call Modeling
//!
//! Models the `java.lang.invoke.MethodType.methodType(*)` overloads on
//! top of the plugin protocol:
//! - `domain`: the value extractor and the per-overload synthesis rules
//! - `application`: the model itself — call-site registry plus the
//!   incremental propagator that recombines argument deltas

pub mod application;
pub mod domain;

pub use application::{MethodTypeModel, ModelStats, CLASS_CLASS, METHOD_TYPE_CLASS};
pub use domain::RuleKind;
pub use domain::extract::{extract, extract_signature, extract_type};

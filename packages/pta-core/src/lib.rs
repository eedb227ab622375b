//! # pta-core
//!
//! Library-call modeling for a context-sensitive points-to analysis of
//! object-oriented programs.
//!
//! Some standard-library calls produce results whose identity depends on
//! the *concrete values* behind the argument objects — constructing a
//! method-signature descriptor from class literals being the canonical
//! case. Ordinary flow rules cannot express that, so this crate provides:
//!
//! - a plugin protocol (`features::pta::ports`) between a points-to
//!   engine and call-modeling plugins,
//! - a reference worklist engine with context-qualified, append-only
//!   points-to sets and a canonicalizing heap model
//!   (`features::pta`),
//! - the `MethodType` model (`features::method_type`): call-site
//!   registry, total value extractor, pure synthesis rules and the
//!   incremental propagator that recombines argument deltas without
//!   missing combinations or looping.
//!
//! ## Usage
//! ```
//! use pta_core::{
//!     MethodTypeModel, ProgramBuilder, Solver, SolverConfig, SolverOps, Subsignature,
//!     CLASS_CLASS, METHOD_TYPE_CLASS,
//! };
//!
//! let mut b = ProgramBuilder::new();
//! for params in [
//!     vec![CLASS_CLASS],
//!     vec![CLASS_CLASS, CLASS_CLASS],
//!     vec![CLASS_CLASS, METHOD_TYPE_CLASS],
//! ] {
//!     b.declare_method(
//!         METHOD_TYPE_CLASS,
//!         Subsignature::new("methodType", &params, METHOD_TYPE_CLASS),
//!         true,
//!     )
//!     .unwrap();
//! }
//! b.type_literal("c", "void");
//! b.call_static(
//!     METHOD_TYPE_CLASS,
//!     Subsignature::new("methodType", &[CLASS_CLASS], METHOD_TYPE_CLASS),
//!     &["c"],
//!     Some("mt"),
//! )
//! .unwrap();
//! let mt = b.var("mt");
//!
//! let mut solver = Solver::new(b.build(), SolverConfig::default());
//! let model = MethodTypeModel::new(&solver);
//! solver.register_plugin(Box::new(model));
//! solver.solve();
//!
//! let values = solver.points_to_values(&solver.default_context(), mt);
//! assert_eq!(values.len(), 1);
//! assert_eq!(values[0].to_string(), "() -> void");
//! ```

pub mod features;
pub mod shared;

pub use features::method_type::{
    MethodTypeModel, ModelStats, RuleKind, CLASS_CLASS, METHOD_TYPE_CLASS,
};
pub use features::pta::{
    ConcreteValue, Context, CsVar, HeapItem, HeapObject, MethodSignature, ObjectId, Plugin,
    PointsToSet, Program, ProgramBuilder, Solver, SolverConfig, SolverOps, SolverStats,
    Subsignature, TypeDescriptor, VarId,
};
pub use shared::models::{AnalysisError, Result};

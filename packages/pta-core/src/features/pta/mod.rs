//! Points-to Engine
//!
//! Reference engine for context-sensitive points-to analysis:
//! - `domain`: contexts, concrete values, abstract objects, points-to
//!   sets and the statement-level program IR
//! - `infrastructure`: the canonicalizing heap model and the worklist
//!   fixpoint solver
//! - `ports`: the `SolverOps`/`Plugin` seam between engine and modeling
//!   plugins

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    ConcreteValue, Context, CsVar, HeapItem, HeapObject, MethodSignature, ObjectId, PointsToSet,
    Program, ProgramBuilder, Subsignature, TypeDescriptor, VarId,
};
pub use infrastructure::{Solver, SolverConfig, SolverStats};
pub use ports::{Plugin, SolverOps};

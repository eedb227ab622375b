pub mod heap_model;
pub mod solver;

pub use heap_model::HeapModel;
pub use solver::{Solver, SolverConfig, SolverStats};

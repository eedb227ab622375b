pub mod context;
pub mod heap_object;
pub mod ir;
pub mod points_to_set;
pub mod value;

pub use context::{Context, CsVar};
pub use heap_object::{HeapItem, HeapObject, ObjectId};
pub use ir::{CallSite, CallSiteId, MethodId, Program, ProgramBuilder, Subsignature, VarId};
pub use points_to_set::PointsToSet;
pub use value::{ConcreteValue, MethodSignature, TypeDescriptor};

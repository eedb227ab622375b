pub mod model;

pub use model::{MethodTypeModel, ModelStats, CLASS_CLASS, METHOD_TYPE_CLASS};

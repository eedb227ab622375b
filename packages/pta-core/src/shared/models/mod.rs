pub mod error;

pub use error::{AnalysisError, Result};

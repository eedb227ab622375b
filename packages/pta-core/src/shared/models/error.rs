//! Error types for the pta-core crate
//!
//! Only program *construction* can fail: statements and call sites are
//! validated when the IR is assembled. Analysis-time operations (extraction,
//! rule application, canonicalization, set union) are total and never
//! return `Err`; missing inputs are empty contributions, not errors.

use thiserror::Error;

/// Errors reported while assembling a program for analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A method with the same class and subsignature was declared twice
    #[error("method `{class}.{subsig}` declared more than once")]
    DuplicateMethod { class: String, subsig: String },

    /// A call site's argument count does not match the target's shape
    #[error("call to `{class}.{subsig}` passes {given} arguments, expected {expected}")]
    ArityMismatch {
        class: String,
        subsig: String,
        given: usize,
        expected: usize,
    },
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::ArityMismatch {
            class: "A".to_string(),
            subsig: "int f(int)".to_string(),
            given: 2,
            expected: 1,
        };
        assert_eq!(
            err.to_string(),
            "call to `A.int f(int)` passes 2 arguments, expected 1"
        );
    }
}

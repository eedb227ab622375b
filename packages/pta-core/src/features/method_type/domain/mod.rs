pub mod extract;
pub mod rules;

pub use rules::RuleKind;

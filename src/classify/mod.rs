//! Rule-based classification
//!
//! Maps observations to labels through ordered, validated rule tables.

pub mod classifier;
pub mod rule;

pub use classifier::{classify, Match, RuleSet};
pub use rule::{Predicate, Rule};

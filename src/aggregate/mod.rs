//! Aggregation of classified outcomes and numeric samples
//!
//! Every call recomputes a fresh, immutable summary from the whole batch.

pub mod numeric;
pub mod tally;

pub use numeric::{aggregate_numeric, NumericSummary};
pub use tally::{aggregate, percentage, LabelCount, Summary};

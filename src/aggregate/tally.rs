/// Label tallies over a batch of classified outcomes
use crate::config::types::Label;
use serde::{Deserialize, Serialize};

/// Occurrences of one declared label
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelCount<L> {
    pub label: L,
    pub count: usize,
}

/// Immutable snapshot of a label aggregation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary<L> {
    /// One entry per declared label, in declaration order
    pub counts: Vec<LabelCount<L>>,
    pub total: usize,
    pub success_label: L,
    /// Percentage of `success_label`, two decimals; 0.00 for an empty batch
    pub success_rate: f64,
}

impl<L: Label> Summary<L> {
    pub fn count(&self, label: &L) -> usize {
        self.counts
            .iter()
            .find(|c| &c.label == label)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn success_count(&self) -> usize {
        self.count(&self.success_label)
    }
}

/// Tally `samples` per declared label and compute the success rate
///
/// Empty input is not an error: every count is zero and the rate is 0.00.
pub fn aggregate<L: Label>(samples: &[L], success_label: &L) -> Summary<L> {
    let declared = L::declared();
    let mut counts = vec![0usize; declared.len()];

    for sample in samples {
        match declared.iter().position(|d| d == sample) {
            Some(idx) => counts[idx] += 1,
            None => log::warn!("skipping undeclared label: {}", sample),
        }
    }

    let total: usize = counts.iter().sum();
    let success = declared
        .iter()
        .position(|d| d == success_label)
        .map(|idx| counts[idx])
        .unwrap_or(0);

    Summary {
        counts: declared
            .iter()
            .cloned()
            .zip(counts)
            .map(|(label, count)| LabelCount { label, count })
            .collect(),
        total,
        success_label: success_label.clone(),
        success_rate: percentage(success, total),
    }
}

/// `part / whole` as a percentage rounded to two decimals, 0.0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::TestResult::{self, Fail, Pass, Skip};

    #[test]
    fn test_mixed_results() {
        let summary = aggregate(&[Pass, Fail, Pass, Skip, Pass, Fail], &Pass);
        assert_eq!(summary.count(&Pass), 3);
        assert_eq!(summary.count(&Fail), 2);
        assert_eq!(summary.count(&Skip), 1);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.success_rate, 50.0);
        assert_eq!(format!("{:.2}", summary.success_rate), "50.00");
    }

    #[test]
    fn test_empty_input_reports_zeroes() {
        let summary = aggregate::<TestResult>(&[], &Pass);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.counts.len(), 3);
        assert!(summary.counts.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_zero_occurrence_labels_present_in_declared_order() {
        let summary = aggregate(&[Skip, Skip], &Pass);
        let labels: Vec<_> = summary.counts.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec![Pass, Fail, Skip]);
        assert_eq!(summary.count(&Pass), 0);
        assert_eq!(summary.success_rate, 0.0);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let pool = [Pass, Fail, Skip];
        for len in 0..30usize {
            let samples: Vec<_> = (0..len).map(|i| pool[(i * 7 + len) % 3]).collect();
            let summary = aggregate(&samples, &Fail);
            let sum: usize = summary.counts.iter().map(|c| c.count).sum();
            assert_eq!(sum, samples.len());
            assert_eq!(summary.total, samples.len());
        }
    }

    #[test]
    fn test_rate_rounded_to_two_decimals() {
        let summary = aggregate(&[Pass, Fail, Fail], &Pass);
        assert_eq!(summary.success_rate, 33.33);
        let summary = aggregate(&[Pass, Pass, Fail], &Pass);
        assert_eq!(summary.success_rate, 66.67);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let samples = [Pass, Skip, Fail, Pass];
        assert_eq!(aggregate(&samples, &Pass), aggregate(&samples, &Pass));
    }
}

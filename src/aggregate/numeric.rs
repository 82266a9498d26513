/// Numeric sample aggregation with threshold breach counting
use crate::config::types::{QaError, Result};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of a numeric aggregation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub mean: f64,
    pub threshold: f64,
    /// Samples strictly greater than `threshold`
    pub breaches: usize,
}

impl NumericSummary {
    /// Share of samples over the threshold, as a two-decimal percentage
    pub fn breach_rate(&self) -> f64 {
        super::tally::percentage(self.breaches, self.count)
    }
}

/// Single pass over `samples` computing min, max, sum, mean and breaches
///
/// Fails with `QaError::EmptyInput` when `samples` is empty and with
/// `QaError::InvalidInput` when `threshold` or any sample is NaN or infinite.
pub fn aggregate_numeric(samples: &[f64], threshold: f64) -> Result<NumericSummary> {
    let (&first, _) = samples.split_first().ok_or_else(|| {
        QaError::EmptyInput("numeric aggregation requires at least one sample".to_string())
    })?;

    if !threshold.is_finite() {
        return Err(QaError::InvalidInput(format!(
            "threshold must be finite, got {}",
            threshold
        )));
    }
    if let Some((index, sample)) = samples.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        return Err(QaError::InvalidInput(format!(
            "sample {} must be finite, got {}",
            index, sample
        )));
    }

    let mut min = first;
    let mut max = first;
    let mut sum = 0.0;
    let mut breaches = 0;

    for &sample in samples {
        if sample < min {
            min = sample;
        }
        if sample > max {
            max = sample;
        }
        sum += sample;
        if sample > threshold {
            breaches += 1;
        }
    }

    // Rounding in the running sum can push the mean a hair outside [min, max].
    let mean = (sum / samples.len() as f64).max(min).min(max);

    Ok(NumericSummary {
        count: samples.len(),
        min,
        max,
        sum,
        mean,
        threshold,
        breaches,
    })
}

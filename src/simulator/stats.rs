//! Summary statistics over per-game samples.

use crate::error::{Result, SimError};

/// Arithmetic mean; 0 for no samples.
pub fn mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&s| s as f64).sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1); 0 for fewer than two samples.
pub fn std_dev(samples: &[u64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let m = mean(samples);
    let sum_sq: f64 = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - m;
            d * d
        })
        .sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

/// Upper median; 0 for no samples.
pub fn median(samples: &[u64]) -> u64 {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    sorted.get(sorted.len() / 2).copied().unwrap_or(0)
}

/// Indices of games whose baseline is at most `multiple` times the mean
/// baseline.
///
/// Fails with [`SimError::DegenerateFilterResult`] when nothing survives.
pub fn filter_outliers(baselines: &[u64], multiple: f64) -> Result<Vec<usize>> {
    let cutoff = multiple * mean(baselines);
    let kept: Vec<usize> = baselines
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b as f64 <= cutoff)
        .map(|(i, _)| i)
        .collect();

    if kept.is_empty() {
        return Err(SimError::DegenerateFilterResult {
            total: baselines.len(),
            multiple,
        });
    }
    Ok(kept)
}

/// `samples[i]` for every index in `kept`.
pub fn select(samples: &[u64], kept: &[usize]) -> Vec<u64> {
    kept.iter().map(|&i| samples[i]).collect()
}

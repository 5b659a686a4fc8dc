//! Empirical recalibration of p-values

use super::NullDistribution;

/// Fraction of the null distribution at or below `p`
pub fn r_value(p: f64, null: &NullDistribution) -> f64 {
    null.count_at_or_below(p) as f64 / null.len() as f64
}

/// Empirical CDF rank of every p-value within the null distribution
///
/// Each lookup is a binary search over the sorted null values, so the whole
/// pass is `O(R log N)` on top of the `O(N log N)` sort.
pub fn r_values(pvalues: &[f64], null: &NullDistribution) -> Vec<f64> {
    pvalues.iter().map(|&p| r_value(p, null)).collect()
}

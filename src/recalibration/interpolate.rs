//! Duplicate r-value resolution for pooled null distributions
//!
//! With a null distribution of `N` values, r-values are multiples of `1/N`,
//! so many peaks share the same r-value whenever `N` is small next to the
//! number of peaks. Within each group of equal r-values the peak with the
//! smallest p-value is kept as a knot; the others are re-estimated by linear
//! interpolation of r-value against p-value across the knots.

use log::debug;

use crate::stats::linear_interp;

/// Replace duplicated r-values by interpolation against the raw p-values
///
/// Returns one value per input row, in input order. With fewer than two
/// distinct r-values there is nothing to interpolate between and the input
/// is returned unchanged.
pub fn resolve_duplicates(pvalues: &[f64], r_values: &[f64]) -> Vec<f64> {
    assert_eq!(pvalues.len(), r_values.len());
    let n = r_values.len();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        r_values[a]
            .total_cmp(&r_values[b])
            .then(pvalues[a].total_cmp(&pvalues[b]))
            .then(a.cmp(&b))
    });

    let mut knot_p: Vec<f64> = Vec::new();
    let mut knot_r: Vec<f64> = Vec::new();
    let mut duplicates: Vec<usize> = Vec::new();

    for (pos, &i) in order.iter().enumerate() {
        if pos > 0 && r_values[order[pos - 1]] == r_values[i] {
            duplicates.push(i);
        } else {
            knot_p.push(pvalues[i]);
            knot_r.push(r_values[i]);
        }
    }

    debug!(
        "Duplicate resolution: {} knots, {} duplicated r-values",
        knot_p.len(),
        duplicates.len()
    );

    let mut resolved = r_values.to_vec();
    if knot_p.len() < 2 || duplicates.is_empty() {
        return resolved;
    }

    // The r-value is monotone in p, so distinct r-values imply distinct
    // p-values and the knots are already strictly increasing in p.
    for i in duplicates {
        let r = linear_interp(&knot_p, &knot_r, pvalues[i]);
        // An infinite knot p-value gives no usable slope; keep the group's value
        if r.is_finite() {
            resolved[i] = r.clamp(0.0, 1.0);
        }
    }

    resolved
}

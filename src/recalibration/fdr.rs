//! Benjamini-Hochberg adjustment of r-values
//!
//! Tied r-values form one rank group: the group's rank is the sorted
//! position of its first member, its adjusted value is computed once from
//! that rank and copied to every member.

/// Apply Benjamini-Hochberg FDR correction to r-values
///
/// Returns adjusted values in the input order. For every row the adjusted
/// value is at least its r-value and at most 1, and adjusted values never
/// decrease as the r-value increases.
pub fn benjamini_hochberg(r_values: &[f64]) -> Vec<f64> {
    let m = r_values.len();
    if m == 0 {
        return vec![];
    }

    // Create indices for sorting
    let mut indices: Vec<usize> = (0..m).collect();
    indices.sort_by(|&a, &b| r_values[a].total_cmp(&r_values[b]).then(a.cmp(&b)));

    // Step-up value per sorted position, shared across ties
    let mut adjusted_sorted = vec![0.0; m];
    for (pos, &i) in indices.iter().enumerate() {
        let r = r_values[i];
        if pos == 0 || r != r_values[indices[pos - 1]] {
            let rank = pos + 1;
            adjusted_sorted[pos] = (r * m as f64 / rank as f64).min(1.0);
        } else {
            adjusted_sorted[pos] = adjusted_sorted[pos - 1];
        }
    }

    // Monotonicity repair, from the highest rank down
    for pos in (1..m).rev() {
        if adjusted_sorted[pos] < adjusted_sorted[pos - 1] {
            adjusted_sorted[pos - 1] = adjusted_sorted[pos];
        }
    }

    let mut adjusted = vec![0.0; m];
    for (pos, &i) in indices.iter().enumerate() {
        adjusted[i] = adjusted_sorted[pos];
    }
    adjusted
}

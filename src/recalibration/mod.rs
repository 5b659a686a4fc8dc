//! Empirical recalibration of peak-caller p-values
//!
//! The pipeline runs r-values (empirical CDF against the null distribution),
//! then duplicate resolution when several replicates are pooled, then
//! Benjamini-Hochberg adjustment, then local FDR.

mod ecdf;
mod fdr;
mod interpolate;
mod lfdr;
mod null_distribution;

pub use ecdf::{r_value, r_values};
pub use fdr::benjamini_hochberg;
pub use interpolate::resolve_duplicates;
pub use lfdr::{local_fdr, Histogram};
pub use null_distribution::NullDistribution;

use log::info;

use crate::error::Result;

/// The three values appended to every row
#[derive(Debug, Clone, PartialEq)]
pub struct RecapColumns {
    /// Empirical recalibrated p-value (`RECAP`)
    pub r_values: Vec<f64>,
    /// Benjamini-Hochberg adjusted r-value (`BH(RECAP)`)
    pub adjusted: Vec<f64>,
    /// Local false discovery rate (`LFDR`)
    pub lfdr: Vec<f64>,
}

impl RecapColumns {
    pub fn len(&self) -> usize {
        self.r_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r_values.is_empty()
    }
}

/// Recalibrate the original p-values against a null distribution
///
/// Output vectors are aligned with `pvalues`. An empty input yields empty
/// columns without building a histogram.
pub fn recalibrate(pvalues: &[f64], null: &NullDistribution) -> Result<RecapColumns> {
    if pvalues.is_empty() {
        return Ok(RecapColumns {
            r_values: vec![],
            adjusted: vec![],
            lfdr: vec![],
        });
    }

    info!(
        "Computing r-values for {} rows against {} null values",
        pvalues.len(),
        null.len()
    );
    let mut r = r_values(pvalues, null);

    if null.is_pooled() {
        info!(
            "Resolving duplicate r-values across {} pooled replicates",
            null.replicates()
        );
        r = resolve_duplicates(pvalues, &r);
    }

    info!("Applying Benjamini-Hochberg adjustment...");
    let adjusted = benjamini_hochberg(&r);

    info!("Estimating local FDR...");
    let lfdr = local_fdr(&r)?;

    Ok(RecapColumns {
        r_values: r,
        adjusted,
        lfdr,
    })
}

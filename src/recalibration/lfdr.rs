//! Local false discovery rate from a log-scale histogram of r-values
//!
//! Bin edges sit every half decade between the orders of magnitude of the
//! largest and smallest positive r-value. Under the null the r-values are
//! uniform on `[0, 1]`, so a bin's expected share of values is its width;
//! the LFDR of a bin is that width divided by the observed share.

use log::debug;

use crate::error::{RecapError, Result};
use crate::stats::BELOW_ONE;

/// Half-decade log10 bins over the positive r-values of one run
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Strictly decreasing bin edges; bin `i` spans `[edges[i + 1], edges[i])`
    edges: Vec<f64>,
    /// Observed fraction of values per bin
    density: Vec<f64>,
    /// LFDR per bin, in `[0, 1]`
    lfdr: Vec<f64>,
}

fn binning_value(r: f64) -> f64 {
    if r >= 1.0 {
        BELOW_ONE
    } else {
        r
    }
}

impl Histogram {
    /// Build the histogram from one r-value per row
    ///
    /// Zero r-values are left out. Fails when no positive r-value remains,
    /// since the log-scale edges are then undefined.
    pub fn build(r_values: &[f64]) -> Result<Self> {
        let mut values: Vec<f64> = r_values
            .iter()
            .filter(|&&r| r > 0.0)
            .map(|&r| binning_value(r))
            .collect();
        if values.is_empty() {
            return Err(RecapError::UndefinedHistogram {
                reason: format!("none of the {} r-values is positive", r_values.len()),
            });
        }
        values.sort_by(f64::total_cmp);

        let min_r = values[0];
        let max_r = values[values.len() - 1];

        let d_min = (-max_r.log10()).floor();
        let mut d_max = (-min_r.log10()).ceil();
        if d_max <= d_min {
            // All values sit on one power of ten; widen to a full decade
            d_max = d_min + 1.0;
        }

        let n_bins = ((d_max - d_min) * 2.0).round() as usize;
        let mut edges: Vec<f64> = (0..=n_bins)
            .map(|k| 10f64.powf(-(d_min + 0.5 * k as f64)))
            .collect();

        // Cover the observed extremes despite rounding in powf/log10
        edges[0] = edges[0].max(max_r);
        edges[n_bins] = edges[n_bins].min(min_r);

        let n_hist = values.len() as f64;
        let mut density = Vec::with_capacity(n_bins);
        let mut lfdr = Vec::with_capacity(n_bins);
        for i in 0..n_bins {
            let (hi, lo) = (edges[i], edges[i + 1]);
            let upper = if i == 0 {
                values.partition_point(|&x| x <= hi)
            } else {
                values.partition_point(|&x| x < hi)
            };
            let lower = values.partition_point(|&x| x < lo);
            let hist_count = (upper - lower) as f64 / n_hist;
            let theoretical = hi - lo;

            density.push(hist_count);
            lfdr.push(if hist_count > 0.0 {
                (theoretical / hist_count).min(1.0)
            } else {
                0.0
            });
        }

        debug!("LFDR histogram edges: {:?}", edges);
        debug!("LFDR per bin: {:?}", lfdr);

        Ok(Self { edges, density, lfdr })
    }

    pub fn n_bins(&self) -> usize {
        self.lfdr.len()
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Index of the bin holding a positive r-value
    ///
    /// Values below the lowest edge fall in the last bin and values above
    /// the highest edge in the first.
    pub fn bin_of(&self, r: f64) -> usize {
        let r = binning_value(r);
        (0..self.n_bins())
            .find(|&i| r >= self.edges[i + 1])
            .unwrap_or(self.n_bins() - 1)
    }

    /// LFDR of a row with r-value `r`
    pub fn lfdr(&self, r: f64) -> f64 {
        if r <= 0.0 {
            1.0
        } else {
            self.lfdr[self.bin_of(r)]
        }
    }
}

/// Local FDR of every row
pub fn local_fdr(r_values: &[f64]) -> Result<Vec<f64>> {
    let histogram = Histogram::build(r_values)?;
    debug!(
        "LFDR histogram built with {} bins, densities: {:?}",
        histogram.n_bins(),
        histogram.density()
    );
    Ok(r_values.iter().map(|&r| histogram.lfdr(r)).collect())
}

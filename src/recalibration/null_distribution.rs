//! Pooled background p-values

use log::debug;

use crate::error::{RecapError, Result};
use crate::io::ResultsTable;

/// Sorted reference distribution of background p-values
///
/// Built once per run from one or more re-mixed background tables and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct NullDistribution {
    sorted: Vec<f64>,
    replicates: usize,
}

impl NullDistribution {
    /// Pool the p-values of every background table
    pub fn from_tables(tables: &[ResultsTable]) -> Result<Self> {
        let pvalues: Vec<f64> = tables.iter().flat_map(|t| t.rows.iter().map(|r| r.pvalue)).collect();
        Self::from_pvalues(pvalues, tables.len())
    }

    /// Build from p-values already pooled across `replicates` backgrounds
    pub fn from_pvalues(mut pvalues: Vec<f64>, replicates: usize) -> Result<Self> {
        if pvalues.is_empty() {
            return Err(RecapError::EmptyNullDistribution {
                reason: format!("no p-values found in {} background table(s)", replicates),
            });
        }
        if let Some(bad) = pvalues.iter().find(|p| !p.is_finite()) {
            return Err(RecapError::InvalidArgument {
                reason: format!("background p-values must be finite, found {}", bad),
            });
        }

        pvalues.sort_by(f64::total_cmp);
        debug!(
            "Null distribution: {} values, range [{}, {}]",
            pvalues.len(),
            pvalues[0],
            pvalues[pvalues.len() - 1]
        );

        Ok(Self {
            sorted: pvalues,
            replicates,
        })
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Number of background tables pooled into this distribution
    pub fn replicates(&self) -> usize {
        self.replicates
    }

    pub fn is_pooled(&self) -> bool {
        self.replicates > 1
    }

    /// Number of null values at or below `p` (ties counted inclusively)
    pub fn count_at_or_below(&self, p: f64) -> usize {
        self.sorted.partition_point(|&x| x <= p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Row;

    fn table(pvalues: &[f64]) -> ResultsTable {
        ResultsTable {
            header: Vec::new(),
            rows: pvalues
                .iter()
                .map(|&p| Row { line: p.to_string(), pvalue: p })
                .collect(),
            n_filtered: 0,
        }
    }

    #[test]
    fn test_pooling_sorts_values() {
        let null = NullDistribution::from_tables(&[table(&[0.5, 0.1]), table(&[0.3])]).unwrap();
        assert_eq!(null.len(), 3);
        assert_eq!(null.count_at_or_below(0.1), 1);
        assert_eq!(null.count_at_or_below(0.3), 2);
        assert_eq!(null.count_at_or_below(0.49), 2);
        assert_eq!(null.replicates(), 2);
        assert!(null.is_pooled());
    }

    #[test]
    fn test_count_ties_inclusive() {
        let null = NullDistribution::from_pvalues(vec![0.2, 0.1, 0.2, 0.2, 0.4], 1).unwrap();
        assert_eq!(null.count_at_or_below(0.05), 0);
        assert_eq!(null.count_at_or_below(0.1), 1);
        assert_eq!(null.count_at_or_below(0.2), 4);
        assert_eq!(null.count_at_or_below(1.0), 5);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(NullDistribution::from_pvalues(vec![0.1, f64::NEG_INFINITY], 2).is_err());
        assert!(NullDistribution::from_pvalues(vec![f64::NAN], 1).is_err());
    }

    #[test]
    fn test_empty_rejected() {
        let err = NullDistribution::from_tables(&[table(&[])]).unwrap_err();
        assert!(matches!(err, RecapError::EmptyNullDistribution { .. }));
    }
}

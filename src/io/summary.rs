//! Run summary

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use super::writer::{parent_dir, persist_staged};
use crate::config::{require_dir, RecapConfig};
use crate::error::Result;
use crate::recalibration::RecapColumns;

/// Summary of one recalibration run
#[derive(Debug, Clone, Serialize)]
pub struct RecapSummary {
    pub rows_written: usize,
    pub rows_filtered: usize,
    pub null_size: usize,
    pub replicates: usize,
    pub alpha: f64,
    /// Rows with BH(RECAP) below alpha
    pub significant_bh: usize,
    /// Rows with LFDR below alpha
    pub significant_lfdr: usize,
}

impl RecapSummary {
    pub fn new(
        columns: &RecapColumns,
        rows_filtered: usize,
        null_size: usize,
        replicates: usize,
        alpha: f64,
    ) -> Self {
        Self {
            rows_written: columns.len(),
            rows_filtered,
            null_size,
            replicates,
            alpha,
            significant_bh: columns.adjusted.iter().filter(|&&q| q < alpha).count(),
            significant_lfdr: columns.lfdr.iter().filter(|&&l| l < alpha).count(),
        }
    }
}

impl std::fmt::Display for RecapSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RECAP Summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "Rows written: {}", self.rows_written)?;
        writeln!(f, "Rows filtered by caller: {}", self.rows_filtered)?;
        writeln!(
            f,
            "Null distribution: {} values from {} replicate(s)",
            self.null_size, self.replicates
        )?;
        writeln!(f, "BH(RECAP) < {}: {}", self.alpha, self.significant_bh)?;
        writeln!(f, "LFDR < {}: {}", self.alpha, self.significant_lfdr)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SummaryReport<'a> {
    config: &'a RecapConfig,
    summary: &'a RecapSummary,
}

/// Write the run configuration and summary as pretty-printed JSON
pub fn write_summary_json<P: AsRef<Path>>(
    path: P,
    config: &RecapConfig,
    summary: &RecapSummary,
) -> Result<()> {
    let path = path.as_ref();
    let staged = stage_summary_json(path, config, summary)?;
    persist_staged(staged, path)
}

/// Serialize the JSON report to a temporary file beside `path`
pub(crate) fn stage_summary_json(
    path: &Path,
    config: &RecapConfig,
    summary: &RecapSummary,
) -> Result<NamedTempFile> {
    let dir = parent_dir(path);
    require_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer_pretty(&mut out, &SummaryReport { config, summary })?;
        writeln!(out)?;
        out.flush()?;
    }
    Ok(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caller::CallerType;
    use crate::config::Delimiter;
    use crate::error::RecapError;

    #[test]
    fn test_summary_counts() {
        let columns = RecapColumns {
            r_values: vec![0.0, 0.01, 0.5],
            adjusted: vec![0.0, 0.03, 0.5],
            lfdr: vec![1.0, 0.02, 0.9],
        };
        let summary = RecapSummary::new(&columns, 4, 100, 2, 0.05);
        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.significant_bh, 2);
        assert_eq!(summary.significant_lfdr, 1);

        let text = summary.to_string();
        assert!(text.contains("Rows filtered by caller: 4"));
        assert!(text.contains("100 values from 2 replicate(s)"));
    }

    #[test]
    fn test_summary_json_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let columns = RecapColumns {
            r_values: vec![0.5],
            adjusted: vec![0.5],
            lfdr: vec![1.0],
        };
        let summary = RecapSummary::new(&columns, 0, 10, 1, 0.05);
        let config = RecapConfig {
            origin_dir: dir.path().to_path_buf(),
            origin_file: "peaks.xls".to_string(),
            background_dir: dir.path().to_path_buf(),
            background_file: "remix.xls".to_string(),
            output_dir: dir.path().to_path_buf(),
            output_file: "peaks.recap.xls".to_string(),
            header_lines: 1,
            pvalue_column: 2,
            delimiter: Delimiter::Tab,
            caller: CallerType::Passthrough,
            bootstrap: None,
            alpha: 0.05,
            summary_json: None,
        };
        let path = dir.path().join("absent").join("summary.json");

        let err = write_summary_json(&path, &config, &summary).unwrap_err();
        assert!(matches!(err, RecapError::MissingDirectory { .. }));
        assert!(!path.exists());
    }
}

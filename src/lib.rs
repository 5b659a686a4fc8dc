//! RECAP: re-mixed empirical recalibration of ChIP-seq peak-caller p-values
//!
//! Peak callers use the same reads to propose candidate peaks and to test
//! them, which makes their p-values optimistic. RECAP rescales each peak's
//! p-value against the p-values the same caller reports on re-mixed
//! treatment/control data, then adds Benjamini-Hochberg and local FDR
//! estimates on top of the recalibrated values.
//!
//! # Example
//!
//! ```ignore
//! use recap::prelude::*;
//!
//! let origin = read_table("peaks.xls", 1, 7, Delimiter::Tab, CallerType::LogTransform)?;
//! let background = read_table("remix.xls", 1, 7, Delimiter::Tab, CallerType::LogTransform)?;
//!
//! let null = NullDistribution::from_tables(&[background])?;
//! let columns = recalibrate(&origin.pvalues(), &null)?;
//!
//! write_recap_table("peaks.recap.xls", &origin, &columns, Delimiter::Tab)?;
//! ```

pub mod caller;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod recalibration;
pub mod stats;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::caller::CallerType;
    pub use crate::config::{Delimiter, RecapConfig};
    pub use crate::error::{RecapError, Result};
    pub use crate::io::{read_table, write_recap_table, write_summary_json, RecapSummary, ResultsTable};
    pub use crate::recalibration::{
        benjamini_hochberg, local_fdr, r_values, recalibrate, resolve_duplicates, NullDistribution,
        RecapColumns,
    };
}

use log::info;

use prelude::*;

/// Run the complete RECAP pipeline described by `config`
///
/// Every input is read and every value computed before any output file is
/// created. The results table and the optional JSON summary are both staged
/// in full before either is moved into place; on error nothing is written.
pub fn run_recap(config: &RecapConfig) -> Result<RecapSummary> {
    config.validate()?;
    crate::config::require_dir(&config.origin_dir)?;
    crate::config::require_dir(&config.output_dir)?;
    if let Some(json_path) = &config.summary_json {
        crate::config::require_dir(crate::io::parent_dir(json_path))?;
    }

    let origin_path = config.origin_path();
    info!("Loading original table from: {}", origin_path.display());
    let origin = read_table(
        &origin_path,
        config.header_lines,
        config.pvalue_column,
        config.delimiter,
        config.caller,
    )?;
    info!("  {} rows ({} filtered by caller)", origin.n_rows(), origin.n_filtered);

    let mut backgrounds = Vec::new();
    for path in config.background_paths()? {
        info!("Loading background table from: {}", path.display());
        let table = read_table(
            &path,
            config.header_lines,
            config.pvalue_column,
            config.delimiter,
            config.caller,
        )?;
        info!("  {} rows", table.n_rows());
        backgrounds.push(table);
    }

    let null = NullDistribution::from_tables(&backgrounds)?;
    let columns = recalibrate(&origin.pvalues(), &null)?;

    let summary = RecapSummary::new(
        &columns,
        origin.n_filtered,
        null.len(),
        null.replicates(),
        config.alpha,
    );

    let output_path = config.output_path();
    let staged_table = crate::io::stage_recap_table(&output_path, &origin, &columns, config.delimiter)?;
    let staged_json = config
        .summary_json
        .as_ref()
        .map(|json_path| {
            crate::io::stage_summary_json(json_path, config, &summary).map(|tmp| (tmp, json_path))
        })
        .transpose()?;

    info!("Writing results to: {}", output_path.display());
    crate::io::persist_staged(staged_table, &output_path)?;
    if let Some((tmp, json_path)) = staged_json {
        info!("Writing summary to: {}", json_path.display());
        crate::io::persist_staged(tmp, json_path)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_peaks(path: &Path, scores: &[f64]) {
        let mut contents = String::from("# macs-like output\nchr\tstart\tend\t-log10(pvalue)\n");
        for (i, s) in scores.iter().enumerate() {
            contents.push_str(&format!("chr1\t{}\t{}\t{}\n", i * 100, i * 100 + 50, s));
        }
        fs::write(path, contents).unwrap();
    }

    fn config(dir: &Path, bootstrap: Option<usize>, background_file: &str) -> RecapConfig {
        RecapConfig {
            origin_dir: dir.join("origin"),
            origin_file: "peaks.xls".to_string(),
            background_dir: dir.join("remix"),
            background_file: background_file.to_string(),
            output_dir: dir.join("out"),
            output_file: "peaks.recap.xls".to_string(),
            header_lines: 2,
            pvalue_column: 4,
            delimiter: Delimiter::Tab,
            caller: CallerType::LogTransform,
            bootstrap,
            alpha: 0.05,
            summary_json: None,
        }
    }

    fn setup(dir: &Path) {
        for sub in ["origin", "remix", "out"] {
            fs::create_dir(dir.join(sub)).unwrap();
        }
        write_peaks(
            &dir.join("origin").join("peaks.xls"),
            &[12.0, 8.5, 6.0, 4.2, 3.1, 2.5, 2.0, 1.4],
        );
        write_peaks(
            &dir.join("remix").join("remix_1.xls"),
            &[5.0, 3.5, 3.0, 2.2, 2.0, 1.8, 1.5, 1.3, 1.2, 1.1],
        );
        write_peaks(
            &dir.join("remix").join("remix_2.xls"),
            &[4.0, 3.2, 2.6, 2.1, 1.9, 1.6, 1.45, 1.35, 1.25, 1.05],
        );
    }

    #[test]
    fn test_full_pipeline() {
        let dir = tempdir().unwrap();
        setup(dir.path());
        let cfg = config(dir.path(), None, "remix_1.xls");

        let summary = run_recap(&cfg).unwrap();
        assert_eq!(summary.rows_written, 8);
        assert_eq!(summary.null_size, 10);
        assert_eq!(summary.replicates, 1);

        let output = fs::read_to_string(cfg.output_path()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "# macs-like output");
        assert_eq!(lines[1], "chr\tstart\tend\t-log10(pvalue)\tRECAP\tBH(RECAP)\tLFDR");

        for (i, line) in lines[2..].iter().enumerate() {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 7);
            assert_eq!(fields[1], (i * 100).to_string());

            let r: f64 = fields[4].parse().unwrap();
            let q: f64 = fields[5].parse().unwrap();
            let l: f64 = fields[6].parse().unwrap();
            assert!((0.0..=1.0).contains(&r));
            assert!(q >= r);
            assert!((0.0..=1.0).contains(&l));
        }

        // Stronger peaks than any background peak have r = 0 and LFDR = 1
        assert!(lines[2].ends_with("\t0\t0\t1"));

        // Re-running gives byte-identical output
        run_recap(&cfg).unwrap();
        assert_eq!(fs::read_to_string(cfg.output_path()).unwrap(), output);
    }

    #[test]
    fn test_pooled_replicates_pipeline() {
        let dir = tempdir().unwrap();
        setup(dir.path());
        let mut cfg = config(dir.path(), Some(2), r"^remix_\d+\.xls$");
        cfg.summary_json = Some(dir.path().join("out").join("summary.json"));

        let summary = run_recap(&cfg).unwrap();
        assert_eq!(summary.null_size, 20);
        assert_eq!(summary.replicates, 2);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out").join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(json["summary"]["rows_written"], 8);
        assert_eq!(json["config"]["caller"], "logtransform");
    }

    #[test]
    fn test_failure_leaves_no_output() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let mut cfg = config(dir.path(), None, "remix_1.xls");
        cfg.pvalue_column = 9;
        assert!(matches!(run_recap(&cfg), Err(RecapError::ColumnOutOfRange { .. })));

        let cfg = config(dir.path(), Some(3), r"^remix_\d+\.xls$");
        assert!(matches!(
            run_recap(&cfg),
            Err(RecapError::InsufficientReplicates { requested: 3, found: 2, .. })
        ));

        let cfg = config(dir.path(), None, "missing.xls");
        assert!(matches!(run_recap(&cfg), Err(RecapError::MissingFile { .. })));

        assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_summary_leaves_no_output() {
        let dir = tempdir().unwrap();
        setup(dir.path());

        let mut cfg = config(dir.path(), None, "remix_1.xls");
        cfg.summary_json = Some(dir.path().join("absent").join("summary.json"));

        let result = run_recap(&cfg);
        assert!(result.is_err());
        assert!(matches!(result, Err(RecapError::MissingDirectory { .. })));
        assert!(!cfg.output_path().exists());
        assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
    }
}

//! Reading peak-caller results tables

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::caller::CallerType;
use crate::config::{require_file, Delimiter};
use crate::error::{RecapError, Result};

/// One data line of a results table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The line as read, without its line terminator
    pub line: String,
    /// Linear-scale p-value taken from the configured column
    pub pvalue: f64,
}

/// A results table: verbatim header lines plus the retained data rows
#[derive(Debug, Clone, Default)]
pub struct ResultsTable {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    /// Data lines dropped by the caller's inclusion rule
    pub n_filtered: usize,
}

impl ResultsTable {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn pvalues(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.pvalue).collect()
    }
}

/// Read a results table
///
/// The first `header_lines` lines are kept as the header. Every later
/// non-blank line is filtered by the caller's inclusion rule, split on
/// `delimiter`, and its field at the 1-based `column` is parsed and mapped
/// to a linear-scale p-value.
pub fn read_table<P: AsRef<Path>>(
    path: P,
    header_lines: usize,
    column: usize,
    delimiter: Delimiter,
    caller: CallerType,
) -> Result<ResultsTable> {
    let path = path.as_ref();
    require_file(path)?;

    if column == 0 {
        return Err(RecapError::InvalidArgument {
            reason: "p-value column index is 1-based and must be at least 1".to_string(),
        });
    }

    let reader = BufReader::new(File::open(path)?);
    let sep = delimiter.as_char();
    let mut table = ResultsTable::default();

    for (idx, line) in reader.lines().enumerate() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }

        if idx < header_lines {
            table.header.push(line);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if !caller.retains(&line) {
            table.n_filtered += 1;
            continue;
        }

        let line_no = idx + 1;
        let n_fields = line.split(sep).count();
        let field = line.split(sep).nth(column - 1).ok_or_else(|| RecapError::ColumnOutOfRange {
            path: path.to_path_buf(),
            line: line_no,
            column,
            width: n_fields,
        })?;

        // -log10(p) = inf is a legitimate p = 0; anything non-finite after
        // the transform is not
        let pvalue = field
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .map(|raw| caller.pvalue(raw))
            .filter(|p| p.is_finite())
            .ok_or_else(|| RecapError::InvalidPValue {
                path: path.to_path_buf(),
                line: line_no,
                value: field.to_string(),
            })?;

        table.rows.push(Row { line, pvalue });
    }

    if table.header.len() < header_lines {
        warn!(
            "{} has only {} lines, fewer than the {} header lines requested",
            path.display(),
            table.header.len(),
            header_lines
        );
    }
    if table.rows.is_empty() && table.n_filtered > 0 {
        warn!(
            "All {} data rows of {} were filtered out by the {} caller rule",
            table.n_filtered,
            path.display(),
            caller
        );
    }
    debug!(
        "{}: {} rows retained, {} filtered",
        path.display(),
        table.rows.len(),
        table.n_filtered
    );

    Ok(table)
}

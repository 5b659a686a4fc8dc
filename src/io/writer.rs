//! Writing recalibrated results tables

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::table::ResultsTable;
use crate::config::{require_dir, Delimiter};
use crate::error::{RecapError, Result};
use crate::recalibration::RecapColumns;

/// Names of the appended columns, in output order
pub const RECAP_COLUMNS: [&str; 3] = ["RECAP", "BH(RECAP)", "LFDR"];

/// Write `table` with its three computed columns appended
///
/// The header is reproduced verbatim except for its last line, which gains
/// the new column names. The file is assembled in a temporary file next to
/// `path` and only moved into place once complete, so a failed run leaves
/// no partial output behind.
pub fn write_recap_table<P: AsRef<Path>>(
    path: P,
    table: &ResultsTable,
    columns: &RecapColumns,
    delimiter: Delimiter,
) -> Result<()> {
    let path = path.as_ref();
    let staged = stage_recap_table(path, table, columns, delimiter)?;
    persist_staged(staged, path)
}

/// Directory a file at `path` will be created in
pub(crate) fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Write the complete table to a temporary file beside `path`
pub(crate) fn stage_recap_table(
    path: &Path,
    table: &ResultsTable,
    columns: &RecapColumns,
    delimiter: Delimiter,
) -> Result<NamedTempFile> {
    let dir = parent_dir(path);
    require_dir(dir)?;

    if columns.len() != table.n_rows() {
        return Err(RecapError::InvalidArgument {
            reason: format!(
                "{} computed values for {} rows",
                columns.len(),
                table.n_rows()
            ),
        });
    }

    let sep = delimiter.as_char();
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());

        if let Some((last, leading)) = table.header.split_last() {
            for line in leading {
                writeln!(out, "{}", line)?;
            }
            write!(out, "{}", last)?;
            for name in RECAP_COLUMNS {
                write!(out, "{}{}", sep, name)?;
            }
            writeln!(out)?;
        }

        for (i, row) in table.rows.iter().enumerate() {
            writeln!(
                out,
                "{}{sep}{}{sep}{}{sep}{}",
                row.line,
                columns.r_values[i],
                columns.adjusted[i],
                columns.lfdr[i],
                sep = sep
            )?;
        }
        out.flush()?;
    }

    Ok(tmp)
}

/// Move a staged temporary file to its final path
pub(crate) fn persist_staged(staged: NamedTempFile, path: &Path) -> Result<()> {
    staged.persist(path).map_err(|e| RecapError::IoError(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Row;
    use tempfile::tempdir;

    fn table() -> ResultsTable {
        ResultsTable {
            header: vec!["# caller v1".to_string(), "name,p".to_string()],
            rows: vec![
                Row { line: "a,0.01".to_string(), pvalue: 0.01 },
                Row { line: "b,0.5".to_string(), pvalue: 0.5 },
            ],
            n_filtered: 0,
        }
    }

    fn columns() -> RecapColumns {
        RecapColumns {
            r_values: vec![0.0, 0.5],
            adjusted: vec![0.0, 0.5],
            lfdr: vec![1.0, 0.25],
        }
    }

    #[test]
    fn test_write_recap_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_recap_table(&path, &table(), &columns(), Delimiter::Comma).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# caller v1\nname,p,RECAP,BH(RECAP),LFDR\na,0.01,0,0,1\nb,0.5,0.5,0.5,0.25\n"
        );
        // Only the output file remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_without_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tsv");
        let mut t = table();
        t.header.clear();
        write_recap_table(&path, &t, &columns(), Delimiter::Tab).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a,0.01\t0\t0\t1\nb,0.5\t0.5\t0.5\t0.25\n");
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("out.csv");
        let err = write_recap_table(&path, &table(), &columns(), Delimiter::Comma).unwrap_err();
        assert!(matches!(err, RecapError::MissingDirectory { .. }));
        assert!(!path.exists());
    }
}

//! Command-line interface for recap

use std::path::PathBuf;

use clap::Parser;

use crate::config::RecapConfig;
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(version)]
#[command(about = "Recalibrate ChIP-seq peak-caller p-values against re-mixed backgrounds")]
#[command(
    long_about = "Recalibrate ChIP-seq peak-caller p-values against re-mixed backgrounds\n\n\
        Each peak's p-value is replaced by its empirical rank among the p-values the\n\
        same caller reports on re-mixed treatment/control data (RECAP column), then\n\
        Benjamini-Hochberg adjusted (BH(RECAP)) and given a local FDR (LFDR).",
    after_long_help = "\
Examples:
  # MACS output, one re-mixed background
  recap --origin-dir peaks --origin-file sample_peaks.xls \\
    --background-dir remix --background-file sample_remix_peaks.xls \\
    --output-dir recap --output-file sample_peaks.recap.xls \\
    --header 29 --pvalue-column 7 --delimiter tab --caller macs

  # diffReps output pooled over 10 re-mixed replicates
  recap --origin-dir diff --origin-file sample.diff \\
    --background-dir remix --background-file '^sample\\.remix_\\d+\\.diff$' --bootstrap 10 \\
    --output-dir recap --output-file sample.recap.diff \\
    --header 33 --pvalue-column 14 --delimiter tab --caller diffreps"
)]
pub struct Cli {
    /// Directory of the original peak-caller table
    #[arg(long, value_name = "DIR")]
    pub origin_dir: PathBuf,

    /// File name of the original peak-caller table
    #[arg(long, value_name = "FILE")]
    pub origin_file: String,

    /// Directory of the re-mixed background table(s)
    #[arg(long, value_name = "DIR")]
    pub background_dir: PathBuf,

    /// Background file name, or a regex over file names with --bootstrap
    #[arg(long, value_name = "FILE",
        long_help = "File name of the re-mixed background table.\n\
            With --bootstrap, a regular expression matched against the file names in\n\
            --background-dir; matches are taken in name order.")]
    pub background_file: String,

    /// Directory for the recalibrated table
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// File name of the recalibrated table
    #[arg(long, value_name = "FILE")]
    pub output_file: String,

    /// Number of header lines to copy verbatim
    #[arg(long, value_name = "N")]
    pub header: usize,

    /// 1-based index of the p-value column
    #[arg(long, value_name = "N")]
    pub pvalue_column: usize,

    /// Field delimiter: comma or tab
    #[arg(long)]
    pub delimiter: String,

    /// Peak caller: macs, diffreps, or other
    #[arg(long,
        long_help = "Peak caller that produced the tables.\n\
            macs:     p-value column holds -log10(p)\n\
            diffreps: only rows marked 'Up' are recalibrated\n\
            other:    p-value column holds plain p-values")]
    pub caller: String,

    /// Number of re-mixed background replicates to pool
    #[arg(long, value_name = "N")]
    pub bootstrap: Option<usize>,

    /// Threshold reported in the run summary [default: 0.05]
    #[arg(long, default_value = "0.05")]
    pub alpha: f64,

    /// Also write the run configuration and summary as JSON
    #[arg(long, value_name = "FILE")]
    pub summary_json: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Turn parsed flags into a run configuration
    pub fn into_config(self) -> Result<RecapConfig> {
        let config = RecapConfig {
            origin_dir: self.origin_dir,
            origin_file: self.origin_file,
            background_dir: self.background_dir,
            background_file: self.background_file,
            output_dir: self.output_dir,
            output_file: self.output_file,
            header_lines: self.header,
            pvalue_column: self.pvalue_column,
            delimiter: self.delimiter.parse()?,
            caller: self.caller.parse()?,
            bootstrap: self.bootstrap,
            alpha: self.alpha,
            summary_json: self.summary_json,
        };
        config.validate()?;
        Ok(config)
    }
}

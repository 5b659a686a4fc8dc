//! Run configuration and input discovery

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use regex::Regex;
use serde::Serialize;

use crate::caller::CallerType;
use crate::error::{RecapError, Result};

/// Field separator of the results tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

impl FromStr for Delimiter {
    type Err = RecapError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "comma" | "," => Ok(Delimiter::Comma),
            "tab" | "\t" | "\\t" => Ok(Delimiter::Tab),
            _ => Err(RecapError::InvalidArgument {
                reason: format!("Unknown delimiter '{}'. Use: comma or tab", s),
            }),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

/// Everything one recalibration run needs
#[derive(Debug, Clone, Serialize)]
pub struct RecapConfig {
    pub origin_dir: PathBuf,
    pub origin_file: String,
    pub background_dir: PathBuf,
    /// File name, or a regular expression over file names when `bootstrap` is set
    pub background_file: String,
    pub output_dir: PathBuf,
    pub output_file: String,
    /// Number of leading header lines copied verbatim
    pub header_lines: usize,
    /// 1-based index of the p-value column
    pub pvalue_column: usize,
    pub delimiter: Delimiter,
    pub caller: CallerType,
    /// Number of pooled background replicates (multi-replicate mode)
    pub bootstrap: Option<usize>,
    /// Threshold used for the run summary only
    pub alpha: f64,
    #[serde(skip)]
    pub summary_json: Option<PathBuf>,
}

impl RecapConfig {
    /// Check every precondition that does not touch the file system
    pub fn validate(&self) -> Result<()> {
        if self.pvalue_column == 0 {
            return Err(RecapError::InvalidArgument {
                reason: "p-value column index is 1-based and must be at least 1".to_string(),
            });
        }
        if self.bootstrap == Some(0) {
            return Err(RecapError::InvalidArgument {
                reason: "bootstrap replicate count must be a positive integer".to_string(),
            });
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(RecapError::InvalidArgument {
                reason: format!("alpha must be in (0, 1], got {}", self.alpha),
            });
        }
        for (what, name) in [
            ("origin", &self.origin_file),
            ("background", &self.background_file),
            ("output", &self.output_file),
        ] {
            if name.is_empty() {
                return Err(RecapError::InvalidArgument {
                    reason: format!("{} file name must not be empty", what),
                });
            }
        }
        Ok(())
    }

    pub fn origin_path(&self) -> PathBuf {
        self.origin_dir.join(&self.origin_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Resolve the background tables for this run
    ///
    /// Without a bootstrap count the background file name is used as is.
    /// With one, it is a regular expression matched against the names in the
    /// background directory; matches are taken in name order.
    pub fn background_paths(&self) -> Result<Vec<PathBuf>> {
        require_dir(&self.background_dir)?;

        let Some(requested) = self.bootstrap else {
            let path = self.background_dir.join(&self.background_file);
            require_file(&path)?;
            return Ok(vec![path]);
        };

        let pattern = Regex::new(&self.background_file).map_err(|e| RecapError::InvalidArgument {
            reason: format!("Invalid background file pattern '{}': {}", self.background_file, e),
        })?;

        let mut names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&self.background_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if pattern.is_match(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        debug!("Background files matching '{}': {:?}", self.background_file, names);

        if names.len() < requested {
            return Err(RecapError::InsufficientReplicates {
                requested,
                found: names.len(),
                pattern: self.background_file.clone(),
            });
        }

        info!(
            "Pooling {} of {} background replicates from {}",
            requested,
            names.len(),
            self.background_dir.display()
        );
        Ok(names
            .into_iter()
            .take(requested)
            .map(|name| self.background_dir.join(name))
            .collect())
    }
}

/// Fail unless `dir` is an existing directory
pub fn require_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(RecapError::MissingDirectory {
            path: dir.to_path_buf(),
        })
    }
}

/// Fail unless the parent directory and then the file itself exist
pub fn require_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        require_dir(parent)?;
    }
    if path.is_file() {
        Ok(())
    } else {
        Err(RecapError::MissingFile {
            path: path.to_path_buf(),
        })
    }
}

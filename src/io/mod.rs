//! Input/Output operations for RECAP

mod summary;
mod table;
mod writer;

pub use summary::{write_summary_json, RecapSummary};
pub use table::{read_table, ResultsTable, Row};
pub use writer::{write_recap_table, RECAP_COLUMNS};

pub(crate) use summary::stage_summary_json;
pub(crate) use writer::{parent_dir, persist_staged, stage_recap_table};

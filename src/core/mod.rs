pub mod error;
pub mod output;
pub mod rewrite;

pub use error::{Error, ErrorCode, Result};
pub use output::{BatchReport, BatchSummary, FileOutcome, FileStatus};

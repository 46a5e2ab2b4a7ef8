pub mod batch;
pub mod report;

pub use batch::BatchConverter;
pub use report::{BatchReport, FileOutcome, FileStatus};

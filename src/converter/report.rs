use crate::extractor::PatternSyntax;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Converted,
    Skipped { missing: Vec<String> },
    Failed { error: String },
}

/// Result of converting a single input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub source: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_syntax: Option<PatternSyntax>,
    /// Files written, or that would be written in dry-run mode.
    pub outputs: Vec<PathBuf>,
}

impl FileOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self.status, FileStatus::Converted)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub loon_dir: PathBuf,
    pub surge_dir: PathBuf,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    /// Every candidate file attempted, whatever its outcome.
    pub files_processed: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
    #[serde(skip, default = "Instant::now")]
    start_time: Instant,
}

impl BatchReport {
    pub fn new(input_dir: PathBuf, loon_dir: PathBuf, surge_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            input_dir,
            loon_dir,
            surge_dir,
            dry_run,
            started_at: Utc::now(),
            duration: Duration::ZERO,
            files_processed: 0,
            converted: 0,
            skipped: 0,
            failed: 0,
            files: Vec::new(),
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.files_processed += 1;
        match outcome.status {
            FileStatus::Converted => self.converted += 1,
            FileStatus::Skipped { .. } => self.skipped += 1,
            FileStatus::Failed { .. } => self.failed += 1,
        }
        self.files.push(outcome);
    }

    pub fn finish(&mut self) {
        self.duration = self.start_time.elapsed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: FileStatus) -> FileOutcome {
        FileOutcome {
            source: PathBuf::from("qx/demo.js"),
            status,
            app_name: None,
            pattern_syntax: None,
            outputs: Vec::new(),
        }
    }

    #[test]
    fn test_report_counts() {
        let mut report = BatchReport::new("qx".into(), "loon".into(), "surge".into(), false);

        report.record(outcome(FileStatus::Converted));
        report.record(outcome(FileStatus::Skipped {
            missing: vec!["hostname".to_string()],
        }));
        report.record(outcome(FileStatus::Failed {
            error: "boom".to_string(),
        }));
        report.finish();

        assert_eq!(report.files_processed, 3);
        assert_eq!(report.converted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 1);
        assert!(report.files[2].is_failed());
    }

    #[test]
    fn test_outcome_serialization() {
        let skipped = outcome(FileStatus::Skipped {
            missing: vec!["pattern".to_string()],
        });
        let json = serde_json::to_value(&skipped).unwrap();

        assert_eq!(json["status"], "skipped");
        assert_eq!(json["missing"][0], "pattern");
        assert!(json.get("app_name").is_none());
    }
}

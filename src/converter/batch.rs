use crate::config::Config;
use crate::converter::report::{BatchReport, FileOutcome, FileStatus};
use crate::error::{ConvertError, Result};
use crate::extractor::{FieldExtractor, ScriptRecord};
use crate::renderer::OutputTarget;
use crate::scanner::{ScriptFile, ScriptScanner};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Converts QX scripts one at a time into Loon plugins and Surge modules.
pub struct BatchConverter {
    extractor: FieldExtractor,
    scanner: ScriptScanner,
    loon_dir: PathBuf,
    surge_dir: PathBuf,
    dry_run: bool,
}

impl BatchConverter {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::new(&config.metadata)?,
            scanner: ScriptScanner::new(config),
            loon_dir: config.output.loon_dir.clone(),
            surge_dir: config.output.surge_dir.clone(),
            dry_run: false,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn output_dir(&self, target: OutputTarget) -> &Path {
        match target {
            OutputTarget::Loon => &self.loon_dir,
            OutputTarget::Surge => &self.surge_dir,
        }
    }

    pub fn output_path(&self, target: OutputTarget, stem: &str) -> PathBuf {
        self.output_dir(target).join(target.file_name(stem))
    }

    pub fn scan(&self, input_dir: &Path) -> Result<Vec<ScriptFile>> {
        self.scanner.scan_directory(input_dir)
    }

    /// Scan `input_dir` and convert every candidate script.
    ///
    /// Only a failure to list the directory is returned as an error; per-file
    /// problems are recorded in the report.
    pub fn process_all(&self, input_dir: &Path) -> Result<BatchReport> {
        let scripts = self.scan(input_dir)?;
        Ok(self.process_files(input_dir, &scripts, None))
    }

    pub fn process_files(
        &self,
        input_dir: &Path,
        scripts: &[ScriptFile],
        progress_callback: Option<&dyn Fn(&FileOutcome)>,
    ) -> BatchReport {
        let mut report = BatchReport::new(
            input_dir.to_path_buf(),
            self.loon_dir.clone(),
            self.surge_dir.clone(),
            self.dry_run,
        );

        if !self.dry_run {
            self.prepare_output_dirs();
        }

        for script in scripts {
            let outcome = self.process_one(script);

            if let Some(callback) = progress_callback {
                callback(&outcome);
            }

            report.record(outcome);
        }

        report.finish();
        report
    }

    /// Convert one script, writing either both outputs or nothing.
    pub fn process_one(&self, script: &ScriptFile) -> FileOutcome {
        let mut outcome = FileOutcome {
            source: script.source_path.clone(),
            status: FileStatus::Converted,
            app_name: None,
            pattern_syntax: None,
            outputs: Vec::new(),
        };

        let record = match fs::read(&script.source_path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                self.extractor.extract_for_file(&text, &script.stem)
            }
            Err(e) => {
                outcome.status = FileStatus::Failed {
                    error: ConvertError::file_io(&script.source_path, e).to_string(),
                };
                return outcome;
            }
        };

        outcome.app_name = Some(record.app_name.clone());
        outcome.pattern_syntax = record.pattern_syntax;

        match self.write_outputs(script, &record) {
            Ok(outputs) => outcome.outputs = outputs,
            Err(ConvertError::MissingFields { fields, .. }) => {
                outcome.status = FileStatus::Skipped { missing: fields };
            }
            Err(e) => {
                outcome.status = FileStatus::Failed {
                    error: e.to_string(),
                };
            }
        }

        outcome
    }

    /// Create both output directories up front. Failures are only logged here;
    /// each file retries and reports its own error.
    fn prepare_output_dirs(&self) {
        for target in OutputTarget::ALL {
            let output_dir = self.output_dir(target);
            if let Err(e) = fs::create_dir_all(output_dir) {
                warn!("cannot create {}: {}", output_dir.display(), e);
            }
        }
    }

    fn write_outputs(&self, script: &ScriptFile, record: &ScriptRecord) -> Result<Vec<PathBuf>> {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            return Err(ConvertError::MissingFields {
                path: script.display_path(),
                fields: missing.into_iter().map(String::from).collect(),
            });
        }

        let outputs: Vec<PathBuf> = OutputTarget::ALL
            .iter()
            .map(|target| self.output_path(*target, &script.stem))
            .collect();

        if self.dry_run {
            return Ok(outputs);
        }

        for target in OutputTarget::ALL {
            let output_dir = self.output_dir(target);
            fs::create_dir_all(output_dir).map_err(|e| ConvertError::file_io(output_dir, e))?;
        }

        let targets = OutputTarget::ALL.iter().zip(&outputs);
        for (index, (target, output_path)) in targets.enumerate() {
            if let Err(e) = fs::write(output_path, target.render(record)) {
                // Either both files exist or neither does.
                for written in &outputs[..index] {
                    if let Err(remove_err) = fs::remove_file(written) {
                        warn!("cannot remove {}: {}", written.display(), remove_err);
                    }
                }
                return Err(ConvertError::file_io(output_path, e));
            }
            debug!("wrote {} {}", target.display_name(), output_path.display());
        }

        Ok(outputs)
    }
}

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod extractor;
pub mod renderer;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{
    CategoryRule, CliOverrides, Config, InputConfig, MetadataConfig, OutputConfig,
};
pub use error::{ConvertError, Result, UserFriendlyError};

// Core functionality re-exports
pub use converter::{BatchConverter, BatchReport, FileOutcome, FileStatus};
pub use extractor::{FieldExtractor, PatternSyntax, ScriptRecord};
pub use renderer::{render_loon, render_surge, OutputTarget};
pub use scanner::{FileFilter, ScriptFile, ScriptScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use std::path::Path;

/// Main library interface for qxconvert
pub struct QxConvert {
    config: Config,
    converter: BatchConverter,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl QxConvert {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);
        let converter = BatchConverter::new(&config)?;

        Ok(Self {
            config,
            converter,
            output_formatter,
            progress_manager,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.converter = self.converter.with_dry_run(dry_run);
        self
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)?
            .with_dry_run(cli_args.dry_run))
    }

    /// Convert every script in the configured input directory.
    pub fn run(&self) -> Result<BatchReport> {
        let input_dir = self.config.input.directory.clone();
        self.convert_directory(&input_dir)
    }

    pub fn convert_directory(&self, input_dir: &Path) -> Result<BatchReport> {
        self.output_formatter.start_operation("Converting scripts");
        self.output_formatter
            .info(&format!("QX script directory: {}", input_dir.display()));
        self.output_formatter.info(&format!(
            "Loon output directory: {}",
            self.config.output.loon_dir.display()
        ));
        self.output_formatter.info(&format!(
            "Surge output directory: {}",
            self.config.output.surge_dir.display()
        ));

        let scripts = self.converter.scan(input_dir)?;
        self.output_formatter
            .debug(&format!("Found {} candidate scripts", scripts.len()));

        let file_progress = self.progress_manager.create_file_progress(scripts.len() as u64);
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&self.progress_manager));
        let progress_callback = |outcome: &FileOutcome| {
            output.file_outcome(outcome);
            ui::progress::update_file_progress(&file_progress, outcome);
        };

        let report = self
            .converter
            .process_files(input_dir, &scripts, Some(&progress_callback));

        ui::progress::finish_progress_with_summary(
            &file_progress,
            &format!("Processed {} scripts", report.files_processed),
            report.duration,
        );
        self.progress_manager.clear();

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)
            .map_err(|e| ConvertError::file_io(output_path.as_ref(), e))?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &ConvertError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convert a directory with default metadata and no terminal output.
pub fn convert_simple(input_dir: &Path, loon_dir: &Path, surge_dir: &Path) -> Result<BatchReport> {
    let mut config = Config::default();
    config.input.directory = input_dir.to_path_buf();
    config.output.loon_dir = loon_dir.to_path_buf();
    config.output.surge_dir = surge_dir.to_path_buf();

    BatchConverter::new(&config)?.process_all(input_dir)
}

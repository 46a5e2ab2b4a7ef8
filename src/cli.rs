use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qxconvert")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert Quantumult X rewrite scripts into Loon plugins and Surge modules")]
#[command(
    long_about = "qxconvert reads every .js script directly inside INPUT_DIR, pulls out the app \
                  name, URL pattern, script URL and MITM hostname, and writes a Loon plugin \
                  and a Surge module for each script."
)]
#[command(after_help = "EXAMPLES:\n  \
    qxconvert\n  \
    qxconvert ./qx ./loon ./surge\n  \
    qxconvert scripts out/loon out/surge --dry-run\n  \
    qxconvert --config qxconvert.toml --output-format json")]
pub struct Cli {
    /// Directory containing QX scripts [default: ./qx]
    pub input_dir: Option<PathBuf>,

    /// Output directory for Loon plugins [default: ./loon]
    pub loon_dir: Option<PathBuf>,

    /// Output directory for Surge modules [default: ./surge]
    pub surge_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be converted without writing files)
    #[arg(long, help = "Show what would be converted without writing any files")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_dir(self.input_dir.clone())
            .with_loon_dir(self.loon_dir.clone())
            .with_surge_dir(self.surge_dir.clone())
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_defaults() {
        let cli = Cli::try_parse_from(["qxconvert"]).unwrap();
        assert!(cli.input_dir.is_none());
        assert!(cli.loon_dir.is_none());
        assert!(cli.surge_dir.is_none());

        let overrides = cli.create_cli_overrides();
        let mut config = Config::default();
        config.merge_with_cli_args(&overrides);

        assert_eq!(config.input.directory, PathBuf::from("./qx"));
        assert_eq!(config.output.loon_dir, PathBuf::from("./loon"));
        assert_eq!(config.output.surge_dir, PathBuf::from("./surge"));
    }

    #[test]
    fn test_positional_overrides() {
        let cli = Cli::try_parse_from(["qxconvert", "in", "out/l"]).unwrap();

        let mut config = Config::default();
        config.merge_with_cli_args(&cli.create_cli_overrides());

        assert_eq!(config.input.directory, PathBuf::from("in"));
        assert_eq!(config.output.loon_dir, PathBuf::from("out/l"));
        assert_eq!(config.output.surge_dir, PathBuf::from("./surge"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "qxconvert",
            "--dry-run",
            "-vv",
            "--output-format",
            "json",
        ])
        .unwrap();

        assert!(cli.dry_run);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(matches!(cli.output_format, OutputFormat::Json));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["qxconvert", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_too_many_positionals() {
        assert!(Cli::try_parse_from(["qxconvert", "a", "b", "c", "d"]).is_err());
    }
}

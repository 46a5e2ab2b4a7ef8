use clap::Parser;
use qxconvert::{Cli, OutputFormatter, OutputMode, QxConvert, UserFriendlyError};
use std::process;

fn main() {
    setup_logging();
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let qx = match QxConvert::from_cli(&cli) {
        Ok(qx) => qx,
        Err(e) => {
            let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
            formatter.print_user_friendly_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        qx.output_formatter()
            .warning("DRY RUN MODE - no files will be written");
    }

    // Per-file problems are reported but never change the exit code.
    match qx.run() {
        Ok(report) => {
            qx.output_formatter().print_batch_summary(&report);
            0
        }
        Err(e) => {
            qx.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "qxconvert.toml".to_string());

    match QxConvert::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  qxconvert --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "qxconvert",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_generate_config_unwritable() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("missing/dir/test.toml");

        let cli = Cli::try_parse_from([
            "qxconvert",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(handle_generate_config(&cli), 1);
    }
}

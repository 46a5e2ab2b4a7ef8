use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO operation failed on {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Cannot read input directory: {path}")]
    InputDirectory { path: String, reason: String },

    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Missing required fields in {path}: {}", .fields.join(", "))]
    MissingFields { path: String, fields: Vec<String> },
}

impl ConvertError {
    pub fn file_io<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        ConvertError::FileIo {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ConvertError {
    fn user_message(&self) -> String {
        match self {
            ConvertError::FileIo { path, source } => {
                format!("Failed to access {}: {}", path, source)
            }
            ConvertError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ConvertError::InputDirectory { path, reason } => {
                format!("Cannot read input directory {}: {}", path, reason)
            }
            ConvertError::MissingFields { path, fields } => {
                format!(
                    "{} is missing required information ({}), skipped",
                    path,
                    fields.join(", ")
                )
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ConvertError::InputDirectory { .. } => Some(
                "Pass an existing directory of QX scripts as the first argument (default: ./qx).".to_string()
            ),
            ConvertError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            ConvertError::FileIo { .. } => Some(
                "Ensure you have the necessary read/write permissions for the input and output directories.".to_string()
            ),
            ConvertError::MissingFields { .. } => Some(
                "The script needs a [rewrite_local] rule (or a Loon/Surge [Script] block), a script URL and a hostname line.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

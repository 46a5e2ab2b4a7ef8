use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTHOR: &str = "🅜ⓘ🅚ⓔ🅟ⓗ🅘ⓔ";
pub const DEFAULT_CATEGORY: &str = "🔐APP";
pub const DEFAULT_ICON_BASE_URL: &str = "https://raw.githubusercontent.com/Mikephie/icons/main/icon/";

pub const DEFAULT_INPUT_DIR: &str = "./qx";
pub const DEFAULT_LOON_DIR: &str = "./loon";
pub const DEFAULT_SURGE_DIR: &str = "./surge";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub loon_dir: PathBuf,
    pub surge_dir: PathBuf,
}

/// Values stamped into every generated plugin and module.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub author: String,
    pub default_category: String,
    pub icon_base_url: String,
    /// Checked in order; the first keyword found in the script text picks the category.
    pub category_keywords: Vec<CategoryRule>,
}

/// A keyword, matched case-insensitively, and the category tag it selects.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryRule {
    pub keyword: String,
    pub category: String,
}

impl CategoryRule {
    pub fn new<K: Into<String>, C: Into<String>>(keyword: K, category: C) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_INPUT_DIR),
            extensions: vec!["js".to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            loon_dir: PathBuf::from(DEFAULT_LOON_DIR),
            surge_dir: PathBuf::from(DEFAULT_SURGE_DIR),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            category_keywords: Vec::new(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConvertError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConvertError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["qxconvert.toml", ".qxconvert.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.input.directory = input_dir.clone();
        }

        if let Some(ref loon_dir) = cli_args.loon_dir {
            self.output.loon_dir = loon_dir.clone();
        }

        if let Some(ref surge_dir) = cli_args.surge_dir {
            self.output.surge_dir = surge_dir.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| ConvertError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| ConvertError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConvertError::Config {
                message: "At least one input file extension must be specified".to_string(),
            });
        }

        if self.metadata.icon_base_url.trim().is_empty() {
            return Err(ConvertError::Config {
                message: "Icon base URL must not be empty".to_string(),
            });
        }

        if self.output.loon_dir.as_os_str().is_empty() || self.output.surge_dir.as_os_str().is_empty() {
            return Err(ConvertError::Config {
                message: "Output directories must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Input extensions, lower-cased and without a leading dot.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.input
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect()
    }

    pub fn create_sample_config() -> String {
        let mut sample_config = Self::default();
        sample_config.metadata.category_keywords = vec![
            CategoryRule::new("签到", "✅签到"),
            CategoryRule::new("广告", "🚫广告"),
            CategoryRule::new("工具", "🛠️工具"),
        ];
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub loon_dir: Option<PathBuf>,
    pub surge_dir: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_loon_dir(mut self, loon_dir: Option<PathBuf>) -> Self {
        self.loon_dir = loon_dir;
        self
    }

    pub fn with_surge_dir(mut self, surge_dir: Option<PathBuf>) -> Self {
        self.surge_dir = surge_dir;
        self
    }
}

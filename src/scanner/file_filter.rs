use crate::config::Config;
use std::path::Path;

pub struct FileFilter {
    script_extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &Config) -> Self {
        Self {
            script_extensions: config.normalized_extensions(),
        }
    }

    pub fn is_script_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.script_extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

use crate::config::Config;
use crate::error::{ConvertError, Result};
use crate::scanner::file_filter::FileFilter;
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A candidate QX script found in the input directory.
#[derive(Debug, Clone)]
pub struct ScriptFile {
    pub source_path: PathBuf,
    pub filename: String,
    /// File name without its extension; output files are named after it.
    pub stem: String,
}

impl ScriptFile {
    pub fn new(source_path: PathBuf) -> Self {
        let filename = source_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();

        let stem = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        Self {
            source_path,
            filename,
            stem,
        }
    }

    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }
}

pub struct ScriptScanner {
    filter: FileFilter,
}

impl ScriptScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// List candidate scripts directly inside `root`, sorted by file name.
    ///
    /// Failing to read `root` itself is fatal. Unreadable entries inside it are
    /// logged and skipped.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<ScriptFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(ConvertError::InputDirectory {
                path: root_path.display().to_string(),
                reason: "directory does not exist".to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(ConvertError::InputDirectory {
                path: root_path.display().to_string(),
                reason: "not a directory".to_string(),
            });
        }

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut scripts = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ConvertError::InputDirectory {
                        path: root_path.display().to_string(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => {
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.is_script_file(entry.path()) {
                continue;
            }

            scripts.push(ScriptFile::new(entry.path().to_path_buf()));
        }

        Ok(scripts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.js"), "b").unwrap();
        fs::write(temp_dir.path().join("a.JS"), "a").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "n").unwrap();

        let scanner = ScriptScanner::new(&Config::default());
        let scripts = scanner.scan_directory(temp_dir.path()).unwrap();

        let names: Vec<_> = scripts.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["a.JS", "b.js"]);
        assert_eq!(scripts[0].stem, "a");
        assert_eq!(scripts[1].stem, "b");
    }

    #[test]
    fn test_scan_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.js"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("dir.js")).unwrap();
        fs::write(temp_dir.path().join("top.js"), "x").unwrap();

        let scanner = ScriptScanner::new(&Config::default());
        let scripts = scanner.scan_directory(temp_dir.path()).unwrap();

        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].filename, "top.js");
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = ScriptScanner::new(&Config::default());
        assert!(scanner.scan_directory(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = ScriptScanner::new(&Config::default());

        let result = scanner.scan_directory(temp_dir.path().join("missing"));
        assert!(matches!(result, Err(ConvertError::InputDirectory { .. })));
    }

    #[test]
    fn test_file_as_root_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("demo.js");
        fs::write(&file, "x").unwrap();

        let scanner = ScriptScanner::new(&Config::default());
        assert!(scanner.scan_directory(&file).is_err());
    }

    #[test]
    fn test_script_file_names() {
        let script = ScriptFile::new(PathBuf::from("qx/my.app.js"));
        assert_eq!(script.filename, "my.app.js");
        assert_eq!(script.stem, "my.app");
    }
}

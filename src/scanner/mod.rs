pub mod file_filter;
pub mod script_scanner;

pub use file_filter::FileFilter;
pub use script_scanner::{ScriptFile, ScriptScanner};

pub mod field_extractor;
pub mod record;

pub use field_extractor::FieldExtractor;
pub use record::{PatternSyntax, ScriptRecord};

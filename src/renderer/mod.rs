pub mod loon;
pub mod surge;

pub use loon::render_loon;
pub use surge::render_surge;

use crate::extractor::ScriptRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    Loon,
    Surge,
}

impl OutputTarget {
    pub const ALL: [OutputTarget; 2] = [OutputTarget::Loon, OutputTarget::Surge];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputTarget::Loon => "plugin",
            OutputTarget::Surge => "sgmodule",
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
    }

    pub fn render(&self, record: &ScriptRecord) -> String {
        match self {
            OutputTarget::Loon => render_loon(record),
            OutputTarget::Surge => render_surge(record),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OutputTarget::Loon => "Loon plugin",
            OutputTarget::Surge => "Surge module",
        }
    }
}

use serde::{Deserialize, Serialize};

/// Which of the recognised rule syntaxes supplied the URL pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSyntax {
    /// Quantumult X `[rewrite_local]` rule.
    RewriteLocal,
    /// Loon `[Script]` `http-response` line.
    Loon,
    /// Surge `[Script]` `pattern=` assignment.
    Surge,
}

impl PatternSyntax {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternSyntax::RewriteLocal => "rewrite_local",
            PatternSyntax::Loon => "loon",
            PatternSyntax::Surge => "surge",
        }
    }
}

impl std::fmt::Display for PatternSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields pulled out of one QX script, ready for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub app_name: String,
    pub author: String,
    pub pattern: String,
    pub script_path: String,
    pub hostname: String,
    pub app_category: String,
    pub icon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_syntax: Option<PatternSyntax>,
}

impl ScriptRecord {
    /// Names of required fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("app_name", &self.app_name),
            ("pattern", &self.pattern),
            ("script_path", &self.script_path),
            ("hostname", &self.hostname),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Lower-cased name used for Loon's `tag=`.
    ///
    /// Non-ASCII characters are kept as-is; only case mapping is applied.
    pub fn tag(&self) -> String {
        self.app_name.to_lowercase()
    }
}

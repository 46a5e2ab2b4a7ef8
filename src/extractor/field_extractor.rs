use crate::config::MetadataConfig;
use crate::error::Result;
use crate::extractor::record::{PatternSyntax, ScriptRecord};
use log::debug;
use regex::Regex;

const NAME_PATTERN: &str = r"📜\s*✨\s*([^✨]+)\s*✨";

// The rule line may sit inside a `/* ... */` block, so a leading `*` or `//` is tolerated.
// Lines whose first rule character is `#` are disabled rules and never match, and the
// capture never starts on a prefix character.
const REWRITE_LOCAL_PATTERN: &str = r"(?s)\[rewrite_local\].*?\n[ \t]*(?:\*[ \t]*|//[ \t]*)?([^\s#*/][^\n]*?)[ \t]+url[ \t]+script-response-body";
const LOON_PATTERN: &str = r"(?s)\[Script\].*?Loon.*?\n[ \t]*(?:\*[ \t]*|//[ \t]*)?http-response[ \t]+([^\n]*?)[ \t]+script-path";
const SURGE_PATTERN: &str = r"(?s)\[Script\].*?Surge.*?\n.*?pattern=([^,\n]*),";

const SCRIPT_PATH_PATTERN: &str = r"script-(?:path|response-body)(?:\s*=\s*|\s+)(https://[^\s,]+)";
const HOSTNAME_PATTERN: &str = r"hostname\s*=\s*(?:%APPEND%\s*)?(\S+)";

pub struct FieldExtractor {
    metadata: MetadataConfig,
    name_regex: Regex,
    pattern_regexes: Vec<(PatternSyntax, Regex)>,
    script_path_regex: Regex,
    hostname_regex: Regex,
}

impl FieldExtractor {
    pub fn new(metadata: &MetadataConfig) -> Result<Self> {
        Ok(Self {
            metadata: metadata.clone(),
            name_regex: Regex::new(NAME_PATTERN)?,
            pattern_regexes: vec![
                (PatternSyntax::RewriteLocal, Regex::new(REWRITE_LOCAL_PATTERN)?),
                (PatternSyntax::Loon, Regex::new(LOON_PATTERN)?),
                (PatternSyntax::Surge, Regex::new(SURGE_PATTERN)?),
            ],
            script_path_regex: Regex::new(SCRIPT_PATH_PATTERN)?,
            hostname_regex: Regex::new(HOSTNAME_PATTERN)?,
        })
    }

    /// Pull every field out of `text`. Fields that cannot be found stay empty.
    pub fn extract(&self, text: &str) -> ScriptRecord {
        let app_name = self.extract_app_name(text);
        let pattern = self.extract_pattern(text);

        ScriptRecord {
            icon_url: self.icon_url(&app_name),
            app_name,
            author: self.metadata.author.clone(),
            pattern_syntax: pattern.as_ref().map(|(syntax, _)| *syntax),
            pattern: pattern.map(|(_, value)| value).unwrap_or_default(),
            script_path: first_capture(&self.script_path_regex, text),
            hostname: first_capture(&self.hostname_regex, text),
            app_category: self.categorize(text),
        }
    }

    /// Name the record after the script file when no name marker was found.
    pub fn apply_filename_fallback(&self, record: &mut ScriptRecord, file_stem: &str) {
        if !record.app_name.is_empty() {
            return;
        }

        record.app_name = capitalize_first(file_stem);
        record.icon_url = self.icon_url(&record.app_name);
    }

    /// Extract and then apply the filename fallback.
    pub fn extract_for_file(&self, text: &str, file_stem: &str) -> ScriptRecord {
        let mut record = self.extract(text);
        self.apply_filename_fallback(&mut record, file_stem);
        record
    }

    pub fn icon_url(&self, app_name: &str) -> String {
        let icon_name: String = app_name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        format!("{}{}.png", self.metadata.icon_base_url, icon_name)
    }

    fn extract_app_name(&self, text: &str) -> String {
        first_capture(&self.name_regex, text).trim().to_string()
    }

    fn extract_pattern(&self, text: &str) -> Option<(PatternSyntax, String)> {
        for (syntax, regex) in &self.pattern_regexes {
            let value = first_capture(regex, text);
            let value = value.trim();
            if !value.is_empty() {
                debug!("pattern matched via {} syntax: {}", syntax, value);
                return Some((*syntax, value.to_string()));
            }
        }

        debug!("no pattern syntax matched");
        None
    }

    fn categorize(&self, text: &str) -> String {
        if !self.metadata.category_keywords.is_empty() {
            let lowered = text.to_lowercase();
            for rule in &self.metadata.category_keywords {
                if !rule.keyword.is_empty() && lowered.contains(&rule.keyword.to_lowercase()) {
                    return rule.category.clone();
                }
            }
        }

        self.metadata.default_category.clone()
    }
}

fn first_capture(regex: &Regex, text: &str) -> String {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

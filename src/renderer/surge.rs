use crate::extractor::ScriptRecord;

const SURGE_DESCRIPTION: &str = "网页游览 - 模块";

/// Render a Surge module. The MITM line uses `%APPEND%` so the hostname is
/// added to the user's existing list instead of replacing it.
pub fn render_surge(record: &ScriptRecord) -> String {
    format!(
        "#!name = {name} {category}\n\
         #!desc = {desc}\n\
         #!author = {author}\n\
         #!category={category}\n\
         #!icon = {icon}\n\
         \n\
         [Script]\n\
         {name} = type=http-response, pattern={pattern}, script-path={script_path}, requires-body=true, max-size=-1, timeout=60\n\
         \n\
         [MITM]\n\
         hostname = %APPEND% {hostname}\n",
        name = record.app_name,
        category = record.app_category,
        desc = SURGE_DESCRIPTION,
        author = record.author,
        icon = record.icon_url,
        pattern = record.pattern,
        script_path = record.script_path,
        hostname = record.hostname,
    )
}

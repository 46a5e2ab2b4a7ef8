use crate::extractor::ScriptRecord;

const LOON_DESCRIPTION: &str = "插件";
const LOON_CATEGORY_SELECT: &str = r#"select,"✅签到","🚫广告","🔐APP","🛠️工具""#;

/// Render a Loon plugin. Field values are substituted verbatim.
pub fn render_loon(record: &ScriptRecord) -> String {
    format!(
        "#!name = {name} {category}\n\
         #!desc = {desc}\n\
         #!author = {author}\n\
         #!icon = {icon}\n\
         #appCategory = {select}\n\
         \n\
         [Script]\n\
         http-response {pattern} script-path={script_path}, requires-body=true, timeout=60, tag={tag}\n\
         \n\
         [MITM]\n\
         hostname = {hostname}\n",
        name = record.app_name,
        category = record.app_category,
        desc = LOON_DESCRIPTION,
        author = record.author,
        icon = record.icon_url,
        select = LOON_CATEGORY_SELECT,
        pattern = record.pattern,
        script_path = record.script_path,
        tag = record.tag(),
        hostname = record.hostname,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_record() -> ScriptRecord {
        ScriptRecord {
            app_name: "DemoApp".to_string(),
            author: "🅜ⓘ🅚ⓔ🅟ⓗ🅘ⓔ".to_string(),
            pattern: r"^https?:\/\/api\.demo\.com\/v1\/user".to_string(),
            script_path: "https://raw.example.com/demo.js".to_string(),
            hostname: "api.demo.com".to_string(),
            app_category: "🔐APP".to_string(),
            icon_url: "https://raw.githubusercontent.com/Mikephie/icons/main/icon/demoapp.png"
                .to_string(),
            pattern_syntax: None,
        }
    }

    #[test]
    fn test_loon_plugin_layout() {
        let expected = "#!name = DemoApp 🔐APP\n\
#!desc = 插件\n\
#!author = 🅜ⓘ🅚ⓔ🅟ⓗ🅘ⓔ\n\
#!icon = https://raw.githubusercontent.com/Mikephie/icons/main/icon/demoapp.png\n\
#appCategory = select,\"✅签到\",\"🚫广告\",\"🔐APP\",\"🛠️工具\"\n\
\n\
[Script]\n\
http-response ^https?:\\/\\/api\\.demo\\.com\\/v1\\/user script-path=https://raw.example.com/demo.js, requires-body=true, timeout=60, tag=demoapp\n\
\n\
[MITM]\n\
hostname = api.demo.com\n";

        assert_eq!(render_loon(&demo_record()), expected);
    }

    #[test]
    fn test_loon_render_is_deterministic() {
        let record = demo_record();
        assert_eq!(render_loon(&record), render_loon(&record));
    }

    #[test]
    fn test_loon_values_not_escaped() {
        let mut record = demo_record();
        record.hostname = "*.demo.com, api.other.com".to_string();
        let output = render_loon(&record);
        assert!(output.ends_with("hostname = *.demo.com, api.other.com\n"));
    }
}

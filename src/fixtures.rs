#[cfg(test)]
pub mod test {
    use crate::config::Settings;
    use crate::store::MemoryStore;
    use crate::types::IconStyle;

    /// A complete, commented TOML config.
    pub const SAMPLE_TOML: &str = r#"# Tool settings
[features]
branch_enforcement = true
task_detection = false
# keep thinking on
auto_ultrathink = true
icon_style = "emoji"

[features.context_warnings]
warn_85 = true
warn_90 = false
"#;

    /// The same settings as [`SAMPLE_TOML`], as JSON.
    pub const SAMPLE_JSON: &str = r#"{
  "features": {
    "branch_enforcement": true,
    "task_detection": false,
    "auto_ultrathink": true,
    "icon_style": "emoji",
    "context_warnings": {
      "warn_85": true,
      "warn_90": false
    }
  }
}
"#;

    /// Default settings with the given icon style.
    pub fn settings_with_icon(style: IconStyle) -> Settings {
        let mut settings = Settings::defaults().unwrap();
        settings.features.icon_style = style;
        settings
    }

    pub fn memory_store_with_icon(style: IconStyle) -> MemoryStore {
        MemoryStore::new(settings_with_icon(style))
    }

    #[test]
    fn sample_toml_parses() {
        let settings: Settings = toml::from_str(SAMPLE_TOML).unwrap();
        assert_eq!(settings.features.icon_style, IconStyle::Emoji);
        assert!(!settings.features.task_detection);
        assert!(!settings.features.context_warnings.warn_90);
    }

    #[test]
    fn sample_json_matches_sample_toml() {
        let from_toml: Settings = toml::from_str(SAMPLE_TOML).unwrap();
        let from_json: Settings = serde_json::from_str(SAMPLE_JSON).unwrap();
        assert_eq!(from_toml, from_json);
    }
}

//! Settings persistence.
//!
//! TOML files are patched with `toml_edit`, so comments, formatting and keys
//! this crate doesn't own survive a save. A file that doesn't exist yet is
//! seeded from the generated template. JSON files are deep-merged with the new
//! values so unrelated keys survive too.
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! reader sees either the old file or the new one.

use std::ffi::OsString;
use std::path::Path;

use crate::config::{Settings, generate_template};
use crate::error::FeaturesError;
use crate::merge::deep_merge;
use crate::resolve::FileFormat;

/// Pure function: render `settings` into a TOML document.
///
/// If `content` is `None` (file doesn't exist yet), starts from the generated
/// template. Every leaf of `settings` is written; everything else in the
/// document is left as it was.
pub fn render_toml(
    content: Option<&str>,
    settings: &Settings,
    path: &Path,
) -> Result<String, FeaturesError> {
    let base = match content {
        Some(c) => c.to_string(),
        None => generate_template(),
    };

    let mut doc: toml_edit::DocumentMut =
        base.parse()
            .map_err(|e: toml_edit::TomlError| FeaturesError::DocumentError {
                path: path.to_path_buf(),
                source: e,
            })?;

    for (key, value) in leaf_values(settings)? {
        set_leaf(&mut doc, &key, to_edit_value(&key, &value)?);
    }

    Ok(doc.to_string())
}

/// Pure function: render `settings` into a JSON document, keeping any keys of
/// the existing `content` that the schema doesn't cover.
pub fn render_json(
    content: Option<&str>,
    settings: &Settings,
    path: &Path,
) -> Result<String, FeaturesError> {
    let json_err = |e| FeaturesError::JsonError {
        path: path.to_path_buf(),
        source: e,
    };

    let overlay = serde_json::to_value(settings).map_err(json_err)?;
    let merged = match content.filter(|c| !c.trim().is_empty()) {
        Some(c) => {
            let base: serde_json::Value = serde_json::from_str(c).map_err(json_err)?;
            deep_merge(base, overlay)
        }
        None => overlay,
    };

    let mut out = serde_json::to_string_pretty(&merged).map_err(json_err)?;
    out.push('\n');
    Ok(out)
}

/// I/O wrapper: read the file (if it exists), render the new content, write
/// it back through a temp file. Creates parent directories if needed.
pub fn persist_settings(
    path: &Path,
    format: FileFormat,
    settings: &Settings,
) -> Result<(), FeaturesError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => Some(c),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(FeaturesError::IoError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let new_content = match format {
        FileFormat::Toml => render_toml(content.as_deref(), settings, path)?,
        FileFormat::Json => render_json(content.as_deref(), settings, path)?,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| FeaturesError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    write_atomically(path, &new_content)?;
    tracing::debug!(path = %path.display(), "persisted settings");
    Ok(())
}

/// Write `content` to a sibling `.tmp` file and rename it over `path`. The
/// temp file is removed again if the rename fails.
fn write_atomically(path: &Path, content: &str) -> Result<(), FeaturesError> {
    let mut tmp_name = path.file_name().map(OsString::from).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, content).map_err(|e| FeaturesError::IoError {
        path: tmp_path.clone(),
        source: e,
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            tracing::warn!(path = %tmp_path.display(), error = %cleanup, "could not remove temp file");
        }
        return Err(FeaturesError::IoError {
            path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}

/// Flatten settings into dotted leaf keys (`features.context_warnings.warn_85`).
fn leaf_values(settings: &Settings) -> Result<Vec<(String, toml::Value)>, FeaturesError> {
    let root = toml::Value::try_from(settings).map_err(|e| FeaturesError::InvalidValue {
        key: "<settings>".into(),
        reason: e.to_string(),
    })?;

    let mut out = Vec::new();
    if let toml::Value::Table(table) = root {
        collect_leaves(table, "", &mut out);
    }
    Ok(out)
}

fn collect_leaves(table: toml::Table, prefix: &str, out: &mut Vec<(String, toml::Value)>) {
    for (key, value) in table {
        let dotted = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::Table(nested) => collect_leaves(nested, &dotted, out),
            leaf => out.push((dotted, leaf)),
        }
    }
}

fn to_edit_value(key: &str, value: &toml::Value) -> Result<toml_edit::Value, FeaturesError> {
    match value {
        toml::Value::Boolean(b) => Ok((*b).into()),
        toml::Value::String(s) => Ok(s.as_str().into()),
        toml::Value::Integer(i) => Ok((*i).into()),
        toml::Value::Float(f) => Ok((*f).into()),
        other => Err(FeaturesError::InvalidValue {
            key: key.into(),
            reason: format!("a {} cannot be stored as a flag", other.type_str()),
        }),
    }
}

/// Set a dotted key, creating intermediate tables as needed. An existing
/// value keeps its surrounding comments.
fn set_leaf(doc: &mut toml_edit::DocumentMut, dotted_key: &str, new_value: toml_edit::Value) {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };
    set_in_table(doc.as_table_mut(), false, parents, leaf, new_value);
}

/// Walk `parents` below `table` and assign `leaf`. Tables created under an
/// inline table are inline too, since a standard table cannot live inside one.
fn set_in_table(
    table: &mut dyn toml_edit::TableLike,
    inline: bool,
    parents: &[&str],
    leaf: &str,
    new_value: toml_edit::Value,
) {
    let Some((segment, rest)) = parents.split_first() else {
        if let Some(existing) = table.get_mut(leaf).and_then(toml_edit::Item::as_value_mut) {
            let decor = existing.decor().clone();
            *existing = new_value;
            *existing.decor_mut() = decor;
            return;
        }
        table.insert(leaf, toml_edit::Item::Value(new_value));
        return;
    };

    if !table.get(segment).is_some_and(toml_edit::Item::is_table_like) {
        let child = if inline {
            toml_edit::Item::Value(toml_edit::Value::InlineTable(
                toml_edit::InlineTable::new(),
            ))
        } else {
            toml_edit::Item::Table(toml_edit::Table::new())
        };
        table.insert(segment, child);
    }

    let Some(child) = table.get_mut(segment) else {
        return;
    };
    let child_inline = child.is_inline_table();
    if let Some(child_table) = child.as_table_like_mut() {
        set_in_table(child_table, child_inline, rest, leaf, new_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{SAMPLE_JSON, SAMPLE_TOML, settings_with_icon};
    use crate::resolve::resolve;
    use crate::types::IconStyle;
    use std::fs;
    use tempfile::TempDir;

    fn toml_path() -> &'static Path {
        Path::new("tool.toml")
    }

    #[test]
    fn render_updates_existing_keys() {
        let mut settings: Settings = toml::from_str(SAMPLE_TOML).unwrap();
        settings.features.icon_style = IconStyle::Ascii;
        settings.features.context_warnings.warn_90 = true;

        let result = render_toml(Some(SAMPLE_TOML), &settings, toml_path()).unwrap();
        assert!(result.contains("icon_style = \"ascii\""));
        assert!(result.contains("warn_90 = true"));
        assert!(!result.contains("emoji"));
    }

    #[test]
    fn render_preserves_comments() {
        let settings: Settings = toml::from_str(SAMPLE_TOML).unwrap();
        let result = render_toml(Some(SAMPLE_TOML), &settings, toml_path()).unwrap();
        assert!(result.contains("# Tool settings"));
        assert!(result.contains("# keep thinking on"));
    }

    #[test]
    fn render_preserves_trailing_comment_on_changed_value() {
        let content = "[features]\nicon_style = \"emoji\" # looks nice\n";
        let settings = settings_with_icon(IconStyle::Ascii);
        let result = render_toml(Some(content), &settings, toml_path()).unwrap();
        assert!(result.contains("icon_style = \"ascii\" # looks nice"));
    }

    #[test]
    fn render_keeps_unrelated_tables() {
        let content = "[session]\nid = \"abc\"\n\n[features]\ntask_detection = true\n";
        let settings = settings_with_icon(IconStyle::Emoji);
        let result = render_toml(Some(content), &settings, toml_path()).unwrap();
        assert!(result.contains("[session]"));
        assert!(result.contains("id = \"abc\""));
        assert!(result.contains("icon_style = \"emoji\""));
    }

    #[test]
    fn render_replaces_legacy_boolean() {
        let content = "[features]\nicon_style = false\n";
        let settings = settings_with_icon(IconStyle::Ascii);
        let result = render_toml(Some(content), &settings, toml_path()).unwrap();
        assert!(result.contains("icon_style = \"ascii\""));
        assert!(!result.contains("icon_style = false"));
    }

    #[test]
    fn render_from_template_round_trips() {
        let settings = settings_with_icon(IconStyle::Emoji);
        let result = render_toml(None, &settings, toml_path()).unwrap();
        let reloaded = resolve(Some(&result), Path::new("t.toml"), FileFormat::Toml, true).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn render_into_empty_document_creates_tables() {
        let settings = settings_with_icon(IconStyle::Emoji);
        let result = render_toml(Some(""), &settings, toml_path()).unwrap();
        let reloaded = resolve(Some(&result), Path::new("t.toml"), FileFormat::Toml, true).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn render_rejects_malformed_document() {
        let settings = settings_with_icon(IconStyle::Emoji);
        let result = render_toml(Some("[features\n"), &settings, toml_path());
        match result {
            Err(FeaturesError::DocumentError { path, .. }) => assert_eq!(path, toml_path()),
            other => panic!("Expected DocumentError, got {other:?}"),
        }
    }

    #[test]
    fn render_into_inline_features_table_keeps_nested_flags() {
        let content = "features = { icon_style = \"emoji\" }\n";
        let mut settings = settings_with_icon(IconStyle::Ascii);
        settings.features.context_warnings.warn_85 = false;

        let result = render_toml(Some(content), &settings, toml_path()).unwrap();
        assert!(result.contains("context_warnings"), "{result}");

        let reloaded = resolve(Some(&result), toml_path(), FileFormat::Toml, true).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn render_into_inline_nested_table() {
        let content = "[features]\ncontext_warnings = { warn_90 = true }\n";
        let mut settings = settings_with_icon(IconStyle::Emoji);
        settings.features.context_warnings.warn_90 = false;

        let result = render_toml(Some(content), &settings, toml_path()).unwrap();
        let reloaded = resolve(Some(&result), toml_path(), FileFormat::Toml, true).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("tool.toml");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupied"), "x").unwrap();

        let result = write_atomically(&target, "[features]\n");
        assert!(matches!(result, Err(FeaturesError::IoError { .. })));
        assert!(!dir.path().join("tool.toml.tmp").exists());
    }

    #[test]
    fn json_keeps_unknown_keys() {
        let content = r#"{"session": {"id": "abc"}, "features": {"icon_style": "emoji"}}"#;
        let settings = settings_with_icon(IconStyle::Ascii);
        let result = render_json(Some(content), &settings, Path::new("t.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["session"]["id"], "abc");
        assert_eq!(value["features"]["icon_style"], "ascii");
        assert_eq!(value["features"]["context_warnings"]["warn_85"], true);
    }

    #[test]
    fn json_round_trips() {
        let settings: Settings = serde_json::from_str(SAMPLE_JSON).unwrap();
        let result = render_json(None, &settings, Path::new("t.json")).unwrap();
        let reloaded = resolve(Some(&result), Path::new("t.json"), FileFormat::Json, true).unwrap();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn persist_creates_file_and_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("dir").join("tool.toml");
        let settings = settings_with_icon(IconStyle::Ascii);

        persist_settings(&path, FileFormat::Toml, &settings).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("icon_style = \"ascii\""));
        assert!(!path.with_file_name("tool.toml.tmp").exists());
    }

    #[test]
    fn persist_modifies_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tool.toml");
        fs::write(&path, SAMPLE_TOML).unwrap();

        let settings = settings_with_icon(IconStyle::NerdFonts);
        persist_settings(&path, FileFormat::Toml, &settings).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("icon_style = \"nerd_fonts\""));
        assert!(content.contains("# Tool settings"));
    }

    #[test]
    fn persist_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tool.json");
        let settings = settings_with_icon(IconStyle::Emoji);

        persist_settings(&path, FileFormat::Json, &settings).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["features"]["icon_style"], "emoji");
    }
}

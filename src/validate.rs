//! Strict-mode validation: detect unknown keys in config files.
//!
//! Deserializes into the settings layer (all-optional fields) through
//! `serde_ignored` and collects every key the layer doesn't consume. Each
//! unknown key is reported with its file path and a best-effort line number.

use std::path::Path;

use confique::Config;
use serde::Deserialize;

use crate::config::Settings;
use crate::error::FeaturesError;

type Layer = <Settings as Config>::Layer;

/// Reject TOML content containing keys the settings schema doesn't know.
pub fn validate_toml(content: &str, path: &Path) -> Result<(), FeaturesError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: Layer = serde_ignored::deserialize(deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| FeaturesError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    report(unknown_keys, path, |key| find_toml_key_line(content, key))
}

/// Reject JSON content containing keys the settings schema doesn't know.
pub fn validate_json(content: &str, path: &Path) -> Result<(), FeaturesError> {
    let mut unknown_keys: Vec<String> = Vec::new();

    let mut deserializer = serde_json::Deserializer::from_str(content);
    let _layer: Layer = serde_ignored::deserialize(&mut deserializer, |ignored_path| {
        unknown_keys.push(ignored_path.to_string());
    })
    .map_err(|e| FeaturesError::JsonError {
        path: path.to_path_buf(),
        source: e,
    })?;

    report(unknown_keys, path, |key| find_json_key_line(content, key))
}

fn report(
    unknown_keys: Vec<String>,
    path: &Path,
    line_of: impl Fn(&str) -> usize,
) -> Result<(), FeaturesError> {
    if unknown_keys.is_empty() {
        return Ok(());
    }

    let errors: Vec<FeaturesError> = unknown_keys
        .into_iter()
        .map(|key| {
            let line = line_of(&key);
            FeaturesError::UnknownKey {
                key,
                path: path.to_path_buf(),
                line,
            }
        })
        .collect();

    Err(FeaturesError::UnknownKeys(errors))
}

/// Find the 1-indexed line number for a dotted key in TOML content.
///
/// Tracks the current `[section]` header and only matches the leaf key inside
/// the expected section. Handles bare keys and standard headers only; returns
/// 0 if the key cannot be located.
fn find_toml_key_line(content: &str, dotted_key: &str) -> usize {
    let segments: Vec<&str> = dotted_key.split('.').collect();
    let leaf = segments.last().copied().unwrap_or(dotted_key);
    let expected_section = &segments[..segments.len().saturating_sub(1)];

    let mut current_section: Vec<String> = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && !trimmed.starts_with("[[") {
            let header = trimmed.trim_start_matches('[').trim_end_matches(']').trim();
            current_section = header.split('.').map(|s| s.trim().to_string()).collect();
            continue;
        }

        let in_right_section = expected_section.len() == current_section.len()
            && expected_section
                .iter()
                .zip(&current_section)
                .all(|(a, b)| *a == b);

        if in_right_section
            && let Some(after_key) = trimmed.strip_prefix(leaf)
            && after_key.trim_start().starts_with('=')
        {
            return i + 1;
        }
    }
    0
}

/// Find the first line holding `"leaf":` for a dotted key in JSON content.
/// Returns 0 if not found.
fn find_json_key_line(content: &str, dotted_key: &str) -> usize {
    let leaf = dotted_key.rsplit('.').next().unwrap_or(dotted_key);
    let needle = format!("\"{leaf}\"");

    content
        .lines()
        .position(|line| {
            line.trim_start()
                .strip_prefix(&needle)
                .is_some_and(|rest| rest.trim_start().starts_with(':'))
        })
        .map_or(0, |i| i + 1)
}

//! Turn raw file content into typed [`Settings`].
//!
//! Operates on content already read from disk, so the whole pipeline is
//! testable without touching the filesystem:
//!
//! 1. Validate keys (if strict)
//! 2. Deserialize into the all-optional settings layer
//! 3. Let confique fill defaults for everything the file left out

use std::path::Path;

use confique::Config;

use crate::config::Settings;
use crate::error::FeaturesError;
use crate::validate;

/// On-disk encoding of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// `.json` files are JSON, everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        }
    }
}

/// Resolve settings from a file's content. `None` means the file does not
/// exist, which yields the compiled defaults.
pub fn resolve(
    content: Option<&str>,
    path: &Path,
    format: FileFormat,
    strict: bool,
) -> Result<Settings, FeaturesError> {
    let Some(content) = content else {
        return Settings::defaults();
    };

    let layer: <Settings as Config>::Layer = match format {
        FileFormat::Toml => {
            if strict {
                validate::validate_toml(content, path)?;
            }
            toml::from_str(content).map_err(|e| FeaturesError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        }
        FileFormat::Json => {
            if content.trim().is_empty() {
                return Settings::defaults();
            }
            if strict {
                validate::validate_json(content, path)?;
            }
            serde_json::from_str(content).map_err(|e| FeaturesError::JsonError {
                path: path.to_path_buf(),
                source: e,
            })?
        }
    };

    Ok(Settings::builder().preloaded(layer).load()?)
}

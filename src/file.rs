//! File-backed config store.
//!
//! A [`FileStore`] owns one path. Loading reads the file and resolves it into
//! [`Settings`]; a missing file yields the defaults. Saving patches the file in
//! place (see [`persist`](crate::persist)). The encoding is picked from the
//! extension: `.json` is JSON, everything else is TOML.

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::FeaturesError;
use crate::persist::persist_settings;
use crate::resolve::{FileFormat, resolve};
use crate::store::ConfigStore;
use crate::types::SearchPath;

/// Resolve a [`SearchPath`] to a concrete directory.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (e.g. no home directory found).
pub fn resolve_search_path(sp: &SearchPath, app_name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
    strict: bool,
}

impl FileStore {
    /// Store backed by `path`. Strict key validation is on.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self {
            path,
            format,
            strict: true,
        }
    }

    /// Store backed by `{search_path}/{file_name}`.
    pub fn locate(
        search_path: &SearchPath,
        file_name: &str,
        app_name: &str,
    ) -> Result<Self, FeaturesError> {
        resolve_search_path(search_path, app_name)
            .map(|dir| Self::new(dir.join(file_name)))
            .ok_or(FeaturesError::NoConfigLocation)
    }

    /// Toggle strict mode. When off, keys the schema doesn't know are ignored
    /// on load instead of being reported.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<Settings, FeaturesError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => Some(c),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file, using defaults");
                None
            }
            Err(e) => {
                return Err(FeaturesError::IoError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        resolve(content.as_deref(), &self.path, self.format, self.strict)
    }

    fn save(&self, settings: &Settings) -> Result<(), FeaturesError> {
        persist_settings(&self.path, self.format, settings)
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum FeaturesError {
    #[error("Unknown feature '{name}' (available: {available})")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(featurefig::unknown_feature),
            help("run `features list` to see every flag and its current value")
        )
    )]
    UnknownFeature { name: String, available: String },

    #[error("Malformed features command, expected {usage}")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(code(featurefig::malformed_command))
    )]
    MalformedCommand { usage: String },

    #[error("Invalid value for '{key}': {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(featurefig::invalid_value)))]
    InvalidValue { key: String, reason: String },

    #[error("Unknown key '{key}' in {path} (line {line})")]
    UnknownKey {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown keys in config file")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(help("fix the typo or load the store with `.strict(false)`"))
    )]
    UnknownKeys(Vec<FeaturesError>),

    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to edit {path}: {source}")]
    DocumentError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },

    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(#[from] confique::Error),

    #[error("No config location could be resolved (is the home directory set?)")]
    NoConfigLocation,
}

//! The persisted settings schema.
//!
//! Defaults and doc comments live on the structs; the TOML template written
//! for a fresh config file is generated from them.

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::FeaturesError;
use crate::types::IconStyle;

/// Root of the persisted configuration.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Feature toggles.
    #[config(nested)]
    pub features: FeatureSet,
}

/// Every feature flag the tool understands.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Block edits on branches that don't match the active task.
    #[config(default = true)]
    pub branch_enforcement: bool,

    /// Detect task-creation phrases in prompts.
    #[config(default = true)]
    pub task_detection: bool,

    /// Request extended thinking on every prompt.
    #[config(default = true)]
    pub auto_ultrathink: bool,

    /// Icon rendering: "nerd_fonts", "emoji" or "ascii".
    #[config(default = "nerd_fonts", deserialize_with = crate::normalize::deserialize_icon_style)]
    #[serde(deserialize_with = "crate::normalize::deserialize_icon_style")]
    pub icon_style: IconStyle,

    /// Context window usage warnings.
    #[config(nested)]
    pub context_warnings: ContextWarningSettings,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ContextWarningSettings {
    /// Warn when context usage passes 85%.
    #[config(default = true)]
    pub warn_85: bool,

    /// Warn when context usage passes 90%.
    #[config(default = true)]
    pub warn_90: bool,
}

impl Settings {
    /// Settings built purely from compiled defaults.
    pub fn defaults() -> Result<Self, FeaturesError> {
        Ok(Settings::builder().load()?)
    }
}

/// Generate a commented TOML template from the schema's doc comments.
pub fn generate_template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}

//! Flag registry: the addressable leaves of a [`FeatureSet`] and typed access
//! to each of them.

use std::fmt;

use crate::config::FeatureSet;
use crate::error::FeaturesError;
use crate::types::FlagValue;

/// One independently settable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    BranchEnforcement,
    TaskDetection,
    AutoUltrathink,
    IconStyle,
    Warn85,
    Warn90,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Flag::BranchEnforcement,
        Flag::TaskDetection,
        Flag::AutoUltrathink,
        Flag::IconStyle,
        Flag::Warn85,
        Flag::Warn90,
    ];

    /// Dotted key relative to the `features` table.
    pub fn key(self) -> &'static str {
        match self {
            Flag::BranchEnforcement => "branch_enforcement",
            Flag::TaskDetection => "task_detection",
            Flag::AutoUltrathink => "auto_ultrathink",
            Flag::IconStyle => "icon_style",
            Flag::Warn85 => "context_warnings.warn_85",
            Flag::Warn90 => "context_warnings.warn_90",
        }
    }

    /// Resolve a user-supplied flag name.
    ///
    /// Case-insensitive, `-` is read as `_`, and the nested warning flags may
    /// be addressed by their leaf name alone.
    pub fn resolve(name: &str) -> Result<Flag, FeaturesError> {
        let wanted = name.trim().to_ascii_lowercase().replace('-', "_");
        Flag::ALL
            .into_iter()
            .find(|flag| {
                let key = flag.key();
                key == wanted || key.rsplit_once('.').is_some_and(|(_, leaf)| leaf == wanted)
            })
            .ok_or_else(|| FeaturesError::UnknownFeature {
                name: name.to_string(),
                available: Flag::ALL.map(Flag::key).join(", "),
            })
    }

    pub fn get(self, features: &FeatureSet) -> FlagValue {
        match self {
            Flag::BranchEnforcement => FlagValue::Bool(features.branch_enforcement),
            Flag::TaskDetection => FlagValue::Bool(features.task_detection),
            Flag::AutoUltrathink => FlagValue::Bool(features.auto_ultrathink),
            Flag::IconStyle => FlagValue::Icon(features.icon_style),
            Flag::Warn85 => FlagValue::Bool(features.context_warnings.warn_85),
            Flag::Warn90 => FlagValue::Bool(features.context_warnings.warn_90),
        }
    }

    /// Assign `value`. Returns an error when the value's kind does not match
    /// the flag; the feature set is left untouched in that case.
    pub fn set(self, features: &mut FeatureSet, value: FlagValue) -> Result<(), FeaturesError> {
        match (self, value) {
            (Flag::IconStyle, FlagValue::Icon(style)) => {
                features.icon_style = style;
                Ok(())
            }
            (_, FlagValue::Bool(b)) => match self.bool_field_mut(features) {
                Some(slot) => {
                    *slot = b;
                    Ok(())
                }
                None => Err(self.kind_mismatch(value)),
            },
            (_, FlagValue::Icon(_)) => Err(self.kind_mismatch(value)),
        }
    }

    fn bool_field_mut(self, features: &mut FeatureSet) -> Option<&mut bool> {
        match self {
            Flag::BranchEnforcement => Some(&mut features.branch_enforcement),
            Flag::TaskDetection => Some(&mut features.task_detection),
            Flag::AutoUltrathink => Some(&mut features.auto_ultrathink),
            Flag::Warn85 => Some(&mut features.context_warnings.warn_85),
            Flag::Warn90 => Some(&mut features.context_warnings.warn_90),
            Flag::IconStyle => None,
        }
    }

    fn kind_mismatch(self, value: FlagValue) -> FeaturesError {
        FeaturesError::InvalidValue {
            key: self.key().into(),
            reason: format!("'{value}' is the wrong kind of value for this flag"),
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

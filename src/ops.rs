//! Result types for features commands.
//!
//! Every successful command yields a [`FeatureResult`]. Its `Display` output is
//! the one-line confirmation shown to the user and always carries the resulting
//! canonical value.

use std::fmt;

use crate::config::FeatureSet;
use crate::flag::Flag;
use crate::types::FlagValue;

/// Result of a features command. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureResult {
    /// A flag was assigned. `unrecognized` holds the raw icon value when it
    /// matched no alias and the fallback was stored instead.
    Set {
        flag: Flag,
        value: FlagValue,
        unrecognized: Option<String>,
    },
    /// A flag moved one step: a boolean flipped, or the icon style advanced.
    Toggled {
        flag: Flag,
        from: FlagValue,
        to: FlagValue,
    },
    /// Every flag and its current value.
    Listing { entries: Vec<(Flag, FlagValue)> },
}

impl fmt::Display for FeatureResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureResult::Set {
                flag,
                value,
                unrecognized,
            } => {
                write!(f, "Set {flag} = {value}")?;
                if let Some(raw) = unrecognized {
                    write!(
                        f,
                        " ('{raw}' is not a recognized {flag} value, using {value})"
                    )?;
                }
                Ok(())
            }
            FeatureResult::Toggled { flag, from, to } => {
                write!(f, "Toggled {flag}: {from} -> {to}")
            }
            FeatureResult::Listing { entries } => {
                for (i, (flag, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{flag} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// List every flag of `features` in registry order.
pub fn list_values(features: &FeatureSet) -> FeatureResult {
    let entries = Flag::ALL
        .into_iter()
        .map(|flag| (flag, flag.get(features)))
        .collect();
    FeatureResult::Listing { entries }
}

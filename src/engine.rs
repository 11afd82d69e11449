//! The features command engine.
//!
//! [`FeaturesEngine`] owns a [`ConfigStore`] handle and dispatches
//! [`FeatureAction`]s against it. Everything that can fail on user input
//! (parsing the tokens, resolving the flag name, parsing a boolean) happens
//! before the edit scope is opened, so a rejected command never loads or
//! saves anything. Mutation itself runs inside [`edit_config`], which only
//! saves when the closure succeeds.

use crate::error::FeaturesError;
use crate::flag::Flag;
use crate::normalize::{Normalizer, parse_bool};
use crate::ops::{FeatureResult, list_values};
use crate::store::{ConfigStore, edit_config, load_config};
use crate::types::{FeatureAction, FlagValue, RawIconStyle};

const USAGE: &str = "set <flag> <value> | toggle <flag> | list";
const SET_USAGE: &str = "set <flag> <value>";
const TOGGLE_USAGE: &str = "toggle <flag>";
const LIST_USAGE: &str = "list";

impl FeatureAction {
    /// Parse a token sequence such as `["set", "icon_style", "emoji"]`.
    ///
    /// The subcommand is matched case-insensitively. Argument counts are
    /// exact; anything else is a [`FeaturesError::MalformedCommand`].
    pub fn from_tokens<T: AsRef<str>>(tokens: &[T]) -> Result<Self, FeaturesError> {
        let malformed = |usage: &str| FeaturesError::MalformedCommand {
            usage: usage.to_string(),
        };

        let Some((command, rest)) = tokens.split_first() else {
            return Err(malformed(USAGE));
        };
        let args: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();

        match command.as_ref().trim().to_ascii_lowercase().as_str() {
            "set" => match args.as_slice() {
                [name, value] => Ok(FeatureAction::Set {
                    name: name.to_string(),
                    value: value.to_string(),
                }),
                _ => Err(malformed(SET_USAGE)),
            },
            "toggle" => match args.as_slice() {
                [name] => Ok(FeatureAction::Toggle {
                    name: name.to_string(),
                }),
                _ => Err(malformed(TOGGLE_USAGE)),
            },
            "list" => match args.as_slice() {
                [] => Ok(FeatureAction::List),
                _ => Err(malformed(LIST_USAGE)),
            },
            _ => Err(malformed(USAGE)),
        }
    }
}

/// Dispatches features commands against an explicit store.
#[derive(Debug)]
pub struct FeaturesEngine<S: ConfigStore> {
    store: S,
    normalizer: Normalizer,
}

impl<S: ConfigStore> FeaturesEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            normalizer: Normalizer::default(),
        }
    }

    /// Use a custom normalizer for `set icon_style` values.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Parse `tokens` and run the command, returning the confirmation message.
    pub fn handle_features_command<T: AsRef<str>>(
        &self,
        tokens: &[T],
    ) -> Result<String, FeaturesError> {
        let action = FeatureAction::from_tokens(tokens)?;
        Ok(self.handle(&action)?.to_string())
    }

    /// Convenience: handle an action and print the result to stdout.
    pub fn handle_and_print(&self, action: &FeatureAction) -> Result<(), FeaturesError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a [`FeatureAction`] (list / set / toggle).
    pub fn handle(&self, action: &FeatureAction) -> Result<FeatureResult, FeaturesError> {
        tracing::debug!(?action, "handling features command");
        match action {
            FeatureAction::List => {
                let settings = load_config(&self.store)?;
                Ok(list_values(&settings.features))
            }
            FeatureAction::Set { name, value } => {
                let flag = Flag::resolve(name)?;
                let (new_value, unrecognized) = self.parse_value(flag, value)?;

                edit_config(&self.store, |settings| {
                    flag.set(&mut settings.features, new_value)
                })?;

                Ok(FeatureResult::Set {
                    flag,
                    value: new_value,
                    unrecognized,
                })
            }
            FeatureAction::Toggle { name } => {
                let flag = Flag::resolve(name)?;

                let (from, to) = edit_config(&self.store, |settings| {
                    let from = flag.get(&settings.features);
                    let to = from.toggled();
                    flag.set(&mut settings.features, to)?;
                    Ok((from, to))
                })?;

                Ok(FeatureResult::Toggled { flag, from, to })
            }
        }
    }

    /// Turn a raw `set` argument into the flag's typed value. Icon styles never
    /// fail here; unrecognized input is returned alongside the fallback.
    fn parse_value(
        &self,
        flag: Flag,
        raw: &str,
    ) -> Result<(FlagValue, Option<String>), FeaturesError> {
        if flag == Flag::IconStyle {
            let normalized = self.normalizer.normalize(&RawIconStyle::from(raw));
            if !normalized.recognized {
                tracing::warn!(
                    value = raw,
                    fallback = %normalized.style,
                    "unrecognized icon_style, using fallback"
                );
                return Ok((FlagValue::Icon(normalized.style), Some(raw.to_string())));
            }
            return Ok((FlagValue::Icon(normalized.style), None));
        }

        match parse_bool(raw) {
            Some(b) => Ok((FlagValue::Bool(b), None)),
            None => Err(FeaturesError::InvalidValue {
                key: flag.key().into(),
                reason: format!("'{raw}' is not a boolean (expected true/false, yes/no, on/off)"),
            }),
        }
    }
}

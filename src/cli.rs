//! Clap adapter for the features command.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`FeaturesArgs`] and [`FeaturesSubcommand`] embed into an application's
//! own clap derive to provide `features list|set|toggle`.
//!
//! The only bridge to the core is [`FeaturesArgs::into_action()`], which
//! converts clap-parsed arguments into a [`FeatureAction`]. From there, all
//! logic flows through the clap-free
//! [`FeaturesEngine::handle()`](crate::FeaturesEngine::handle) API.

use clap::{Args, Subcommand};

use crate::types::FeatureAction;

/// Clap-derived args for the `features` subcommand group.
///
/// Embed this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
///
/// #[derive(Subcommand)]
/// enum Commands {
///     Features(FeaturesArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct FeaturesArgs {
    #[command(subcommand)]
    pub action: Option<FeaturesSubcommand>,
}

/// Available features subcommands.
#[derive(Debug, Subcommand)]
pub enum FeaturesSubcommand {
    /// Show every flag and its current value.
    List,
    /// Set a flag. Icon styles accept aliases such as "nerd-fonts" or "plain".
    Set {
        /// Flag name (e.g. "icon_style" or "warn_85").
        name: String,
        /// New value.
        value: String,
    },
    /// Flip a boolean flag, or advance icon_style to the next style.
    Toggle {
        /// Flag name.
        name: String,
    },
}

impl FeaturesArgs {
    /// Convert clap-parsed args into a framework-agnostic `FeatureAction`.
    ///
    /// Bare `features` (no subcommand) and explicit `features list` both map
    /// to `FeatureAction::List`.
    pub fn into_action(self) -> FeatureAction {
        match self.action {
            None | Some(FeaturesSubcommand::List) => FeatureAction::List,
            Some(FeaturesSubcommand::Set { name, value }) => FeatureAction::Set { name, value },
            Some(FeaturesSubcommand::Toggle { name }) => FeatureAction::Toggle { name },
        }
    }
}

//! Feature flags for a CLI tool, persisted in a config file and edited through
//! `set` and `toggle` commands.
//!
//! Featurefig owns two things: turning whatever a user (or an old config file)
//! wrote for a flag into one canonical value, and applying `set <flag> <value>`
//! / `toggle <flag>` commands to the persisted config without ever leaving it
//! half-written. The settings schema is a [confique](https://docs.rs/confique)
//! struct, so defaults, doc comments and the seeded config template all come
//! from one definition.
//!
//! ```ignore
//! let store = FileStore::locate(&SearchPath::Platform, "tool.toml", "tool")?;
//! let engine = FeaturesEngine::new(store);
//! let message = engine.handle_features_command(&["set", "icon_style", "nerd-fonts"])?;
//! assert_eq!(message, "Set icon_style = nerd_fonts");
//! ```
//!
//! # Flags
//!
//! ```toml
//! [features]
//! branch_enforcement = true
//! task_detection = true
//! auto_ultrathink = true
//! icon_style = "nerd_fonts"
//!
//! [features.context_warnings]
//! warn_85 = true
//! warn_90 = true
//! ```
//!
//! Every leaf is a [`Flag`]. Nested flags are addressed by their dotted key
//! (`context_warnings.warn_85`) or by their leaf name alone (`warn_85`).
//! Names are case-insensitive and `-` is read as `_`.
//!
//! # Normalizing icon styles
//!
//! `icon_style` has three canonical values: `nerd_fonts`, `emoji`, `ascii`.
//! [`normalize_icon_style`] accepts any [`RawIconStyle`] (an enum value, a
//! string alias, or a legacy boolean) and reports the canonical style together
//! with two facts: whether the input was recognized, and whether the canonical
//! form differs from what was supplied. It never fails. Unrecognized input
//! falls back to `nerd_fonts` and the caller decides what to tell the user.
//!
//! Legacy configs stored the flag as a boolean. `false` means `ascii`; `true`
//! maps to `nerd_fonts` unless a [`Normalizer`] is built with
//! [`with_legacy_true`](Normalizer::with_legacy_true). The same rules run when
//! a config file is loaded, so stale values come back canonical and are
//! rewritten on the next save.
//!
//! # Commands
//!
//! [`FeaturesEngine`] holds an explicit store handle and dispatches
//! [`FeatureAction`]s:
//!
//! - **`set <flag> <value>`**: icon styles go through the normalizer;
//!   booleans accept `true/false`, `yes/no`, `on/off`, `1/0`.
//! - **`toggle <flag>`**: booleans flip; `icon_style` advances
//!   `nerd_fonts → emoji → ascii → nerd_fonts`.
//! - **`list`**: every flag and its current value. Read-only.
//!
//! Token sequences parse with [`FeatureAction::from_tokens`]; clap users embed
//! [`FeaturesArgs`] instead (behind the `clap` Cargo feature, on by default).
//!
//! # Scoped edits
//!
//! All writes go through [`ConfigStore::edit`], which returns a
//! [`ConfigEdit`] guard. The guard loads on open, derefs to the settings, and
//! saves only when [`commit`](ConfigEdit::commit) is called. If it is dropped
//! uncommitted (an early `?` return, or a panic) nothing is written.
//! [`edit_config`] wraps the pattern in a closure.
//!
//! The engine resolves the flag name and parses the value before opening the
//! edit, so a rejected command performs no load and no save.
//!
//! # Stores
//!
//! - [`FileStore`]: one file, TOML or JSON by extension. A missing file loads
//!   as defaults. TOML saves are patched with `toml_edit`, preserving
//!   comments and keys the schema doesn't own; a new file is seeded from the
//!   generated template. Writes go through a temp file and a rename.
//! - [`MemoryStore`]: in-process, counting loads and saves.
//!
//! # Strict mode
//!
//! Strict mode is **on by default** for [`FileStore`]. When a config file
//! contains a key that doesn't match the schema, loading fails with the file
//! path, key name, and line number:
//!
//! ```text
//! Unknown key 'features.turbo' in /home/user/.config/tool/tool.toml (line 5)
//! ```
//!
//! Turn it off with [`.strict(false)`](FileStore::strict) when the file is
//! shared with other tools.
//!
//! # Error handling
//!
//! All fallible operations return [`FeaturesError`]. Enable the
//! `rich-errors` feature for `miette` diagnostics.

pub mod error;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod config;
mod engine;
mod file;
mod flag;
pub(crate) mod merge;
mod normalize;
mod ops;
mod persist;
mod resolve;
mod store;
mod validate;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::{FeaturesArgs, FeaturesSubcommand};
pub use config::{ContextWarningSettings, FeatureSet, Settings, generate_template};
pub use engine::FeaturesEngine;
pub use error::FeaturesError;
pub use file::{FileStore, resolve_search_path};
pub use flag::Flag;
pub use normalize::{
    FALLBACK_STYLE, Normalized, Normalizer, deserialize_icon_style, normalize_icon_style,
    parse_bool,
};
pub use ops::{FeatureResult, list_values};
pub use resolve::FileFormat;
pub use store::{ConfigEdit, ConfigStore, MemoryStore, edit_config, load_config};
pub use types::{FeatureAction, FlagValue, IconStyle, RawIconStyle, SearchPath};

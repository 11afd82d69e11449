use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the tool renders icons in its status output.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    /// Nerd Font glyphs (requires a patched font).
    #[default]
    NerdFonts,
    /// Unicode emoji.
    Emoji,
    /// Plain ASCII markers.
    Ascii,
}

impl IconStyle {
    /// Every style, in toggle order.
    pub const ALL: [IconStyle; 3] = [IconStyle::NerdFonts, IconStyle::Emoji, IconStyle::Ascii];

    /// The canonical token stored in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            IconStyle::NerdFonts => "nerd_fonts",
            IconStyle::Emoji => "emoji",
            IconStyle::Ascii => "ascii",
        }
    }

    /// The style a `toggle` moves to. The cycle wraps around.
    pub fn next(self) -> Self {
        match self {
            IconStyle::NerdFonts => IconStyle::Emoji,
            IconStyle::Emoji => IconStyle::Ascii,
            IconStyle::Ascii => IconStyle::NerdFonts,
        }
    }
}

impl fmt::Display for IconStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw icon style value as it arrives from a user, a config file, or code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIconStyle {
    /// Already an enum value.
    Style(IconStyle),
    /// A string, possibly an alias.
    Text(String),
    /// Legacy boolean form.
    Bool(bool),
}

impl From<IconStyle> for RawIconStyle {
    fn from(style: IconStyle) -> Self {
        RawIconStyle::Style(style)
    }
}

impl From<&str> for RawIconStyle {
    fn from(s: &str) -> Self {
        RawIconStyle::Text(s.to_string())
    }
}

impl From<String> for RawIconStyle {
    fn from(s: String) -> Self {
        RawIconStyle::Text(s)
    }
}

impl From<bool> for RawIconStyle {
    fn from(b: bool) -> Self {
        RawIconStyle::Bool(b)
    }
}

/// The typed value of a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Icon(IconStyle),
}

impl FlagValue {
    /// Flip a boolean, or advance an icon style one step along its cycle.
    pub fn toggled(self) -> Self {
        match self {
            FlagValue::Bool(b) => FlagValue::Bool(!b),
            FlagValue::Icon(style) => FlagValue::Icon(style.next()),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::Icon(style) => write!(f, "{style}"),
        }
    }
}

/// Where a [`FileStore`](crate::FileStore) looks for its config file.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".mytool")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

/// A features operation, independent of any CLI framework.
/// Token sequences and the clap adapter both convert into this.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureAction {
    List,
    Set { name: String, value: String },
    Toggle { name: String },
}

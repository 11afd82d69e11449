//! Canonicalization of raw flag values.
//!
//! [`Normalizer::normalize`] maps any [`RawIconStyle`] to an [`IconStyle`] and
//! reports whether the input was recognized and whether the canonical form
//! differs from what was supplied. It never fails: unrecognized input falls
//! back to [`IconStyle::NerdFonts`] with `recognized = false`, and the caller
//! decides how to tell the user.
//!
//! Legacy configs stored the icon flag as a boolean (`false` meaning plain
//! ASCII). [`deserialize_icon_style`] applies the same rules while a config is
//! loaded, so stale files come back canonical.

use serde::{Deserialize, Deserializer};

use crate::types::{IconStyle, RawIconStyle};

/// Style used when a raw value matches no alias.
pub const FALLBACK_STYLE: IconStyle = IconStyle::NerdFonts;

/// Outcome of normalizing one raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub style: IconStyle,
    /// The canonical form differs from the raw input as supplied.
    pub changed: bool,
    /// The raw input matched a known alias or type.
    pub recognized: bool,
}

/// Icon style normalizer.
///
/// The only knob is which style legacy `true` maps to. `false` always means
/// [`IconStyle::Ascii`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    legacy_true: IconStyle,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            legacy_true: IconStyle::NerdFonts,
        }
    }
}

impl Normalizer {
    /// Map legacy boolean `true` to `style` instead of [`IconStyle::NerdFonts`].
    pub fn with_legacy_true(mut self, style: IconStyle) -> Self {
        self.legacy_true = style;
        self
    }

    pub fn normalize(&self, raw: &RawIconStyle) -> Normalized {
        match raw {
            RawIconStyle::Style(style) => Normalized {
                style: *style,
                changed: false,
                recognized: true,
            },
            RawIconStyle::Bool(b) => Normalized {
                style: self.style_for_bool(*b),
                changed: true,
                recognized: true,
            },
            RawIconStyle::Text(text) => match self.style_for_text(text) {
                Some(style) => Normalized {
                    style,
                    changed: text != style.as_str(),
                    recognized: true,
                },
                None => Normalized {
                    style: FALLBACK_STYLE,
                    changed: true,
                    recognized: false,
                },
            },
        }
    }

    fn style_for_bool(&self, b: bool) -> IconStyle {
        if b { self.legacy_true } else { IconStyle::Ascii }
    }

    fn style_for_text(&self, text: &str) -> Option<IconStyle> {
        let key: String = text
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "nerd_fonts" | "nerdfonts" | "nerd_font" | "nerd" => Some(IconStyle::NerdFonts),
            "emoji" | "emojis" => Some(IconStyle::Emoji),
            "ascii" | "plain" | "text" => Some(IconStyle::Ascii),
            _ => parse_bool(text).map(|b| self.style_for_bool(b)),
        }
    }
}

/// Normalize with the default legacy mapping (`true` → nerd fonts).
pub fn normalize_icon_style(raw: impl Into<RawIconStyle>) -> Normalized {
    Normalizer::default().normalize(&raw.into())
}

/// Parse the canonical truthy/falsy spellings. Case-insensitive, trimmed.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enabled" | "enable" => Some(true),
        "false" | "no" | "off" | "0" | "disabled" | "disable" => Some(false),
        _ => None,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredIconStyle {
    Flag(bool),
    Name(String),
}

/// `deserialize_with` hook for the `icon_style` field.
///
/// Accepts canonical tokens, aliases and legacy booleans. Unrecognized values
/// load as [`FALLBACK_STYLE`] with a warning instead of failing the whole load.
pub fn deserialize_icon_style<'de, D>(deserializer: D) -> Result<IconStyle, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match StoredIconStyle::deserialize(deserializer)? {
        StoredIconStyle::Flag(b) => RawIconStyle::Bool(b),
        StoredIconStyle::Name(s) => RawIconStyle::Text(s),
    };
    let normalized = Normalizer::default().normalize(&raw);
    if !normalized.recognized {
        tracing::warn!(
            value = ?raw,
            fallback = %normalized.style,
            "unrecognized stored icon_style, using fallback"
        );
    } else if normalized.changed {
        tracing::debug!(value = ?raw, style = %normalized.style, "normalized stored icon_style");
    }
    Ok(normalized.style)
}

// ABOUTME: Color themes for the lesson-slides application
// ABOUTME: Resolves a background color to its matching foreground and parses hex colors

use crate::errors::{DeckError, Result};
use log::warn;

/// Background colors offered on the landing page, paired with a readable foreground.
pub const MATCHING_COLORS: &[(&str, &str)] = &[
    ("#11B5E4", "#eee"),
    ("#162521", "#eee"),
    ("#791E94", "#eee"),
    ("#23967F", "#222"),
    ("#E9806E", "#eee"),
    ("#F5F0F6", "#666"),
];

/// CSS color keywords accepted in place of a hex value.
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("silver", "#c0c0c0"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("white", "#ffffff"),
    ("maroon", "#800000"),
    ("red", "#ff0000"),
    ("purple", "#800080"),
    ("fuchsia", "#ff00ff"),
    ("green", "#008000"),
    ("lime", "#00ff00"),
    ("olive", "#808000"),
    ("yellow", "#ffff00"),
    ("navy", "#000080"),
    ("blue", "#0000ff"),
    ("teal", "#008080"),
    ("aqua", "#00ffff"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
];

/// Foreground used for any background missing from `MATCHING_COLORS`.
pub const DEFAULT_FOREGROUND: &str = "#fff";

/// Fill used when a background cannot be parsed. This is the initial PDF fill
/// color, and it keeps the default foreground readable.
pub const FALLBACK_BACKGROUND: Rgb = Rgb::BLACK;

/// Look up the foreground paired with a background color.
pub fn matching_foreground(background: &str) -> Option<&'static str> {
    MATCHING_COLORS
        .iter()
        .find(|(bg, _)| *bg == background)
        .map(|(_, fg)| *fg)
}

/// The resolved (foreground, background) pair of a deck, as color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub foreground: String,
    pub background: String,
}

impl Theme {
    /// Resolve a user supplied background. Unknown backgrounds are not an
    /// error: they keep the default foreground and pass through unchanged.
    pub fn resolve(background: &str) -> Self {
        let foreground = matching_foreground(background).unwrap_or(DEFAULT_FOREGROUND);
        Self {
            foreground: foreground.to_string(),
            background: background.to_string(),
        }
    }

    /// Parse both colors into drawable values.
    ///
    /// An unparseable color still renders: the background falls back to
    /// `FALLBACK_BACKGROUND` and the theme strings are left untouched.
    pub fn palette(&self) -> Palette {
        Palette {
            foreground: Rgb::parse(&self.foreground).unwrap_or(Rgb::WHITE),
            background: Rgb::parse(&self.background).unwrap_or_else(|e| {
                warn!("{}; filling pages with the fallback background", e);
                FALLBACK_BACKGROUND
            }),
        }
    }
}

/// Parsed theme colors handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub foreground: Rgb,
    pub background: Rgb,
}

/// An sRGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color or one of `NAMED_COLORS`.
    pub fn parse(value: &str) -> Result<Self> {
        if value.starts_with('#') {
            return Self::parse_hex(value);
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .ok_or_else(|| DeckError::InvalidColor(value.to_string()))
            .and_then(|(_, hex)| Self::parse_hex(hex))
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive digits).
    pub fn parse_hex(value: &str) -> Result<Self> {
        let invalid = || DeckError::InvalidColor(value.to_string());
        let digits = value.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        let (r, g, b) = match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                (expand(0)?, expand(1)?, expand(2)?)
            }
            6 => (
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ),
            _ => return Err(invalid()),
        };

        Ok(Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ))
    }
}

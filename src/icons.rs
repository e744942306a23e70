// ABOUTME: Icon glyph table for the lesson-slides application
// ABOUTME: Maps symbolic icon names to character codes in the dingbat icon font

use crate::errors::{DeckError, Result};

/// Symbolic icon names and their ZapfDingbats character codes.
pub const ICONS: &[(&str, u8)] = &[
    ("server", 0x6F),
    ("star", 0x48),
    ("heart", 0xAA),
    ("angle-right", 0xE4),
    ("check", 0x34),
    ("cross", 0x38),
    ("pencil", 0x2F),
    ("phone", 0x25),
    ("envelope", 0x29),
    ("plane", 0x28),
    ("scissors", 0x22),
    ("pointer", 0x2B),
];

/// A single glyph of the icon font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    pub code: u8,
}

/// Look up an icon by name.
pub fn lookup(name: &str) -> Result<Glyph> {
    ICONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(name, code)| Glyph { name, code })
        .ok_or_else(|| DeckError::IconNotFound(name.to_string()))
}

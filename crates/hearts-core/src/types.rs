//! # Types Module
//!
//! Shared data types used across the crate.
//!
//! ## Key Types
//! - `Color`: Float-based RGBA color, parsed from CSS names or hex strings.
//! - `ShapeId`: Identifier of an emitted shape, taken from the trigger count.

use crate::errors::HeartsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of an emitted shape.
///
/// Ids come from the emitter's trigger count, so they only ever increase and
/// their order is the creation order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub i64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a RGBA color in float format (0.0 - 1.0).
///
/// Serialized as a `#rrggbbaa` hex string; deserialized from any string
/// [`Color::parse`] accepts.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("red", (255, 0, 0)),
    ("crimson", (220, 20, 60)),
    ("tomato", (255, 99, 71)),
    ("orange", (255, 165, 0)),
    ("gold", (255, 215, 0)),
    ("yellow", (255, 255, 0)),
    ("green", (0, 128, 0)),
    ("lime", (0, 255, 0)),
    ("teal", (0, 128, 128)),
    ("cyan", (0, 255, 255)),
    ("blue", (0, 0, 255)),
    ("navy", (0, 0, 128)),
    ("purple", (128, 0, 128)),
    ("violet", (238, 130, 238)),
    ("magenta", (255, 0, 255)),
    ("pink", (255, 192, 203)),
    ("hotpink", (255, 105, 180)),
    ("deeppink", (255, 20, 147)),
    ("salmon", (250, 128, 114)),
    ("coral", (255, 127, 80)),
    ("gray", (128, 128, 128)),
    ("grey", (128, 128, 128)),
];

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parses a CSS color name, `transparent`, or a `#rgb`, `#rrggbb` or
    /// `#rrggbbaa` hex string.
    pub fn parse(input: &str) -> Option<Color> {
        let s = input.trim();
        if s.starts_with('#') {
            return parse_hex_color(s);
        }

        let lower = s.to_ascii_lowercase();
        if lower == "transparent" {
            return Some(Color::new(0.0, 0.0, 0.0, 0.0));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, (r, g, b))| Color::from_rgba8(*r, *g, *b, 255))
    }

    /// Converts to `[r, g, b, a]` bytes.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        ]
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = HeartsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s).ok_or_else(|| HeartsError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = HeartsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Helper to parse hex strings like "#RRGGBB", "#RGB" or "#RRGGBBAA".
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }
    let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    let (r, g, b, a) = match hex.len() {
        8 => (byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?),
        6 => (byte(0..2)?, byte(2..4)?, byte(4..6)?, 255),
        3 => (byte(0..1)? * 17, byte(1..2)? * 17, byte(2..3)? * 17, 255),
        _ => return None,
    };

    Some(Color::from_rgba8(r, g, b, a))
}

// SPDX-License-Identifier: MIT
//
// Rgb — an opaque 8-bit sRGB color with hex and HSL conversions.
//
// Conversion pipeline:
//
//   HSL (degrees, percent, percent) → sRGB (0.0–1.0) → Rgb (0–255) ↔ hex
//
// Hue wraps modulo 360 (negative hues included). Saturation and
// lightness are clamped to 0–100 before conversion. Channel values are
// rounded half-up, matching how browsers resolve `hsl()` to bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Returned when a string is not exactly six hex digits (optionally `#`-prefixed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {input:?}: expected #rrggbb")]
pub struct ParseHexError {
    input: String,
}

impl ParseHexError {
    /// The rejected input, as given.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque sRGB color with 8 bits per channel.
///
/// `Display` and serde both produce the normalized `#rrggbb` form.
///
/// # Examples
///
/// ```
/// use seedtone_color::Rgb;
///
/// let blue: Rgb = "#3B82F6".parse().unwrap();
/// assert_eq!(blue.to_hex(), "#3b82f6");
///
/// let gray = Rgb::from_hsl(210.0, 0.0, 50.0);
/// assert_eq!(gray, Rgb::new(128, 128, 128));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value. The top byte is ignored.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u32(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Parse `#rrggbb` or `rrggbb`, case-insensitive, surrounding
    /// whitespace ignored. Shorthand (`#rgb`) and alpha forms are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ParseHexError`] on anything other than six hex digits.
    pub fn from_hex(s: &str) -> Result<Self, ParseHexError> {
        parse_hex(s).ok_or_else(|| ParseHexError {
            input: s.to_owned(),
        })
    }

    /// Whether `s` parses as a six-digit hex color.
    #[must_use]
    pub fn is_valid_hex(s: &str) -> bool {
        parse_hex(s).is_some()
    }

    /// Convert HSL to sRGB.
    ///
    /// - `h`: hue in degrees, any real value (wrapped into 0–360)
    /// - `s`: saturation percent, clamped to 0–100
    /// - `l`: lightness percent, clamped to 0–100
    #[must_use]
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 100.0) / 100.0;
        let l = l.clamp(0.0, 100.0) / 100.0;

        let c = (1.0 - 2.0f64.mul_add(l, -1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - ((hp % 2.0) - 1.0).abs());

        let (r, g, b) = match hp {
            hp if hp < 1.0 => (c, x, 0.0),
            hp if hp < 2.0 => (x, c, 0.0),
            hp if hp < 3.0 => (0.0, c, x),
            hp if hp < 4.0 => (0.0, x, c),
            hp if hp < 5.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let m = l - c / 2.0;
        Self::new(unit_to_u8(r + m), unit_to_u8(g + m), unit_to_u8(b + m))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as 0.0–1.0 floats.
    #[must_use]
    pub fn to_unit(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }

    /// Linear per-channel interpolation toward `other`.
    ///
    /// `t = 0.0` returns `self`, `t = 1.0` returns `other`. Each channel is
    /// rounded to the nearest byte. `t` is clamped to 0.0–1.0.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            byte_from_f64((b - a).mul_add(t, a))
        };
        Self::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&bytes[0..2])?;
    let g = parse_hex_byte(&bytes[2..4])?;
    let b = parse_hex_byte(&bytes[4..6])?;
    Some(Rgb::new(r, g, b))
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some((hi << 4) | lo)
}

/// 0.0–1.0 → 0–255, rounded half-up.
#[inline]
fn unit_to_u8(v: f64) -> u8 {
    byte_from_f64(v * 255.0)
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn byte_from_f64(v: f64) -> u8 {
    // Clamp first so the cast can never wrap.
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    // ── Hex ─────────────────────────────────────────────────────────

    #[test]
    fn parse_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#0b1020"), Ok(Rgb::new(0x0b, 0x10, 0x20)));
        assert_eq!(Rgb::from_hex("0b1020"), Ok(Rgb::new(0x0b, 0x10, 0x20)));
    }

    #[test]
    fn parse_is_case_insensitive_and_normalizes() {
        let c = Rgb::from_hex("  #E8EFFF ").unwrap();
        assert_eq!(c.to_hex(), "#e8efff");
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["", "#", "#fff", "#ffff", "#fffffff", "#gg0000", "12345", "#12 456", "##123456"] {
            assert!(Rgb::from_hex(bad).is_err(), "accepted {bad:?}");
            assert!(!Rgb::is_valid_hex(bad));
        }
    }

    #[test]
    fn parse_error_keeps_input() {
        let err = Rgb::from_hex("nope").unwrap_err();
        assert_eq!(err.input(), "nope");
        assert!(err.to_string().contains("#rrggbb"));
    }

    #[test]
    fn from_u32_packs_channels() {
        assert_eq!(Rgb::from_u32(0x3b82f6), Rgb::new(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Rgb = serde_json::from_str("\"#FF0010\"").unwrap();
        assert_eq!(back, Rgb::new(255, 0, 16));
        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
    }

    // ── HSL ─────────────────────────────────────────────────────────

    #[test]
    fn hsl_primaries() {
        assert_eq!(Rgb::from_hsl(0.0, 100.0, 50.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsl(120.0, 100.0, 50.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsl(240.0, 100.0, 50.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn hsl_extremes() {
        assert_eq!(Rgb::from_hsl(77.0, 40.0, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::from_hsl(77.0, 40.0, 100.0), Rgb::WHITE);
    }

    #[test]
    fn hsl_hue_wraps() {
        assert_eq!(Rgb::from_hsl(360.0, 80.0, 40.0), Rgb::from_hsl(0.0, 80.0, 40.0));
        assert_eq!(Rgb::from_hsl(-120.0, 80.0, 40.0), Rgb::from_hsl(240.0, 80.0, 40.0));
        assert_eq!(Rgb::from_hsl(725.0, 80.0, 40.0), Rgb::from_hsl(5.0, 80.0, 40.0));
    }

    #[test]
    fn hsl_clamps_out_of_range() {
        assert_eq!(Rgb::from_hsl(30.0, 150.0, 50.0), Rgb::from_hsl(30.0, 100.0, 50.0));
        assert_eq!(Rgb::from_hsl(30.0, 50.0, -10.0), Rgb::BLACK);
    }

    #[test]
    fn hsl_known_value() {
        // hsl(210, 10%, 12%) — a Minimal dark background.
        assert_eq!(Rgb::from_hsl(210.0, 10.0, 12.0).to_hex(), "#1c1f22");
    }

    // ── Mix ─────────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn mix_midpoint_rounds() {
        let mid = Rgb::BLACK.mix(Rgb::WHITE, 0.5);
        assert_eq!(mid, Rgb::new(128, 128, 128));
    }

    proptest! {
        #[test]
        fn hex_roundtrip(r: u8, g: u8, b: u8) {
            let c = Rgb::new(r, g, b);
            prop_assert_eq!(Rgb::from_hex(&c.to_hex().to_uppercase()), Ok(c));
        }

        #[test]
        fn hsl_never_panics(h in -1000.0f64..1000.0, s in -50.0f64..150.0, l in -50.0f64..150.0) {
            let c = Rgb::from_hsl(h, s, l);
            prop_assert_eq!(c.to_hex().len(), 7);
        }
    }
}

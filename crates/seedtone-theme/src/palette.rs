// SPDX-License-Identifier: MIT
//! Palette generation — six named color tokens from a seed, mode and mood.
//!
//! The generator samples neutrals (bg, surface) around a mood-specific
//! hue, picks an independent primary hue and an offset accent hue, and
//! pins text to a fixed near-black or near-white so the default output
//! already clears the contrast target. Muted is a mix of text and bg.
//!
//! Individually locked tokens are copied from the previous palette after
//! sampling. The group-level palette lock is the caller's business: a
//! locked palette must not reach [`generate_palette`] at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use seedtone_color::Rgb;
use tracing::debug;

use crate::mood::{Mode, Mood, ParseNameError, rules};
use crate::rng::Mulberry32;

/// Text on light backgrounds.
pub const TEXT_ON_LIGHT: Rgb = Rgb::from_u32(0x0b0f1a);

/// Text on dark backgrounds.
pub const TEXT_ON_DARK: Rgb = Rgb::from_u32(0xeaf0ff);

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// One of the six palette slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Bg,
    Surface,
    Text,
    Muted,
    Primary,
    Accent,
}

impl Token {
    /// All tokens, in export order.
    pub const ALL: [Self; 6] = [
        Self::Bg,
        Self::Surface,
        Self::Text,
        Self::Muted,
        Self::Primary,
        Self::Accent,
    ];

    /// Short key used in CSS variables and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bg => "bg",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::Muted => "muted",
            Self::Primary => "primary",
            Self::Accent => "accent",
        }
    }

    /// Human-facing name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bg => "background",
            _ => self.as_str(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Token {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle) || t.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                ParseNameError::new("token", s, "bg, surface, text, muted, primary, accent")
            })
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A complete six-token palette. Every slot is always populated.
///
/// Deserialization validates each value as `#rrggbb` and normalizes case,
/// so a `Palette` obtained from anywhere is already well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Palette {
    pub bg: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub primary: Rgb,
    pub accent: Rgb,
}

impl Default for Palette {
    /// The pre-generation placeholder: a dark navy scheme.
    fn default() -> Self {
        Self {
            bg: Rgb::from_u32(0x0b1020),
            surface: Rgb::from_u32(0x101a33),
            text: Rgb::from_u32(0xe8efff),
            muted: Rgb::from_u32(0xb8c2dd),
            primary: Rgb::from_u32(0x3b82f6),
            accent: Rgb::from_u32(0x22d3ee),
        }
    }
}

impl Palette {
    #[must_use]
    pub const fn get(&self, token: Token) -> Rgb {
        match token {
            Token::Bg => self.bg,
            Token::Surface => self.surface,
            Token::Text => self.text,
            Token::Muted => self.muted,
            Token::Primary => self.primary,
            Token::Accent => self.accent,
        }
    }

    pub const fn set(&mut self, token: Token, color: Rgb) {
        match token {
            Token::Bg => self.bg = color,
            Token::Surface => self.surface = color,
            Token::Text => self.text = color,
            Token::Muted => self.muted = color,
            Token::Primary => self.primary = color,
            Token::Accent => self.accent = color,
        }
    }

    /// A copy with one token replaced.
    #[must_use]
    pub const fn with(mut self, token: Token, color: Rgb) -> Self {
        self.set(token, color);
        self
    }

    /// `(token, color)` pairs in export order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, Rgb)> + '_ {
        Token::ALL.into_iter().map(|t| (t, self.get(t)))
    }
}

// ---------------------------------------------------------------------------
// TokenLocks
// ---------------------------------------------------------------------------

/// Per-token lock flags. A locked token keeps its previous value across
/// regeneration even when the palette as a whole is unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct TokenLocks {
    pub bg: bool,
    pub surface: bool,
    pub text: bool,
    pub muted: bool,
    pub primary: bool,
    pub accent: bool,
}

impl TokenLocks {
    #[must_use]
    pub const fn get(&self, token: Token) -> bool {
        match token {
            Token::Bg => self.bg,
            Token::Surface => self.surface,
            Token::Text => self.text,
            Token::Muted => self.muted,
            Token::Primary => self.primary,
            Token::Accent => self.accent,
        }
    }

    pub const fn set(&mut self, token: Token, locked: bool) {
        match token {
            Token::Bg => self.bg = locked,
            Token::Surface => self.surface = locked,
            Token::Text => self.text = locked,
            Token::Muted => self.muted = locked,
            Token::Primary => self.primary = locked,
            Token::Accent => self.accent = locked,
        }
    }

    /// Flip one lock and return its new state.
    pub const fn toggle(&mut self, token: Token) -> bool {
        let next = !self.get(token);
        self.set(token, next);
        next
    }

    #[must_use]
    pub fn any(&self) -> bool {
        Token::ALL.into_iter().any(|t| self.get(t))
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// The RNG key for palette generation. Distinct from the font key so the
/// two streams never interfere.
#[must_use]
pub fn palette_key(seed: &str, mode: Mode, mood: Mood) -> String {
    format!("{seed}|palette|{mode}|{mood}")
}

/// Generate a palette. Pure: the same arguments always give the same output.
///
/// Tokens flagged in `locks` are copied from `previous`.
#[must_use]
pub fn generate_palette(
    seed: &str,
    mode: Mode,
    mood: Mood,
    previous: &Palette,
    locks: &TokenLocks,
) -> Palette {
    let mut rng = Mulberry32::from_key(&palette_key(seed, mode, mood));
    let r = rules(mood, mode);

    // Draw order is part of the output contract; do not reorder.
    let neutral_hue = f64::from(r.neutral_hue.resolve(&mut rng));
    let neutral_sat = r.neutral_sat.sample(&mut rng);

    let bg = Rgb::from_hsl(neutral_hue, f64::from(neutral_sat), f64::from(r.bg_l.sample(&mut rng)));
    let surface_sat = neutral_sat + rng.int_in(0, 8);
    let surface = Rgb::from_hsl(
        neutral_hue,
        f64::from(surface_sat),
        f64::from(r.surface_l.sample(&mut rng)),
    );

    let base_hue = r.primary_hue.sample(&mut rng);
    let accent_hue = (base_hue + r.accent_hue_offset.sample(&mut rng)) % 360;

    let primary_sat = r.primary_sat.sample(&mut rng);
    let primary_l = r.primary_l.sample(&mut rng);
    let primary = Rgb::from_hsl(f64::from(base_hue), f64::from(primary_sat), f64::from(primary_l));

    let accent_sat = r.accent_sat.sample(&mut rng);
    let accent_l = r.accent_l.sample(&mut rng);
    let accent = Rgb::from_hsl(f64::from(accent_hue), f64::from(accent_sat), f64::from(accent_l));

    let text = if mode.is_dark() { TEXT_ON_DARK } else { TEXT_ON_LIGHT };
    let muted = text.mix(bg, r.muted_mix);

    let mut out = Palette {
        bg,
        surface,
        text,
        muted,
        primary,
        accent,
    };
    for token in Token::ALL {
        if locks.get(token) {
            out.set(token, previous.get(token));
        }
    }

    debug!(seed, %mode, %mood, base_hue, accent_hue, "generated palette");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// SPDX-License-Identifier: MIT
//! Font pairing — a curated display/body catalog and the seeded picker.
//!
//! The catalog is closed: generation only ever returns names listed here.
//! Names arriving from outside (share links, manual edits) are carried as
//! plain strings and resolved through [`font_meta`], which falls back to a
//! generic sans entry for anything unknown.
//!
//! Pairing rules, applied in order after the display pick:
//!
//! 1. A condensed display under a serif-leaning mood becomes a serif face.
//! 2. A serif display forces a sans body (no serif-on-serif).
//! 3. A condensed display forces the safest body face.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mood::Mood;
use crate::rng::Mulberry32;

/// Generic family for fallback stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontCategory {
    Sans,
    Serif,
}

impl FontCategory {
    /// System fallback stack appended after the named family.
    #[must_use]
    pub const fn fallback_stack(self) -> &'static str {
        match self {
            Self::Sans => {
                "ui-sans-serif, system-ui, -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, 'Apple Color Emoji', 'Segoe UI Emoji'"
            }
            Self::Serif => "ui-serif, Georgia, Cambria, 'Times New Roman', Times, serif",
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFace {
    pub name: &'static str,
    pub category: FontCategory,
    /// `;`-separated weight list, as the font CSS API expects.
    pub weights: &'static str,
}

impl FontFace {
    const fn sans(name: &'static str, weights: &'static str) -> Self {
        Self { name, category: FontCategory::Sans, weights }
    }

    const fn serif(name: &'static str, weights: &'static str) -> Self {
        Self { name, category: FontCategory::Serif, weights }
    }

    #[must_use]
    pub const fn is_serif(&self) -> bool {
        matches!(self.category, FontCategory::Serif)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Faces suitable for headings.
pub const DISPLAY_FACES: &[FontFace] = &[
    FontFace::sans("Space Grotesk", "500;600;700"),
    FontFace::sans("Plus Jakarta Sans", "500;600;700"),
    FontFace::sans("DM Sans", "500;700"),
    FontFace::sans("Sora", "500;600;700"),
    FontFace::sans("Poppins", "500;600;700"),
    FontFace::sans("Raleway", "500;600;700"),
    FontFace::sans("Oswald", "500;600;700"),
    FontFace::sans(CONDENSED_DISPLAY, "400"),
    FontFace::serif(SERIF_DISPLAY, "500;600;700"),
    FontFace::serif("Fraunces", "500;600;700"),
    FontFace::serif("Cormorant Garamond", "500;600;700"),
];

/// Faces suitable for running text.
pub const BODY_FACES: &[FontFace] = &[
    FontFace::sans(SAFE_BODY, "400;500;600;700"),
    FontFace::sans("Source Sans 3", "400;600;700"),
    FontFace::sans("Work Sans", "400;500;600;700"),
    FontFace::sans("Manrope", "400;500;600;700"),
    FontFace::sans("IBM Plex Sans", "400;500;600;700"),
    FontFace::sans("Noto Sans", "400;600;700"),
    FontFace::sans("Nunito Sans", "400;600;700"),
    FontFace::serif("Merriweather", "400;700"),
    FontFace::serif("Source Serif 4", "400;600;700"),
];

/// The ultra-condensed display face that triggers pairing overrides.
pub const CONDENSED_DISPLAY: &str = "Bebas Neue";

/// Replaces the condensed display under serif-leaning moods.
pub const SERIF_DISPLAY: &str = "Playfair Display";

/// Body face forced under the condensed display.
pub const SAFE_BODY: &str = "Inter";

/// Look up a catalog entry by exact name, display list first.
#[must_use]
pub fn find_face(name: &str) -> Option<&'static FontFace> {
    DISPLAY_FACES.iter().chain(BODY_FACES).find(|f| f.name == name)
}

/// Resolved metadata for any family name.
///
/// Unknown names get a synthetic sans entry with weights `400;600;700`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMeta {
    pub name: String,
    pub category: FontCategory,
    pub weights: String,
}

#[must_use]
pub fn font_meta(name: &str) -> FontMeta {
    find_face(name).map_or_else(
        || FontMeta {
            name: name.to_owned(),
            category: FontCategory::Sans,
            weights: "400;600;700".to_owned(),
        },
        |f| FontMeta {
            name: f.name.to_owned(),
            category: f.category,
            weights: f.weights.to_owned(),
        },
    )
}

/// `'<Name>', <fallbacks>` for a CSS `font-family` declaration.
#[must_use]
pub fn font_stack(name: &str) -> String {
    let meta = font_meta(name);
    format!("'{}', {}", meta.name, meta.category.fallback_stack())
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// A display/body pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fonts {
    pub display: String,
    pub body: String,
}

impl Fonts {
    #[must_use]
    pub fn new(display: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            body: body.into(),
        }
    }

    /// The same pair with roles exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self::new(self.body.clone(), self.display.clone())
    }
}

impl Default for Fonts {
    fn default() -> Self {
        Self::new("Space Grotesk", SAFE_BODY)
    }
}

impl fmt::Display for Fonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.display, self.body)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// The RNG key for font generation.
#[must_use]
pub fn fonts_key(seed: &str, mood: Mood) -> String {
    format!("{seed}|fonts|{mood}")
}

/// Pick a display/body pair. Pure and deterministic.
///
/// `previous.display` is excluded from the body pool so a swap-then-regen
/// never lands on the same family twice.
#[must_use]
pub fn generate_fonts(seed: &str, mood: Mood, previous: &Fonts) -> Fonts {
    let mut rng = Mulberry32::from_key(&fonts_key(seed, mood));

    let display_pool: Vec<&FontFace> = DISPLAY_FACES
        .iter()
        .filter(|f| !mood.prefers_sans_display() || !f.is_serif())
        .collect();
    let body_pool: Vec<&FontFace> = BODY_FACES
        .iter()
        .filter(|f| f.name != previous.display)
        .collect();

    let mut display = *rng.pick(&display_pool);
    if display.name == CONDENSED_DISPLAY && mood.prefers_serif_display() {
        display = find_face(SERIF_DISPLAY).unwrap_or(display);
    }

    // Always drawn, even when overridden below, so the stream stays aligned.
    let mut body = *rng.pick(&body_pool);
    if display.is_serif() {
        let sans_bodies: Vec<&FontFace> = BODY_FACES.iter().filter(|f| !f.is_serif()).collect();
        body = *rng.pick(&sans_bodies);
    }
    if display.name == CONDENSED_DISPLAY {
        body = find_face(SAFE_BODY).unwrap_or(body);
    }

    let display_name = display.name;
    debug!(seed, %mood, display = display_name, body = body.name, "generated fonts");
    Fonts::new(display.name, body.name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

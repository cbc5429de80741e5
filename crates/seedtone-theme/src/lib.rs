// SPDX-License-Identifier: MIT
//! # seedtone-theme — seeded palette and font pairing
//!
//! Turns a free-text seed plus a mood and a light/dark mode into a six-token
//! palette and a display/body font pair. Same inputs, same output, always.
//!
//! # Pipeline
//!
//! ```text
//! seed + "|palette|" + mode + "|" + mood        seed + "|fonts|" + mood
//!     │                                              │
//!     ▼                                              ▼
//! rng.rs:      FNV-1a → mulberry32             rng.rs
//!     │                                              │
//!     ▼                                              ▼
//! mood.rs:     per-mood sampling bands         fonts.rs: catalog + pairing rules
//!     │
//!     ▼
//! palette.rs:  bg/surface/text/muted/primary/accent, token locks applied
//!     │
//!     ▼
//! contrast.rs: three-pair report, text/muted auto-fix
//!     │
//!     ▼
//! export.rs:   CSS variables, font-loading snippet
//! ```
//!
//! Palette and font streams are keyed separately, so regenerating one never
//! shifts the other.

// Hue/saturation/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod contrast;
pub mod export;
pub mod fonts;
pub mod mood;
pub mod palette;
pub mod rng;

pub use contrast::{ContrastPair, ContrastReport, PairKind, TARGET_RATIO, auto_fix, evaluate};
pub use export::{css_variables, font_snippet, google_fonts_href};
pub use fonts::{FontCategory, FontFace, FontMeta, Fonts, font_meta, font_stack, generate_fonts};
pub use mood::{Mode, Mood, ParseNameError};
pub use palette::{Palette, Token, TokenLocks, generate_palette};
pub use seedtone_color::Rgb;

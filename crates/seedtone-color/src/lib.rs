// SPDX-License-Identifier: MIT
//
// seedtone-color — the color math under every generated palette.
//
// Everything in this crate is a pure function over 8-bit sRGB values:
//
//   HSL (h wrapped, s/l clamped) → Rgb (0–255) ↔ "#rrggbb"
//   Rgb → relative luminance (WCAG 2.x) → contrast ratio
//
// Palettes are stored as `Rgb`, which serializes as a lowercase hex
// string. Parsing accepts either case and an optional leading `#`, so a
// value survives any number of parse/format round trips unchanged.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]

pub mod color;
pub mod contrast;

pub use color::{ParseHexError, Rgb};
pub use contrast::{NEAR_BLACK, NEAR_WHITE, best_black_or_white, contrast_ratio, relative_luminance};

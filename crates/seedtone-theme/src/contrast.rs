// SPDX-License-Identifier: MIT
//! Palette readability: the three-pair report and the text/muted repair.
//!
//! Only `text` and `muted` are ever touched by [`auto_fix`]. Surfaces and
//! brand colors keep their hues; if the on-primary pair still fails
//! afterwards, nothing further is attempted.

use std::fmt;

use seedtone_color::{NEAR_BLACK, Rgb, best_black_or_white, contrast_ratio};
use serde::Serialize;

use crate::palette::Palette;

/// Minimum ratio every reported pair is checked against (WCAG AA body text).
pub const TARGET_RATIO: f64 = 4.5;

/// Floor for `muted` against `bg` after a repair.
pub const MUTED_FLOOR: f64 = 3.0;

/// Default `text → bg` mix for a repaired `muted`.
pub const MUTED_MIX: f64 = 0.62;

/// Softer mix used when [`MUTED_MIX`] drops below [`MUTED_FLOOR`].
pub const MUTED_MIX_FALLBACK: f64 = 0.45;

/// Text candidates for [`auto_fix`], in tie-break order.
pub const TEXT_CANDIDATES: [Rgb; 4] = [
    NEAR_BLACK,
    Rgb::from_u32(0x11_1827),
    Rgb::from_u32(0xf8_fafc),
    Rgb::WHITE,
];

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Which pair of tokens a [`ContrastPair`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    #[serde(rename = "text_bg")]
    TextOnBg,
    #[serde(rename = "text_surface")]
    TextOnSurface,
    OnPrimary,
}

impl PairKind {
    pub const ALL: [Self; 3] = [Self::TextOnBg, Self::TextOnSurface, Self::OnPrimary];

    /// Stable machine key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TextOnBg => "text_bg",
            Self::TextOnSurface => "text_surface",
            Self::OnPrimary => "on_primary",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TextOnBg => "Text on Background",
            Self::TextOnSurface => "Text on Surface",
            Self::OnPrimary => "Text on Primary Button",
        }
    }
}

/// One measured foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastPair {
    pub kind: PairKind,
    pub fg: Rgb,
    pub bg: Rgb,
    pub ratio: f64,
    pub target: f64,
}

impl ContrastPair {
    fn measure(kind: PairKind, fg: Rgb, bg: Rgb) -> Self {
        Self {
            kind,
            fg,
            bg,
            ratio: contrast_ratio(fg, bg),
            target: TARGET_RATIO,
        }
    }

    #[must_use]
    pub fn passes(&self) -> bool {
        self.ratio >= self.target
    }
}

impl fmt::Display for ContrastPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passes() { "pass" } else { "fail" };
        write!(
            f,
            "{:<24} {} on {}  {:>5.2}:1  {verdict}",
            self.kind.label(),
            self.fg,
            self.bg,
            self.ratio
        )
    }
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    pub pairs: [ContrastPair; 3],
    /// Black or white, whichever reads better on `primary`.
    pub on_primary: Rgb,
    pub any_failing: bool,
}

impl ContrastReport {
    #[must_use]
    pub fn pair(&self, kind: PairKind) -> &ContrastPair {
        // `pairs` is built in `PairKind::ALL` order.
        &self.pairs[kind as usize]
    }
}

/// Score a palette's three readability pairs against [`TARGET_RATIO`].
#[must_use]
pub fn evaluate(palette: &Palette) -> ContrastReport {
    let on_primary = best_black_or_white(palette.primary);
    let pairs = [
        ContrastPair::measure(PairKind::TextOnBg, palette.text, palette.bg),
        ContrastPair::measure(PairKind::TextOnSurface, palette.text, palette.surface),
        ContrastPair::measure(PairKind::OnPrimary, on_primary, palette.primary),
    ];
    let any_failing = pairs.iter().any(|p| !p.passes());
    ContrastReport {
        pairs,
        on_primary,
        any_failing,
    }
}

// ---------------------------------------------------------------------------
// Auto-fix
// ---------------------------------------------------------------------------

/// Worst-case readability of `text` across both surfaces.
fn text_score(text: Rgb, palette: &Palette) -> f64 {
    contrast_ratio(text, palette.bg).min(contrast_ratio(text, palette.surface))
}

/// Repair `text` and `muted`, leaving every other token untouched.
///
/// `text` becomes whichever of [`TEXT_CANDIDATES`] maximizes its minimum
/// contrast against `bg` and `surface`; an earlier candidate only yields to
/// a strictly better one. The current `text` stays if no candidate beats
/// it, so the score never drops. `muted` is then re-derived from the new
/// `text`, softened if it would sit below [`MUTED_FLOOR`] on `bg`.
#[must_use]
pub fn auto_fix(palette: &Palette) -> Palette {
    let mut best = TEXT_CANDIDATES[0];
    let mut best_score = text_score(best, palette);
    for &candidate in &TEXT_CANDIDATES[1..] {
        let score = text_score(candidate, palette);
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    let text = if text_score(palette.text, palette) >= best_score {
        palette.text
    } else {
        best
    };

    let mut muted = text.mix(palette.bg, MUTED_MIX);
    if contrast_ratio(muted, palette.bg) < MUTED_FLOOR {
        muted = text.mix(palette.bg, MUTED_MIX_FALLBACK);
    }

    Palette {
        text,
        muted,
        ..*palette
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::{Mode, Mood};
    use crate::palette::{TokenLocks, generate_palette};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn hex(s: &str) -> Rgb {
        Rgb::from_hex(s).unwrap()
    }

    fn palette(bg: &str, surface: &str, text: &str, primary: &str) -> Palette {
        Palette {
            bg: hex(bg),
            surface: hex(surface),
            text: hex(text),
            muted: hex("#888888"),
            primary: hex(primary),
            accent: hex("#22d3ee"),
        }
    }

    // ── Evaluate ────────────────────────────────────────────────────

    #[test]
    fn report_pairs_are_in_fixed_order() {
        let report = evaluate(&Palette::default());
        let keys: Vec<&str> = report.pairs.iter().map(|p| p.kind.key()).collect();
        assert_eq!(keys, ["text_bg", "text_surface", "on_primary"]);
        for kind in PairKind::ALL {
            assert_eq!(report.pair(kind).kind, kind);
        }
    }

    #[test]
    fn on_primary_uses_best_black_or_white() {
        let light_primary = palette("#ffffff", "#ffffff", "#000000", "#fde68a");
        assert_eq!(evaluate(&light_primary).on_primary, NEAR_BLACK);

        let dark_primary = palette("#ffffff", "#ffffff", "#000000", "#1e3a8a");
        assert_eq!(evaluate(&dark_primary).on_primary, Rgb::WHITE);
    }

    #[test]
    fn any_failing_tracks_each_pair() {
        let good = palette("#ffffff", "#f4f4f5", "#0b0f1a", "#1e3a8a");
        assert!(!evaluate(&good).any_failing);

        let grey_text = palette("#ffffff", "#f4f4f5", "#999999", "#1e3a8a");
        let report = evaluate(&grey_text);
        assert!(report.any_failing);
        assert!(!report.pair(PairKind::TextOnBg).passes());
        assert!(report.pair(PairKind::OnPrimary).passes());
    }

    #[test]
    fn minimal_light_passes_text_on_bg() {
        let p = generate_palette("abc123", Mode::Light, Mood::Minimal, &Palette::default(), &TokenLocks::default());
        let pair = *evaluate(&p).pair(PairKind::TextOnBg);
        assert!(pair.ratio >= TARGET_RATIO, "ratio {}", pair.ratio);
    }

    #[test]
    fn pair_display_shows_verdict() {
        let report = evaluate(&palette("#ffffff", "#ffffff", "#777777", "#000000"));
        let line = report.pair(PairKind::TextOnBg).to_string();
        assert!(line.starts_with("Text on Background"), "{line}");
        assert!(line.ends_with("fail"), "{line}");
    }

    // ── Auto-fix ────────────────────────────────────────────────────

    #[test]
    fn fix_picks_dark_text_on_light_surfaces() {
        let fixed = auto_fix(&palette("#fafafa", "#eeeeee", "#bbbbbb", "#3b82f6"));
        assert_eq!(fixed.text, NEAR_BLACK);
    }

    #[test]
    fn fix_picks_white_text_on_dark_surfaces() {
        let fixed = auto_fix(&palette("#0a0a0a", "#1a1a1a", "#444444", "#3b82f6"));
        assert_eq!(fixed.text, Rgb::WHITE);
    }

    #[test]
    fn fix_keeps_text_that_no_candidate_beats() {
        let p = palette("#ffffff", "#ffffff", "#000000", "#3b82f6");
        assert_eq!(auto_fix(&p).text, Rgb::BLACK);
    }

    #[test]
    fn fix_recomputes_muted_from_text() {
        let p = palette("#ffffff", "#f4f4f5", "#bbbbbb", "#3b82f6");
        let fixed = auto_fix(&p);
        let expected = fixed.text.mix(p.bg, MUTED_MIX);
        if contrast_ratio(expected, p.bg) >= MUTED_FLOOR {
            assert_eq!(fixed.muted, expected);
        } else {
            assert_eq!(fixed.muted, fixed.text.mix(p.bg, MUTED_MIX_FALLBACK));
        }
    }

    #[test]
    fn fix_falls_back_to_softer_muted_mix() {
        // Mid-grey surfaces: the default mix lands too close to bg.
        let p = palette("#767676", "#767676", "#000000", "#3b82f6");
        let fixed = auto_fix(&p);
        assert!(contrast_ratio(fixed.text.mix(p.bg, MUTED_MIX), p.bg) < MUTED_FLOOR);
        assert_eq!(fixed.muted, fixed.text.mix(p.bg, MUTED_MIX_FALLBACK));
    }

    fn arb_rgb() -> impl Strategy<Value = Rgb> {
        any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Rgb::new(r, g, b))
    }

    fn arb_palette() -> impl Strategy<Value = Palette> {
        (arb_rgb(), arb_rgb(), arb_rgb(), arb_rgb(), arb_rgb(), arb_rgb()).prop_map(
            |(bg, surface, text, muted, primary, accent)| Palette {
                bg,
                surface,
                text,
                muted,
                primary,
                accent,
            },
        )
    }

    proptest! {
        #[test]
        fn fix_never_lowers_text_score(p in arb_palette()) {
            let fixed = auto_fix(&p);
            prop_assert!(text_score(fixed.text, &fixed) >= text_score(p.text, &p));
        }

        #[test]
        fn fix_only_touches_text_and_muted(p in arb_palette()) {
            let fixed = auto_fix(&p);
            prop_assert_eq!(fixed.bg, p.bg);
            prop_assert_eq!(fixed.surface, p.surface);
            prop_assert_eq!(fixed.primary, p.primary);
            prop_assert_eq!(fixed.accent, p.accent);
        }

        #[test]
        fn fix_is_idempotent_on_text(p in arb_palette()) {
            let once = auto_fix(&p);
            prop_assert_eq!(auto_fix(&once).text, once.text);
        }
    }
}

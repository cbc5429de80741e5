// SPDX-License-Identifier: MIT
//! Mood and mode — the two knobs that parameterize generation.
//!
//! [`rules`] maps a `(Mood, Mode)` pair to the closed integer bands the
//! palette generator samples from. Light and dark use different lightness
//! bands so that text always sits at the opposite extreme from the
//! background. Minimal pins its neutral hue; every other mood samples it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::rng::Mulberry32;

/// An unrecognized mood, mode, or token name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {name:?} (expected one of: {expected})")]
pub struct ParseNameError {
    kind: &'static str,
    name: String,
    expected: &'static str,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, name: &str, expected: &'static str) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            expected,
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Light or dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Boundary parse: exactly `"dark"` is dark, anything else is light.
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        if s == "dark" { Self::Dark } else { Self::Light }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseNameError::new("mode", s, "light, dark")),
        }
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Self::from_wire(&s))
    }
}

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// A named stylistic preset. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Mood {
    #[default]
    Minimal,
    Bold,
    Pastel,
    Neon,
    Earthy,
}

impl Mood {
    /// All moods, in menu order.
    pub const ALL: [Self; 5] = [Self::Minimal, Self::Bold, Self::Pastel, Self::Neon, Self::Earthy];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Bold => "Bold",
            Self::Pastel => "Pastel",
            Self::Neon => "Neon",
            Self::Earthy => "Earthy",
        }
    }

    /// Boundary parse: exact names only, unknown input falls back to
    /// [`Mood::Minimal`].
    #[must_use]
    pub fn from_wire(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .unwrap_or_default()
    }

    /// Moods whose display font is always a sans.
    #[must_use]
    pub const fn prefers_sans_display(self) -> bool {
        matches!(self, Self::Minimal | Self::Bold | Self::Neon)
    }

    /// Moods that allow (and steer condensed faces toward) a serif display.
    #[must_use]
    pub const fn prefers_serif_display(self) -> bool {
        matches!(self, Self::Pastel | Self::Earthy)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ParseNameError;

    /// Case-insensitive, for user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseNameError::new("mood", s, "Minimal, Bold, Pastel, Neon, Earthy"))
    }
}

impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(Self::from_wire(&s))
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A closed integer interval sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub min: i32,
    pub max: i32,
}

impl Band {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(self, v: i32) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn sample(self, rng: &mut Mulberry32) -> i32 {
        rng.int_in(self.min, self.max)
    }
}

/// How a mood picks the hue of its neutrals (bg, surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeutralHue {
    /// Always this hue. Consumes no draw.
    Fixed(i32),
    /// Sampled from the band. Consumes one draw.
    Sampled(Band),
}

impl NeutralHue {
    pub fn resolve(self, rng: &mut Mulberry32) -> i32 {
        match self {
            Self::Fixed(h) => h,
            Self::Sampled(band) => band.sample(rng),
        }
    }
}

/// Sampling ranges for one `(mood, mode)` pair.
///
/// Hue values are degrees; saturation and lightness are percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodRules {
    pub neutral_hue: NeutralHue,
    pub neutral_sat: Band,
    pub bg_l: Band,
    pub surface_l: Band,
    /// Nominal text lightness. The generator does not sample it: text is
    /// pinned to a fixed near-black or near-white per mode.
    pub text_l: Band,
    /// `muted = mix(text, bg, muted_mix)`.
    pub muted_mix: f64,
    pub primary_sat: Band,
    pub primary_l: Band,
    pub accent_sat: Band,
    pub accent_l: Band,
    pub primary_hue: Band,
    pub accent_hue_offset: Band,
}

/// Look up the rule set for a mood in a mode.
#[must_use]
pub fn rules(mood: Mood, mode: Mode) -> MoodRules {
    let dark = mode.is_dark();
    let by_mode = |d: (i32, i32), l: (i32, i32)| {
        if dark { Band::new(d.0, d.1) } else { Band::new(l.0, l.1) }
    };

    match mood {
        Mood::Minimal => MoodRules {
            neutral_hue: NeutralHue::Fixed(210),
            neutral_sat: Band::new(2, 10),
            bg_l: by_mode((6, 12), (92, 97)),
            surface_l: by_mode((10, 18), (86, 93)),
            text_l: by_mode((92, 97), (10, 14)),
            muted_mix: 0.55,
            primary_sat: Band::new(20, 45),
            primary_l: by_mode((52, 64), (44, 56)),
            accent_sat: Band::new(30, 55),
            accent_l: by_mode((56, 70), (44, 58)),
            primary_hue: Band::new(195, 255),
            accent_hue_offset: Band::new(30, 80),
        },
        Mood::Bold => MoodRules {
            neutral_hue: NeutralHue::Sampled(Band::new(190, 230)),
            neutral_sat: Band::new(6, 18),
            bg_l: by_mode((6, 10), (92, 96)),
            surface_l: by_mode((12, 18), (84, 90)),
            text_l: by_mode((92, 97), (10, 14)),
            muted_mix: 0.58,
            primary_sat: Band::new(45, 75),
            primary_l: by_mode((52, 62), (42, 52)),
            accent_sat: Band::new(55, 85),
            accent_l: by_mode((56, 66), (40, 52)),
            primary_hue: Band::new(0, 359),
            accent_hue_offset: Band::new(120, 200),
        },
        Mood::Pastel => MoodRules {
            neutral_hue: NeutralHue::Sampled(Band::new(200, 240)),
            neutral_sat: Band::new(6, 14),
            bg_l: by_mode((8, 14), (94, 98)),
            surface_l: by_mode((14, 20), (88, 94)),
            text_l: by_mode((92, 97), (10, 14)),
            muted_mix: 0.62,
            primary_sat: Band::new(35, 55),
            primary_l: by_mode((60, 72), (58, 72)),
            accent_sat: Band::new(40, 60),
            accent_l: by_mode((64, 76), (60, 76)),
            primary_hue: Band::new(0, 359),
            accent_hue_offset: Band::new(40, 110),
        },
        Mood::Neon => MoodRules {
            neutral_hue: NeutralHue::Sampled(Band::new(200, 250)),
            neutral_sat: Band::new(8, 22),
            bg_l: by_mode((5, 10), (92, 96)),
            surface_l: by_mode((11, 17), (84, 90)),
            text_l: by_mode((92, 98), (10, 14)),
            muted_mix: 0.58,
            primary_sat: Band::new(80, 100),
            primary_l: by_mode((52, 62), (48, 58)),
            accent_sat: Band::new(85, 100),
            accent_l: by_mode((58, 68), (46, 56)),
            primary_hue: Band::new(0, 359),
            accent_hue_offset: Band::new(150, 210),
        },
        Mood::Earthy => MoodRules {
            neutral_hue: NeutralHue::Sampled(Band::new(20, 55)),
            neutral_sat: Band::new(8, 20),
            bg_l: by_mode((7, 12), (91, 96)),
            surface_l: by_mode((12, 18), (84, 90)),
            text_l: by_mode((92, 97), (10, 14)),
            muted_mix: 0.6,
            primary_sat: Band::new(35, 65),
            primary_l: by_mode((50, 60), (40, 52)),
            accent_sat: Band::new(30, 55),
            accent_l: by_mode((54, 64), (38, 50)),
            primary_hue: Band::new(20, 140),
            accent_hue_offset: Band::new(40, 120),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_wire_parse_defaults_to_light() {
        assert_eq!(Mode::from_wire("dark"), Mode::Dark);
        assert_eq!(Mode::from_wire("light"), Mode::Light);
        assert_eq!(Mode::from_wire("DARK"), Mode::Light);
        assert_eq!(Mode::from_wire(""), Mode::Light);
    }

    #[test]
    fn mode_user_parse_is_strict() {
        assert_eq!(" Dark ".parse::<Mode>(), Ok(Mode::Dark));
        assert!("dim".parse::<Mode>().is_err());
    }

    #[test]
    fn mood_wire_parse_falls_back_to_minimal() {
        assert_eq!(Mood::from_wire("Neon"), Mood::Neon);
        assert_eq!(Mood::from_wire("neon"), Mood::Minimal);
        assert_eq!(Mood::from_wire("Vaporwave"), Mood::Minimal);
    }

    #[test]
    fn mood_user_parse_ignores_case() {
        assert_eq!("earthy".parse::<Mood>(), Ok(Mood::Earthy));
        let err = "grunge".parse::<Mood>().unwrap_err();
        assert!(err.to_string().contains("grunge"), "{err}");
    }

    #[test]
    fn mood_names_roundtrip() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>(), Ok(mood));
            assert_eq!(Mood::from_wire(&mood.to_string()), mood);
        }
    }

    #[test]
    fn display_preferences_partition_moods() {
        for mood in Mood::ALL {
            assert_ne!(mood.prefers_sans_display(), mood.prefers_serif_display(), "{mood}");
        }
    }

    #[test]
    fn only_minimal_has_fixed_neutral_hue() {
        for mood in Mood::ALL {
            let fixed = matches!(rules(mood, Mode::Light).neutral_hue, NeutralHue::Fixed(_));
            assert_eq!(fixed, mood == Mood::Minimal, "{mood}");
        }
    }

    #[test]
    fn fixed_neutral_hue_consumes_no_draw() {
        let mut a = Mulberry32::new(5);
        let mut b = Mulberry32::new(5);
        assert_eq!(NeutralHue::Fixed(210).resolve(&mut a), 210);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn text_band_opposes_background_band() {
        for mood in Mood::ALL {
            let light = rules(mood, Mode::Light);
            assert!(light.bg_l.min > 50 && light.text_l.max < 50, "{mood} light");
            let dark = rules(mood, Mode::Dark);
            assert!(dark.bg_l.max < 50 && dark.text_l.min > 50, "{mood} dark");
        }
    }

    #[test]
    fn bands_are_well_formed() {
        for mood in Mood::ALL {
            for mode in [Mode::Light, Mode::Dark] {
                let r = rules(mood, mode);
                for band in [
                    r.neutral_sat, r.bg_l, r.surface_l, r.text_l, r.primary_sat,
                    r.primary_l, r.accent_sat, r.accent_l, r.primary_hue, r.accent_hue_offset,
                ] {
                    assert!(band.min <= band.max, "{mood}/{mode}: {band:?}");
                }
                assert!((0.0..=1.0).contains(&r.muted_mix));
            }
        }
    }
}

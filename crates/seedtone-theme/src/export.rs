// SPDX-License-Identifier: MIT
//! Copy-paste snippets: CSS custom properties and the font-loading block.

use std::fmt::Write as _;

use crate::fonts::{Fonts, font_meta, font_stack};
use crate::palette::Palette;

const FONTS_API: &str = "https://fonts.googleapis.com/css2";

/// `:root { --bg: …; … }` with the six tokens in canonical order.
#[must_use]
pub fn css_variables(palette: &Palette) -> String {
    let mut out = String::from(":root {\n");
    for (token, color) in palette.iter() {
        let _ = writeln!(out, "  --{}: {color};", token.as_str());
    }
    out.push('}');
    out
}

/// One `family=` parameter: name URL-encoded with `+` for spaces.
fn family_param(name: &str) -> String {
    let meta = font_meta(name);
    let family = urlencoding::encode(&meta.name).replace("%20", "+");
    format!("family={family}:wght@{}", meta.weights)
}

/// Stylesheet URL loading both faces at their catalog weights.
#[must_use]
pub fn google_fonts_href(fonts: &Fonts) -> String {
    format!(
        "{FONTS_API}?{}&{}&display=swap",
        family_param(&fonts.display),
        family_param(&fonts.body)
    )
}

/// HTML link tags followed by the matching `font-family` declarations.
#[must_use]
pub fn font_snippet(fonts: &Fonts) -> String {
    [
        "<!-- Google Fonts -->".to_owned(),
        r#"<link rel="preconnect" href="https://fonts.googleapis.com">"#.to_owned(),
        r#"<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>"#.to_owned(),
        format!(r#"<link href="{}" rel="stylesheet">"#, google_fonts_href(fonts)),
        "\n/* CSS font-family */".to_owned(),
        ":root {".to_owned(),
        format!("  --display-font: {};", font_stack(&fonts.display)),
        format!("  --body-font: {};", font_stack(&fonts.body)),
        "}".to_owned(),
    ]
    .join("\n")
}

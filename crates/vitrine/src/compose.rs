//! Maps portfolio content and a palette onto hero-card text layouts.
//!
//! Pure functions only: the run loop calls these whenever the theme or the
//! active section changes, then hands the result to both the direct painter
//! and the pixelation effect.

use renderer::{Rgb, TextAlign, TextLayout, TextSpan, FALLBACK_DOT, FALLBACK_GLOW};
use siteconfig::Palette;

/// Colors the hero card actually draws with, parsed from the palette's hex
/// strings with fixed fallbacks for malformed values.
#[derive(Debug, Clone, Copy)]
pub struct HeroColors {
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
}

pub fn hero_colors(palette: &Palette) -> HeroColors {
    HeroColors {
        text: Rgb::from_hex_or(palette.text, Rgb::new(0xe5, 0xe7, 0xeb)),
        muted: Rgb::from_hex_or(palette.muted, FALLBACK_DOT),
        accent: Rgb::from_hex_or(palette.accent, FALLBACK_GLOW),
    }
}

/// Builds the hero card for one section, in region-local coordinates.
pub fn hero_layout(section: &str, colors: &HeroColors) -> TextLayout {
    let profile = content::profile();
    let mut spans = vec![
        TextSpan {
            text: profile.name.to_string(),
            scale: 4,
            color: colors.text,
            opacity: 1.0,
            align: TextAlign::Center,
            y: 16,
        },
        TextSpan {
            text: profile.tagline.to_string(),
            scale: 2,
            color: colors.muted,
            opacity: 0.6,
            align: TextAlign::Center,
            y: 52,
        },
        TextSpan {
            text: section_title(section),
            scale: 2,
            color: colors.accent,
            opacity: 1.0,
            align: TextAlign::Center,
            y: 84,
        },
    ];
    let mut y = 108;
    for line in section_lines(section) {
        spans.push(TextSpan {
            text: line,
            scale: 1,
            color: colors.text,
            opacity: 0.9,
            align: TextAlign::Center,
            y,
        });
        y += 12;
    }
    TextLayout::new(spans)
}

/// Shifts a region-local layout down to its on-screen position.
pub fn offset_layout(layout: &TextLayout, dy: i32) -> TextLayout {
    TextLayout::new(
        layout
            .spans
            .iter()
            .map(|span| TextSpan {
                y: span.y + dy,
                ..span.clone()
            })
            .collect(),
    )
}

fn section_title(section: &str) -> String {
    section.to_ascii_uppercase()
}

/// One display line per table row of the given section; unknown sections
/// yield no lines.
pub fn section_lines(section: &str) -> Vec<String> {
    match section {
        "experience" => content::experiences()
            .iter()
            .map(|e| format!("{} @ {} ({})", e.role, e.company, e.period))
            .collect(),
        "education" => content::education()
            .iter()
            .map(|e| format!("{} - {} ({})", e.degree, e.school, e.period))
            .collect(),
        "certificates" => content::certificates()
            .iter()
            .map(|c| format!("{} - {} {}", c.title, c.issuer, c.year))
            .collect(),
        "projects" => content::projects()
            .iter()
            .map(|p| format!("{}: {} [{}]", p.name, p.description, p.stack))
            .collect(),
        _ => Vec::new(),
    }
}

use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::ColorConfig;
use crate::data::model::Label;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Parse `#RRGGBB` / `RRGGBB` / `#RGB`.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    Srgb::<u8>::from_str(hex.trim())
        .ok()
        .map(|c| Color32::from_rgb(c.red, c.green, c.blue))
}

// ---------------------------------------------------------------------------
// Label colours: pie slices and bar fills
// ---------------------------------------------------------------------------

/// Per-label chart colours.
#[derive(Debug, Clone)]
pub struct LabelColors {
    pie: BTreeMap<Label, Color32>,
    bar: BTreeMap<Label, Color32>,
}

impl Default for LabelColors {
    fn default() -> Self {
        Self::from_config(&ColorConfig::default())
    }
}

impl LabelColors {
    /// Build from hex strings; an unparsable entry falls back to the default colour.
    pub fn from_config(config: &ColorConfig) -> Self {
        let defaults = ColorConfig::default();
        let pick = |value: &str, fallback: &str| {
            parse_hex(value).unwrap_or_else(|| {
                log::warn!("Invalid colour '{value}', using {fallback}");
                parse_hex(fallback).unwrap_or(Color32::GRAY)
            })
        };

        let pie = BTreeMap::from([
            (Label::Fake, pick(&config.pie_fake, &defaults.pie_fake)),
            (Label::Real, pick(&config.pie_real, &defaults.pie_real)),
        ]);
        let bar = BTreeMap::from([
            (Label::Fake, pick(&config.bar_fake, &defaults.bar_fake)),
            (Label::Real, pick(&config.bar_real, &defaults.bar_real)),
        ]);
        Self { pie, bar }
    }

    pub fn pie(&self, label: Label) -> Color32 {
        self.pie.get(&label).copied().unwrap_or(Color32::GRAY)
    }

    pub fn bar(&self, label: Label) -> Color32 {
        self.bar.get(&label).copied().unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → pie colour) for the side panel.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.pie
            .iter()
            .map(|(label, c)| (label.to_string(), *c))
            .collect()
    }
}

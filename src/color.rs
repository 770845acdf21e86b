use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Property name → bar colour
// ---------------------------------------------------------------------------

/// Colours assigned over the whole base table, so a property keeps its
/// colour while filters hide and show its neighbours.
#[derive(Debug, Clone, Default)]
pub struct PropertyColors {
    mapping: BTreeMap<String, Color32>,
}

impl PropertyColors {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let names: Vec<&str> = names.into_iter().collect();
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, color)| (name.to_string(), color))
            .collect();
        PropertyColors { mapping }
    }

    pub fn color_for(&self, name: &str) -> Color32 {
        self.mapping.get(name).copied().unwrap_or(Color32::LIGHT_BLUE)
    }
}

use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Status;

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
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
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (parks, lands, days) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map over `labels`, keeping their order for hue assignment.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Fixed colours for open/closed bars.
pub fn status_color(status: Status) -> Color32 {
    match status {
        Status::Open => Color32::from_rgb(0x4c, 0xaf, 0x50),
        Status::Closed => Color32::from_rgb(0xe5, 0x39, 0x35),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_palette_distinct() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }

    #[test]
    fn test_color_map_lookup_and_default() {
        let map = ColorMap::new(["Magic Kingdom", "Epcot"]);
        assert_ne!(map.color_for("Magic Kingdom"), map.color_for("Epcot"));
        assert_eq!(map.color_for("Nowhere"), Color32::GRAY);
    }
}

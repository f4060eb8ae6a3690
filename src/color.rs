use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue of the first subgroup, close to the steel-blue accent of the line chart
/// so a single-subgroup bar chart reads as the same series.
const BASE_HUE: f32 = 210.0;

/// `n` subgroup colours with hues spread evenly around the wheel from
/// [`BASE_HUE`]. Saturation and lightness stay fixed so no subgroup stands out.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    let step = 360.0 / n.max(1) as f32;
    (0..n)
        .map(|i| {
            let hue = (BASE_HUE + i as f32 * step) % 360.0;
            let rgb: Srgb = Hsl::new(hue, 0.6, 0.5).into_color();
            let rgb = rgb.into_format::<u8>();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Assigns each category of a chart axis its own colour, in domain order.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(categories: &[String]) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Colour for `category`; grey for anything outside the domain.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_len_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }

    #[test]
    fn test_single_subgroup_is_steel_blue() {
        let palette = generate_palette(1);
        assert_eq!(palette.len(), 1);
        let c = palette[0];
        assert!(c.b() > c.g() && c.g() > c.r(), "{c:?}");
    }

    #[test]
    fn test_color_map_lookup() {
        let cats = vec!["Female".to_string(), "Male".to_string()];
        let cm = ColorMap::new(&cats);
        assert_ne!(cm.color_for("Female"), cm.color_for("Male"));
        assert_eq!(cm.color_for("Other"), Color32::GRAY);
    }
}

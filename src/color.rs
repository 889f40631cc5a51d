use std::collections::{BTreeMap, BTreeSet};

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
// Country colours
// ---------------------------------------------------------------------------

/// Maps country names to distinct colours, stable for the whole session.
#[derive(Debug, Clone)]
pub struct CountryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CountryColors {
    /// Build a colour map over the dataset's full country set so a country
    /// keeps its colour no matter what the current selection is.
    pub fn new(countries: &BTreeSet<String>) -> Self {
        let palette = generate_palette(countries.len());
        let mapping: BTreeMap<String, Color32> = countries
            .iter()
            .zip(palette.into_iter())
            .map(|(c, color)| (c.clone(), color))
            .collect();

        CountryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a country.
    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging map for correlation cells
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in [-1, 1] to a blue–white–red colour.
pub fn diverging(r: f64) -> Color32 {
    let t = (r.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;
    let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
    let (red, green, blue) = if t < 0.5 {
        // blue → white
        let u = t * 2.0;
        (lerp(0.23, 1.0, u), lerp(0.30, 1.0, u), lerp(0.75, 1.0, u))
    } else {
        // white → red
        let u = (t - 0.5) * 2.0;
        (lerp(1.0, 0.87, u), lerp(1.0, 0.18, u), lerp(1.0, 0.15, u))
    };
    Color32::from_rgb(
        (red * 255.0) as u8,
        (green * 255.0) as u8,
        (blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length_and_distinct_colours() {
        let p = generate_palette(10);
        assert_eq!(p.len(), 10);
        let unique: std::collections::BTreeSet<_> =
            p.iter().map(|c| (c.r(), c.g(), c.b())).collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn diverging_endpoints() {
        assert_eq!(diverging(0.0), Color32::from_rgb(255, 255, 255));
        let neg = diverging(-1.0);
        let pos = diverging(1.0);
        assert!(neg.b() > neg.r());
        assert!(pos.r() > pos.b());
    }
}

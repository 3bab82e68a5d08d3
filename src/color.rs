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
// Class colours: indicator value → Color32
// ---------------------------------------------------------------------------

/// Maps the discrete classes of an indicator column (0/1) to distinct
/// colours for the scatter plot.
#[derive(Debug, Clone)]
pub struct ClassColors {
    pub column: String,
    mapping: BTreeMap<i64, Color32>,
    default_color: Color32,
}

impl ClassColors {
    /// Build a colour map for the given column from its class labels.
    pub fn new(column: &str, classes: &[i64]) -> Self {
        let palette = generate_palette(classes.len());
        let mapping: BTreeMap<i64, Color32> =
            classes.iter().copied().zip(palette).collect();

        ClassColors {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a class. Values that round to an unknown
    /// class (including missing cells) get the default grey.
    pub fn color_for(&self, value: f64) -> Color32 {
        if value.is_nan() {
            return self.default_color;
        }
        self.mapping
            .get(&(value.round() as i64))
            .copied()
            .unwrap_or(self.default_color)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_get_distinct_colours() {
        let cc = ClassColors::new("CHAS", &[0, 1]);
        assert_ne!(cc.color_for(0.0), cc.color_for(1.0));
    }

    #[test]
    fn unknown_class_falls_back_to_default() {
        let cc = ClassColors::new("CHAS", &[0, 1]);
        assert_eq!(cc.color_for(7.0), Color32::GRAY);
        assert_eq!(cc.color_for(f64::NAN), Color32::GRAY);
    }
}

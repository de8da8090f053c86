//! Color legend: threshold values and swatch geometry.
//!
//! The legend shows the nine bucket colors as a contiguous horizontal strip
//! of fixed-size swatches with a threshold label at every swatch boundary.

use crate::color::{Rgba, BUCKET_COUNT};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect};

/// One legend swatch: the lower threshold of its interval and its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendEntry {
    /// Lower threshold of the interval this swatch covers.
    pub threshold_low: f64,
    /// Display color of the swatch.
    pub color: Rgba,
}

/// Derived legend: ordered entries, boundary thresholds, swatch geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    /// Ordered swatch entries, one per bucket.
    pub entries: Vec<LegendEntry>,
    /// Threshold marks, one per swatch boundary (`entries.len() + 1` values).
    /// Strictly increasing; the last mark equals the maximum temperature.
    pub thresholds: Vec<f64>,
    /// Width of one swatch in pixels.
    pub swatch_width: f32,
    /// Height of one swatch in pixels.
    pub swatch_height: f32,
}

impl Legend {
    /// Derive the legend for a temperature range topping out at `max_temp`.
    ///
    /// Threshold `i` is `max_temp * i / 9`, so the marks run from zero to
    /// `max_temp` in nine equal steps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateRange`] unless `max_temp` is finite and
    /// positive; the thresholds would not be increasing otherwise.
    pub fn build(
        max_temp: f64,
        palette: &[Rgba; BUCKET_COUNT],
        swatch_width: f32,
        swatch_height: f32,
    ) -> Result<Self> {
        if !max_temp.is_finite() || max_temp <= 0.0 {
            return Err(Error::DegenerateRange { min: 0.0, max: max_temp });
        }

        let thresholds: Vec<f64> =
            (0..=BUCKET_COUNT).map(|i| max_temp * (i as f64 / BUCKET_COUNT as f64)).collect();

        let entries = thresholds[..BUCKET_COUNT]
            .iter()
            .zip(palette.iter())
            .map(|(&threshold_low, &color)| LegendEntry { threshold_low, color })
            .collect();

        Ok(Self { entries, thresholds, swatch_width, swatch_height })
    }

    /// Pixel rect of swatch `index` with the strip anchored at `origin`.
    #[must_use]
    pub fn swatch_rect(&self, index: usize, origin: Point) -> Rect {
        Rect::new(
            origin.x + index as f32 * self.swatch_width,
            origin.y,
            self.swatch_width,
            self.swatch_height,
        )
    }

    /// Threshold labels, one decimal place with a degree-Celsius suffix.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.thresholds.iter().map(|t| format!("{t:.1}°C")).collect()
    }

    /// Total width of the swatch strip.
    #[must_use]
    pub fn strip_width(&self) -> f32 {
        self.entries.len() as f32 * self.swatch_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::THERMAL_PALETTE;

    #[test]
    fn test_threshold_count_and_order() {
        let legend = Legend::build(13.9, &THERMAL_PALETTE, 30.0, 12.0).unwrap();
        assert_eq!(legend.entries.len(), 9);
        assert_eq!(legend.thresholds.len(), 10);

        for pair in legend.thresholds.windows(2) {
            assert!(pair[0] < pair[1], "thresholds must be strictly increasing");
        }
    }

    #[test]
    fn test_last_threshold_is_max_exactly() {
        let legend = Legend::build(13.9, &THERMAL_PALETTE, 30.0, 12.0).unwrap();
        assert_eq!(*legend.thresholds.last().unwrap(), 13.9);
        assert_eq!(legend.thresholds[0], 0.0);
    }

    #[test]
    fn test_entry_colors_follow_palette_order() {
        let legend = Legend::build(9.0, &THERMAL_PALETTE, 30.0, 12.0).unwrap();
        for (i, entry) in legend.entries.iter().enumerate() {
            assert_eq!(entry.color, THERMAL_PALETTE[i]);
        }
        assert!((legend.entries[3].threshold_low - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_swatches_are_contiguous() {
        let legend = Legend::build(9.0, &THERMAL_PALETTE, 30.0, 12.0).unwrap();
        let origin = Point::new(100.0, 450.0);

        for i in 0..8 {
            let here = legend.swatch_rect(i, origin);
            let next = legend.swatch_rect(i + 1, origin);
            assert!((here.x + here.width - next.x).abs() < 0.001);
        }
        assert!((legend.strip_width() - 270.0).abs() < 0.001);
    }

    #[test]
    fn test_labels_format() {
        let legend = Legend::build(9.0, &THERMAL_PALETTE, 30.0, 12.0).unwrap();
        let labels = legend.labels();
        assert_eq!(labels[0], "0.0°C");
        assert_eq!(labels[9], "9.0°C");
    }

    #[test]
    fn test_non_positive_max_rejected() {
        assert!(Legend::build(0.0, &THERMAL_PALETTE, 30.0, 12.0).is_err());
        assert!(Legend::build(-4.0, &THERMAL_PALETTE, 30.0, 12.0).is_err());
        assert!(Legend::build(f64::NAN, &THERMAL_PALETTE, 30.0, 12.0).is_err());
    }
}

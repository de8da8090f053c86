//! Discrete color classification of temperatures.
//!
//! Temperatures are classified into nine ordered buckets over the observed
//! range. Bucket boundaries partition `[min_temp, max_temp]` into nine
//! equal-width half-open bins; values below the range collapse into the first
//! bucket and values at or above `max_temp` into the last, so classification
//! is total and monotonic non-decreasing.

use crate::color::{Rgba, BUCKET_COUNT};
use crate::data::Dataset;
use crate::error::{Error, Result};

/// Maps absolute temperatures to one of nine ordered color buckets.
///
/// Constructed once per dataset from the observed temperature extent; pure
/// and stateless afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucketer {
    min_temp: f64,
    max_temp: f64,
    bin_width: f64,
}

impl ColorBucketer {
    /// Create a bucketer for the closed range `[min_temp, max_temp]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateRange`] unless `min_temp < max_temp`,
    /// `max_temp > 0`, and both bounds are finite. A real temperature range
    /// derived from a non-empty dataset satisfies all three.
    pub fn new(min_temp: f64, max_temp: f64) -> Result<Self> {
        if !min_temp.is_finite() || !max_temp.is_finite() || min_temp >= max_temp || max_temp <= 0.0
        {
            return Err(Error::DegenerateRange { min: min_temp, max: max_temp });
        }

        Ok(Self {
            min_temp,
            max_temp,
            bin_width: (max_temp - min_temp) / BUCKET_COUNT as f64,
        })
    }

    /// Create a bucketer from a dataset's absolute-temperature extent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for an empty dataset or
    /// [`Error::DegenerateRange`] when all records share one temperature.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let extent = dataset.temp_extent()?;
        Self::new(extent.min, extent.max)
    }

    /// Classify an absolute temperature into a bucket index in `0..9`.
    ///
    /// `temp == max_temp` lands in the last bucket; out-of-range inputs clamp
    /// to the nearest end bucket rather than going unclassified.
    #[must_use]
    pub fn bucket(&self, temp: f64) -> usize {
        let k = ((temp - self.min_temp) / self.bin_width).floor();
        if k < 0.0 {
            0
        } else if k >= BUCKET_COUNT as f64 {
            BUCKET_COUNT - 1
        } else {
            (k as usize).min(BUCKET_COUNT - 1)
        }
    }

    /// Classify a temperature and resolve it to a palette color.
    #[must_use]
    pub fn color(&self, temp: f64, palette: &[Rgba; BUCKET_COUNT]) -> Rgba {
        palette[self.bucket(temp)]
    }

    /// Lower bound of the classified range.
    #[must_use]
    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }

    /// Upper bound of the classified range.
    #[must_use]
    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::THERMAL_PALETTE;

    #[test]
    fn test_degenerate_ranges_rejected() {
        assert!(ColorBucketer::new(5.0, 5.0).is_err());
        assert!(ColorBucketer::new(7.0, 3.0).is_err());
        assert!(ColorBucketer::new(-10.0, -1.0).is_err());
        assert!(ColorBucketer::new(f64::NAN, 5.0).is_err());
        assert!(ColorBucketer::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_min_maps_to_first_bucket() {
        let b = ColorBucketer::new(2.0, 11.0).unwrap();
        assert_eq!(b.bucket(2.0), 0);
    }

    #[test]
    fn test_max_maps_to_last_bucket() {
        let b = ColorBucketer::new(2.0, 11.0).unwrap();
        assert_eq!(b.bucket(11.0), 8);
    }

    #[test]
    fn test_bins_are_equal_width() {
        // Range [0, 9] gives unit-width bins, so bucket == floor(temp)
        let b = ColorBucketer::new(0.0, 9.0).unwrap();
        for i in 0..9 {
            assert_eq!(b.bucket(i as f64 + 0.5), i);
        }
    }

    #[test]
    fn test_bin_boundary_belongs_to_upper_bin() {
        let b = ColorBucketer::new(0.0, 9.0).unwrap();
        assert_eq!(b.bucket(1.0), 1);
        assert_eq!(b.bucket(8.0), 8);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let b = ColorBucketer::new(2.0, 11.0).unwrap();
        assert_eq!(b.bucket(-40.0), 0);
        assert_eq!(b.bucket(100.0), 8);
    }

    #[test]
    fn test_monotonic_over_range() {
        let b = ColorBucketer::new(1.7, 13.9).unwrap();
        let mut last = 0;
        let mut t = 1.7;
        while t <= 13.9 {
            let k = b.bucket(t);
            assert!(k >= last, "bucket regressed at temp {t}");
            assert!(k < BUCKET_COUNT);
            last = k;
            t += 0.01;
        }
    }

    #[test]
    fn test_color_resolution() {
        let b = ColorBucketer::new(0.0, 9.0).unwrap();
        assert_eq!(b.color(0.1, &THERMAL_PALETTE), THERMAL_PALETTE[0]);
        assert_eq!(b.color(9.0, &THERMAL_PALETTE), THERMAL_PALETTE[8]);
    }

    #[test]
    fn test_from_dataset() {
        let ds = Dataset::from_json_str(
            r#"{
                "baseTemperature": 8.0,
                "monthlyVariance": [
                    { "year": 1900, "month": 1, "variance": -4.0 },
                    { "year": 1900, "month": 2, "variance": 5.0 }
                ]
            }"#,
        )
        .unwrap();

        let b = ColorBucketer::from_dataset(&ds).unwrap();
        assert!((b.min_temp() - 4.0).abs() < 1e-9);
        assert!((b.max_temp() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_dataset_uniform_temps_rejected() {
        let ds = Dataset::from_json_str(
            r#"{
                "baseTemperature": 8.0,
                "monthlyVariance": [
                    { "year": 1900, "month": 1, "variance": 0.5 },
                    { "year": 1900, "month": 2, "variance": 0.5 }
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(ColorBucketer::from_dataset(&ds), Err(Error::DegenerateRange { .. })));
    }
}

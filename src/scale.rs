//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to pixel positions. Based on the Grammar of
//! Graphics [Wilkinson 2005]. The heatmap uses a linear scale on the year
//! axis and a band scale on the month axis.

use crate::data::{Extent, MONTHS_PER_YEAR};
use crate::error::{Error, Result};
use crate::geometry::Padding;

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain min equals domain max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Invert the scale (range to domain).
    #[must_use]
    pub fn invert(&self, value: f32) -> f32 {
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Band scale: maps a small discrete domain onto equal-sized contiguous
/// pixel bands.
///
/// Band `i` occupies `[start + i * bandwidth, start + (i + 1) * bandwidth)`,
/// so the bands partition the range with no gaps or overlaps.
#[derive(Debug, Clone, Copy)]
pub struct BandScale {
    bands: usize,
    range_min: f32,
    range_max: f32,
}

impl BandScale {
    /// Create a band scale dividing `range` into `bands` equal bands.
    ///
    /// # Errors
    ///
    /// Returns an error if `bands` is zero or the range is empty.
    pub fn new(bands: usize, range: (f32, f32)) -> Result<Self> {
        if bands == 0 {
            return Err(Error::ScaleDomain("band scale requires at least one band".to_string()));
        }

        if (range.0 - range.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("range min and max cannot be equal".to_string()));
        }

        Ok(Self { bands, range_min: range.0, range_max: range.1 })
    }

    /// Width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        (self.range_max - self.range_min) / self.bands as f32
    }

    /// Starting position of band `index`.
    #[must_use]
    pub fn band_start(&self, index: usize) -> f32 {
        self.range_min + index as f32 * self.bandwidth()
    }

    /// Center position of band `index`, where tick labels sit.
    #[must_use]
    pub fn band_center(&self, index: usize) -> f32 {
        self.band_start(index) + self.bandwidth() / 2.0
    }

    /// Number of bands.
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.bands
    }
}

impl Scale<usize, f32> for BandScale {
    fn scale(&self, value: usize) -> f32 {
        self.band_start(value)
    }

    fn domain(&self) -> (usize, usize) {
        (0, self.bands - 1)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Combined coordinate mapping for the calendar grid.
///
/// Years map linearly onto the horizontal plot extent; months map onto twelve
/// equal vertical bands, January topmost. One year is one column, one month
/// one row. The year domain extends one past the last year so the final
/// column gets a full cell width inside the plot area. A pure function of
/// the year extent and the output dimensions: rebuilding with identical
/// inputs yields identical geometry.
#[derive(Debug, Clone, Copy)]
pub struct ScaleMapper {
    x: LinearScale,
    y: BandScale,
    cell_width: f32,
}

impl ScaleMapper {
    /// Construct a mapper from the dataset's year extent and the output
    /// surface dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when the padding consumes the
    /// whole surface.
    pub fn new(year_extent: Extent<i32>, width: f32, height: f32, padding: Padding) -> Result<Self> {
        let plot_width = width - padding.left - padding.right;
        let plot_height = height - padding.top - padding.bottom;

        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(Error::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            });
        }

        let columns = year_extent.max - year_extent.min + 1;
        let x = LinearScale::new(
            (year_extent.min as f32, (year_extent.max + 1) as f32),
            (padding.left, width - padding.right),
        )?;
        let y = BandScale::new(MONTHS_PER_YEAR, (padding.top, height - padding.bottom))?;

        let cell_width = plot_width / columns as f32;

        Ok(Self { x, y, cell_width })
    }

    /// Left edge of the column for `year`.
    #[must_use]
    pub fn x_for_year(&self, year: i32) -> f32 {
        self.x.scale(year as f32)
    }

    /// Top edge of the band for 1-based `month`. The caller guarantees the
    /// month is in range; a validated dataset always is.
    #[must_use]
    pub fn y_for_month(&self, month: u32) -> f32 {
        self.y.band_start(month.saturating_sub(1) as usize)
    }

    /// Width of one year column, constant across all cells.
    #[must_use]
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of one month band, constant across all cells.
    #[must_use]
    pub fn cell_height(&self) -> f32 {
        self.y.bandwidth()
    }

    /// The underlying year scale.
    #[must_use]
    pub fn year_scale(&self) -> &LinearScale {
        &self.x
    }

    /// The underlying month band scale.
    #[must_use]
    pub fn month_scale(&self) -> &BandScale {
        &self.y
    }
}

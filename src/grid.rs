//! Grid layout: one colored cell per (year, month) record plus axis ticks.
//!
//! Pure data transformation. Drawing the resulting cells and axes is left to
//! the output surface, so the layout is testable without any rendering
//! environment.

use crate::bucket::ColorBucketer;
use crate::color::{Rgba, BUCKET_COUNT};
use crate::data::{month_name, Dataset, TemperatureRecord, MONTHS_PER_YEAR};
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::scale::{Scale, ScaleMapper};

/// One rendered cell: geometry, resolved color, bucket index, source record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Pixel rectangle of the cell.
    pub rect: Rect,
    /// Fill color resolved from the record's bucket.
    pub color: Rgba,
    /// Bucket index in `0..9`.
    pub bucket: usize,
    /// The record this cell visualizes.
    pub record: TemperatureRecord,
}

/// Axis orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal axis along the bottom of the plot area.
    Horizontal,
    /// Vertical axis along the left of the plot area.
    Vertical,
}

/// One tick: an offset along the axis and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Pixel offset along the axis direction.
    pub offset: f32,
    /// Tick label text.
    pub label: String,
}

/// Axis descriptor: baseline position, extent, title, and ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Orientation of the axis.
    pub orientation: Orientation,
    /// Cross-axis position of the baseline (y for horizontal, x for vertical).
    pub position: f32,
    /// Start of the baseline along the axis direction.
    pub start: f32,
    /// End of the baseline along the axis direction.
    pub end: f32,
    /// Axis title.
    pub title: String,
    /// Tick marks in axis order.
    pub ticks: Vec<AxisTick>,
}

/// The laid-out grid: cells plus both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// One cell per record, in record order.
    pub cells: Vec<Cell>,
    /// Year axis along the bottom of the plot area.
    pub x_axis: Axis,
    /// Month axis along the left of the plot area.
    pub y_axis: Axis,
}

/// Lay out the grid: one cell per record, colored by bucket, plus axis ticks.
///
/// Year ticks are emitted for every integer year in the extent, formatted
/// without separators or decimals; month ticks carry the month names at band
/// centers. Records are emitted in dataset order, so the layout is
/// deterministic for a given dataset and mapper.
///
/// # Errors
///
/// Returns [`Error::InvalidRecord`] if a record's month is out of range
/// (validated datasets never trigger this).
pub fn layout_grid(
    dataset: &Dataset,
    mapper: &ScaleMapper,
    bucketer: &ColorBucketer,
    palette: &[Rgba; BUCKET_COUNT],
) -> Result<GridLayout> {
    let mut cells = Vec::with_capacity(dataset.records.len());

    for record in &dataset.records {
        if !record.month_in_range() {
            return Err(Error::InvalidRecord { year: record.year, month: record.month });
        }

        let temp = record.absolute(dataset.base_temperature);
        let bucket = bucketer.bucket(temp);

        cells.push(Cell {
            rect: Rect::new(
                mapper.x_for_year(record.year),
                mapper.y_for_month(record.month),
                mapper.cell_width(),
                mapper.cell_height(),
            ),
            color: palette[bucket],
            bucket,
            record: *record,
        });
    }

    let year_extent = dataset.year_extent()?;
    let (x_start, x_end) = mapper.year_scale().range();
    let (y_start, y_end) = mapper.month_scale().range();

    let x_axis = Axis {
        orientation: Orientation::Horizontal,
        position: y_end,
        start: x_start,
        end: x_end,
        title: "Years".to_string(),
        ticks: (year_extent.min..=year_extent.max)
            .map(|year| AxisTick { offset: mapper.x_for_year(year), label: format!("{year}") })
            .collect(),
    };

    let y_axis = Axis {
        orientation: Orientation::Vertical,
        position: x_start,
        start: y_start,
        end: y_end,
        title: "Months".to_string(),
        ticks: (1..=MONTHS_PER_YEAR as u32)
            .map(|month| AxisTick {
                offset: mapper.month_scale().band_center((month - 1) as usize),
                label: month_name(month).unwrap_or_default().to_string(),
            })
            .collect(),
    };

    Ok(GridLayout { cells, x_axis, y_axis })
}

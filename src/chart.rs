//! Calendar heatmap chart: builder API, layout assembly, and rendering.
//!
//! `CalendarHeatmap` is the entry point. The builder collects the dataset and
//! display options, `build` validates them, and `layout` assembles the pure
//! [`HeatmapLayout`] (cells, axes, legend, title block). Rendering walks the
//! layout and emits drawing primitives, vector (SVG) or raster (PNG).

use std::path::Path;

use crate::bucket::ColorBucketer;
use crate::color::{Rgba, BUCKET_COUNT, THERMAL_PALETTE};
use crate::data::{Dataset, Extent};
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Padding, Point};
use crate::grid::{layout_grid, Cell, GridLayout};
use crate::legend::Legend;
use crate::output::{PngEncoder, SvgEncoder, TextAnchor};
use crate::scale::ScaleMapper;
use crate::tooltip::Tooltip;

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Monthly Global Land-Surface Temperature";

const TITLE_FONT: f32 = 16.0;
const DESC_FONT: f32 = 12.0;
const LABEL_FONT: f32 = 11.0;
const AXIS_TICK_LEN: f32 = 6.0;
const INK: Rgba = Rgba::BLACK;

/// Builder for calendar heatmaps of monthly temperature anomalies.
#[derive(Debug, Clone)]
pub struct CalendarHeatmap {
    dataset: Option<Dataset>,
    width: u32,
    height: u32,
    padding: Padding,
    palette: [Rgba; BUCKET_COUNT],
    swatch_width: f32,
    swatch_height: f32,
    title: String,
}

impl Default for CalendarHeatmap {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarHeatmap {
    /// Create a new heatmap builder with default dimensions and palette.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dataset: None,
            width: 1050,
            height: 540,
            padding: Padding::default(),
            palette: THERMAL_PALETTE,
            swatch_width: 30.0,
            swatch_height: 12.0,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Set the dataset to visualize.
    #[must_use]
    pub fn dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = Some(dataset);
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the padding reserved around the plot area.
    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set the nine-class color palette.
    #[must_use]
    pub fn palette(mut self, palette: [Rgba; BUCKET_COUNT]) -> Self {
        self.palette = palette;
        self
    }

    /// Set the chart title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when no dataset is set or it has no
    /// records, [`Error::InvalidRecord`] for out-of-range months,
    /// [`Error::InvalidDimensions`] for a zero-sized output, and
    /// [`Error::DegenerateRange`] when the temperature range cannot support
    /// classification.
    pub fn build(self) -> Result<Self> {
        let dataset = self.dataset.as_ref().ok_or(Error::EmptyData)?;
        dataset.validate()?;

        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions { width: self.width, height: self.height });
        }

        // Fail fast on ranges the bucketer would reject at layout time
        ColorBucketer::from_dataset(dataset)?;

        Ok(self)
    }

    /// Assemble the full layout. Pure: identical configuration yields an
    /// identical layout, recomputed wholesale on every call.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CalendarHeatmap::build`].
    pub fn layout(&self) -> Result<HeatmapLayout> {
        let dataset = self.dataset.as_ref().ok_or(Error::EmptyData)?;

        let year_extent = dataset.year_extent()?;
        let mapper = ScaleMapper::new(
            year_extent,
            self.width as f32,
            self.height as f32,
            self.padding,
        )?;
        let bucketer = ColorBucketer::from_dataset(dataset)?;
        let grid = layout_grid(dataset, &mapper, &bucketer, &self.palette)?;
        let legend =
            Legend::build(bucketer.max_temp(), &self.palette, self.swatch_width, self.swatch_height)?;

        // Legend strip sits in the bottom padding zone, under the year labels
        let legend_origin =
            Point::new(self.padding.left, self.height as f32 - self.padding.bottom + 50.0);

        let description = format!(
            "{} - {}: base temperature {}°C",
            year_extent.min, year_extent.max, dataset.base_temperature
        );

        Ok(HeatmapLayout {
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            description,
            base_temperature: dataset.base_temperature,
            year_extent,
            grid,
            legend,
            legend_origin,
        })
    }

    /// Render to an SVG string.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CalendarHeatmap::layout`].
    pub fn to_svg(&self) -> Result<String> {
        Ok(self.layout()?.svg().render())
    }

    /// Render to an SVG file.
    ///
    /// # Errors
    ///
    /// Layout errors plus file I/O errors.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.layout()?.svg().write_to_file(path)
    }

    /// Rasterize the cell grid and legend swatches to a framebuffer.
    ///
    /// # Errors
    ///
    /// Same conditions as [`CalendarHeatmap::layout`].
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        self.layout()?.rasterize()
    }

    /// Rasterize and encode to a PNG file.
    ///
    /// # Errors
    ///
    /// Layout errors plus PNG encoding and file I/O errors.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(&self.to_framebuffer()?, path)
    }
}

/// The assembled chart layout: pure data, ready to draw or hit-test.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapLayout {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Chart title.
    pub title: String,
    /// Subtitle: year span and base temperature.
    pub description: String,
    /// Reference temperature the variances deviate from.
    pub base_temperature: f64,
    /// Years covered by the dataset.
    pub year_extent: Extent<i32>,
    /// Cells and axes.
    pub grid: GridLayout,
    /// Color legend.
    pub legend: Legend,
    /// Top-left corner of the legend strip.
    pub legend_origin: Point,
}

impl HeatmapLayout {
    /// The laid-out cells, in record order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.grid.cells
    }

    /// Index of the cell under `point`, if any.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        self.grid.cells.iter().position(|cell| cell.rect.contains(point))
    }

    /// Tooltip content for the cell at `index`.
    #[must_use]
    pub fn tooltip(&self, index: usize) -> Option<Tooltip> {
        let cell = self.grid.cells.get(index)?;
        Tooltip::format(&cell.record, self.base_temperature).ok()
    }

    /// Emit the layout onto an SVG surface: title block, one rectangle per
    /// cell (with embedded hover text), both axes, and the legend.
    #[must_use]
    pub fn svg(&self) -> SvgEncoder {
        let mut svg = SvgEncoder::new(self.width, self.height);
        let center_x = self.width as f32 / 2.0;

        // Title block
        svg = svg
            .text(center_x, 24.0, &self.title, TITLE_FONT, INK, TextAnchor::Middle)
            .text(center_x, 44.0, &self.description, DESC_FONT, INK, TextAnchor::Middle);

        // Cells, each carrying its tooltip as hover text
        for cell in &self.grid.cells {
            let tooltip = Tooltip::format(&cell.record, self.base_temperature)
                .map(|t| t.text())
                .unwrap_or_default();
            svg = svg.rect_titled(
                cell.rect.x,
                cell.rect.y,
                cell.rect.width,
                cell.rect.height,
                cell.color,
                &tooltip,
                &[
                    ("year", cell.record.year.to_string()),
                    ("month", cell.record.month.to_string()),
                ],
            );
        }

        svg = self.draw_x_axis(svg);
        svg = self.draw_y_axis(svg);
        self.draw_legend(svg)
    }

    fn draw_x_axis(&self, mut svg: SvgEncoder) -> SvgEncoder {
        let axis = &self.grid.x_axis;
        svg = svg.line(axis.start, axis.position, axis.end, axis.position, INK, 1.0);

        let step = year_tick_step(self.year_extent.max - self.year_extent.min);
        for (i, tick) in axis.ticks.iter().enumerate() {
            let year = self.year_extent.min + i as i32;
            if year % step != 0 {
                continue;
            }
            svg = svg
                .line(tick.offset, axis.position, tick.offset, axis.position + AXIS_TICK_LEN, INK, 1.0)
                .text(
                    tick.offset,
                    axis.position + AXIS_TICK_LEN + 12.0,
                    &tick.label,
                    LABEL_FONT,
                    INK,
                    TextAnchor::Middle,
                );
        }

        svg.text(
            (axis.start + axis.end) / 2.0,
            axis.position + 34.0,
            &axis.title,
            DESC_FONT,
            INK,
            TextAnchor::Middle,
        )
    }

    fn draw_y_axis(&self, mut svg: SvgEncoder) -> SvgEncoder {
        let axis = &self.grid.y_axis;
        svg = svg.line(axis.position, axis.start, axis.position, axis.end, INK, 1.0);

        for tick in &axis.ticks {
            svg = svg
                .line(axis.position - AXIS_TICK_LEN, tick.offset, axis.position, tick.offset, INK, 1.0)
                .text(
                    axis.position - AXIS_TICK_LEN - 4.0,
                    tick.offset + 4.0,
                    &tick.label,
                    LABEL_FONT,
                    INK,
                    TextAnchor::End,
                );
        }

        svg.text_rotated(
            axis.position - 75.0,
            (axis.start + axis.end) / 2.0,
            &axis.title,
            DESC_FONT,
            INK,
            TextAnchor::Middle,
            -90.0,
        )
    }

    fn draw_legend(&self, mut svg: SvgEncoder) -> SvgEncoder {
        for (i, entry) in self.legend.entries.iter().enumerate() {
            let rect = self.legend.swatch_rect(i, self.legend_origin);
            svg = svg.rect(rect.x, rect.y, rect.width, rect.height, entry.color);
        }

        for (i, label) in self.legend.labels().iter().enumerate() {
            svg = svg.text(
                self.legend_origin.x + i as f32 * self.legend.swatch_width,
                self.legend_origin.y + self.legend.swatch_height + 14.0,
                label,
                LABEL_FONT,
                INK,
                TextAnchor::Middle,
            );
        }

        svg
    }

    /// Rasterize the cell grid and legend swatches (text-free).
    ///
    /// # Errors
    ///
    /// Returns an error when the output dimensions are zero.
    pub fn rasterize(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(Rgba::WHITE);

        for cell in &self.grid.cells {
            fb.fill_rect(
                cell.rect.x as u32,
                cell.rect.y as u32,
                cell.rect.width.ceil() as u32,
                cell.rect.height.ceil() as u32,
                cell.color,
            );
        }

        for (i, entry) in self.legend.entries.iter().enumerate() {
            let rect = self.legend.swatch_rect(i, self.legend_origin);
            fb.fill_rect(
                rect.x as u32,
                rect.y as u32,
                rect.width.ceil() as u32,
                rect.height.ceil() as u32,
                entry.color,
            );
        }

        Ok(fb)
    }
}

/// Smallest label step keeping the year axis readable (at most ~12 labels).
fn year_tick_step(span: i32) -> i32 {
    const STEPS: [i32; 8] = [1, 2, 5, 10, 20, 25, 50, 100];
    STEPS.iter().copied().find(|s| span / s <= 12).unwrap_or(100)
}

//! Hover interaction over laid-out cells.
//!
//! Pointer events arrive with an explicit cell index; the controller reads
//! already-computed layout data, formats the tooltip, and tracks which cell
//! is active. It never mutates the dataset or the layout, so enter, move,
//! and leave are idempotent and safe to call in any order.

use crate::chart::HeatmapLayout;
use crate::geometry::Rect;
use crate::tooltip::Tooltip;

/// What the embedding UI needs to show a tooltip: the hovered cell's
/// geometry (for placement) and its formatted content.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverResponse {
    /// Index of the hovered cell in the layout.
    pub cell_index: usize,
    /// Pixel rectangle of the hovered cell.
    pub anchor: Rect,
    /// Formatted tooltip content.
    pub tooltip: Tooltip,
}

/// Tracks the currently hovered cell across pointer events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    active: Option<usize>,
}

impl HoverState {
    /// Create an idle hover state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered `cell_index`. Returns the tooltip response, or `None`
    /// for an index outside the layout (state is left unchanged).
    pub fn on_enter(&mut self, layout: &HeatmapLayout, cell_index: usize) -> Option<HoverResponse> {
        self.respond(layout, cell_index)
    }

    /// Pointer moved within `cell_index`. Same contract as
    /// [`HoverState::on_enter`].
    pub fn on_move(&mut self, layout: &HeatmapLayout, cell_index: usize) -> Option<HoverResponse> {
        self.respond(layout, cell_index)
    }

    /// Pointer left the grid; clears the active cell.
    pub fn on_leave(&mut self) {
        self.active = None;
    }

    /// Index of the currently hovered cell, if any.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    fn respond(&mut self, layout: &HeatmapLayout, cell_index: usize) -> Option<HoverResponse> {
        let cell = layout.cells().get(cell_index)?;
        let tooltip = layout.tooltip(cell_index)?;
        self.active = Some(cell_index);
        Some(HoverResponse { cell_index, anchor: cell.rect, tooltip })
    }
}

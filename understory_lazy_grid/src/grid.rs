// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`LazyGrid`] controller: cell geometry, visibility, and scrolling.

use core::num::NonZeroUsize;
use core::ops::Range;

use kurbo::{Point, Rect, Size};

use crate::{GridCell, VisibleCells};

/// How the size of every cell in a [`LazyGrid`] is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellSizing {
    /// Every cell has this exact size, independent of the viewport.
    Fixed(Size),
    /// Cells share the viewport width evenly (minus column spacing) and take
    /// their height from this `width / height` ratio.
    AspectRatio(f64),
}

/// A vertically scrolling grid with a fixed number of columns.
///
/// Cells are laid out row-major: cell `i` lives in row `i / columns` and
/// column `i % columns`. The scroll offset is always clamped into
/// `0..=max_scroll_offset()`.
///
/// Every geometry query is computed from the current state on demand. Callers
/// may hold on to [`GridCell`] values, but they describe the grid only as it was
/// when they were produced.
#[derive(Debug, Clone)]
pub struct LazyGrid {
    len: usize,
    columns: NonZeroUsize,
    sizing: CellSizing,
    column_spacing: f64,
    row_spacing: f64,
    viewport: Size,
    scroll_offset: f64,
}

impl LazyGrid {
    /// Creates a grid of `len` cells in `columns` columns with no spacing and an
    /// empty viewport.
    #[must_use]
    pub fn new(len: usize, columns: NonZeroUsize, sizing: CellSizing) -> Self {
        Self {
            len,
            columns,
            sizing,
            column_spacing: 0.0,
            row_spacing: 0.0,
            viewport: Size::ZERO,
            scroll_offset: 0.0,
        }
    }

    /// Sets the gaps between columns and between rows.
    #[must_use]
    pub fn with_spacing(mut self, column_spacing: f64, row_spacing: f64) -> Self {
        self.set_spacing(column_spacing, row_spacing);
        self
    }

    /// Sets the viewport size.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.set_viewport(viewport);
        self
    }

    /// Returns the number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the grid has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the number of cells, re-clamping the scroll offset.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.clamp_scroll();
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns.get()
    }

    /// Sets the number of columns, re-clamping the scroll offset.
    pub fn set_columns(&mut self, columns: NonZeroUsize) {
        self.columns = columns;
        self.clamp_scroll();
    }

    /// Returns the cell sizing policy.
    #[must_use]
    pub const fn sizing(&self) -> CellSizing {
        self.sizing
    }

    /// Sets the cell sizing policy, re-clamping the scroll offset.
    pub fn set_sizing(&mut self, sizing: CellSizing) {
        self.sizing = sizing;
        self.clamp_scroll();
    }

    /// Sets the gaps between columns and between rows.
    pub fn set_spacing(&mut self, column_spacing: f64, row_spacing: f64) {
        debug_assert!(
            column_spacing.is_finite() && row_spacing.is_finite(),
            "LazyGrid spacing must be finite; got {column_spacing:?}, {row_spacing:?}"
        );
        self.column_spacing = column_spacing.max(0.0);
        self.row_spacing = row_spacing.max(0.0);
        self.clamp_scroll();
    }

    /// Returns the viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport size, re-clamping the scroll offset.
    pub fn set_viewport(&mut self, viewport: Size) {
        debug_assert!(
            viewport.is_finite(),
            "LazyGrid viewport must be finite; got {viewport:?}"
        );
        self.viewport = Size::new(viewport.width.max(0.0), viewport.height.max(0.0));
        self.clamp_scroll();
    }

    /// Returns the current scroll offset from the top of the content.
    #[must_use]
    pub const fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset, clamped into `0..=max_scroll_offset()`.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        debug_assert!(
            offset.is_finite(),
            "LazyGrid scroll offset must be finite; got {offset:?}"
        );
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Adjusts the scroll offset by `delta` and returns how much of it was applied.
    ///
    /// The result differs from `delta` only when scrolling hits either end of
    /// the content.
    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        let before = self.scroll_offset;
        self.set_scroll_offset(before + delta);
        self.scroll_offset - before
    }

    /// Scrolls so that the row containing `index` starts `offset` above the top
    /// of the viewport.
    ///
    /// Indices past the end are clamped to the last cell.
    pub fn scroll_to_item(&mut self, index: usize, offset: f64) {
        if self.len == 0 {
            self.scroll_offset = 0.0;
            return;
        }
        let row = self.row_of(index.min(self.len - 1));
        self.set_scroll_offset(self.row_offset(row) + offset);
    }

    /// Returns `true` if the grid can scroll towards its start.
    #[must_use]
    pub fn can_scroll_backward(&self) -> bool {
        self.scroll_offset > 0.0
    }

    /// Returns `true` if the grid can scroll towards its end.
    #[must_use]
    pub fn can_scroll_forward(&self) -> bool {
        self.scroll_offset < self.max_scroll_offset()
    }

    /// Returns the size shared by every cell.
    #[must_use]
    pub fn cell_size(&self) -> Size {
        match self.sizing {
            CellSizing::Fixed(size) => Size::new(size.width.max(0.0), size.height.max(0.0)),
            CellSizing::AspectRatio(ratio) => {
                let columns = self.columns.get() as f64;
                let gaps = self.column_spacing * (columns - 1.0);
                let width = ((self.viewport.width - gaps) / columns).max(0.0);
                let height = if ratio > 0.0 { width / ratio } else { 0.0 };
                Size::new(width, height)
            }
        }
    }

    /// Returns the number of rows needed to hold every cell.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.len.div_ceil(self.columns.get())
    }

    /// Returns the row containing `index`.
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        index / self.columns.get()
    }

    /// Returns the column containing `index`.
    #[must_use]
    pub const fn column_of(&self, index: usize) -> usize {
        index % self.columns.get()
    }

    /// Total height of all rows, including the gaps between them.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        let rows = self.row_count();
        if rows == 0 {
            return 0.0;
        }
        let rows = rows as f64;
        self.cell_size().height * rows + self.row_spacing * (rows - 1.0)
    }

    /// Largest scroll offset that keeps the viewport within the content.
    #[must_use]
    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent() - self.viewport.height).max(0.0)
    }

    /// Returns the bounds of `index` in viewport coordinates, whether or not it
    /// is currently visible.
    #[must_use]
    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        if index >= self.len {
            return None;
        }
        Some(self.rect_unchecked(index, self.cell_size()))
    }

    /// Returns the cell whose bounds contain `point` (in viewport coordinates).
    ///
    /// Points that fall into spacing gaps or outside the viewport resolve to `None`.
    #[must_use]
    pub fn cell_at_point(&self, point: Point) -> Option<usize> {
        if point.x < 0.0
            || point.y < 0.0
            || point.x >= self.viewport.width
            || point.y >= self.viewport.height
        {
            return None;
        }
        let size = self.cell_size();
        let row = track_at(point.y + self.scroll_offset, size.height, self.row_spacing)?;
        let column = track_at(point.x, size.width, self.column_spacing)?;
        if column >= self.columns.get() {
            return None;
        }
        let index = row * self.columns.get() + column;
        (index < self.len).then_some(index)
    }

    /// Returns the range of rows that overlap the viewport.
    ///
    /// A row spans its cells plus the spacing below it, so the first row may
    /// only have its trailing gap on screen.
    #[must_use]
    pub fn visible_rows(&self) -> Range<usize> {
        let height = self.cell_size().height;
        let rows = self.row_count();
        if rows == 0 || height <= 0.0 || self.viewport.height <= 0.0 {
            return 0..0;
        }
        let pitch = height + self.row_spacing;
        let view_start = self.scroll_offset;
        let view_end = self.scroll_offset + self.viewport.height;

        // A row owns its trailing gap, so the row stays first while the gap
        // after it is on screen.
        let mut first = floor_index(view_start / pitch);
        if first > 0 && first as f64 * pitch > view_start {
            first -= 1;
        } else if (first + 1) as f64 * pitch <= view_start {
            first += 1;
        }

        let mut end = floor_index(view_end / pitch);
        if (end as f64) * pitch < view_end {
            end += 1;
        }
        let end = end.min(rows);
        first.min(end)..end
    }

    /// Returns the range of cell indices in rows that overlap the viewport.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let rows = self.visible_rows();
        let columns = self.columns.get();
        let start = (rows.start * columns).min(self.len);
        let end = (rows.end * columns).min(self.len);
        start..end
    }

    /// Iterates the cells of every row that overlaps the viewport.
    #[must_use]
    pub fn visible_cells(&self) -> VisibleCells<'_> {
        VisibleCells::new(self, self.visible_range(), self.cell_size())
    }

    /// Returns the first visible cell, if any.
    #[must_use]
    pub fn first_visible_index(&self) -> Option<usize> {
        let range = self.visible_range();
        (!range.is_empty()).then_some(range.start)
    }

    /// How far the first visible row has scrolled past the top of the viewport.
    ///
    /// Never negative and always below the row pitch, so
    /// `scroll_to_item(first_visible_index, first_visible_scroll_offset)`
    /// leaves the scroll where it is. Returns
    /// `0.0` when nothing is visible.
    #[must_use]
    pub fn first_visible_scroll_offset(&self) -> f64 {
        match self.first_visible_index() {
            Some(index) => (self.scroll_offset - self.row_offset(self.row_of(index))).max(0.0),
            None => 0.0,
        }
    }

    pub(crate) fn rect_unchecked(&self, index: usize, size: Size) -> Rect {
        let x = self.column_of(index) as f64 * (size.width + self.column_spacing);
        let y = self.row_offset(self.row_of(index)) - self.scroll_offset;
        Rect::from_origin_size(Point::new(x, y), size)
    }

    fn row_offset(&self, row: usize) -> f64 {
        row as f64 * (self.cell_size().height + self.row_spacing)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }
}

/// Resolves a non-negative coordinate to the track whose body contains it.
fn track_at(position: f64, extent: f64, spacing: f64) -> Option<usize> {
    if extent <= 0.0 || position < 0.0 {
        return None;
    }
    let pitch = extent + spacing;
    let track = floor_index(position / pitch);
    (position - track as f64 * pitch < extent).then_some(track)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Callers only pass non-negative ratios; the cast floors and saturates"
)]
fn floor_index(value: f64) -> usize {
    value.max(0.0) as usize
}

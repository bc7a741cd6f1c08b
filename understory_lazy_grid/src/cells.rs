// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible cell records and the iterator that produces them.

use core::iter::FusedIterator;
use core::ops::Range;

use kurbo::{Rect, Size};

use crate::LazyGrid;

/// A single laid-out cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Position of the cell in the flat `0..len` strip.
    pub index: usize,
    /// Bounds of the cell in viewport coordinates.
    pub rect: Rect,
}

/// Iterator over the cells of the rows that overlap a [`LazyGrid`]'s viewport.
///
/// Created by [`LazyGrid::visible_cells`]. Cells are yielded in index order.
#[derive(Debug, Clone)]
pub struct VisibleCells<'a> {
    grid: &'a LazyGrid,
    indices: Range<usize>,
    size: Size,
}

impl<'a> VisibleCells<'a> {
    pub(crate) fn new(grid: &'a LazyGrid, indices: Range<usize>, size: Size) -> Self {
        Self {
            grid,
            indices,
            size,
        }
    }
}

impl Iterator for VisibleCells<'_> {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let index = self.indices.next()?;
        Some(GridCell {
            index,
            rect: self.grid.rect_unchecked(index, self.size),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl DoubleEndedIterator for VisibleCells<'_> {
    fn next_back(&mut self) -> Option<GridCell> {
        let index = self.indices.next_back()?;
        Some(GridCell {
            index,
            rect: self.grid.rect_unchecked(index, self.size),
        })
    }
}

impl ExactSizeIterator for VisibleCells<'_> {}

impl FusedIterator for VisibleCells<'_> {}

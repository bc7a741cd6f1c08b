// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_lazy_grid --heading-base-level=0

//! Understory Lazy Grid: geometry for a vertically scrolling, fixed-column grid.
//!
//! This crate answers "which cells are on screen, and where?" for a dense strip
//! of cells indexed `0..len`, laid out row by row into a fixed number of columns.
//! Every cell in the grid shares one size, either fixed or derived from the
//! viewport width and an aspect ratio.
//!
//! The core concepts are:
//!
//! - [`LazyGrid`]: owns the cell count, column count, [`CellSizing`], spacing,
//!   viewport size, and a clamped scroll offset. All geometry queries are pure
//!   functions of that state; nothing is cached between calls.
//! - [`GridCell`]: an index plus its bounding [`kurbo::Rect`] in viewport
//!   coordinates (the viewport's top-left corner is the origin).
//! - [`VisibleCells`]: an iterator over the cells of every row that overlaps the
//!   viewport, computed on demand.
//!
//! Host frameworks are responsible for:
//!
//! - Owning the item data and the views that render it.
//! - Calling [`LazyGrid::set_len`] when items are added or removed, and
//!   [`LazyGrid::set_viewport`] when the container is resized.
//! - Positioning each realized view at [`GridCell::rect`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use kurbo::Size;
//! use understory_lazy_grid::{CellSizing, LazyGrid};
//!
//! // 100 cells in three columns, each cell 4:3 and 12px apart.
//! let columns = NonZeroUsize::new(3).unwrap();
//! let mut grid = LazyGrid::new(100, columns, CellSizing::AspectRatio(4.0 / 3.0))
//!     .with_spacing(12.0, 12.0)
//!     .with_viewport(Size::new(336.0, 400.0));
//!
//! let cell = grid.cell_size();
//! assert_eq!(cell.width, 104.0);
//! assert!((cell.height - 78.0).abs() < 1e-9);
//! assert_eq!(grid.first_visible_index(), Some(0));
//!
//! // Scroll past the first row: the first visible cell moves to the second row.
//! grid.scroll_by(100.0);
//! assert_eq!(grid.first_visible_index(), Some(3));
//! for cell in grid.visible_cells() {
//!     assert!(cell.rect.y1 > 0.0 && cell.rect.y0 < 400.0);
//! }
//! ```
//!
//! All extents and offsets live in logical pixels and are expected to be finite.
//! Negative extents are clamped to zero.
//!
//! This crate is `no_std`.

#![no_std]

mod cells;
mod grid;

pub use cells::{GridCell, VisibleCells};
pub use grid::{CellSizing, LazyGrid};

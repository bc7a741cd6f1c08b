// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`LayoutQuery`] for [`LazyGrid`].
//!
//! The grid reports cells in viewport coordinates with the viewport's top edge
//! at `0.0`, which is the space pointer positions are expected in. Scrolling is
//! applied synchronously, so the engine sees the new geometry on its next query.

use understory_lazy_grid::{GridCell, LazyGrid, VisibleCells};

use crate::layout::{ItemLayoutInfo, LayoutQuery};

/// Converts a grid cell into the engine's item record.
#[must_use]
pub fn item_from_cell(cell: GridCell) -> ItemLayoutInfo {
    ItemLayoutInfo::from_rect(cell.index, cell.rect)
}

impl LayoutQuery for LazyGrid {
    type VisibleItems<'a> = core::iter::Map<VisibleCells<'a>, fn(GridCell) -> ItemLayoutInfo>;

    fn visible_items(&self) -> Self::VisibleItems<'_> {
        self.visible_cells()
            .map(item_from_cell as fn(GridCell) -> ItemLayoutInfo)
    }

    fn viewport_start(&self) -> f64 {
        0.0
    }

    fn viewport_end(&self) -> f64 {
        self.viewport().height
    }

    fn first_visible_index(&self) -> Option<usize> {
        Self::first_visible_index(self)
    }

    fn first_visible_scroll_offset(&self) -> f64 {
        Self::first_visible_scroll_offset(self)
    }

    fn can_scroll_backward(&self) -> bool {
        Self::can_scroll_backward(self)
    }

    fn can_scroll_forward(&self) -> bool {
        Self::can_scroll_forward(self)
    }

    fn scroll_by(&mut self, delta: f64) -> f64 {
        Self::scroll_by(self, delta)
    }

    fn scroll_to_item(&mut self, index: usize, offset: f64) {
        Self::scroll_to_item(self, index, offset);
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use kurbo::{Point, Size, Vec2};
    use understory_lazy_grid::{CellSizing, LazyGrid};

    use crate::layout::{LayoutQuery, item_at_point};
    use crate::list::move_item;
    use crate::state::DragReorderState;

    fn grid(len: usize) -> LazyGrid {
        let columns = NonZeroUsize::new(3).unwrap();
        LazyGrid::new(len, columns, CellSizing::Fixed(Size::new(100.0, 100.0)))
            .with_spacing(10.0, 10.0)
            .with_viewport(Size::new(320.0, 400.0))
    }

    #[test]
    fn reports_viewport_and_visible_cells() {
        let mut grid = grid(30);
        assert_eq!(LayoutQuery::viewport_start(&grid), 0.0);
        assert_eq!(LayoutQuery::viewport_end(&grid), 400.0);
        assert_eq!(LayoutQuery::visible_items(&grid).count(), 12);

        let consumed = LayoutQuery::scroll_by(&mut grid, 165.0);
        assert_eq!(consumed, 165.0);
        // Rows are 110 apart, so row 1 is 55px past the top.
        assert_eq!(LayoutQuery::first_visible_index(&grid), Some(3));
        assert_eq!(LayoutQuery::first_visible_scroll_offset(&grid), 55.0);

        let hit = item_at_point(&grid, Point::new(150.0, 0.0)).unwrap();
        assert_eq!(hit.index, 4);
        assert_eq!(hit.origin, Point::new(110.0, -55.0));
    }

    #[test]
    fn scroll_to_item_restores_position() {
        let mut grid = grid(30);
        LayoutQuery::scroll_to_item(&mut grid, 6, 20.0);
        assert_eq!(grid.scroll_offset(), 240.0);
        assert!(LayoutQuery::can_scroll_backward(&grid));
        assert!(LayoutQuery::can_scroll_forward(&grid));
    }

    #[test]
    fn pinning_from_inside_a_row_gap_keeps_the_scroll() {
        let mut grid = grid(30);
        // Row 0 ends at 100 and row 1 starts at 110: the top edge is in the gap.
        grid.set_scroll_offset(105.0);
        assert_eq!(LayoutQuery::first_visible_index(&grid), Some(0));
        assert_eq!(LayoutQuery::first_visible_scroll_offset(&grid), 105.0);

        // Drag item 3 (on screen at y 5..105) up onto item 0, the first visible item.
        let mut state = DragReorderState::new();
        assert_eq!(state.on_drag_start(&grid, Point::new(50.0, 55.0)), Some(3));
        let reorder = state
            .on_drag(&mut grid, None, Vec2::new(0.0, -110.0), |_, _| {})
            .unwrap();
        assert_eq!((reorder.from, reorder.to), (3, 0));
        assert!(reorder.scroll_pinned);
        assert_eq!(grid.scroll_offset(), 105.0);

        // Item 3 started at (0, 5); it is now drawn 110px higher.
        let screen = grid.cell_rect(0).unwrap().origin() + state.drag_offset();
        assert_eq!(screen, Point::new(0.0, -105.0));
    }

    #[test]
    fn reorder_below_a_row_gap_keeps_the_pointer_position() {
        let mut grid = grid(30);
        grid.set_scroll_offset(105.0);

        // Item 4 is on screen at (110, 5); drag it left onto item 3.
        let mut state = DragReorderState::new();
        assert_eq!(state.on_drag_start(&grid, Point::new(160.0, 55.0)), Some(4));
        let reorder = state
            .on_drag(&mut grid, None, Vec2::new(-110.0, 0.0), |_, _| {})
            .unwrap();
        assert_eq!((reorder.from, reorder.to), (4, 3));
        assert!(!reorder.scroll_pinned);
        assert_eq!(grid.scroll_offset(), 105.0);

        let screen = grid.cell_rect(3).unwrap().origin() + state.drag_offset();
        assert_eq!(screen, Point::new(0.0, 5.0));
    }

    #[test]
    fn drag_across_a_row() {
        let mut grid = grid(9);
        let mut items: [usize; 9] = core::array::from_fn(|i| i);
        let mut state = DragReorderState::new();

        assert_eq!(state.on_drag_start(&grid, Point::new(50.0, 50.0)), Some(0));
        let reorder = state.on_drag(
            &mut grid,
            Some(Point::new(160.0, 50.0)),
            Vec2::new(110.0, 0.0),
            |from, to| move_item(&mut items, from, to),
        );
        let reorder = reorder.unwrap();
        assert_eq!((reorder.from, reorder.to), (0, 1));
        assert!(reorder.scroll_pinned);
        assert_eq!(items[..3], [1, 0, 2]);
        // The dragged item now sits in slot 1, right under the pointer.
        assert_eq!(state.drag_offset(), Vec2::ZERO);
    }
}

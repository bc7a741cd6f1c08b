// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press drag-to-reorder over a 100-item, three-column grid.
//!
//! This example scripts one interaction end to end:
//! - hold on an item until the long press completes,
//! - drag it to the bottom edge so the grid auto-scrolls under it,
//! - release and print the resulting order.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example drag_reorder_grid`

use core::num::NonZeroUsize;

use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use understory_drag_reorder::{
    AutoScrollTick, DragReorderConfig, LayoutQuery, ReorderController, move_item,
};
use understory_lazy_grid::{CellSizing, LazyGrid};

const COLUMNS: usize = 3;
const FRAME: u64 = 16;

fn print_visible(grid: &LazyGrid, items: &[u32], controller: &ReorderController) {
    let state = controller.state();
    let mut row = None;
    let mut line = String::new();
    for cell in grid.visible_cells() {
        let this_row = grid.row_of(cell.index);
        if row.is_some_and(|r| r != this_row) {
            println!("{line}");
            line.clear();
        }
        row = Some(this_row);
        let marker = if state.dragging_index() == Some(cell.index) {
            '*'
        } else {
            ' '
        };
        line.push_str(&format!("{marker}{:>3} ", items[cell.index]));
    }
    if !line.is_empty() {
        println!("{line}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(columns) = NonZeroUsize::new(COLUMNS) else {
        return;
    };
    let mut items: Vec<u32> = (0..100).collect();
    let mut grid = LazyGrid::new(items.len(), columns, CellSizing::AspectRatio(4.0 / 3.0))
        .with_spacing(12.0, 12.0)
        .with_viewport(Size::new(336.0, 600.0));
    let mut controller = ReorderController::new(DragReorderConfig::default());
    let on_list_change = |items: &mut Vec<u32>, from: usize, to: usize| {
        println!("move {from} -> {to}");
        move_item(items, from, to);
    };

    println!("before:");
    print_visible(&grid, &items, &controller);

    // Press on the middle of item 4 and hold until the long press completes.
    let Some(grab) = grid.cell_rect(4).map(|rect| rect.center()) else {
        return;
    };
    let mut now = 0;
    controller.on_down(None, grab, now);
    while !controller.is_dragging() {
        now += FRAME;
        controller.tick(now, &mut grid, |from, to| on_list_change(&mut items, from, to));
    }
    println!("drag started on item {:?}", controller.state().dragging_index());

    // Drag straight down until the item overhangs the bottom edge.
    let edge = LayoutQuery::viewport_end(&grid) - 20.0;
    let mut y = grab.y;
    while y < edge {
        y = (y + 30.0).min(edge);
        now += FRAME;
        controller.on_move(None, Point::new(grab.x, y), now, &mut grid, |from, to| {
            on_list_change(&mut items, from, to);
        });
        controller.tick(now, &mut grid, |from, to| on_list_change(&mut items, from, to));
    }

    // Hold at the edge and let auto-scroll carry the item down the list.
    let mut scrolled = 0.0;
    for _ in 0..60 {
        now += FRAME;
        let tick = controller.tick(now, &mut grid, |from, to| on_list_change(&mut items, from, to));
        match tick {
            Some(AutoScrollTick::Scrolled { consumed, .. }) => scrolled += consumed,
            Some(AutoScrollTick::AtEdge) | None => break,
            Some(_) => {}
        }
    }
    tracing::info!(scrolled, "auto-scroll finished");

    let dropped_at = controller.state().dragging_index();
    println!("during drag (scrolled {scrolled:.0}px):");
    print_visible(&grid, &items, &controller);

    controller.on_up(None, now + FRAME);
    println!("dropped item 4 at index {dropped_at:?}");
    println!("after:");
    print_visible(&grid, &items, &controller);
}

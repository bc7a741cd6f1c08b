// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drag_reorder --heading-base-level=0

//! Understory Drag Reorder: long-press drag-to-reorder for scrolling grids and lists.
//!
//! This crate implements the interaction logic behind "hold an item, drag it
//! somewhere else, and watch the others make room" in a virtualized, vertically
//! scrolling container. It owns no items and draws nothing. It asks a
//! [`LayoutQuery`] where things are, tells the host which moves to apply, and
//! tells the renderer how far to displace the dragged item.
//!
//! The core concepts are:
//!
//! - [`DragReorderState`]: the drag session state machine. It resolves the
//!   grabbed item, accumulates the drag offset, and requests a list move
//!   through an `on_list_change(from, to)` callback whenever the dragged item's
//!   center crosses into another item. The offset is rebased after each move
//!   so the dragged item stays under the pointer.
//! - [`LayoutQuery`]: what the engine needs from the container: visible item
//!   geometry, viewport edges, first-visible position, and two scroll commands.
//! - [`AutoScroll`]: a host-ticked repeating task that scrolls while the dragged
//!   item overhangs the viewport, proportionally to
//!   [`DragReorderState::over_scroll_percent`]. It is bound to one drag session
//!   and stops for good once that session is over.
//! - [`LongPressDrag`]: turns pointer down/move/up/cancel plus timestamps into
//!   drag start/drag/end/cancel gestures after a long press.
//! - [`ReorderController`]: owns all of the above and routes pointer events and
//!   timer ticks between them.
//!
//! Host frameworks are responsible for:
//!
//! - Owning the list and applying each move, for example with [`move_item`],
//!   before the next layout query.
//! - Rendering the item at [`DragReorderState::dragging_index`] displaced by
//!   [`DragReorderState::drag_offset`].
//! - Calling `tick` from a frame or timer loop, at
//!   [`ReorderController::next_deadline`] or sooner.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use kurbo::{Point, Size, Vec2};
//! use understory_drag_reorder::{DragReorderState, move_item};
//! use understory_lazy_grid::{CellSizing, LazyGrid};
//!
//! let columns = NonZeroUsize::new(3).unwrap();
//! let mut grid = LazyGrid::new(5, columns, CellSizing::Fixed(Size::new(100.0, 100.0)))
//!     .with_viewport(Size::new(300.0, 400.0));
//! let mut items = ['A', 'B', 'C', 'D', 'E'];
//! let mut state = DragReorderState::new();
//!
//! // Grab C and drag its center onto E.
//! assert_eq!(state.on_drag_start(&grid, Point::new(250.0, 50.0)), Some(2));
//! state.on_drag(&mut grid, Some(Point::new(150.0, 150.0)), Vec2::new(-100.0, 100.0), |from, to| {
//!     move_item(&mut items, from, to);
//! });
//!
//! assert_eq!(items, ['A', 'B', 'D', 'E', 'C']);
//! assert_eq!(state.dragging_index(), Some(4));
//! // C's new slot is exactly under the pointer.
//! assert_eq!(state.drag_offset(), Vec2::ZERO);
//!
//! state.on_drag_end();
//! assert_eq!(state.dragging_index(), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` in dependencies.
//! - `libm`: floating point support for `no_std` builds.
//! - `lazy_grid_adapter` (default): implements [`LayoutQuery`] for
//!   `understory_lazy_grid::LazyGrid`.
//! - `tracing`: emits `tracing` events for drag sessions, reorders, and
//!   auto-scroll steps.
//!
//! This crate is `no_std` and uses `alloc` only in tests.

#![no_std]

#[cfg(test)]
extern crate alloc;

pub mod adapters;
pub mod auto_scroll;
pub mod controller;
pub mod gesture;
pub mod layout;
pub mod list;
pub mod state;

pub use auto_scroll::{AutoScroll, AutoScrollConfig, AutoScrollTick};
pub use controller::{DragReorderConfig, ReorderController};
pub use gesture::{DragGesture, DragGestures, LongPressConfig, LongPressDrag, PointerId};
pub use layout::{ItemLayoutInfo, LayoutQuery, item_at_index, item_at_point};
pub use list::move_item;
pub use state::{DragReorderState, Reorder, SessionId};

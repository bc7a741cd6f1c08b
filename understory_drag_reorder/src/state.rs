// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag session state machine.
//!
//! [`DragReorderState`] tracks one drag at a time:
//!
//! ```text
//! Idle --on_drag_start--> Dragging --on_drag*--> Dragging --on_drag_end / on_drag_cancel--> Idle
//! ```
//!
//! A drag that starts over empty space still opens a session, but with no
//! dragged index: later [`on_drag`](DragReorderState::on_drag) calls only
//! accumulate the offset and never reorder.
//!
//! ## Continuity
//!
//! While dragging, the item at `dragging_index` is drawn at its layout position
//! plus [`drag_offset`](DragReorderState::drag_offset). When the dragged center
//! crosses into another item, the host moves the dragged item to that index
//! and the offset is rebased by the difference between the two layout slots.
//! The on-screen position therefore keeps following the pointer across any
//! number of reorders.

use kurbo::{Point, Size, Vec2};

use crate::layout::{LayoutQuery, item_at_index, item_at_point};

/// Identifies one drag session.
///
/// A new id is issued on every drag start, end, and cancel, so anything bound
/// to an older id (such as an [`AutoScroll`](crate::AutoScroll)) can tell that its
/// session is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionId(u64);

impl SessionId {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A list move requested from the host during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reorder {
    /// Index the dragged item was removed from.
    pub from: usize,
    /// Index the dragged item was reinserted at.
    pub to: usize,
    /// Whether the layout was asked to pin its first visible item before the move.
    pub scroll_pinned: bool,
}

/// Mutable state of a drag-to-reorder interaction.
///
/// The host feeds pointer events in and polls [`dragging_index`](Self::dragging_index)
/// and [`offset_for`](Self::offset_for) when rendering.
#[derive(Debug, Clone, Default)]
pub struct DragReorderState {
    dragging_index: Option<usize>,
    drag_offset: Vec2,
    drag_position: Point,
    /// Vertical distance from the item's center to the grab point at drag start.
    anchor_y: f64,
    dragged_size: Option<Size>,
    session: SessionId,
}

impl DragReorderState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the item currently being dragged.
    #[must_use]
    pub const fn dragging_index(&self) -> Option<usize> {
        self.dragging_index
    }

    /// Returns `true` while an item is being dragged.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging_index.is_some()
    }

    /// Offset to draw the dragged item at, relative to its layout slot.
    #[must_use]
    pub const fn drag_offset(&self) -> Vec2 {
        self.drag_offset
    }

    /// Last absolute pointer position reported for this drag.
    #[must_use]
    pub const fn drag_position(&self) -> Point {
        self.drag_position
    }

    /// Vertical distance from the dragged item's center to the grab point,
    /// captured at drag start.
    #[must_use]
    pub const fn anchor_y(&self) -> f64 {
        self.anchor_y
    }

    /// The current drag session.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Offset to render the item at `index` with.
    ///
    /// Only the dragged item is displaced; every other item sits in its slot.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> Vec2 {
        if self.dragging_index == Some(index) {
            self.drag_offset
        } else {
            Vec2::ZERO
        }
    }

    /// Begins a drag at `position` and returns the index of the grabbed item.
    ///
    /// Any previous session is replaced.
    pub fn on_drag_start<L>(&mut self, layout: &L, position: Point) -> Option<usize>
    where
        L: LayoutQuery + ?Sized,
    {
        let item = item_at_point(layout, position);
        self.session = self.session.next();
        self.dragging_index = item.map(|item| item.index);
        self.dragged_size = item.map(|item| item.size);
        self.drag_position = position;
        self.drag_offset = Vec2::ZERO;
        self.anchor_y = item.map_or(0.0, |item| position.y - item.center().y);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            index = ?self.dragging_index,
            x = position.x,
            y = position.y,
            "drag started"
        );
        self.dragging_index
    }

    /// Applies one drag step.
    ///
    /// `position` is the absolute pointer position, or `None` for synthetic
    /// steps such as auto-scroll compensation. `delta` is always added to the
    /// drag offset.
    ///
    /// If the dragged item's center now lies over another visible item, the
    /// layout may first be asked to pin its first visible item, then
    /// `on_list_change(from, to)` is called exactly once. The host must move
    /// the item at `from` to `to` before the next layout query.
    pub fn on_drag<L, F>(
        &mut self,
        layout: &mut L,
        position: Option<Point>,
        delta: Vec2,
        on_list_change: F,
    ) -> Option<Reorder>
    where
        L: LayoutQuery + ?Sized,
        F: FnOnce(usize, usize),
    {
        if let Some(position) = position {
            self.drag_position = position;
        }
        self.drag_offset += delta;

        let from = self.dragging_index?;
        let anchor = item_at_index(layout, from)?;
        let center = anchor.center() + self.drag_offset;
        let target = item_at_point(layout, center)?;
        if target.index == from {
            return None;
        }

        let first_visible = layout.first_visible_index();
        let scroll_pinned = from == 0 || first_visible == Some(target.index);
        if scroll_pinned {
            if let Some(first) = first_visible {
                let offset = layout.first_visible_scroll_offset();
                #[cfg(feature = "tracing")]
                tracing::trace!(first, offset, "pinning first visible item");
                layout.scroll_to_item(first, offset);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(from, to = target.index, "reorder");
        on_list_change(from, target.index);

        // Both slots come from the snapshot the hit test used.
        self.drag_offset += anchor.origin - target.origin;
        self.dragging_index = Some(target.index);

        Some(Reorder {
            from,
            to: target.index,
            scroll_pinned,
        })
    }

    /// How far the dragged item sticks out of the viewport, as a signed fraction
    /// of its own height.
    ///
    /// Negative values mean it overhangs the start of the viewport, positive
    /// values the end. The result is clamped to `-1.0..=1.0` and is `0.0` when
    /// nothing is dragged or the item is fully inside. If both edges overhang,
    /// the start wins.
    ///
    /// Callers scale the result by their maximum scroll speed.
    #[must_use]
    pub fn over_scroll_percent<L>(&self, layout: &L) -> f64
    where
        L: LayoutQuery + ?Sized,
    {
        let Some(size) = self.dragged_size else {
            return 0.0;
        };
        let height = size.height;
        if !(height.is_finite() && height > 0.0) {
            return 0.0;
        }

        let top = self.drag_position.y - self.anchor_y - height / 2.0;
        let top_over = layout.viewport_start() - top;
        let bottom_over = top + height - layout.viewport_end();

        if top_over > 0.0 {
            -top_over.min(height) / height
        } else if bottom_over > 0.0 {
            bottom_over.min(height) / height
        } else {
            0.0
        }
    }

    /// Ends the drag normally.
    pub fn on_drag_end(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(index = ?self.dragging_index, "drag ended");
        self.reset();
    }

    /// Abandons the drag.
    ///
    /// Reorders already reported stay applied; the engine makes no speculative
    /// changes to roll back.
    pub fn on_drag_cancel(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(index = ?self.dragging_index, "drag canceled");
        self.reset();
    }

    fn reset(&mut self) {
        self.dragging_index = None;
        self.drag_offset = Vec2::ZERO;
        self.dragged_size = None;
        self.anchor_y = 0.0;
        self.session = self.session.next();
    }
}

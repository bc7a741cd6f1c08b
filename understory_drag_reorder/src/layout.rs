// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout contract the reorder engine queries.
//!
//! The engine never caches geometry. Every [`DragReorderState`](crate::DragReorderState)
//! transition asks the layout afresh, so an implementation may recompute its
//! visible items on each call or hand out a snapshot it already keeps up to date.
//! Items disappearing between two queries is expected and is handled as "not found".

use kurbo::{Point, Rect, Size};

/// Geometry of one laid-out item, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemLayoutInfo {
    /// Position of the item in the host's list.
    pub index: usize,
    /// Top-left corner of the item, relative to the viewport.
    pub origin: Point,
    /// Size of the item.
    pub size: Size,
}

impl ItemLayoutInfo {
    /// Creates a record from an index and its bounds.
    #[must_use]
    pub fn from_rect(index: usize, rect: Rect) -> Self {
        Self {
            index,
            origin: rect.origin(),
            size: rect.size(),
        }
    }

    /// Bounds of the item.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Center of the item.
    #[must_use]
    pub fn center(&self) -> Point {
        self.origin + self.size.to_vec2() / 2.0
    }

    /// Returns `true` if `point` lies inside the item's bounds.
    ///
    /// Bounds are half-open: the top and left edges are inside, the bottom and
    /// right edges are not.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.rect().contains(point)
    }
}

/// Read access to the visible items of a scrolling container, plus the two
/// scroll commands the reorder engine issues.
///
/// Coordinates are viewport-relative and must match the space pointer
/// positions are reported in. The scroll axis is vertical.
pub trait LayoutQuery {
    /// Iterator returned by [`LayoutQuery::visible_items`].
    type VisibleItems<'a>: Iterator<Item = ItemLayoutInfo>
    where
        Self: 'a;

    /// Items currently laid out, in any order.
    fn visible_items(&self) -> Self::VisibleItems<'_>;

    /// Leading edge of the viewport along the scroll axis.
    fn viewport_start(&self) -> f64;

    /// Trailing edge of the viewport along the scroll axis.
    fn viewport_end(&self) -> f64;

    /// Index of the first visible item, if any.
    fn first_visible_index(&self) -> Option<usize>;

    /// How far the first visible item has scrolled past the viewport start.
    fn first_visible_scroll_offset(&self) -> f64;

    /// Returns `true` if the content can scroll towards its start.
    fn can_scroll_backward(&self) -> bool;

    /// Returns `true` if the content can scroll towards its end.
    fn can_scroll_forward(&self) -> bool;

    /// Scrolls the content by `delta` and returns the amount actually applied.
    ///
    /// The scroll must be applied before this returns.
    fn scroll_by(&mut self, delta: f64) -> f64;

    /// Scrolls so that `index` sits `offset` past the viewport start.
    ///
    /// The scroll must be applied before this returns.
    fn scroll_to_item(&mut self, index: usize, offset: f64);
}

/// Returns the visible item whose bounds contain `point`.
pub fn item_at_point<L>(layout: &L, point: Point) -> Option<ItemLayoutInfo>
where
    L: LayoutQuery + ?Sized,
{
    layout.visible_items().find(|item| item.contains(point))
}

/// Returns the visible item at `index`.
pub fn item_at_index<L>(layout: &L, index: usize) -> Option<ItemLayoutInfo>
where
    L: LayoutQuery + ?Sized,
{
    layout.visible_items().find(|item| item.index == index)
}

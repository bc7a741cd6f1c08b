// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wiring pointer input, the drag state, and auto-scroll together.
//!
//! [`ReorderController`] is the piece a host embeds when it does not want to
//! drive [`LongPressDrag`], [`DragReorderState`] and [`AutoScroll`] by hand.
//! It owns all three and routes raw pointer events and timer ticks between them:
//!
//! - a completed long press starts a drag session and a fresh auto-scroll task,
//! - moves are forwarded to [`DragReorderState::on_drag`],
//! - release or cancel ends the session and drops its auto-scroll task.
//!
//! The host keeps owning the list and the layout; both are passed in on each
//! call that may need them.

use kurbo::Point;

use crate::auto_scroll::{AutoScroll, AutoScrollConfig, AutoScrollTick};
use crate::gesture::{DragGesture, LongPressConfig, LongPressDrag, PointerId};
use crate::layout::LayoutQuery;
use crate::state::{DragReorderState, Reorder};

/// Configuration for a [`ReorderController`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragReorderConfig {
    /// When a press turns into a drag.
    pub long_press: LongPressConfig,
    /// How fast and how often to scroll near the edges.
    pub auto_scroll: AutoScrollConfig,
}

impl DragReorderConfig {
    /// Replaces the long-press thresholds.
    #[must_use]
    pub fn with_long_press(mut self, long_press: LongPressConfig) -> Self {
        self.long_press = long_press;
        self
    }

    /// Replaces the auto-scroll tuning.
    #[must_use]
    pub fn with_auto_scroll(mut self, auto_scroll: AutoScrollConfig) -> Self {
        self.auto_scroll = auto_scroll;
        self
    }
}

/// Pointer-driven drag-to-reorder for one scrolling container.
///
/// ```
/// use core::num::NonZeroUsize;
/// use kurbo::{Point, Size};
/// use understory_drag_reorder::{DragReorderConfig, ReorderController, move_item};
/// use understory_lazy_grid::{CellSizing, LazyGrid};
///
/// let columns = NonZeroUsize::new(3).unwrap();
/// let mut grid = LazyGrid::new(6, columns, CellSizing::Fixed(Size::new(100.0, 100.0)))
///     .with_viewport(Size::new(300.0, 400.0));
/// let mut items = ['A', 'B', 'C', 'D', 'E', 'F'];
/// let mut controller = ReorderController::new(DragReorderConfig::default());
///
/// controller.on_down(None, Point::new(50.0, 50.0), 0);
/// controller.tick(400, &mut grid, |_, _| {});
/// assert_eq!(controller.state().dragging_index(), Some(0));
///
/// controller.on_move(None, Point::new(150.0, 50.0), 420, &mut grid, |from, to| {
///     move_item(&mut items, from, to);
/// });
/// assert_eq!(items, ['B', 'A', 'C', 'D', 'E', 'F']);
///
/// controller.on_up(None, 500);
/// assert!(!controller.is_dragging());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ReorderController {
    config: DragReorderConfig,
    gesture: LongPressDrag,
    state: DragReorderState,
    auto_scroll: Option<AutoScroll>,
}

impl ReorderController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: DragReorderConfig) -> Self {
        Self {
            config,
            gesture: LongPressDrag::new(config.long_press),
            state: DragReorderState::new(),
            auto_scroll: None,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> DragReorderConfig {
        self.config
    }

    /// The drag state, for rendering.
    #[must_use]
    pub const fn state(&self) -> &DragReorderState {
        &self.state
    }

    /// The auto-scroll task of the current session, if any.
    #[must_use]
    pub const fn auto_scroll(&self) -> Option<&AutoScroll> {
        self.auto_scroll.as_ref()
    }

    /// Returns `true` while a drag session is open.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Earliest time the host should call [`tick`](Self::tick) again.
    ///
    /// Covers both a pending long press and the next auto-scroll step. While
    /// the dragged item sits inside the viewport there is no auto-scroll
    /// deadline; pointer moves wake the task instead.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        let long_press = self.gesture.long_press_deadline();
        let scroll = self.auto_scroll.as_ref().and_then(AutoScroll::next_deadline);
        match (long_press, scroll) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Forwards a pointer down.
    pub fn on_down(&mut self, pointer_id: Option<PointerId>, position: Point, timestamp: u64) {
        self.gesture.on_down(pointer_id, position, timestamp);
    }

    /// Forwards a pointer move.
    ///
    /// A parked auto-scroll task gets a step right after the move, so scrolling
    /// starts as soon as the dragged item reaches an edge. Returns the last
    /// reorder the move caused, if any.
    pub fn on_move<L, F>(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
        layout: &mut L,
        mut on_list_change: F,
    ) -> Option<Reorder>
    where
        L: LayoutQuery + ?Sized,
        F: FnMut(usize, usize),
    {
        let mut reorder = None;
        for gesture in self.gesture.on_move(pointer_id, position, timestamp) {
            if let Some(r) = self.apply(gesture, timestamp, layout, &mut on_list_change) {
                reorder = Some(r);
            }
        }
        if let Some(task) = self.auto_scroll.as_mut().filter(|task| task.is_parked()) {
            let tick = task.tick(timestamp, &mut self.state, layout, &mut on_list_change);
            if let AutoScrollTick::Scrolled {
                reorder: Some(r), ..
            } = tick
            {
                reorder = Some(r);
            }
        }
        reorder
    }

    /// Forwards a pointer release, ending the drag if one is in progress.
    pub fn on_up(&mut self, pointer_id: Option<PointerId>, timestamp: u64) {
        if let Some(gesture) = self.gesture.on_up(pointer_id, timestamp) {
            self.finish(gesture);
        }
    }

    /// Forwards a pointer cancel, abandoning the drag if one is in progress.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) {
        if let Some(gesture) = self.gesture.cancel(pointer_id) {
            self.finish(gesture);
        }
    }

    /// Advances time.
    ///
    /// Starts a drag whose long press has just completed, then runs the
    /// auto-scroll task if one is due. Returns what the auto-scroll task did,
    /// or `None` if there is no task.
    pub fn tick<L, F>(
        &mut self,
        now: u64,
        layout: &mut L,
        mut on_list_change: F,
    ) -> Option<AutoScrollTick>
    where
        L: LayoutQuery + ?Sized,
        F: FnMut(usize, usize),
    {
        if let Some(gesture) = self.gesture.tick(now) {
            self.apply(gesture, now, layout, &mut on_list_change);
        }
        let task = self.auto_scroll.as_mut()?;
        let tick = task.tick(now, &mut self.state, layout, &mut on_list_change);
        if tick == AutoScrollTick::Finished {
            self.auto_scroll = None;
        }
        Some(tick)
    }

    fn apply<L, F>(
        &mut self,
        gesture: DragGesture,
        now: u64,
        layout: &mut L,
        on_list_change: &mut F,
    ) -> Option<Reorder>
    where
        L: LayoutQuery + ?Sized,
        F: FnMut(usize, usize),
    {
        match gesture {
            DragGesture::Start(position) => {
                self.state.on_drag_start(layout, position);
                if let Some(task) = self.auto_scroll.as_mut() {
                    task.cancel();
                }
                self.auto_scroll = Some(AutoScroll::start(
                    &self.state,
                    self.config.auto_scroll,
                    now,
                ));
                None
            }
            DragGesture::Drag { position, delta } => {
                self.state
                    .on_drag(layout, Some(position), delta, on_list_change)
            }
            DragGesture::End | DragGesture::Cancel => {
                self.finish(gesture);
                None
            }
        }
    }

    fn finish(&mut self, gesture: DragGesture) {
        if let Some(mut task) = self.auto_scroll.take() {
            task.cancel();
        }
        if gesture == DragGesture::Cancel {
            self.state.on_drag_cancel();
        } else {
            self.state.on_drag_end();
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::{Point, Vec2};

    use super::{DragReorderConfig, ReorderController};
    use crate::auto_scroll::{AutoScrollConfig, AutoScrollTick};
    use crate::gesture::LongPressConfig;
    use crate::list::move_item;
    use crate::state::SessionId;
    use crate::state::tests::{Call, TestLayout};

    fn config() -> DragReorderConfig {
        DragReorderConfig::default()
            .with_long_press(LongPressConfig::default().with_timeout(300))
            .with_auto_scroll(
                AutoScrollConfig::default()
                    .with_max_scroll_step(40.0)
                    .with_interval(16),
            )
    }

    #[test]
    fn long_press_starts_session_and_auto_scroll() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(9, 3, &log);
        let mut controller = ReorderController::new(config());

        controller.on_down(None, Point::new(150.0, 150.0), 1_000);
        assert_eq!(controller.next_deadline(), Some(1_300));
        assert_eq!(controller.tick(1_100, &mut layout, |_, _| {}), None);
        assert!(!controller.is_dragging());

        assert_eq!(
            controller.tick(1_300, &mut layout, |_, _| {}),
            Some(AutoScrollTick::Idle)
        );
        assert!(controller.is_dragging());
        assert_eq!(controller.state().dragging_index(), Some(4));
        // Inside the viewport: nothing to wake up for.
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn moves_reorder_the_host_list() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(5, 3, &log);
        let mut list = vec!['A', 'B', 'C', 'D', 'E'];
        let mut controller = ReorderController::new(config());

        controller.on_down(None, Point::new(250.0, 50.0), 0);
        controller.tick(300, &mut layout, |_, _| {});

        // Item 2's center lands on item 4.
        let reorder =
            controller.on_move(None, Point::new(150.0, 150.0), 320, &mut layout, |from, to| {
                move_item(&mut list, from, to);
            });
        assert_eq!(reorder.map(|r| (r.from, r.to)), Some((2, 4)));
        assert_eq!(list, ['A', 'B', 'D', 'E', 'C']);
        assert_eq!(controller.state().dragging_index(), Some(4));
        assert_eq!(controller.state().drag_offset(), Vec2::ZERO);

        controller.on_up(None, 400);
        assert!(!controller.is_dragging());
        assert_eq!(controller.state().dragging_index(), None);
        assert!(controller.auto_scroll().is_none());
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn tap_never_starts_a_session() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(5, 3, &log);
        let mut controller = ReorderController::new(config());

        controller.on_down(None, Point::new(50.0, 50.0), 0);
        controller.on_up(None, 100);
        assert_eq!(controller.tick(1_000, &mut layout, |_, _| {}), None);
        assert_eq!(controller.state().dragging_index(), None);
        assert_eq!(controller.state().session(), SessionId::default());
    }

    #[test]
    fn auto_scroll_runs_until_release() {
        let log = RefCell::new(Vec::new());
        // Four rows, so nothing lies below item 9's row.
        let mut layout = TestLayout::grid(12, 3, &log);
        let mut controller = ReorderController::new(config());

        controller.on_down(None, Point::new(50.0, 350.0), 0);
        assert_eq!(
            controller.tick(300, &mut layout, |_, _| {}),
            Some(AutoScrollTick::Idle)
        );
        assert_eq!(controller.next_deadline(), None);

        // Moving half out of the bottom wakes the parked task right away.
        controller.on_move(None, Point::new(50.0, 400.0), 310, &mut layout, |_, _| {});
        assert_eq!(*log.borrow(), vec![Call::ScrollBy(20.0)]);
        assert_eq!(controller.next_deadline(), Some(326));

        assert_eq!(
            controller.tick(320, &mut layout, |_, _| {}),
            Some(AutoScrollTick::Pending)
        );
        assert_eq!(
            controller.tick(326, &mut layout, |_, _| {}),
            Some(AutoScrollTick::Scrolled {
                consumed: 20.0,
                reorder: None,
            })
        );

        controller.on_up(None, 330);
        assert_eq!(controller.tick(342, &mut layout, |_, _| {}), None);
        assert_eq!(
            *log.borrow(),
            vec![Call::ScrollBy(20.0), Call::ScrollBy(20.0)]
        );
    }

    #[test]
    fn cancel_abandons_the_session() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(9, 3, &log);
        let mut controller = ReorderController::new(config());

        controller.on_down(None, Point::new(50.0, 50.0), 0);
        controller.tick(300, &mut layout, |_, _| {});
        let session = controller.state().session();
        controller.cancel(None);

        assert!(!controller.is_dragging());
        assert_ne!(controller.state().session(), session);
        assert!(controller.auto_scroll().is_none());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scroll while dragging.
//!
//! [`AutoScroll`] is a repeating task bound to one drag session. The host calls
//! [`AutoScroll::tick`] from its frame or timer loop; the task decides whether it
//! is due, samples [`DragReorderState::over_scroll_percent`], scrolls the layout,
//! and feeds the scrolled distance back into the engine as a synthetic drag step
//! so the dragged item stays under the pointer.
//!
//! While the dragged item sits inside the viewport the task is parked: it has
//! no deadline, and the next tick after the item moves runs a step at once.
//! The task ends for good when it is canceled or when the drag session it was
//! started for is over. It never scrolls on behalf of a later drag.
//!
//! ```
//! use kurbo::Point;
//! use understory_drag_reorder::{AutoScroll, AutoScrollConfig, AutoScrollTick, DragReorderState};
//! # use understory_drag_reorder::{ItemLayoutInfo, LayoutQuery};
//! # struct Empty;
//! # impl LayoutQuery for Empty {
//! #     type VisibleItems<'a> = core::iter::Empty<ItemLayoutInfo>;
//! #     fn visible_items(&self) -> Self::VisibleItems<'_> { core::iter::empty() }
//! #     fn viewport_start(&self) -> f64 { 0.0 }
//! #     fn viewport_end(&self) -> f64 { 100.0 }
//! #     fn first_visible_index(&self) -> Option<usize> { None }
//! #     fn first_visible_scroll_offset(&self) -> f64 { 0.0 }
//! #     fn can_scroll_backward(&self) -> bool { false }
//! #     fn can_scroll_forward(&self) -> bool { false }
//! #     fn scroll_by(&mut self, _: f64) -> f64 { 0.0 }
//! #     fn scroll_to_item(&mut self, _: usize, _: f64) {}
//! # }
//! # let mut layout = Empty;
//! let mut state = DragReorderState::new();
//! state.on_drag_start(&layout, Point::new(10.0, 10.0));
//! let mut task = AutoScroll::start(&state, AutoScrollConfig::default(), 0);
//!
//! // Nothing is dragged, so there is nothing to scroll.
//! assert_eq!(task.tick(0, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Idle);
//!
//! // Ending the drag ends the task.
//! state.on_drag_end();
//! assert_eq!(task.tick(100, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Finished);
//! assert!(task.is_finished());
//! ```

use kurbo::Vec2;

use crate::layout::LayoutQuery;
use crate::state::{DragReorderState, Reorder, SessionId};

/// Tuning for [`AutoScroll`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// Distance scrolled per tick at full overscroll, in logical pixels.
    pub max_scroll_step: f64,
    /// Minimum time between two scroll steps, in milliseconds.
    pub interval: u64,
}

impl AutoScrollConfig {
    /// Default distance scrolled per tick at full overscroll.
    pub const DEFAULT_MAX_SCROLL_STEP: f64 = 20.0;
    /// Default time between scroll steps.
    pub const DEFAULT_INTERVAL: u64 = 10;

    /// Sets the distance scrolled per tick at full overscroll.
    #[must_use]
    pub fn with_max_scroll_step(mut self, max_scroll_step: f64) -> Self {
        debug_assert!(
            max_scroll_step.is_finite(),
            "AutoScrollConfig max_scroll_step must be finite; got {max_scroll_step:?}"
        );
        self.max_scroll_step = max_scroll_step.max(0.0);
        self
    }

    /// Sets the time between scroll steps, in milliseconds.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            max_scroll_step: Self::DEFAULT_MAX_SCROLL_STEP,
            interval: Self::DEFAULT_INTERVAL,
        }
    }
}

/// What a call to [`AutoScroll::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoScrollTick {
    /// The next step is not due yet.
    Pending,
    /// The dragged item is inside the viewport; the task is parked until the
    /// next tick.
    Idle,
    /// The item overhangs an edge, but the layout cannot scroll any further
    /// that way.
    AtEdge,
    /// The layout scrolled.
    Scrolled {
        /// Distance the layout actually scrolled.
        consumed: f64,
        /// Reorder triggered by the compensating drag step, if any.
        reorder: Option<Reorder>,
    },
    /// The task is over; later ticks do nothing.
    Finished,
}

/// A cancelable repeating auto-scroll task for one drag session.
#[derive(Debug, Clone)]
pub struct AutoScroll {
    session: SessionId,
    config: AutoScrollConfig,
    next_tick: u64,
    parked: bool,
    finished: bool,
}

impl AutoScroll {
    /// Creates a task bound to the session `state` is currently in.
    ///
    /// The first step is due at `now`.
    #[must_use]
    pub fn start(state: &DragReorderState, config: AutoScrollConfig, now: u64) -> Self {
        Self {
            session: state.session(),
            config,
            next_tick: now,
            parked: false,
            finished: false,
        }
    }

    /// The session this task scrolls for.
    #[must_use]
    pub const fn session(&self) -> SessionId {
        self.session
    }

    /// Stops the task. Later ticks return [`AutoScrollTick::Finished`].
    pub fn cancel(&mut self) {
        self.finished = true;
    }

    /// Returns `true` once the task has been canceled or has noticed that its
    /// session ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` while the last step found nothing to scroll.
    ///
    /// A parked task has no deadline. Tick it again after the drag moves.
    #[must_use]
    pub const fn is_parked(&self) -> bool {
        self.parked
    }

    /// Time at which the next step is due.
    ///
    /// `None` if the task is finished or parked.
    #[must_use]
    pub const fn next_deadline(&self) -> Option<u64> {
        if self.finished || self.parked {
            None
        } else {
            Some(self.next_tick)
        }
    }

    /// Runs one step if it is due at `now`.
    ///
    /// A step that scrolls or ends [`AtEdge`](AutoScrollTick::AtEdge) schedules
    /// the next one `interval` milliseconds later. An [`Idle`](AutoScrollTick::Idle)
    /// step parks the task instead, so any later tick runs a step right away.
    pub fn tick<L, F>(
        &mut self,
        now: u64,
        state: &mut DragReorderState,
        layout: &mut L,
        on_list_change: F,
    ) -> AutoScrollTick
    where
        L: LayoutQuery + ?Sized,
        F: FnOnce(usize, usize),
    {
        if self.finished {
            return AutoScrollTick::Finished;
        }
        if state.session() != self.session {
            #[cfg(feature = "tracing")]
            tracing::trace!(session = ?self.session, "auto-scroll session ended");
            self.finished = true;
            return AutoScrollTick::Finished;
        }
        if !self.parked && now < self.next_tick {
            return AutoScrollTick::Pending;
        }

        let percent = state.over_scroll_percent(layout);
        if percent == 0.0 {
            self.parked = true;
            return AutoScrollTick::Idle;
        }
        self.parked = false;
        self.next_tick = now.saturating_add(self.config.interval);
        let can_scroll = if percent < 0.0 {
            layout.can_scroll_backward()
        } else {
            layout.can_scroll_forward()
        };
        if !can_scroll {
            #[cfg(feature = "tracing")]
            tracing::trace!(percent, "auto-scroll at edge");
            return AutoScrollTick::AtEdge;
        }

        let consumed = layout.scroll_by(self.config.max_scroll_step * percent);
        let reorder = state.on_drag(layout, None, Vec2::new(0.0, consumed), on_list_change);
        #[cfg(feature = "tracing")]
        tracing::trace!(percent, consumed, "auto-scrolled");
        AutoScrollTick::Scrolled { consumed, reorder }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::{Point, Vec2};

    use super::{AutoScroll, AutoScrollConfig, AutoScrollTick};
    use crate::state::DragReorderState;
    use crate::state::tests::{Call, TestLayout};

    fn config() -> AutoScrollConfig {
        AutoScrollConfig::default()
            .with_max_scroll_step(40.0)
            .with_interval(16)
    }

    #[test]
    fn scrolls_forward_and_compensates_offset() {
        let log = RefCell::new(Vec::new());
        // Four rows, so nothing lies below item 9's row.
        let mut layout = TestLayout::grid(12, 3, &log);
        let mut state = DragReorderState::new();

        // Grab item 9 (y 300..400) at its center, then move it half out the bottom.
        state.on_drag_start(&layout, Point::new(50.0, 350.0));
        state.on_drag(&mut layout, Some(Point::new(50.0, 400.0)), Vec2::new(0.0, 50.0), |_, _| {});
        assert_eq!(state.over_scroll_percent(&layout), 0.5);

        let mut task = AutoScroll::start(&state, config(), 1_000);
        let tick = task.tick(1_000, &mut state, &mut layout, |_, _| {});
        assert_eq!(
            tick,
            AutoScrollTick::Scrolled {
                consumed: 20.0,
                reorder: None,
            }
        );
        assert_eq!(*log.borrow(), vec![Call::ScrollBy(20.0)]);
        assert_eq!(state.drag_offset(), Vec2::new(0.0, 70.0));
        // The item slot moved up by 20 while the offset grew by 20.
        let slot = layout.items[9].origin;
        assert_eq!(slot.y + state.drag_offset().y, 350.0);
    }

    #[test]
    fn waits_for_the_interval() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(30, 3, &log);
        let mut state = DragReorderState::new();
        state.on_drag_start(&layout, Point::new(50.0, 350.0));
        state.on_drag(&mut layout, Some(Point::new(50.0, 400.0)), Vec2::ZERO, |_, _| {});

        let mut task = AutoScroll::start(&state, config(), 0);
        assert!(matches!(task.tick(0, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Scrolled { .. }));
        assert_eq!(task.next_deadline(), Some(16));
        assert_eq!(task.tick(15, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Pending);
        assert!(matches!(task.tick(16, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Scrolled { .. }));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn stops_at_the_edge() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(9, 3, &log);
        let mut state = DragReorderState::new();

        // Drag item 0 above the viewport while already scrolled to the top.
        state.on_drag_start(&layout, Point::new(50.0, 50.0));
        state.on_drag(&mut layout, Some(Point::new(50.0, 0.0)), Vec2::new(0.0, -50.0), |_, _| {});
        assert_eq!(state.over_scroll_percent(&layout), -0.5);

        let mut task = AutoScroll::start(&state, config(), 0);
        assert_eq!(task.tick(0, &mut state, &mut layout, |_, _| {}), AutoScrollTick::AtEdge);
        assert!(log.borrow().is_empty());
        assert!(!task.is_finished());
    }

    #[test]
    fn idle_while_inside_viewport() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(9, 3, &log);
        let mut state = DragReorderState::new();
        state.on_drag_start(&layout, Point::new(150.0, 150.0));

        let mut task = AutoScroll::start(&state, config(), 0);
        assert_eq!(task.tick(0, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Idle);
        assert!(log.borrow().is_empty());
        assert!(task.is_parked());
        assert_eq!(task.next_deadline(), None);
    }

    #[test]
    fn parked_task_steps_as_soon_as_the_item_overhangs() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(9, 3, &log);
        let mut state = DragReorderState::new();
        state.on_drag_start(&layout, Point::new(150.0, 150.0));

        let mut task = AutoScroll::start(&state, config(), 0);
        assert_eq!(task.tick(0, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Idle);

        // Item 4 now hangs half out of the bottom; nothing lies under its center.
        state.on_drag(&mut layout, Some(Point::new(150.0, 400.0)), Vec2::new(0.0, 250.0), |_, _| {});
        assert_eq!(
            task.tick(3, &mut state, &mut layout, |_, _| {}),
            AutoScrollTick::Scrolled {
                consumed: 20.0,
                reorder: None,
            }
        );
        assert!(!task.is_parked());
        assert_eq!(task.next_deadline(), Some(19));
        assert_eq!(*log.borrow(), vec![Call::ScrollBy(20.0)]);
    }

    #[test]
    fn ends_with_its_session() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(30, 3, &log);
        let mut state = DragReorderState::new();
        state.on_drag_start(&layout, Point::new(50.0, 350.0));
        state.on_drag(&mut layout, Some(Point::new(50.0, 400.0)), Vec2::ZERO, |_, _| {});
        let mut task = AutoScroll::start(&state, config(), 0);

        // A new drag replaces the session the task was started for.
        state.on_drag_end();
        state.on_drag_start(&layout, Point::new(50.0, 350.0));
        state.on_drag(&mut layout, Some(Point::new(50.0, 400.0)), Vec2::ZERO, |_, _| {});

        assert_eq!(task.tick(100, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Finished);
        assert!(task.is_finished());
        assert_eq!(task.next_deadline(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn canceled_task_never_scrolls() {
        let log = RefCell::new(Vec::new());
        let mut layout = TestLayout::grid(30, 3, &log);
        let mut state = DragReorderState::new();
        state.on_drag_start(&layout, Point::new(50.0, 350.0));
        state.on_drag(&mut layout, Some(Point::new(50.0, 400.0)), Vec2::ZERO, |_, _| {});

        let mut task = AutoScroll::start(&state, config(), 0);
        task.cancel();
        assert_eq!(task.tick(0, &mut state, &mut layout, |_, _| {}), AutoScrollTick::Finished);
        assert!(log.borrow().is_empty());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-press-then-drag gesture recognition.
//!
//! Reordering starts only after the user has held a pointer still for a while,
//! so that ordinary scroll flings and taps on the grid are left alone.
//! [`LongPressDrag`] turns raw pointer events plus timestamps into the four
//! gestures the reorder engine consumes:
//!
//! - [`DragGesture::Start`] once the press has been held for
//!   [`LongPressConfig::timeout`] without moving more than
//!   [`LongPressConfig::touch_slop`],
//! - [`DragGesture::Drag`] for every move after that,
//! - [`DragGesture::End`] on release, and
//! - [`DragGesture::Cancel`] when the host cancels the pointer.
//!
//! ## Usage
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_drag_reorder::gesture::{DragGesture, LongPressConfig, LongPressDrag};
//!
//! let mut recognizer = LongPressDrag::new(LongPressConfig::default());
//! recognizer.on_down(None, Point::new(10.0, 10.0), 1_000);
//!
//! // Still inside the long-press window.
//! assert_eq!(recognizer.tick(1_200), None);
//!
//! // Held long enough: the drag starts where the pointer is.
//! assert_eq!(recognizer.tick(1_400), Some(DragGesture::Start(Point::new(10.0, 10.0))));
//!
//! let moved = recognizer.on_move(None, Point::new(10.0, 40.0), 1_420);
//! assert_eq!(
//!     moved.as_slice(),
//!     [DragGesture::Drag { position: Point::new(10.0, 40.0), delta: Vec2::new(0.0, 30.0) }]
//! );
//! assert_eq!(recognizer.on_up(None, 1_500), Some(DragGesture::End));
//! ```
//!
//! ## Rules
//!
//! 1. **Single pointer**: the first pointer down is tracked; other pointers are
//!    ignored until it is released or canceled.
//! 2. **Slop**: moving further than the touch slop from the down position before
//!    the timeout abandons the long press. No drag happens for that press.
//! 3. **Tap**: releasing before the timeout produces no gesture.
//! 4. **Late move**: a move that arrives after the timeout without an
//!    intervening [`LongPressDrag::tick`] yields `Start` followed by `Drag`.

use core::num::NonZeroU64;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Pointer identifier, matching the one used by other Understory event helpers.
pub type PointerId = NonZeroU64;

const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

/// A gesture produced by [`LongPressDrag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragGesture {
    /// The long press completed at this position; a drag begins.
    Start(Point),
    /// The pointer moved while dragging.
    Drag {
        /// Absolute pointer position.
        position: Point,
        /// Movement since the previous gesture.
        delta: Vec2,
    },
    /// The pointer was released while dragging.
    End,
    /// The drag was canceled.
    Cancel,
}

/// Gestures produced by a single pointer move: at most a `Start` and a `Drag`.
pub type DragGestures = SmallVec<[DragGesture; 2]>;

/// Thresholds for [`LongPressDrag`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LongPressConfig {
    /// How long the pointer must be held before a drag starts, in milliseconds.
    pub timeout: u64,
    /// How far the pointer may wander before the long press is abandoned.
    pub touch_slop: f64,
}

impl LongPressConfig {
    /// Default hold time before a drag starts.
    pub const DEFAULT_TIMEOUT: u64 = 400;
    /// Default movement tolerance during the hold.
    pub const DEFAULT_TOUCH_SLOP: f64 = 8.0;

    /// Sets the hold time, in milliseconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the movement tolerance during the hold.
    #[must_use]
    pub fn with_touch_slop(mut self, touch_slop: f64) -> Self {
        debug_assert!(
            touch_slop.is_finite(),
            "LongPressConfig touch_slop must be finite; got {touch_slop:?}"
        );
        self.touch_slop = touch_slop.max(0.0);
        self
    }
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            touch_slop: Self::DEFAULT_TOUCH_SLOP,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Idle,
    /// Held, waiting for the timeout.
    Pressed {
        pointer: PointerId,
        down_position: Point,
        down_time: u64,
        last_position: Point,
    },
    /// Pointer is down but the long press was abandoned.
    Abandoned { pointer: PointerId },
    Dragging {
        pointer: PointerId,
        last_position: Point,
    },
}

/// Single-pointer long-press drag recognizer.
#[derive(Clone, Debug)]
pub struct LongPressDrag {
    config: LongPressConfig,
    phase: Phase,
}

impl LongPressDrag {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new(config: LongPressConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
        }
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn config(&self) -> LongPressConfig {
        self.config
    }

    /// Returns `true` between a drag start and its end or cancel.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Returns the time at which a held press turns into a drag, if one is pending.
    #[must_use]
    pub fn long_press_deadline(&self) -> Option<u64> {
        match self.phase {
            Phase::Pressed { down_time, .. } => Some(down_time.saturating_add(self.config.timeout)),
            _ => None,
        }
    }

    /// Records a pointer down.
    ///
    /// `pointer_id` defaults to 1 if `None`. Ignored while another pointer is
    /// tracked.
    pub fn on_down(&mut self, pointer_id: Option<PointerId>, position: Point, timestamp: u64) {
        if !matches!(self.phase, Phase::Idle) {
            return;
        }
        self.phase = Phase::Pressed {
            pointer: pointer_id.unwrap_or(DEFAULT_POINTER),
            down_position: position,
            down_time: timestamp,
            last_position: position,
        };
    }

    /// Processes a pointer move.
    ///
    /// Returns the gestures it produces, in order.
    pub fn on_move(
        &mut self,
        pointer_id: Option<PointerId>,
        position: Point,
        timestamp: u64,
    ) -> DragGestures {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        let mut gestures = DragGestures::new();
        if !self.tracks(pointer_id) {
            return gestures;
        }
        gestures.extend(self.tick(timestamp));

        match &mut self.phase {
            Phase::Pressed {
                pointer,
                down_position,
                last_position,
                ..
            } => {
                if down_position.distance(position) > self.config.touch_slop {
                    let pointer = *pointer;
                    self.phase = Phase::Abandoned { pointer };
                } else {
                    *last_position = position;
                }
            }
            Phase::Dragging { last_position, .. } => {
                let delta = position - *last_position;
                *last_position = position;
                gestures.push(DragGesture::Drag { position, delta });
            }
            Phase::Idle | Phase::Abandoned { .. } => {}
        }
        gestures
    }

    /// Advances time; starts the drag once the long press has been held long enough.
    pub fn tick(&mut self, timestamp: u64) -> Option<DragGesture> {
        let Phase::Pressed {
            pointer,
            down_time,
            last_position,
            ..
        } = self.phase
        else {
            return None;
        };
        if timestamp.saturating_sub(down_time) < self.config.timeout {
            return None;
        }
        self.phase = Phase::Dragging {
            pointer,
            last_position,
        };
        Some(DragGesture::Start(last_position))
    }

    /// Processes a pointer release.
    ///
    /// Releasing during a drag ends it; releasing earlier is a tap and yields
    /// nothing.
    pub fn on_up(&mut self, pointer_id: Option<PointerId>, timestamp: u64) -> Option<DragGesture> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        if !self.tracks(pointer_id) {
            return None;
        }
        // A release exactly at the deadline still counts as a long press.
        let started = self.tick(timestamp);
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;
        match (started, was_dragging) {
            (None, true) => Some(DragGesture::End),
            // Started and released in the same instant: nothing moved.
            (Some(_), _) | (None, false) => None,
        }
    }

    /// Cancels the tracked pointer.
    ///
    /// Returns [`DragGesture::Cancel`] if a drag was in progress.
    pub fn cancel(&mut self, pointer_id: Option<PointerId>) -> Option<DragGesture> {
        let pointer_id = pointer_id.unwrap_or(DEFAULT_POINTER);
        if !self.tracks(pointer_id) {
            return None;
        }
        let was_dragging = self.is_dragging();
        self.phase = Phase::Idle;
        was_dragging.then_some(DragGesture::Cancel)
    }

    fn tracks(&self, pointer_id: PointerId) -> bool {
        match self.phase {
            Phase::Idle => false,
            Phase::Pressed { pointer, .. }
            | Phase::Abandoned { pointer }
            | Phase::Dragging { pointer, .. } => pointer == pointer_id,
        }
    }
}

impl Default for LongPressDrag {
    fn default() -> Self {
        Self::new(LongPressConfig::default())
    }
}

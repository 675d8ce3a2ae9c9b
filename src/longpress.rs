use std::time::{Duration, Instant};

use crate::action::Trigger;
use crate::dom::NodeId;

/// A click or long click resolved from a press/release pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Press<T = NodeId> {
    pub target: T,
    pub trigger: Trigger,
}

#[derive(Clone, Copy, Debug)]
struct Pending<T> {
    target: T,
    since: Instant,
    fired: bool,
}

/// Turns press/release pairs into [`Trigger::Click`] or [`Trigger::LongClick`].
///
/// A press held for at least the threshold produces one `LongClick` (from [`poll`] while still
/// held, or from [`release`]) instead of a click. Releasing over another target emits nothing.
///
/// [`poll`]: Self::poll
/// [`release`]: Self::release
#[derive(Clone, Debug)]
pub struct LongPressDetector<T = NodeId> {
    threshold: Duration,
    pending: Option<Pending<T>>,
}

impl<T: Copy + Eq> Default for LongPressDetector<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl<T: Copy + Eq> LongPressDetector<T> {
    pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(500);

    pub const fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            pending: None,
        }
    }

    pub const fn threshold(&self) -> Duration {
        self.threshold
    }

    pub const fn is_pressed(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a press; an earlier unreleased press is dropped.
    pub fn press(&mut self, target: T, at: Instant) {
        self.pending = Some(Pending {
            target,
            since: at,
            fired: false,
        });
    }

    /// Emits the long click once the held press crosses the threshold.
    pub fn poll(&mut self, now: Instant) -> Option<Press<T>> {
        let pending = self.pending.as_mut()?;
        if pending.fired || now.saturating_duration_since(pending.since) < self.threshold {
            return None;
        }
        pending.fired = true;
        Some(Press {
            target: pending.target,
            trigger: Trigger::LongClick,
        })
    }

    /// Ends the press and resolves it.
    pub fn release(&mut self, target: T, at: Instant) -> Option<Press<T>> {
        let pending = self.pending.take()?;
        if pending.target != target || pending.fired {
            return None;
        }
        let trigger = if at.saturating_duration_since(pending.since) >= self.threshold {
            Trigger::LongClick
        } else {
            Trigger::Click
        };
        Some(Press { target, trigger })
    }

    /// Drops the current press without emitting anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

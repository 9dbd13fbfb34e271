use std::time::{Duration, Instant};

use tracing::trace;

/// Quiet period a burst of resize notifications must observe before a render.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeState {
    Idle,
    PendingRender { deadline: Instant },
}

/// Two-state debounce for container resize notifications.
///
/// Every notification (re)starts the timer; the render fires once, after the
/// last notification has been quiet for the debounce interval. Time is passed
/// in by the host event loop so the controller never sleeps or spawns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeController {
    state: ResizeState,
    debounce: Duration,
    notifications: u64,
    fired: u64,
}

impl Default for ResizeController {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

impl ResizeController {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            state: ResizeState::Idle,
            debounce,
            notifications: 0,
            fired: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> ResizeState {
        self.state
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ResizeState::PendingRender { .. })
    }

    /// Number of notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> u64 {
        self.notifications
    }

    /// Number of renders released so far.
    #[must_use]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Records a resize at `now`, restarting the debounce timer.
    pub fn notify(&mut self, now: Instant) {
        let deadline = now + self.debounce;
        self.notifications += 1;
        trace!(
            restarted = self.is_pending(),
            notifications = self.notifications,
            "resize notification"
        );
        self.state = ResizeState::PendingRender { deadline };
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            ResizeState::Idle => None,
            ResizeState::PendingRender { deadline } => Some(deadline),
        }
    }

    /// How long the host should wait before the next `take_due` can succeed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Returns `true` exactly once per burst, when the timer has expired, and
    /// moves back to `Idle`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.state {
            ResizeState::PendingRender { deadline } if now >= deadline => {
                self.state = ResizeState::Idle;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// Drops a pending render without firing it.
    pub fn cancel(&mut self) {
        self.state = ResizeState::Idle;
    }
}

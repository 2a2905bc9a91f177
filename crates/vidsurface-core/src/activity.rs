//! User activity tracking for auto-hiding controls
//!
//! The watcher owns no timer. A host scheduler calls
//! [`crate::Controls::tick`] periodically and the watcher decides whether the
//! inactivity countdown has lapsed.

use crate::state::{PlaybackState, Timestamp};
use serde::{Deserialize, Serialize};

/// Default inactivity period before controls hide
pub const DEFAULT_INACTIVITY_TIMEOUT_MS: f64 = 3_000.0;

/// Outcome of an activity check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityVerdict {
    /// Auto-hide is turned off for this player
    Disabled,
    /// Pointer is over the controls, checking is on hold
    Suspended,
    /// Playback is paused, controls stay up
    NotPlaying,
    /// Countdown still running
    Active,
    /// Countdown lapsed, controls should hide
    Idle,
}

impl ActivityVerdict {
    pub fn should_hide(&self) -> bool {
        matches!(self, ActivityVerdict::Idle)
    }
}

/// Inactivity countdown with suspend/resume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityWatcher {
    /// Milliseconds without activity before hiding
    timeout_ms: f64,
    /// Auto-hide enabled
    enabled: bool,
    /// Checking on hold (hovering controls)
    suspended: bool,
}

impl ActivityWatcher {
    /// Create a watcher with the given countdown
    pub fn new(timeout_ms: f64) -> Self {
        Self {
            timeout_ms: timeout_ms.max(0.0),
            enabled: true,
            suspended: false,
        }
    }

    /// Create a watcher that never hides controls
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn timeout_ms(&self) -> f64 {
        self.timeout_ms
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Reset the countdown
    pub fn mark_activity(&self, state: &mut PlaybackState, now: Timestamp) {
        state.last_activity_at = Some(now);
    }

    /// Put checking on hold until [`resume`](Self::resume)
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Resume checking
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Evaluate the countdown
    ///
    /// No recorded activity counts as lapsed.
    pub fn check(&self, state: &PlaybackState, now: Timestamp) -> ActivityVerdict {
        if !self.enabled {
            return ActivityVerdict::Disabled;
        }
        if self.suspended {
            return ActivityVerdict::Suspended;
        }
        if !state.playing {
            return ActivityVerdict::NotPlaying;
        }

        match state.last_activity_at {
            Some(last) if now.since(last) < self.timeout_ms => ActivityVerdict::Active,
            _ => ActivityVerdict::Idle,
        }
    }
}

impl Default for ActivityWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_INACTIVITY_TIMEOUT_MS)
    }
}

//! Playback state owned by a bound surface

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bound control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host wall-clock time in milliseconds
///
/// Browsers hand out `Date.now()`/`performance.now()` as floating point
/// milliseconds, so the surface keeps them in that unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub fn from_millis(ms: f64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`, never negative
    pub fn since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

/// Transient playback state of a single player instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Playback running (mirrors `!media.paused` after every transition)
    pub playing: bool,
    /// Audio muted
    pub muted: bool,
    /// Volume in 0.0..=1.0 (mirrors the media element)
    pub volume: f64,
    /// Fullscreen mode as last requested or reconciled
    pub fullscreen: bool,
    /// Last recorded user activity
    pub last_activity_at: Option<Timestamp>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            muted: false,
            volume: 1.0,
            fullscreen: false,
            last_activity_at: None,
        }
    }
}

impl PlaybackState {
    /// Set volume, clamped to the media element's accepted range
    pub fn set_volume(&mut self, volume: f64) -> f64 {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.volume
    }
}

//! Named control elements inside a player container

use crate::host::ControlHandle;
use serde::{Deserialize, Serialize};

/// CSS classes the surface toggles
pub mod classes {
    /// Element is not displayed
    pub const HIDDEN: &str = "hidden";
    /// Overlay state while content plays
    pub const PLAYING: &str = "playing";
    /// Container state while in fullscreen
    pub const FULLSCREEN_MODE: &str = "full-screen-mode";
    /// Container state while controls are auto-hidden
    pub const HIDE_CURSOR: &str = "hide-cursor";
}

/// Logical control names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlName {
    Play,
    Pause,
    Mute,
    Unmute,
    FullscreenOn,
    FullscreenOff,
    VolumeSlider,
    VolumeLevel,
    VolumeContainer,
    ControlsContainer,
    Overlay,
}

impl ControlName {
    pub const ALL: [ControlName; 11] = [
        ControlName::Play,
        ControlName::Pause,
        ControlName::Mute,
        ControlName::Unmute,
        ControlName::FullscreenOn,
        ControlName::FullscreenOff,
        ControlName::VolumeSlider,
        ControlName::VolumeLevel,
        ControlName::VolumeContainer,
        ControlName::ControlsContainer,
        ControlName::Overlay,
    ];

    /// Element identifier inside the container
    pub fn id(&self) -> &'static str {
        match self {
            ControlName::Play => "play",
            ControlName::Pause => "pause",
            ControlName::Mute => "mute",
            ControlName::Unmute => "unmute",
            ControlName::FullscreenOn => "full-screen-on",
            ControlName::FullscreenOff => "full-screen-off",
            ControlName::VolumeSlider => "volume",
            ControlName::VolumeLevel => "vol-level",
            ControlName::VolumeContainer => "volume-container",
            ControlName::ControlsContainer => "controls",
            ControlName::Overlay => "overlay",
        }
    }
}

impl std::fmt::Display for ControlName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Control elements found in a container; any of them may be absent
#[derive(Debug, Clone)]
pub struct ControlElementSet<H> {
    pub play: Option<H>,
    pub pause: Option<H>,
    pub mute: Option<H>,
    pub unmute: Option<H>,
    pub fullscreen_on: Option<H>,
    pub fullscreen_off: Option<H>,
    pub volume_slider: Option<H>,
    pub volume_level: Option<H>,
    pub volume_container: Option<H>,
    pub controls_container: Option<H>,
    pub overlay: Option<H>,
}

impl<H> Default for ControlElementSet<H> {
    fn default() -> Self {
        Self {
            play: None,
            pause: None,
            mute: None,
            unmute: None,
            fullscreen_on: None,
            fullscreen_off: None,
            volume_slider: None,
            volume_level: None,
            volume_container: None,
            controls_container: None,
            overlay: None,
        }
    }
}

impl<H: ControlHandle> ControlElementSet<H> {
    /// Look every control up once inside `container`
    pub fn locate(container: &H) -> Self {
        let find = |name: ControlName| container.query(name.id());

        Self {
            play: find(ControlName::Play),
            pause: find(ControlName::Pause),
            mute: find(ControlName::Mute),
            unmute: find(ControlName::Unmute),
            fullscreen_on: find(ControlName::FullscreenOn),
            fullscreen_off: find(ControlName::FullscreenOff),
            volume_slider: find(ControlName::VolumeSlider),
            volume_level: find(ControlName::VolumeLevel),
            volume_container: find(ControlName::VolumeContainer),
            controls_container: find(ControlName::ControlsContainer),
            overlay: find(ControlName::Overlay),
        }
    }
}

impl<H> ControlElementSet<H> {
    /// Element for a logical name
    pub fn get(&self, name: ControlName) -> Option<&H> {
        match name {
            ControlName::Play => self.play.as_ref(),
            ControlName::Pause => self.pause.as_ref(),
            ControlName::Mute => self.mute.as_ref(),
            ControlName::Unmute => self.unmute.as_ref(),
            ControlName::FullscreenOn => self.fullscreen_on.as_ref(),
            ControlName::FullscreenOff => self.fullscreen_off.as_ref(),
            ControlName::VolumeSlider => self.volume_slider.as_ref(),
            ControlName::VolumeLevel => self.volume_level.as_ref(),
            ControlName::VolumeContainer => self.volume_container.as_ref(),
            ControlName::ControlsContainer => self.controls_container.as_ref(),
            ControlName::Overlay => self.overlay.as_ref(),
        }
    }

    /// Names of the controls that were found
    pub fn present(&self) -> Vec<ControlName> {
        ControlName::ALL
            .into_iter()
            .filter(|name| self.get(*name).is_some())
            .collect()
    }
}

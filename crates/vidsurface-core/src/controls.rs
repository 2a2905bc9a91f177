//! Controls - gesture handling for a bound player surface
//!
//! Maps user gestures on the named control elements to playback state
//! changes and native media element calls:
//! - play/pause buttons and the click-to-toggle overlay
//! - mute/unmute and the hover volume scale
//! - fullscreen on/off and the native change event
//! - the volume slider and its level indicator
//! - controls auto-hide via the activity watcher
//!
//! Every element is optional. A handler touching an absent element skips
//! that element and carries on.

use crate::{
    activity::{ActivityVerdict, ActivityWatcher},
    binder::{events, ListenerSpec, ListenerTarget, SurfaceAction},
    elements::{classes, ControlElementSet, ControlName},
    fullscreen::FullscreenAdapter,
    host::{ControlHandle, FullscreenDocument, MediaElement},
    state::{PlaybackState, SurfaceId, Timestamp},
    Result,
};
use tracing::{debug, info, instrument, trace};

/// Playback controls bound to one container and media element
pub struct Controls<H, M, D> {
    /// Surface identifier for log correlation
    id: SurfaceId,
    /// Player container
    container: H,
    /// Controls found inside the container
    elements: ControlElementSet<H>,
    /// Native media element
    media: M,
    /// Fullscreen calls
    fullscreen: FullscreenAdapter<D>,
    /// Transient playback state
    state: PlaybackState,
    /// Auto-hide countdown
    activity: ActivityWatcher,
    /// Controls currently auto-hidden
    controls_hidden: bool,
}

impl<H, M, D> Controls<H, M, D>
where
    H: ControlHandle,
    M: MediaElement,
    D: FullscreenDocument<Target = H>,
{
    /// Locate the controls inside `container` and apply the slider's
    /// initial volume to the media element
    pub fn new(container: H, media: M, fullscreen: FullscreenAdapter<D>, activity: ActivityWatcher) -> Self {
        let elements = ControlElementSet::locate(&container);
        let mut state = PlaybackState {
            muted: media.muted(),
            ..PlaybackState::default()
        };
        state.set_volume(media.volume());

        let mut controls = Self {
            id: SurfaceId::new(),
            container,
            elements,
            media,
            fullscreen,
            state,
            activity,
            controls_hidden: false,
        };

        info!(
            surface = %controls.id,
            found = controls.elements.present().len(),
            "Controls located"
        );

        controls.change_volume();
        controls
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn elements(&self) -> &ControlElementSet<H> {
        &self.elements
    }

    pub fn container(&self) -> &H {
        &self.container
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn fullscreen(&self) -> &FullscreenAdapter<D> {
        &self.fullscreen
    }

    pub fn activity(&self) -> &ActivityWatcher {
        &self.activity
    }

    pub fn controls_hidden(&self) -> bool {
        self.controls_hidden
    }

    /// Listeners this surface needs, one per gesture mapping.
    ///
    /// Entries for absent controls are left out.
    pub fn listener_plan(&self) -> Vec<ListenerSpec<H>> {
        use ControlName::*;
        use SurfaceAction as A;

        let table: [(ControlName, &'static str, SurfaceAction); 14] = [
            (Play, events::CLICK, A::Play),
            (Pause, events::CLICK, A::Pause),
            (Mute, events::CLICK, A::SwitchMute),
            (Unmute, events::CLICK, A::SwitchMute),
            (FullscreenOn, events::CLICK, A::SwitchFullscreen),
            (FullscreenOff, events::CLICK, A::SwitchFullscreen),
            (Overlay, events::CLICK, A::SwitchPlay),
            (VolumeSlider, events::INPUT, A::ChangeVolume),
            (Mute, events::MOUSEOVER, A::ShowVolumeScale),
            (Mute, events::MOUSEOUT, A::HideVolumeScale),
            (VolumeContainer, events::MOUSEOVER, A::ShowVolumeScale),
            (VolumeContainer, events::MOUSEOUT, A::HideVolumeScale),
            (ControlsContainer, events::MOUSEOVER, A::SuspendActivityCheck),
            (ControlsContainer, events::MOUSEOUT, A::CheckUserActivity),
        ];

        let mut plan: Vec<ListenerSpec<H>> = table
            .into_iter()
            .filter_map(|(name, event, action)| {
                self.elements.get(name).map(|element| ListenerSpec {
                    target: ListenerTarget::Control(name),
                    element: element.clone(),
                    event,
                    action,
                })
            })
            .collect();

        plan.push(ListenerSpec {
            target: ListenerTarget::Container,
            element: self.container.clone(),
            event: self.fullscreen.change_event_name(),
            action: A::FullscreenChange,
        });

        plan
    }

    /// Run the handler for `action`
    #[instrument(skip(self), fields(surface = %self.id))]
    pub fn dispatch(&mut self, action: SurfaceAction, now: Timestamp) -> Result<()> {
        debug!(?action, "Dispatching surface action");

        match action {
            SurfaceAction::Play => self.play(now),
            SurfaceAction::Pause => self.pause(),
            SurfaceAction::SwitchPlay => self.switch_play(now),
            SurfaceAction::SwitchMute => {
                self.switch_mute();
                Ok(())
            }
            SurfaceAction::SwitchFullscreen => self.switch_fullscreen(),
            SurfaceAction::FullscreenChange => {
                self.fullscreen_change();
                Ok(())
            }
            SurfaceAction::ChangeVolume => {
                self.change_volume();
                Ok(())
            }
            SurfaceAction::ShowVolumeScale => {
                self.show_volume_scale();
                Ok(())
            }
            SurfaceAction::HideVolumeScale => {
                self.hide_volume_scale();
                Ok(())
            }
            SurfaceAction::SuspendActivityCheck => {
                self.hover_show_controls();
                Ok(())
            }
            SurfaceAction::CheckUserActivity => {
                self.check_user_activity(now);
                Ok(())
            }
            SurfaceAction::UserActivity => {
                self.user_activity(now);
                Ok(())
            }
        }
    }

    // =========================================================================
    // Play / Pause
    // =========================================================================

    /// Start playing
    pub fn play(&mut self, now: Timestamp) -> Result<()> {
        self.media.play()?;
        add_class(&self.elements.play, classes::HIDDEN);
        remove_class(&self.elements.pause, classes::HIDDEN);
        self.state.playing = true;
        self.activity.mark_activity(&mut self.state, now);
        self.hide_overlay_pause_layout();
        Ok(())
    }

    /// Stop playing
    pub fn pause(&mut self) -> Result<()> {
        self.media.pause()?;
        remove_class(&self.elements.play, classes::HIDDEN);
        add_class(&self.elements.pause, classes::HIDDEN);
        self.state.playing = false;
        self.show_controls();
        self.show_overlay_pause_layout();
        Ok(())
    }

    /// Toggle on the in-memory playing flag
    pub fn switch_play(&mut self, now: Timestamp) -> Result<()> {
        if self.state.playing {
            self.pause()
        } else {
            self.play(now)
        }
    }

    fn show_overlay_pause_layout(&self) {
        remove_class(&self.elements.overlay, classes::PLAYING);
    }

    fn hide_overlay_pause_layout(&self) {
        add_class(&self.elements.overlay, classes::PLAYING);
    }

    // =========================================================================
    // Mute / Volume
    // =========================================================================

    /// Toggle mute
    pub fn switch_mute(&mut self) {
        self.state.muted = !self.state.muted;

        if self.state.muted {
            remove_class(&self.elements.unmute, classes::HIDDEN);
            add_class(&self.elements.mute, classes::HIDDEN);
            self.hide_volume_scale();
        } else {
            remove_class(&self.elements.mute, classes::HIDDEN);
            add_class(&self.elements.unmute, classes::HIDDEN);
        }

        self.media.set_muted(self.state.muted);
    }

    /// Apply the slider value (0-100) to the media element and level indicator
    pub fn change_volume(&mut self) {
        let Some(raw) = self.elements.volume_slider.as_ref().and_then(|s| s.value()) else {
            return;
        };
        let Ok(percent) = raw.trim().parse::<f64>() else {
            trace!(value = %raw, "Ignoring non-numeric volume value");
            return;
        };

        let level = self.state.set_volume(percent / 100.0);
        self.media.set_volume(level);

        if let Some(indicator) = &self.elements.volume_level {
            indicator.set_style(&volume_level_style(level));
        }
    }

    /// Reveal the volume scale unless muted
    pub fn show_volume_scale(&self) {
        if !self.state.muted {
            self.set_volume_scale_hidden(false);
        }
    }

    /// Hide the volume scale
    pub fn hide_volume_scale(&self) {
        self.set_volume_scale_hidden(true);
    }

    fn set_volume_scale_hidden(&self, hidden: bool) {
        let hidden = match &self.elements.volume_container {
            Some(container) => {
                container.set_hidden(hidden);
                container.is_hidden()
            }
            None => hidden,
        };

        // Slider and level indicator follow the container
        for element in [&self.elements.volume_slider, &self.elements.volume_level]
            .into_iter()
            .flatten()
        {
            element.set_hidden(hidden);
        }
    }

    // =========================================================================
    // Fullscreen
    // =========================================================================

    /// Toggle fullscreen
    pub fn switch_fullscreen(&mut self) -> Result<()> {
        self.set_fullscreen_status(!self.state.fullscreen)?;
        self.sync_fullscreen_controls();
        Ok(())
    }

    /// Ask the browser for `status` and record it straight away
    pub fn set_fullscreen_status(&mut self, status: bool) -> Result<()> {
        self.state.fullscreen =
            self.fullscreen
                .set_status(&self.container, self.state.fullscreen, status)?;
        Ok(())
    }

    /// Reconcile with the browser after a fullscreen change event
    ///
    /// The document is the authority: if it has no fullscreen element the
    /// state is forced off. The browser has already left fullscreen at that
    /// point, so no exit call is made.
    pub fn fullscreen_change(&mut self) {
        let present = self.fullscreen.current_element_present();

        if !present && self.state.fullscreen {
            debug!(surface = %self.id, "Fullscreen left natively, forcing state off");
            self.state.fullscreen = false;
        }

        self.sync_fullscreen_controls();
    }

    fn sync_fullscreen_controls(&self) {
        if self.state.fullscreen {
            add_class(&self.elements.fullscreen_on, classes::HIDDEN);
            remove_class(&self.elements.fullscreen_off, classes::HIDDEN);
            self.container.add_class(classes::FULLSCREEN_MODE);
        } else {
            remove_class(&self.elements.fullscreen_on, classes::HIDDEN);
            add_class(&self.elements.fullscreen_off, classes::HIDDEN);
            self.container.remove_class(classes::FULLSCREEN_MODE);
        }
    }

    // =========================================================================
    // Controls visibility / activity
    // =========================================================================

    /// Hide the controls bar, cursor and overlay
    pub fn hide_controls(&mut self) {
        add_class(&self.elements.controls_container, classes::HIDDEN);
        self.container.add_class(classes::HIDE_CURSOR);
        add_class(&self.elements.overlay, classes::HIDDEN);
        self.controls_hidden = true;
    }

    /// Show the controls bar, cursor and overlay
    pub fn show_controls(&mut self) {
        remove_class(&self.elements.controls_container, classes::HIDDEN);
        self.container.remove_class(classes::HIDE_CURSOR);
        remove_class(&self.elements.overlay, classes::HIDDEN);
        self.controls_hidden = false;
    }

    /// Pointer entered the controls bar: hold the auto-hide countdown
    pub fn hover_show_controls(&mut self) {
        self.activity.suspend();
    }

    /// Pointer left the controls bar: resume and evaluate the countdown
    pub fn check_user_activity(&mut self, now: Timestamp) -> ActivityVerdict {
        self.activity.resume();
        self.tick(now)
    }

    /// Periodic countdown check, driven by the host's timer
    pub fn tick(&mut self, now: Timestamp) -> ActivityVerdict {
        let verdict = self.activity.check(&self.state, now);
        if verdict.should_hide() && !self.controls_hidden {
            debug!(surface = %self.id, "User inactive, hiding controls");
            self.hide_controls();
        }
        verdict
    }

    /// Pointer moved over the player: restart the countdown and bring the
    /// controls back if they were hidden
    pub fn user_activity(&mut self, now: Timestamp) {
        self.activity.mark_activity(&mut self.state, now);
        if self.controls_hidden {
            self.show_controls();
        }
    }
}

impl<H, M, D> std::fmt::Debug for Controls<H, M, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controls")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("controls_hidden", &self.controls_hidden)
            .finish()
    }
}

/// Inline style for the volume level indicator
pub fn volume_level_style(level: f64) -> String {
    format!("transform: scaleY({}) rotate(-90deg)", level)
}

fn add_class<H: ControlHandle>(element: &Option<H>, class: &str) {
    if let Some(element) = element {
        element.add_class(class);
    }
}

fn remove_class<H: ControlHandle>(element: &Option<H>, class: &str) {
    if let Some(element) = element {
        element.remove_class(class);
    }
}

//! Player facade exported to JavaScript

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vidsurface_core::{
    events, ConfigLoader, ControlHandle, Controls, Error, FullscreenAdapter, FullscreenApi,
    ListenerSpec, ListenerTarget, PlayerConfig, SurfaceAction, SurfaceBinder,
};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlVideoElement};

use crate::dom::{DomControl, WebDocument, WebMedia};
use crate::hooks::{JsAdInserter, JsManifestPlayer};
use crate::listeners::{dispatch, now, DomListeners, WebControls};
use crate::to_js_error;

/// How often the inactivity countdown is evaluated
const ACTIVITY_POLL_MS: i32 = 250;

/// Interval driving `Controls::tick`
struct ActivityTimer {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl ActivityTimer {
    fn start(surface: Weak<RefCell<WebControls>>) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move || {
            let Some(surface) = surface.upgrade() else {
                return;
            };
            if let Ok(mut controls) = surface.try_borrow_mut() {
                controls.tick(now());
            };
        }) as Box<dyn FnMut()>);

        let handle = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            ACTIVITY_POLL_MS,
        )?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }

    fn stop(self) {
        if let Ok(window) = window() {
            window.clear_interval_with_handle(self.handle);
        }
    }
}

/// Which listeners and timers a config asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wiring {
    /// Attach the control listeners at all
    bind: bool,
    /// Add the container `mousemove` listener and the activity interval
    watch_activity: bool,
}

impl Wiring {
    fn from_config(config: &PlayerConfig) -> Self {
        let bind = config.controls();
        Self {
            bind,
            watch_activity: bind && config.activity_watcher().is_enabled(),
        }
    }
}

/// Append the container activity listener to a control plan when needed
fn surface_plan<H: Clone>(mut plan: Vec<ListenerSpec<H>>, container: &H, watch_activity: bool) -> Vec<ListenerSpec<H>> {
    if watch_activity {
        plan.push(ListenerSpec {
            target: ListenerTarget::Container,
            element: container.clone(),
            event: events::MOUSEMOVE,
            action: SurfaceAction::UserActivity,
        });
    }
    plan
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// A custom control surface over a `<video>` element
///
/// ```javascript
/// const player = new VidSurfacePlayer(container, video, config, hooks);
/// player.play();
/// player.destroy();
/// ```
#[wasm_bindgen]
pub struct VidSurfacePlayer {
    controls: Rc<RefCell<WebControls>>,
    binder: SurfaceBinder<DomControl, DomListeners>,
    loader: ConfigLoader<JsManifestPlayer, JsAdInserter>,
    media: WebMedia,
    timer: Option<ActivityTimer>,
    destroyed: bool,
}

#[wasm_bindgen]
impl VidSurfacePlayer {
    /// Load `config`, bind the controls found in `container` and autoplay
    /// if configured
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        video: HtmlVideoElement,
        config: JsValue,
        hooks: JsValue,
    ) -> Result<VidSurfacePlayer, JsValue> {
        let config: PlayerConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| to_js_error(Error::InvalidConfig(e.to_string())))?;
        let wiring = Wiring::from_config(&config);

        let document = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let document = WebDocument::new(document);
        let api = FullscreenApi::detect(&document);

        let media = WebMedia::new(video);
        let container = DomControl::new(container);

        let mut loader = ConfigLoader::new(JsManifestPlayer::from_hooks(&hooks), JsAdInserter::from_hooks(&hooks));
        let outcome = loader.initialize(&config, &media).map_err(to_js_error)?;

        let controls = Rc::new(RefCell::new(Controls::new(
            container.clone(),
            media.clone(),
            FullscreenAdapter::new(api, document),
            config.activity_watcher(),
        )));
        let binder = SurfaceBinder::new(DomListeners::new(&controls));

        let mut player = Self {
            controls,
            binder,
            loader,
            media,
            timer: None,
            destroyed: false,
        };

        if wiring.bind {
            player.bind(wiring.watch_activity)?;
        } else if let Some(bar) = player.controls.borrow().elements().controls_container.as_ref() {
            bar.set_hidden(true);
        }

        if outcome.autoplay {
            player.play()?;
        }

        Ok(player)
    }

    /// Start playback through the same path as the play button
    pub fn play(&self) -> Result<(), JsValue> {
        dispatch(&Rc::downgrade(&self.controls), SurfaceAction::Play)
    }

    /// Pause playback through the same path as the pause button
    pub fn pause(&self) -> Result<(), JsValue> {
        dispatch(&Rc::downgrade(&self.controls), SurfaceAction::Pause)
    }

    /// Replace the media source, keeping the bound controls
    #[wasm_bindgen(js_name = updateSource)]
    pub fn update_source(&mut self, source: &str) -> Result<(), JsValue> {
        self.loader
            .update_source(source, &self.media)
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Remove every listener, stop the activity timer and release the
    /// manifest player. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
        let removed = self.binder.unbind();
        if !self.destroyed {
            self.loader.release::<WebMedia>();
            self.destroyed = true;
            tracing::info!(listeners = removed, "Player destroyed");
        }
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.controls.borrow().state().playing
    }

    #[wasm_bindgen(js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.controls.borrow().state().muted
    }

    #[wasm_bindgen(js_name = isFullscreen)]
    pub fn is_fullscreen(&self) -> bool {
        self.controls.borrow().state().fullscreen
    }

    /// Listeners currently registered by this player
    #[wasm_bindgen(js_name = activeListeners)]
    pub fn active_listeners(&self) -> usize {
        self.binder.active_listeners()
    }
}

impl VidSurfacePlayer {
    fn bind(&mut self, watch_activity: bool) -> Result<(), JsValue> {
        let plan = {
            let controls = self.controls.borrow();
            surface_plan(controls.listener_plan(), controls.container(), watch_activity)
        };

        self.binder.bind(plan).map_err(to_js_error)?;

        if watch_activity {
            self.timer = Some(ActivityTimer::start(Rc::downgrade(&self.controls))?);
        }
        Ok(())
    }
}

impl Drop for VidSurfacePlayer {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control_plan() -> Vec<ListenerSpec<u32>> {
        vec![ListenerSpec {
            target: ListenerTarget::Container,
            element: 0,
            event: "fullscreenchange",
            action: SurfaceAction::FullscreenChange,
        }]
    }

    #[test]
    fn test_wiring_defaults() {
        let wiring = Wiring::from_config(&PlayerConfig::new("clip.mp4"));
        assert!(wiring.bind);
        assert!(wiring.watch_activity);
    }

    #[test]
    fn test_wiring_without_controls() {
        let config = PlayerConfig::from_json(r#"{"source": "clip.mp4", "controls": false}"#).unwrap();
        let wiring = Wiring::from_config(&config);
        assert!(!wiring.bind);
        assert!(!wiring.watch_activity);
    }

    #[test]
    fn test_wiring_without_auto_hide() {
        let config = PlayerConfig::from_json(r#"{"source": "clip.mp4", "hideControls": false}"#).unwrap();
        let wiring = Wiring::from_config(&config);
        assert!(wiring.bind);
        assert!(!wiring.watch_activity);
    }

    #[test]
    fn test_plan_adds_container_mousemove() {
        let plan = surface_plan(control_plan(), &7, true);
        assert_eq!(plan.len(), 2);

        let activity = &plan[1];
        assert_eq!(activity.target, ListenerTarget::Container);
        assert_eq!(activity.element, 7);
        assert_eq!(activity.event, events::MOUSEMOVE);
        assert_eq!(activity.action, SurfaceAction::UserActivity);
    }

    #[test]
    fn test_plan_unchanged_without_activity() {
        let plan = surface_plan(control_plan(), &7, false);
        assert_eq!(plan.len(), 1);
        assert!(plan.iter().all(|spec| spec.event != events::MOUSEMOVE));
    }
}

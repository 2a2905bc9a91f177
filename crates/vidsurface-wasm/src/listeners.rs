//! DOM event listener registration
//!
//! Each attached listener owns a boxed closure holding a weak reference to
//! the surface. The closure is returned to the binder as the registration,
//! so removing it later uses the exact function that was added.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use vidsurface_core::{Controls, Error, ListenerHost, Result, SurfaceAction, Timestamp};
use wasm_bindgen::prelude::*;

use crate::dom::{DomControl, WebDocument, WebMedia};
use crate::{js_reason, to_js_error};

pub type WebControls = Controls<DomControl, WebMedia, WebDocument>;

pub type EventCallback = Closure<dyn FnMut(web_sys::Event) -> std::result::Result<(), JsValue>>;

/// Current time from the page clock
pub fn now() -> Timestamp {
    Timestamp::from_millis(js_sys::Date::now())
}

/// Run `action` against the surface if it is still alive and not mid-dispatch
pub fn dispatch(surface: &Weak<RefCell<WebControls>>, action: SurfaceAction) -> std::result::Result<(), JsValue> {
    let Some(surface) = surface.upgrade() else {
        return Ok(());
    };
    let Ok(mut controls) = surface.try_borrow_mut() else {
        tracing::warn!(?action, "Re-entrant dispatch ignored");
        return Ok(());
    };
    controls.dispatch(action, now()).map_err(to_js_error)
}

/// Registers `addEventListener` callbacks that drive a surface
pub struct DomListeners {
    surface: Weak<RefCell<WebControls>>,
}

impl DomListeners {
    pub fn new(surface: &Rc<RefCell<WebControls>>) -> Self {
        Self {
            surface: Rc::downgrade(surface),
        }
    }
}

impl ListenerHost<DomControl> for DomListeners {
    type Registration = EventCallback;

    fn attach(&mut self, target: &DomControl, event: &'static str, action: SurfaceAction) -> Result<EventCallback> {
        let surface = self.surface.clone();
        let callback: EventCallback = Closure::wrap(Box::new(move |_event: web_sys::Event| dispatch(&surface, action))
            as Box<dyn FnMut(web_sys::Event) -> std::result::Result<(), JsValue>>);

        target
            .element()
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| Error::ListenerAttach {
                event: event.to_string(),
                reason: js_reason(&e),
            })?;
        Ok(callback)
    }

    fn detach(&mut self, target: &DomControl, event: &'static str, registration: EventCallback) {
        let _ = target
            .element()
            .remove_event_listener_with_callback(event, registration.as_ref().unchecked_ref());
    }
}

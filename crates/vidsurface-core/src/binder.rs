//! Listener bookkeeping
//!
//! [`Controls::listener_plan`](crate::Controls::listener_plan) describes which
//! listener goes where. `SurfaceBinder` attaches that plan through a
//! [`ListenerHost`] and remembers every registration so teardown removes
//! exactly what was added.

use crate::{elements::ControlName, host::ListenerHost, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// DOM event names used by the surface
pub mod events {
    pub const CLICK: &str = "click";
    pub const INPUT: &str = "input";
    pub const MOUSEOVER: &str = "mouseover";
    pub const MOUSEOUT: &str = "mouseout";
    pub const MOUSEMOVE: &str = "mousemove";
}

/// Something a listener asks the surface to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceAction {
    Play,
    Pause,
    SwitchPlay,
    SwitchMute,
    SwitchFullscreen,
    FullscreenChange,
    ChangeVolume,
    ShowVolumeScale,
    HideVolumeScale,
    SuspendActivityCheck,
    CheckUserActivity,
    UserActivity,
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerTarget {
    /// The player container itself
    Container,
    /// A named control inside it
    Control(ControlName),
}

impl std::fmt::Display for ListenerTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerTarget::Container => write!(f, "container"),
            ListenerTarget::Control(name) => write!(f, "#{}", name),
        }
    }
}

/// One listener to attach
#[derive(Debug, Clone)]
pub struct ListenerSpec<H> {
    pub target: ListenerTarget,
    pub element: H,
    pub event: &'static str,
    pub action: SurfaceAction,
}

struct Attached<H, R> {
    target: ListenerTarget,
    element: H,
    event: &'static str,
    registration: R,
}

/// Attaches a listener plan and tears it down symmetrically
pub struct SurfaceBinder<H, L: ListenerHost<H>> {
    host: L,
    attached: Vec<Attached<H, L::Registration>>,
}

impl<H, L: ListenerHost<H>> SurfaceBinder<H, L> {
    pub fn new(host: L) -> Self {
        Self {
            host,
            attached: Vec::new(),
        }
    }

    /// Attach every listener in `plan`
    ///
    /// Binding an already bound surface is refused rather than registering
    /// every handler twice. If any attach fails, the listeners added so far
    /// are removed again before the error is returned.
    pub fn bind(&mut self, plan: Vec<ListenerSpec<H>>) -> Result<usize> {
        if self.is_bound() {
            return Err(Error::AlreadyBound {
                listeners: self.attached.len(),
            });
        }

        for spec in plan {
            match self.host.attach(&spec.element, spec.event, spec.action) {
                Ok(registration) => {
                    debug!(listener = %spec.target, event = spec.event, action = ?spec.action, "Listener attached");
                    self.attached.push(Attached {
                        target: spec.target,
                        element: spec.element,
                        event: spec.event,
                        registration,
                    });
                }
                Err(e) => {
                    warn!(listener = %spec.target, event = spec.event, error = %e, "Listener attach failed, rolling back");
                    self.unbind();
                    return Err(e);
                }
            }
        }

        info!(listeners = self.attached.len(), "Surface bound");
        Ok(self.attached.len())
    }

    /// Remove every listener added by `bind`; a second call is a no-op
    pub fn unbind(&mut self) -> usize {
        let count = self.attached.len();
        for attached in self.attached.drain(..).rev() {
            debug!(listener = %attached.target, event = attached.event, "Listener detached");
            self.host
                .detach(&attached.element, attached.event, attached.registration);
        }
        if count > 0 {
            info!(listeners = count, "Surface unbound");
        }
        count
    }

    pub fn is_bound(&self) -> bool {
        !self.attached.is_empty()
    }

    /// Number of listeners currently registered
    pub fn active_listeners(&self) -> usize {
        self.attached.len()
    }

    /// `(target, event)` for each registered listener, in attach order
    pub fn registrations(&self) -> Vec<(ListenerTarget, &'static str)> {
        self.attached.iter().map(|a| (a.target, a.event)).collect()
    }

    pub fn host(&self) -> &L {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut L {
        &mut self.host
    }
}

impl<H, L: ListenerHost<H>> Drop for SurfaceBinder<H, L> {
    fn drop(&mut self) {
        self.unbind();
    }
}

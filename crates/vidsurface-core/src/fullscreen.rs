//! Fullscreen API normalization
//!
//! Browsers have shipped the fullscreen API under several vendor prefixes.
//! [`FullscreenApi::resolve`] picks the first variant the document supports
//! and the rest of the surface only ever sees the normalized member names.

use crate::{host::FullscreenDocument, Result};
use serde::Serialize;
use tracing::debug;

/// Resolved member names for one fullscreen API variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FullscreenApi {
    /// Enter method, invoked on the container
    pub request: &'static str,
    /// Exit method, invoked on the document
    pub exit: &'static str,
    /// Document property holding the current fullscreen element
    pub element: &'static str,
    /// Event fired when fullscreen changes
    pub change_event: &'static str,
}

/// Known variants, most standard first
const VENDOR_APIS: [FullscreenApi; 5] = [
    FullscreenApi {
        request: "requestFullscreen",
        exit: "exitFullscreen",
        element: "fullscreenElement",
        change_event: "fullscreenchange",
    },
    // WebKit
    FullscreenApi {
        request: "webkitRequestFullscreen",
        exit: "webkitExitFullscreen",
        element: "webkitFullscreenElement",
        change_event: "webkitfullscreenchange",
    },
    // Old WebKit (Safari 5.1)
    FullscreenApi {
        request: "webkitRequestFullScreen",
        exit: "webkitCancelFullScreen",
        element: "webkitCurrentFullScreenElement",
        change_event: "webkitfullscreenchange",
    },
    // Mozilla
    FullscreenApi {
        request: "mozRequestFullScreen",
        exit: "mozCancelFullScreen",
        element: "mozFullScreenElement",
        change_event: "mozfullscreenchange",
    },
    // Microsoft
    FullscreenApi {
        request: "msRequestFullscreen",
        exit: "msExitFullscreen",
        element: "msFullscreenElement",
        change_event: "MSFullscreenChange",
    },
];

impl FullscreenApi {
    /// The unprefixed W3C API
    pub const STANDARD: FullscreenApi = VENDOR_APIS[0];

    /// All known variants in resolution order
    pub fn variants() -> &'static [FullscreenApi] {
        &VENDOR_APIS
    }

    /// Pick the first variant whose exit method the document exposes.
    ///
    /// Falls back to the standard names when nothing matches, so a host
    /// without fullscreen support gets the standard calls (which it will
    /// then reject) instead of a missing adapter.
    pub fn resolve(mut supports: impl FnMut(&str) -> bool) -> Self {
        let api = VENDOR_APIS
            .iter()
            .copied()
            .find(|api| supports(api.exit))
            .unwrap_or(Self::STANDARD);
        debug!(request = api.request, change_event = api.change_event, "Fullscreen API resolved");
        api
    }

    /// Resolve against a document
    pub fn detect<D: FullscreenDocument>(document: &D) -> Self {
        Self::resolve(|name| document.has_member(name))
    }
}

impl Default for FullscreenApi {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fullscreen calls bound to a resolved API and a document
pub struct FullscreenAdapter<D> {
    api: FullscreenApi,
    document: D,
}

impl<D> FullscreenAdapter<D> {
    /// Create an adapter with an already resolved API
    pub fn new(api: FullscreenApi, document: D) -> Self {
        Self { api, document }
    }

    /// Resolved member names
    pub fn api(&self) -> &FullscreenApi {
        &self.api
    }

    /// Name of the change event to listen for
    pub fn change_event_name(&self) -> &'static str {
        self.api.change_event
    }

    /// Underlying document
    pub fn document(&self) -> &D {
        &self.document
    }
}

impl<D: FullscreenDocument> FullscreenAdapter<D> {
    /// Enter fullscreen with `target` as the fullscreen element
    pub fn request(&self, target: &D::Target) -> Result<()> {
        self.document.request(target, self.api.request)
    }

    /// Leave fullscreen
    pub fn exit(&self) -> Result<()> {
        self.document.exit(self.api.exit)
    }

    /// Whether the document currently reports a fullscreen element
    pub fn current_element_present(&self) -> bool {
        self.document.has_fullscreen_element(self.api.element)
    }

    /// Flip native fullscreen based on what the surface currently believes,
    /// then report `desired` as the new state.
    ///
    /// The browser transition completes later; the change event reconciles.
    pub fn set_status(&self, container: &D::Target, currently_on: bool, desired: bool) -> Result<bool> {
        if currently_on {
            self.exit()?;
        } else {
            self.request(container)?;
        }
        Ok(desired)
    }
}

impl<D> std::fmt::Debug for FullscreenAdapter<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenAdapter").field("api", &self.api).finish()
    }
}

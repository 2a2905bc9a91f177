//! Page-supplied collaborators
//!
//! The hooks object passed to `VidSurfacePlayer` may carry:
//! - `loadSource(video, source, kind)` to hand manifests to hls.js or similar
//! - `detachSource()` called before a new source is loaded
//! - `scheduleAds(ads)` receiving the ad breaks in their wire form
//!
//! Every hook is optional.

use vidsurface_core::{AdBreak, AdInserter, Error, ManifestPlayer, MediaElement, Result, SourceKind};
use wasm_bindgen::prelude::*;

use crate::dom::{kind_name, WebMedia};
use crate::js_reason;

fn hook(hooks: &JsValue, name: &str) -> Option<js_sys::Function> {
    if hooks.is_undefined() || hooks.is_null() {
        return None;
    }
    js_sys::Reflect::get(hooks, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

/// Manifest player backed by the page's `loadSource`/`detachSource` hooks
pub struct JsManifestPlayer {
    load: Option<js_sys::Function>,
    detach: Option<js_sys::Function>,
}

impl JsManifestPlayer {
    pub fn from_hooks(hooks: &JsValue) -> Self {
        Self {
            load: hook(hooks, "loadSource"),
            detach: hook(hooks, "detachSource"),
        }
    }
}

impl ManifestPlayer<WebMedia> for JsManifestPlayer {
    fn load(&mut self, media: &WebMedia, source: &str, kind: SourceKind) -> Result<()> {
        let Some(load) = &self.load else {
            tracing::warn!(%kind, source, "No loadSource hook, assigning source directly");
            media.set_source(source);
            return Ok(());
        };

        load.call3(&JsValue::NULL, media.element(), &JsValue::from_str(source), &JsValue::from_str(kind_name(kind)))
            .map(|_| ())
            .map_err(|e| Error::ManifestPlayer {
                source_url: source.to_string(),
                reason: js_reason(&e),
            })
    }

    fn detach(&mut self) {
        if let Some(detach) = &self.detach {
            if let Err(e) = detach.call0(&JsValue::NULL) {
                tracing::warn!(reason = %js_reason(&e), "detachSource hook threw");
            }
        }
    }
}

/// Ad inserter backed by the page's `scheduleAds` hook
pub struct JsAdInserter {
    schedule: Option<js_sys::Function>,
}

impl JsAdInserter {
    pub fn from_hooks(hooks: &JsValue) -> Self {
        Self {
            schedule: hook(hooks, "scheduleAds"),
        }
    }
}

impl AdInserter for JsAdInserter {
    fn schedule(&mut self, ads: &[AdBreak]) -> Result<()> {
        let Some(schedule) = &self.schedule else {
            if !ads.is_empty() {
                tracing::debug!(count = ads.len(), "No scheduleAds hook, ignoring ad breaks");
            }
            return Ok(());
        };

        let value = serde_wasm_bindgen::to_value(ads).map_err(|e| Error::AdInsertion(e.to_string()))?;
        schedule
            .call1(&JsValue::NULL, &value)
            .map(|_| ())
            .map_err(|e| Error::AdInsertion(js_reason(&e)))
    }
}

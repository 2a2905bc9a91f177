//! VidSurface WASM - browser bindings for the media control surface
//!
//! Implements the `vidsurface-core` host traits over `web-sys` and exposes
//! a single `VidSurfacePlayer` to JavaScript.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { VidSurfacePlayer } from '@vidsurface/wasm';
//!
//! await init();
//! const player = new VidSurfacePlayer(container, video, {
//!   source: 'https://example.com/stream.m3u8',
//!   autoPlay: false,
//!   ads: [{ type: 'pre', source: 'ad.m3u8', url: 'https://ads.example', label: 'Visit', skip: 5 }],
//! }, {
//!   loadSource: (video, source, kind) => hls.loadSource(source),
//!   scheduleAds: (ads) => adManager.schedule(ads),
//! });
//! ```

use wasm_bindgen::prelude::*;

mod dom;
mod hooks;
mod listeners;
mod player;

pub use player::VidSurfacePlayer;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"[VidSurface WASM] Initialized".into());
    vidsurface_core::init();
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert a surface error into a thrown JS `Error`
pub(crate) fn to_js_error(err: vidsurface_core::Error) -> JsValue {
    js_sys::Error::new(&format!("[{}] {}", err.error_code(), err)).into()
}

/// Best-effort text for a thrown JS value
pub(crate) fn js_reason(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

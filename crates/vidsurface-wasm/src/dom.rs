//! DOM implementations of the core host traits

use vidsurface_core::{ControlHandle, Error, FullscreenDocument, MediaElement, Result, SourceKind};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlVideoElement};

use crate::js_reason;

/// A control element inside the player container
#[derive(Debug, Clone)]
pub struct DomControl(HtmlElement);

impl DomControl {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.0
    }
}

impl ControlHandle for DomControl {
    fn query(&self, id: &str) -> Option<Self> {
        self.0
            .query_selector(&format!("#{id}"))
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(Self)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.set_hidden(hidden);
    }

    fn is_hidden(&self) -> bool {
        self.0.hidden()
    }

    fn set_style(&self, style: &str) {
        let _ = self.0.set_attribute("style", style);
    }

    fn value(&self) -> Option<String> {
        self.0.dyn_ref::<HtmlInputElement>().map(|input| input.value())
    }
}

/// The `<video>` element being controlled
#[derive(Debug, Clone)]
pub struct WebMedia(HtmlVideoElement);

impl WebMedia {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self(video)
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.0
    }
}

impl MediaElement for WebMedia {
    fn play(&self) -> Result<()> {
        // The returned promise is left to the page; a rejected autoplay
        // surfaces as an unhandled rejection like it would natively.
        self.0
            .play()
            .map(|_| ())
            .map_err(|e| Error::media("play", js_reason(&e)))
    }

    fn pause(&self) -> Result<()> {
        self.0.pause().map_err(|e| Error::media("pause", js_reason(&e)))
    }

    fn paused(&self) -> bool {
        self.0.paused()
    }

    fn set_volume(&self, volume: f64) {
        self.0.set_volume(volume);
    }

    fn volume(&self) -> f64 {
        self.0.volume()
    }

    fn set_muted(&self, muted: bool) {
        self.0.set_muted(muted);
    }

    fn muted(&self) -> bool {
        self.0.muted()
    }

    fn set_source(&self, source: &str) {
        self.0.set_src(source);
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.0.set_autoplay(autoplay);
    }

    fn can_play_type(&self, mime: &str) -> bool {
        !self.0.can_play_type(mime).is_empty()
    }
}

/// The page document, for fullscreen calls by member name
#[derive(Debug, Clone)]
pub struct WebDocument(Document);

impl WebDocument {
    pub fn new(document: Document) -> Self {
        Self(document)
    }

    fn call(receiver: &JsValue, method: &str, operation: &'static str) -> Result<()> {
        let function = js_sys::Reflect::get(receiver, &JsValue::from_str(method))
            .map_err(|e| Error::fullscreen(operation, js_reason(&e)))?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| Error::fullscreen(operation, format!("{method} is not a function")))?;
        function
            .call0(receiver)
            .map(|_| ())
            .map_err(|e| Error::fullscreen(operation, js_reason(&e)))
    }
}

impl FullscreenDocument for WebDocument {
    type Target = DomControl;

    fn has_member(&self, name: &str) -> bool {
        js_sys::Reflect::has(self.0.as_ref(), &JsValue::from_str(name)).unwrap_or(false)
    }

    fn request(&self, target: &DomControl, method: &str) -> Result<()> {
        let element: &JsValue = target.element().as_ref();
        Self::call(element, method, "request")
    }

    fn exit(&self, method: &str) -> Result<()> {
        Self::call(self.0.as_ref(), method, "exit")
    }

    fn has_fullscreen_element(&self, property: &str) -> bool {
        js_sys::Reflect::get(self.0.as_ref(), &JsValue::from_str(property))
            .map(|value| !value.is_null() && !value.is_undefined())
            .unwrap_or(false)
    }
}

/// Lowercase name handed to the page's `loadSource` hook
pub(crate) fn kind_name(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Hls => "hls",
        SourceKind::Dash => "dash",
        SourceKind::Progressive => "progressive",
    }
}

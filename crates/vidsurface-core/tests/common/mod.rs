//! In-memory host for driving a surface without a browser

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use vidsurface_core::{
    ActivityWatcher, ControlHandle, ControlName, Controls, Error, FullscreenAdapter, FullscreenApi,
    FullscreenDocument, ListenerHost, MediaElement, Result, SurfaceAction, SurfaceBinder, Timestamp,
};

/// Install a test log writer once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vidsurface_core=debug")
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Elements
// =============================================================================

#[derive(Debug, Default)]
struct ElementData {
    id: String,
    classes: BTreeSet<String>,
    hidden: bool,
    style: Option<String>,
    value: Option<String>,
    children: Vec<FakeElement>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeElement(Rc<RefCell<ElementData>>);

impl FakeElement {
    pub fn new(id: &str) -> Self {
        Self(Rc::new(RefCell::new(ElementData {
            id: id.to_string(),
            ..Default::default()
        })))
    }

    pub fn input(id: &str, value: &str) -> Self {
        let element = Self::new(id);
        element.set_value(value);
        element
    }

    pub fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    pub fn append(&self, child: FakeElement) -> &Self {
        self.0.borrow_mut().children.push(child);
        self
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = Some(value.to_string());
    }

    pub fn style(&self) -> Option<String> {
        self.0.borrow().style.clone()
    }

    pub fn is_same(&self, other: &FakeElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl ControlHandle for FakeElement {
    fn query(&self, id: &str) -> Option<Self> {
        for child in &self.0.borrow().children {
            if child.0.borrow().id == id {
                return Some(child.clone());
            }
            if let Some(found) = child.query(id) {
                return Some(found);
            }
        }
        None
    }

    fn add_class(&self, class: &str) {
        self.0.borrow_mut().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.remove(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn set_hidden(&self, hidden: bool) {
        self.0.borrow_mut().hidden = hidden;
    }

    fn is_hidden(&self) -> bool {
        self.0.borrow().hidden
    }

    fn set_style(&self, style: &str) {
        self.0.borrow_mut().style = Some(style.to_string());
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }
}

/// Container holding the given controls; the slider starts at `volume`
pub fn container_with(names: &[ControlName], volume: &str) -> FakeElement {
    let container = FakeElement::new("player");
    let bar = FakeElement::new(ControlName::ControlsContainer.id());
    let bar_present = names.contains(&ControlName::ControlsContainer);

    for name in names {
        if *name == ControlName::ControlsContainer {
            continue;
        }
        let element = if *name == ControlName::VolumeSlider {
            FakeElement::input(name.id(), volume)
        } else {
            FakeElement::new(name.id())
        };
        // Buttons live in the controls bar when there is one
        if bar_present && *name != ControlName::Overlay {
            bar.append(element);
        } else {
            container.append(element);
        }
    }

    if bar_present {
        container.append(bar);
    }
    container
}

/// Container with every named control
pub fn full_container() -> FakeElement {
    container_with(&ControlName::ALL, "100")
}

// =============================================================================
// Media element
// =============================================================================

#[derive(Debug)]
pub struct MediaData {
    pub paused: bool,
    pub volume: f64,
    pub muted: bool,
    pub source: Option<String>,
    pub autoplay: bool,
    pub native_hls: bool,
    pub reject_play: bool,
    pub reject_pause: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
}

impl Default for MediaData {
    fn default() -> Self {
        Self {
            paused: true,
            volume: 1.0,
            muted: false,
            source: None,
            autoplay: false,
            native_hls: false,
            reject_play: false,
            reject_pause: false,
            play_calls: 0,
            pause_calls: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeMedia(pub Rc<RefCell<MediaData>>);

impl FakeMedia {
    pub fn data(&self) -> std::cell::Ref<'_, MediaData> {
        self.0.borrow()
    }

    pub fn data_mut(&self) -> std::cell::RefMut<'_, MediaData> {
        self.0.borrow_mut()
    }
}

impl MediaElement for FakeMedia {
    fn play(&self) -> Result<()> {
        let mut data = self.0.borrow_mut();
        data.play_calls += 1;
        if data.reject_play {
            return Err(Error::media("play", "NotAllowedError"));
        }
        data.paused = false;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        let mut data = self.0.borrow_mut();
        data.pause_calls += 1;
        if data.reject_pause {
            return Err(Error::media("pause", "InvalidStateError"));
        }
        data.paused = true;
        Ok(())
    }

    fn paused(&self) -> bool {
        self.0.borrow().paused
    }

    fn set_volume(&self, volume: f64) {
        self.0.borrow_mut().volume = volume;
    }

    fn volume(&self) -> f64 {
        self.0.borrow().volume
    }

    fn set_muted(&self, muted: bool) {
        self.0.borrow_mut().muted = muted;
    }

    fn muted(&self) -> bool {
        self.0.borrow().muted
    }

    fn set_source(&self, source: &str) {
        self.0.borrow_mut().source = Some(source.to_string());
    }

    fn set_autoplay(&self, autoplay: bool) {
        self.0.borrow_mut().autoplay = autoplay;
    }

    fn can_play_type(&self, mime: &str) -> bool {
        mime == "application/vnd.apple.mpegurl" && self.0.borrow().native_hls
    }
}

// =============================================================================
// Fullscreen document
// =============================================================================

#[derive(Debug, Default)]
pub struct DocumentData {
    pub members: Vec<&'static str>,
    pub fullscreen_element: Option<FakeElement>,
    pub requests: Vec<String>,
    pub exits: Vec<String>,
    pub reject_request: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeDocument(pub Rc<RefCell<DocumentData>>);

impl FakeDocument {
    pub fn standard() -> Self {
        let document = Self::default();
        document.0.borrow_mut().members = vec!["exitFullscreen", "fullscreenElement"];
        document
    }

    pub fn data(&self) -> std::cell::Ref<'_, DocumentData> {
        self.0.borrow()
    }

    pub fn data_mut(&self) -> std::cell::RefMut<'_, DocumentData> {
        self.0.borrow_mut()
    }
}

impl FullscreenDocument for FakeDocument {
    type Target = FakeElement;

    fn has_member(&self, name: &str) -> bool {
        self.0.borrow().members.iter().any(|m| *m == name)
    }

    fn request(&self, _target: &FakeElement, method: &str) -> Result<()> {
        let mut data = self.0.borrow_mut();
        if data.reject_request {
            return Err(Error::fullscreen("request", "TypeError: permissions check failed"));
        }
        data.requests.push(method.to_string());
        Ok(())
    }

    fn exit(&self, method: &str) -> Result<()> {
        self.0.borrow_mut().exits.push(method.to_string());
        Ok(())
    }

    fn has_fullscreen_element(&self, _property: &str) -> bool {
        self.0.borrow().fullscreen_element.is_some()
    }
}

// =============================================================================
// Listeners
// =============================================================================

#[derive(Debug, Clone)]
pub struct Registered {
    pub element: FakeElement,
    pub event: &'static str,
    pub action: SurfaceAction,
    pub token: usize,
}

#[derive(Debug, Default)]
pub struct ListenerData {
    pub next_token: usize,
    pub live: Vec<Registered>,
    pub total_attached: usize,
    pub total_detached: usize,
}

#[derive(Debug, Clone, Default)]
pub struct FakeListeners(pub Rc<RefCell<ListenerData>>);

impl FakeListeners {
    pub fn active(&self) -> usize {
        self.0.borrow().live.len()
    }

    /// Actions registered for `event` on the element with `id`
    pub fn actions_for(&self, id: &str, event: &str) -> Vec<SurfaceAction> {
        self.0
            .borrow()
            .live
            .iter()
            .filter(|r| r.element.id() == id && r.event == event)
            .map(|r| r.action)
            .collect()
    }
}

impl ListenerHost<FakeElement> for FakeListeners {
    type Registration = usize;

    fn attach(&mut self, target: &FakeElement, event: &'static str, action: SurfaceAction) -> Result<usize> {
        let mut data = self.0.borrow_mut();
        let token = data.next_token;
        data.next_token += 1;
        data.total_attached += 1;
        data.live.push(Registered {
            element: target.clone(),
            event,
            action,
            token,
        });
        Ok(token)
    }

    fn detach(&mut self, target: &FakeElement, event: &'static str, registration: usize) {
        let mut data = self.0.borrow_mut();
        let before = data.live.len();
        data.live
            .retain(|r| !(r.token == registration && r.event == event && r.element.is_same(target)));
        if data.live.len() < before {
            data.total_detached += 1;
        }
    }
}

// =============================================================================
// Harness
// =============================================================================

pub type FakeControls = Controls<FakeElement, FakeMedia, FakeDocument>;

/// A bound surface plus handles on everything it talks to
pub struct Harness {
    pub container: FakeElement,
    pub media: FakeMedia,
    pub document: FakeDocument,
    pub listeners: FakeListeners,
    pub controls: FakeControls,
    pub binder: SurfaceBinder<FakeElement, FakeListeners>,
    pub clock: f64,
}

impl Harness {
    pub fn bind(container: FakeElement) -> Self {
        Self::bind_with(container, ActivityWatcher::new(1_000.0))
    }

    pub fn bind_with(container: FakeElement, activity: ActivityWatcher) -> Self {
        Self::bind_media(container, FakeMedia::default(), activity)
    }

    /// Bind over a media element prepared by the test
    pub fn bind_media(container: FakeElement, media: FakeMedia, activity: ActivityWatcher) -> Self {
        init_tracing();

        let document = FakeDocument::standard();
        let api = FullscreenApi::detect(&document);
        let listeners = FakeListeners::default();

        let controls = Controls::new(
            container.clone(),
            media.clone(),
            FullscreenAdapter::new(api, document.clone()),
            activity,
        );
        let mut binder = SurfaceBinder::new(listeners.clone());
        binder
            .bind(controls.listener_plan())
            .expect("fake listeners never refuse");

        Self {
            container,
            media,
            document,
            listeners,
            controls,
            binder,
            clock: 0.0,
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.clock)
    }

    pub fn advance(&mut self, ms: f64) {
        self.clock += ms;
    }

    pub fn element(&self, name: ControlName) -> FakeElement {
        self.container
            .query(name.id())
            .unwrap_or_else(|| panic!("no #{} in container", name.id()))
    }

    /// Fire `event` on the element with `id`, dispatching every listener
    pub fn fire(&mut self, id: &str, event: &str) -> Result<usize> {
        let actions = self.listeners.actions_for(id, event);
        let now = self.now();
        for action in &actions {
            self.controls.dispatch(*action, now)?;
        }
        Ok(actions.len())
    }

    pub fn click(&mut self, name: ControlName) -> Result<usize> {
        self.fire(name.id(), "click")
    }
}

//! Host capability traits
//!
//! The surface never touches a DOM directly. Each capability it needs from
//! the hosting environment is one of the traits below; `vidsurface-wasm`
//! implements them over `web-sys`, and the integration tests implement them
//! over an in-memory element tree.

use crate::{ads::AdBreak, binder::SurfaceAction, config::SourceKind, Result};

/// A UI element the surface can restyle
///
/// Handles are cheap clones that refer to the same underlying element. DOM
/// mutations are infallible from the surface's point of view: a host that
/// fails to toggle a class has nothing useful to report.
pub trait ControlHandle: Clone {
    /// Find a descendant by identifier (`#id` in DOM hosts)
    fn query(&self, id: &str) -> Option<Self>;

    /// Add a CSS class
    fn add_class(&self, class: &str);

    /// Remove a CSS class
    fn remove_class(&self, class: &str);

    /// Check for a CSS class
    fn has_class(&self, class: &str) -> bool;

    /// Set the element's `hidden` property
    fn set_hidden(&self, hidden: bool);

    /// Read the element's `hidden` property
    fn is_hidden(&self) -> bool;

    /// Replace the inline `style` attribute
    fn set_style(&self, style: &str);

    /// Current value for input elements, `None` for everything else
    fn value(&self) -> Option<String>;
}

/// The native media element the surface drives
pub trait MediaElement {
    /// Start playback
    fn play(&self) -> Result<()>;

    /// Pause playback
    fn pause(&self) -> Result<()>;

    /// Native paused flag
    fn paused(&self) -> bool;

    /// Set volume (0.0 to 1.0)
    fn set_volume(&self, volume: f64);

    /// Current volume (0.0 to 1.0)
    fn volume(&self) -> f64;

    /// Set the muted flag
    fn set_muted(&self, muted: bool);

    /// Native muted flag
    fn muted(&self) -> bool;

    /// Assign a source URL directly to the element
    fn set_source(&self, source: &str);

    /// Set the autoplay attribute
    fn set_autoplay(&self, autoplay: bool);

    /// Whether the element can play a MIME type natively
    fn can_play_type(&self, mime: &str) -> bool;
}

/// Document-level fullscreen calls, addressed by resolved member names
///
/// Member names come from [`crate::fullscreen::FullscreenApi`] so a host only
/// needs generic "call this method"/"read this property" plumbing.
pub trait FullscreenDocument {
    /// Element type that can be made fullscreen
    type Target;

    /// Whether the document exposes a member with this name
    fn has_member(&self, name: &str) -> bool;

    /// Invoke the enter method on `target`
    fn request(&self, target: &Self::Target, method: &str) -> Result<()>;

    /// Invoke the exit method on the document
    fn exit(&self, method: &str) -> Result<()>;

    /// Whether the current-fullscreen-element property is set
    fn has_fullscreen_element(&self, property: &str) -> bool;
}

/// Event listener registration
///
/// `attach` returns an opaque registration which must be handed back to
/// `detach` to remove exactly that listener.
pub trait ListenerHost<H> {
    type Registration;

    /// Register a listener that dispatches `action` when `event` fires on `target`
    fn attach(
        &mut self,
        target: &H,
        event: &'static str,
        action: SurfaceAction,
    ) -> Result<Self::Registration>;

    /// Remove a listener previously returned by `attach`
    fn detach(&mut self, target: &H, event: &'static str, registration: Self::Registration);
}

/// External player for adaptive manifests (hls.js and friends)
pub trait ManifestPlayer<M> {
    /// Attach `source` to `media`
    fn load(&mut self, media: &M, source: &str, kind: SourceKind) -> Result<()>;

    /// Release whatever was attached by the last `load`
    fn detach(&mut self) {}
}

/// External ad-insertion collaborator
pub trait AdInserter {
    /// Hand over the configured ad breaks
    fn schedule(&mut self, ads: &[AdBreak]) -> Result<()>;
}

/// Used when no manifest player is available: the source goes straight to
/// the media element and playback depends on native support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoManifestPlayer;

impl<M: MediaElement> ManifestPlayer<M> for NoManifestPlayer {
    fn load(&mut self, media: &M, source: &str, kind: SourceKind) -> Result<()> {
        tracing::warn!(%kind, source, "No manifest player configured, assigning source directly");
        media.set_source(source);
        Ok(())
    }
}

/// Used when ads are not inserted
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAds;

impl AdInserter for NoAds {
    fn schedule(&mut self, ads: &[AdBreak]) -> Result<()> {
        if !ads.is_empty() {
            tracing::debug!(count = ads.len(), "No ad inserter configured, ignoring ad breaks");
        }
        Ok(())
    }
}

//! VidSurface Core - media control surface for web video players
//!
//! This crate provides the platform-neutral part of a custom video player UI:
//! - Gesture to playback-state mapping (`Controls`)
//! - Symmetric listener attach/detach (`SurfaceBinder`)
//! - Vendor-normalized fullscreen calls
//! - Inactivity-based auto-hide of the controls
//! - Player configuration, source classification and ad break descriptors
//!
//! Hosts supply the DOM through the traits in [`host`]; `vidsurface-wasm`
//! does so over `web-sys`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       VidSurface Core                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐        ┌──────────────┐                       │
//! │  │ ConfigLoader │        │ SurfaceBinder│◄──── ListenerHost      │
//! │  └──────┬───────┘        └──────┬───────┘                       │
//! │         │ source, ads           │ SurfaceAction                 │
//! │         ▼                       ▼                               │
//! │  ┌──────────────┐        ┌──────────────┐   ┌───────────────┐   │
//! │  │ MediaElement │◄───────│   Controls   │──►│ PlaybackState │   │
//! │  └──────────────┘        └──┬────────┬──┘   └───────────────┘   │
//! │                             │        │                          │
//! │                   ┌─────────┴──┐  ┌──┴──────────────┐           │
//! │                   │ Fullscreen │  │ ActivityWatcher │           │
//! │                   │  Adapter   │  └─────────────────┘           │
//! │                   └────────────┘                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod state;
pub mod host;
pub mod elements;
pub mod fullscreen;
pub mod activity;
pub mod ads;
pub mod config;
pub mod binder;
pub mod controls;

pub use error::{Error, Result};
pub use state::{PlaybackState, SurfaceId, Timestamp};
pub use host::{
    AdInserter, ControlHandle, FullscreenDocument, ListenerHost, ManifestPlayer, MediaElement,
    NoAds, NoManifestPlayer,
};
pub use elements::{classes, ControlElementSet, ControlName};
pub use fullscreen::{FullscreenAdapter, FullscreenApi};
pub use activity::{ActivityVerdict, ActivityWatcher};
pub use ads::{AdBreak, AdPosition, AdSchedule};
pub use config::{ConfigLoader, LoadOutcome, PlayerConfig, SourceKind};
pub use binder::{events, ListenerSpec, ListenerTarget, SurfaceAction, SurfaceBinder};
pub use controls::Controls;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "VidSurface Core initialized");
}

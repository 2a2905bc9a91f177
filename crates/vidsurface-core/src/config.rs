//! Player configuration and source loading
//!
//! `PlayerConfig` is the declarative object a page hands to the player.
//! `ConfigLoader` turns it into calls on the media element and on the
//! external manifest player / ad inserter collaborators.

use crate::{
    activity::{ActivityWatcher, DEFAULT_INACTIVITY_TIMEOUT_MS},
    ads::{lenient_ads, AdBreak, AdSchedule},
    host::{AdInserter, ManifestPlayer, MediaElement},
    Result,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use tracing::{info, instrument, warn};
use url::Url;

/// Value used for `width`/`height` when the config leaves them out
pub const AUTO_DIMENSION: &str = "auto";

/// Inbound player configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Content source URL
    pub source: String,
    /// Start playing once loaded
    #[serde(default, deserialize_with = "lenient_flag")]
    pub auto_play: bool,
    /// CSS width, `auto` when absent
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_dimension")]
    pub width: Option<String>,
    /// CSS height, `auto` when absent
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_dimension")]
    pub height: Option<String>,
    /// Render the custom controls
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub controls: Option<bool>,
    /// Auto-hide controls after inactivity while playing
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub hide_controls: Option<bool>,
    /// Inactivity period before auto-hide (milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub inactivity_timeout: Option<f64>,
    /// Ad breaks for the external ad inserter
    #[serde(default, deserialize_with = "lenient_ads")]
    pub ads: Vec<AdBreak>,
}

impl PlayerConfig {
    /// Create a config for a source with every optional field defaulted
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            auto_play: false,
            width: None,
            height: None,
            controls: None,
            hide_controls: None,
            inactivity_timeout: None,
            ads: Vec::new(),
        }
    }

    /// Parse from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn width(&self) -> &str {
        self.width.as_deref().unwrap_or(AUTO_DIMENSION)
    }

    pub fn height(&self) -> &str {
        self.height.as_deref().unwrap_or(AUTO_DIMENSION)
    }

    /// Whether custom controls are rendered (default on)
    pub fn controls(&self) -> bool {
        self.controls.unwrap_or(true)
    }

    /// Activity watcher configured from `hideControls`/`inactivityTimeout`
    pub fn activity_watcher(&self) -> ActivityWatcher {
        if self.hide_controls.unwrap_or(true) {
            ActivityWatcher::new(
                self.inactivity_timeout
                    .filter(|ms| ms.is_finite())
                    .unwrap_or(DEFAULT_INACTIVITY_TIMEOUT_MS),
            )
        } else {
            ActivityWatcher::disabled()
        }
    }

    /// Ad breaks partitioned by placement
    pub fn ad_schedule(&self) -> AdSchedule {
        AdSchedule::new(self.ads.clone())
    }
}

// Optional fields fall back to their default on a type mismatch instead of
// failing the whole config.

fn lenient_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(value) = Option::<serde_json::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(%value, error = %e, "Ignoring mistyped config field, using default");
            Ok(None)
        }
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag: Option<bool> = lenient_option(deserializer)?;
    Ok(flag.unwrap_or_default())
}

/// Strings pass through, bare numbers are taken as pixels
fn lenient_dimension<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(dimension)) => Ok(Some(dimension)),
        Some(serde_json::Value::Number(pixels)) => Ok(Some(format!("{pixels}px"))),
        Some(other) => {
            warn!(value = %other, "Ignoring mistyped dimension, using auto");
            Ok(None)
        }
        None => Ok(None),
    }
}

/// How a source has to be attached to the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// HLS manifest (`.m3u8`)
    Hls,
    /// DASH manifest (`.mpd`)
    Dash,
    /// Anything the element plays directly (MP4, WebM, ...)
    Progressive,
}

impl SourceKind {
    /// MIME type used to probe native support
    pub const HLS_MIME: &'static str = "application/vnd.apple.mpegurl";

    /// Classify a source by its path extension
    pub fn classify(source: &str) -> Self {
        let path = match Url::parse(source) {
            Ok(url) => url.path().to_ascii_lowercase(),
            // Relative or otherwise unparsable: strip query/fragment by hand
            Err(_) => source
                .split(['?', '#'])
                .next()
                .unwrap_or_default()
                .to_ascii_lowercase(),
        };

        if path.ends_with(".m3u8") {
            SourceKind::Hls
        } else if path.ends_with(".mpd") {
            SourceKind::Dash
        } else {
            SourceKind::Progressive
        }
    }

    pub fn is_manifest(&self) -> bool {
        !matches!(self, SourceKind::Progressive)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Hls => write!(f, "hls"),
            SourceKind::Dash => write!(f, "dash"),
            SourceKind::Progressive => write!(f, "progressive"),
        }
    }
}

/// What `ConfigLoader::initialize` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    /// How the source was classified
    pub kind: SourceKind,
    /// Whether the source went to the manifest player
    pub via_manifest_player: bool,
    /// Caller should start playback through the controls
    pub autoplay: bool,
    /// Number of ad breaks handed to the ad inserter
    pub ads_forwarded: usize,
}

/// Initializes the media source and collaborators from a config
pub struct ConfigLoader<P, A> {
    manifest_player: P,
    ad_inserter: A,
}

impl<P, A> ConfigLoader<P, A> {
    pub fn new(manifest_player: P, ad_inserter: A) -> Self {
        Self {
            manifest_player,
            ad_inserter,
        }
    }

    pub fn manifest_player(&self) -> &P {
        &self.manifest_player
    }

    pub fn ad_inserter(&self) -> &A {
        &self.ad_inserter
    }

    /// Attach the configured source, forward ads and report whether to autoplay.
    ///
    /// Autoplay is reported rather than performed so playback starts through
    /// the same path as a click and the controls stay in sync.
    #[instrument(skip_all, fields(source = %config.source))]
    pub fn initialize<M>(&mut self, config: &PlayerConfig, media: &M) -> Result<LoadOutcome>
    where
        M: MediaElement,
        P: ManifestPlayer<M>,
        A: AdInserter,
    {
        let (kind, via_manifest_player) = self.attach_source(&config.source, media)?;
        media.set_autoplay(config.auto_play);

        if let Err(e) = self.ad_inserter.schedule(&config.ads) {
            if via_manifest_player {
                warn!(error = %e, "Ad scheduling failed, releasing manifest player");
                self.manifest_player.detach();
            }
            return Err(e);
        }

        info!(
            %kind,
            via_manifest_player,
            autoplay = config.auto_play,
            ads = config.ads.len(),
            "Player source initialized"
        );

        Ok(LoadOutcome {
            kind,
            via_manifest_player,
            autoplay: config.auto_play,
            ads_forwarded: config.ads.len(),
        })
    }

    /// Replace the current source without touching controls or ads
    pub fn update_source<M>(&mut self, source: &str, media: &M) -> Result<SourceKind>
    where
        M: MediaElement,
        P: ManifestPlayer<M>,
    {
        self.manifest_player.detach();
        let (kind, _) = self.attach_source(source, media)?;
        info!(source, %kind, "Player source updated");
        Ok(kind)
    }

    /// Release the manifest player
    pub fn release<M>(&mut self)
    where
        P: ManifestPlayer<M>,
    {
        self.manifest_player.detach();
    }

    fn attach_source<M>(&mut self, source: &str, media: &M) -> Result<(SourceKind, bool)>
    where
        M: MediaElement,
        P: ManifestPlayer<M>,
    {
        let kind = SourceKind::classify(source);
        let native = match kind {
            SourceKind::Progressive => true,
            SourceKind::Hls => media.can_play_type(SourceKind::HLS_MIME),
            SourceKind::Dash => false,
        };

        if native {
            media.set_source(source);
            Ok((kind, false))
        } else {
            self.manifest_player.load(media, source, kind)?;
            Ok((kind, true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_playground_config() {
        let json = r#"{
            "source": "https://video-dev.github.io/streams/x36xhzz/x36xhzz.m3u8",
            "autoPlay": false,
            "ads": [{
                "type": "pre",
                "source": "https://bitdash-a.akamaihd.net/content/MI201109210084_1/m3u8s/f08e80da-bf1d-4e3d-8899-f0f6155f6efa.m3u8",
                "url": "http://shopforshoes.com",
                "label": "Visit shopforshoes.com",
                "skip": 5
            }]
        }"#;

        let config = PlayerConfig::from_json(json).unwrap();
        assert!(!config.auto_play);
        assert_eq!(config.ads.len(), 1);
        assert_eq!(config.ad_schedule().pre_roll().map(|a| a.label.as_str()), Some("Visit shopforshoes.com"));
    }

    #[test]
    fn test_defaults() {
        let config = PlayerConfig::from_json(r#"{"source": "movie.mp4"}"#).unwrap();
        assert_eq!(config.width(), "auto");
        assert_eq!(config.height(), "auto");
        assert!(config.controls());
        assert!(!config.auto_play);
        assert!(config.ads.is_empty());
        assert_eq!(config.activity_watcher().timeout_ms(), DEFAULT_INACTIVITY_TIMEOUT_MS);
    }

    #[test]
    fn test_explicit_dimensions() {
        let config = PlayerConfig::from_json(
            r#"{"source": "a.mp4", "width": "640px", "height": "360px", "controls": false}"#,
        )
        .unwrap();
        assert_eq!(config.width(), "640px");
        assert_eq!(config.height(), "360px");
        assert!(!config.controls());
    }

    #[test]
    fn test_malformed_ads_dropped() {
        let json = r#"{
            "source": "a.mp4",
            "ads": [
                {"type": "sideways", "source": "x.mp4"},
                {"type": "post", "source": "y.mp4"},
                42
            ]
        }"#;
        let config = PlayerConfig::from_json(json).unwrap();
        assert_eq!(config.ads.len(), 1);
        assert_eq!(config.ads[0].source, "y.mp4");
    }

    #[test]
    fn test_non_list_ads_ignored() {
        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "ads": "nope"}"#).unwrap();
        assert!(config.ads.is_empty());
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let err = PlayerConfig::from_json(r#"{"autoPlay": true}"#).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_PARSE");
    }

    #[test]
    fn test_hide_controls_disabled() {
        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "hideControls": false}"#).unwrap();
        assert!(!config.activity_watcher().is_enabled());

        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "inactivityTimeout": 1500}"#).unwrap();
        assert_eq!(config.activity_watcher().timeout_ms(), 1500.0);
    }

    #[test]
    fn test_numeric_dimensions_become_pixels() {
        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "width": 640, "height": 360}"#).unwrap();
        assert_eq!(config.width(), "640px");
        assert_eq!(config.height(), "360px");

        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "width": true, "height": null}"#).unwrap();
        assert_eq!(config.width(), "auto");
        assert_eq!(config.height(), "auto");
    }

    #[test]
    fn test_mistyped_auto_play_defaults_off() {
        for value in ["null", "\"yes\"", "1"] {
            let json = format!(r#"{{"source": "a.mp4", "autoPlay": {value}}}"#);
            let config = PlayerConfig::from_json(&json).unwrap();
            assert!(!config.auto_play, "autoPlay {value}");
        }
    }

    #[test]
    fn test_mistyped_controls_defaults_on() {
        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "controls": "yes"}"#).unwrap();
        assert!(config.controls());
        assert_eq!(config.controls, None);
    }

    #[test]
    fn test_mistyped_hide_controls_defaults_on() {
        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "hideControls": "no"}"#).unwrap();
        assert!(config.activity_watcher().is_enabled());
    }

    #[test]
    fn test_mistyped_inactivity_timeout_uses_default() {
        let config = PlayerConfig::from_json(r#"{"source": "a.mp4", "inactivityTimeout": "soon"}"#).unwrap();
        assert_eq!(config.inactivity_timeout, None);
        assert_eq!(config.activity_watcher().timeout_ms(), DEFAULT_INACTIVITY_TIMEOUT_MS);
    }

    #[test]
    fn test_source_kind() {
        assert_eq!(SourceKind::classify("https://cdn.example.com/live/master.m3u8?token=abc"), SourceKind::Hls);
        assert_eq!(SourceKind::classify("https://cdn.example.com/vod/manifest.MPD"), SourceKind::Dash);
        assert_eq!(SourceKind::classify("https://cdn.example.com/clip.mp4"), SourceKind::Progressive);
        assert_eq!(SourceKind::classify("/streams/index.m3u8#t=10"), SourceKind::Hls);
        assert_eq!(SourceKind::classify("clip.webm"), SourceKind::Progressive);
        assert!(SourceKind::Hls.is_manifest());
        assert!(!SourceKind::Progressive.is_manifest());
    }

    #[test]
    fn test_config_round_trip_keys() {
        let mut config = PlayerConfig::new("a.mp4");
        config.auto_play = true;
        let json = config.to_json().unwrap();
        assert!(json.contains("\"autoPlay\":true"));
        assert!(!json.contains("width"));
    }
}

//! Ad break descriptors
//!
//! Ad breaks are configuration data only. Playing them is up to an external
//! [`AdInserter`](crate::host::AdInserter); the surface just parses, partitions
//! and forwards them.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Where an ad break sits relative to the content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPosition {
    #[serde(alias = "preroll", alias = "pre-roll")]
    Pre,
    #[serde(alias = "midroll", alias = "mid-roll")]
    Mid,
    #[serde(alias = "postroll", alias = "post-roll")]
    Post,
}

impl std::fmt::Display for AdPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdPosition::Pre => write!(f, "pre-roll"),
            AdPosition::Mid => write!(f, "mid-roll"),
            AdPosition::Post => write!(f, "post-roll"),
        }
    }
}

/// A single ad break
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdBreak {
    /// Placement
    #[serde(rename = "type", alias = "position")]
    pub position: AdPosition,
    /// Ad media source
    pub source: String,
    /// Click-through destination
    #[serde(rename = "url", alias = "clickThroughUrl", default)]
    pub click_through_url: String,
    /// Click-through label shown over the ad
    #[serde(default)]
    pub label: String,
    /// Seconds before the ad may be skipped; `None` means unskippable
    #[serde(rename = "skip", alias = "skipOffsetSeconds", default)]
    pub skip_offset_seconds: Option<u32>,
}

impl AdBreak {
    /// Whether the viewer may skip after `elapsed` seconds of the ad
    pub fn can_skip(&self, elapsed: f64) -> bool {
        self.skip_offset_seconds
            .is_some_and(|offset| elapsed >= f64::from(offset))
    }

    /// Whole seconds left until the skip button unlocks
    pub fn skip_remaining(&self, elapsed: f64) -> Option<u32> {
        self.skip_offset_seconds
            .map(|offset| (f64::from(offset) - elapsed.max(0.0)).ceil().max(0.0) as u32)
    }
}

/// Ad breaks partitioned by placement, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSchedule {
    breaks: Vec<AdBreak>,
}

impl AdSchedule {
    pub fn new(breaks: Vec<AdBreak>) -> Self {
        Self { breaks }
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn breaks(&self) -> &[AdBreak] {
        &self.breaks
    }

    /// Breaks at a given placement
    pub fn at(&self, position: AdPosition) -> impl Iterator<Item = &AdBreak> {
        self.breaks.iter().filter(move |ad| ad.position == position)
    }

    /// The ad to play before content starts
    pub fn pre_roll(&self) -> Option<&AdBreak> {
        self.at(AdPosition::Pre).next()
    }

    /// The ad to play once content ends
    pub fn post_roll(&self) -> Option<&AdBreak> {
        self.at(AdPosition::Post).next()
    }

    pub fn mid_rolls(&self) -> Vec<&AdBreak> {
        self.at(AdPosition::Mid).collect()
    }
}

/// Deserialize an ad list, dropping entries that don't parse.
///
/// One broken ad must not take down the whole player config.
pub(crate) fn lenient_ads<'de, D>(deserializer: D) -> Result<Vec<AdBreak>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Array(items)) => items,
        Some(serde_json::Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(value = %other, "Ignoring ads field that is not a list");
            Vec::new()
        }
    };

    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<AdBreak>(value) {
            Ok(ad) => Some(ad),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed ad break");
                None
            }
        })
        .collect())
}

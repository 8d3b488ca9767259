//! Configuration type definitions

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SIZE_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MULTIPLIER_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SIZE: f64 = 50.0;
pub const DEFAULT_MAX_DEPTH: u32 = 3;
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 1000;

/// Sizing configuration snapshot
///
/// Keys are camelCase on disk. Unset keys inherit the defaults and unknown
/// keys are carried in `extra` so they survive a load/save round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizingConfig {
    /// Multiplier applied to the raw reachability weight
    pub size_multiplier: f64,

    /// Secondary multiplier, applied after `size_multiplier`
    pub multiplier_scale: f64,

    /// Upper bound for computed sizes (manual overrides ignore it)
    pub max_size: f64,

    /// Maximum number of hops explored from a root
    #[serde(deserialize_with = "lenient_u32")]
    pub max_depth: u32,

    /// Folder prefixes whose nodes are not sized
    pub exclude_folders: Vec<String>,

    /// Exact titles or `/regex/` patterns whose nodes are not sized
    pub exclude_titles: Vec<String>,

    /// Tags (without leading `#`) whose nodes are not sized
    pub exclude_tags: Vec<String>,

    /// Count link targets that do not resolve to a node as 1 instead of 0
    pub count_unresolved_links: bool,

    /// Period of the per-view refresh timer in milliseconds
    #[serde(deserialize_with = "lenient_u64")]
    pub refresh_interval_ms: u64,

    /// Keys this version does not recognize
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Default for SizingConfig {
    fn default() -> Self {
        SizingConfig {
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
            multiplier_scale: DEFAULT_MULTIPLIER_SCALE,
            max_size: DEFAULT_MAX_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            exclude_folders: Vec::new(),
            exclude_titles: Vec::new(),
            exclude_tags: Vec::new(),
            count_unresolved_links: false,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            extra: toml::Table::new(),
        }
    }
}

/// Clamp a float into `[min, max]`, falling back to `default` for NaN
pub(crate) fn clamp_f64(value: f64, min: f64, max: f64, default: f64) -> f64 {
    if value.is_nan() {
        default
    } else {
        value.clamp(min, max)
    }
}

/// Accept any number for a count; fractions truncate, negatives become 0.
/// The result is clamped into range by `sanitize`.
fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(if value.is_nan() {
        0
    } else {
        value.trunc().clamp(0.0, f64::from(u32::MAX)) as u32
    })
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(if value.is_nan() {
        0
    } else {
        value.trunc().max(0.0) as u64
    })
}

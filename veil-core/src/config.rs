//! Ceremony configuration record.
//!
//! One mutable record holds everything the ceremony needs: tick rate,
//! aperture, channel count, the pattern set and the accumulated log. It is
//! owned by the session controller and passed by reference to the engine.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::pattern::is_valid_pattern;

/// Ticks per second.
pub const RATE_RANGE: RangeInclusive<u32> = 1..=30;

/// Digits per veil. Distillation reads the trailing six digits.
pub const LENGTH_RANGE: RangeInclusive<usize> = 6..=30;

/// Parallel veils per tick.
pub const CHANNELS_RANGE: RangeInclusive<usize> = 1..=30;

pub const DEFAULT_RATE: u32 = 5;
pub const DEFAULT_LENGTH: usize = 12;
pub const DEFAULT_CHANNELS: usize = 1;

/// The full ceremony configuration.
///
/// `log` holds lexicon indices in emission order. The storage blob is this
/// record serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyConfig {
    pub rate: u32,
    pub length: usize,
    pub channels: usize,
    pub patterns: Vec<String>,
    pub log: Vec<u16>,
}

impl Default for CeremonyConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            length: DEFAULT_LENGTH,
            channels: DEFAULT_CHANNELS,
            patterns: Vec::new(),
            log: Vec::new(),
        }
    }
}

/// A configuration with only some fields known.
///
/// Produced by decoding a share link or a storage blob. Absent fields are
/// filled from another record by [`CeremonyConfig::merged`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<Vec<u16>>,
}

impl PartialConfig {
    /// True when no recognised field is present.
    pub fn is_empty(&self) -> bool {
        self.rate.is_none()
            && self.length.is_none()
            && self.channels.is_none()
            && self.patterns.is_none()
            && self.log.is_none()
    }
}

impl From<CeremonyConfig> for PartialConfig {
    fn from(config: CeremonyConfig) -> Self {
        Self {
            rate: Some(config.rate),
            length: Some(config.length),
            channels: Some(config.channels),
            patterns: Some(config.patterns),
            log: Some(config.log),
        }
    }
}

impl CeremonyConfig {
    /// Overlay `partial` onto this record.
    ///
    /// Numeric fields are clamped into range. Patterns that are not digit
    /// strings fitting the resulting aperture are dropped, so the record
    /// always satisfies its invariants afterwards.
    pub fn merged(&self, partial: PartialConfig) -> Self {
        let length = clamp_length(partial.length.unwrap_or(self.length));
        let patterns = partial
            .patterns
            .unwrap_or_else(|| self.patterns.clone())
            .into_iter()
            .filter(|p| is_valid_pattern(p, length))
            .collect();

        Self {
            rate: clamp_rate(partial.rate.unwrap_or(self.rate)),
            length,
            channels: clamp_channels(partial.channels.unwrap_or(self.channels)),
            patterns,
            log: partial.log.unwrap_or_else(|| self.log.clone()),
        }
    }
}

pub fn clamp_rate(rate: u32) -> u32 {
    rate.clamp(*RATE_RANGE.start(), *RATE_RANGE.end())
}

pub fn clamp_length(length: usize) -> usize {
    length.clamp(*LENGTH_RANGE.start(), *LENGTH_RANGE.end())
}

pub fn clamp_channels(channels: usize) -> usize {
    channels.clamp(*CHANNELS_RANGE.start(), *CHANNELS_RANGE.end())
}

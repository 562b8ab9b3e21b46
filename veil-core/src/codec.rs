//! Settings codec for share links.
//!
//! The configuration travels as a query string:
//!
//! | Key | Field      | Encoding                                    |
//! |-----|------------|---------------------------------------------|
//! | `h` | `rate`     | decimal                                     |
//! | `a` | `length`   | decimal                                     |
//! | `w` | `channels` | decimal                                     |
//! | `f` | `patterns` | comma-joined digit strings, absent if none  |
//! | `p` | `log`      | 2 bytes LE per entry, URL-safe base64, no `=` |
//!
//! Decoding is total: unknown keys are ignored, unparseable values are
//! omitted from the returned [`PartialConfig`], and a corrupt log decodes
//! to an empty sequence.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use url::form_urlencoded;

use crate::config::{CeremonyConfig, PartialConfig};

pub const KEY_RATE: &str = "h";
pub const KEY_LENGTH: &str = "a";
pub const KEY_CHANNELS: &str = "w";
pub const KEY_PATTERNS: &str = "f";
pub const KEY_LOG: &str = "p";

const PATTERN_SEPARATOR: char = ',';

/// Encode a configuration as a query string (without the leading `?`).
///
/// # Example
///
/// ```rust
/// use veil_core::{codec, CeremonyConfig};
///
/// let config = CeremonyConfig {
///     patterns: vec!["528".into()],
///     log: vec![8999],
///     ..Default::default()
/// };
/// let query = codec::encode(&config);
/// assert_eq!(codec::decode(&query).log, Some(vec![8999]));
/// ```
pub fn encode(config: &CeremonyConfig) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair(KEY_RATE, &config.rate.to_string())
        .append_pair(KEY_LENGTH, &config.length.to_string())
        .append_pair(KEY_CHANNELS, &config.channels.to_string());

    if !config.patterns.is_empty() {
        let joined = config.patterns.join(&PATTERN_SEPARATOR.to_string());
        query.append_pair(KEY_PATTERNS, &joined);
    }
    if !config.log.is_empty() {
        query.append_pair(KEY_LOG, &encode_log(&config.log));
    }
    query.finish()
}

/// Decode a query string, a `?`-prefixed query or a full URL.
///
/// Only recognised keys with parseable values are returned. When a key is
/// repeated the first occurrence wins.
pub fn decode(input: &str) -> PartialConfig {
    let query = strip_to_query(input);
    let mut partial = PartialConfig::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            KEY_RATE if partial.rate.is_none() => partial.rate = value.trim().parse().ok(),
            KEY_LENGTH if partial.length.is_none() => partial.length = value.trim().parse().ok(),
            KEY_CHANNELS if partial.channels.is_none() => {
                partial.channels = value.trim().parse().ok()
            }
            KEY_PATTERNS if partial.patterns.is_none() => {
                partial.patterns = Some(
                    value
                        .split(PATTERN_SEPARATOR)
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            KEY_LOG if partial.log.is_none() => partial.log = Some(decode_log(&value)),
            _ => {}
        }
    }
    partial
}

/// Pack log entries as little-endian `u16` pairs in URL-safe base64.
pub fn encode_log(log: &[u16]) -> String {
    let bytes: Vec<u8> = log.iter().flat_map(|entry| entry.to_le_bytes()).collect();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Reverse [`encode_log`]. Any malformed input yields an empty log.
pub fn decode_log(encoded: &str) -> Vec<u16> {
    let mut standard: String = encoded
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while standard.len() % 4 != 0 {
        standard.push('=');
    }

    let bytes = match STANDARD.decode(standard.as_bytes()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("Discarding undecodable log field: {}", e);
            return Vec::new();
        }
    };
    if bytes.len() % 2 != 0 {
        tracing::debug!("Discarding log field with odd byte count {}", bytes.len());
        return Vec::new();
    }
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

fn strip_to_query(input: &str) -> &str {
    let input = input.trim();
    let input = input.split_once('#').map_or(input, |(before, _)| before);
    input.split_once('?').map_or(input, |(_, query)| query)
}

//! # Veil Core
//!
//! **The ceremony loop without the clock.**
//!
//! Each tick draws `channels` random digit strings (veils) of `length`
//! digits, checks that every configured pattern occurs in every veil, and
//! on alignment distills the first veil's trailing six digits into an
//! index of an external word list.
//!
//! ## Features
//!
//! - **Synchronous**: No async, no timers; scheduling lives in `veil-session`
//! - **Explicit state**: The configuration is passed in, never global
//! - **Link-friendly**: Settings and the utterance log round-trip through a
//!   compact query string
//!
//! ## Quick Start
//!
//! ```rust
//! use veil_core::{codec, CeremonyConfig, CeremonyEngine, Lexicon};
//!
//! let lexicon = Lexicon::from_words(["ash", "birch", "cedar"]);
//! let mut config = CeremonyConfig {
//!     patterns: vec!["1".into()],
//!     ..Default::default()
//! };
//!
//! let mut engine = CeremonyEngine::random();
//! let result = engine.tick(&config, lexicon.len());
//! if let Some(index) = result.emitted {
//!     config.log.push(index);
//! }
//!
//! let link = codec::encode(&config);
//! assert_eq!(codec::decode(&link).rate, Some(config.rate));
//! ```

pub mod codec;
pub mod config;
pub mod distiller;
pub mod engine;
pub mod error;
pub mod generator;
pub mod lexicon;
pub mod pattern;

// Re-export main types for convenience
pub use config::{CeremonyConfig, PartialConfig};
pub use engine::{CeremonyEngine, TickResult};
pub use error::VeilError;
pub use generator::{DigitGenerator, VeilSource};
pub use lexicon::Lexicon;

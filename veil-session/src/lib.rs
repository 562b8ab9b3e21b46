//! # Veil Session
//!
//! **The clock and the memory around the ceremony core.**
//!
//! This crate runs `veil-core` ticks on a tokio timer, keeps the
//! configuration persisted, and exposes the optional presence counter.
//!
//! ## Features
//!
//! - **Scheduler**: Stopped/Running state machine; rate changes restart the timer
//! - **Single owner**: The session controller is the only writer of the config
//! - **Persistence**: JSON settings blob plus an always-current share link
//! - **Presence**: Pluggable `{count, connected}` feed, never read by the core
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use veil_session::{Action, SessionController, SettingsStore};
//! use veil_core::{CeremonyConfig, Lexicon};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (tx, mut pulses) = tokio::sync::mpsc::unbounded_channel();
//!     let mut session = SessionController::new(
//!         CeremonyConfig::default(),
//!         Lexicon::load("words.txt")?,
//!         SettingsStore::default_location()?,
//!         tx,
//!     );
//!
//!     session.apply(Action::AddPattern("42".into()))?;
//!     session.apply(Action::Start)?;
//!
//!     while let Some(pulse) = pulses.recv().await {
//!         if let Some(word) = session.handle_pulse(pulse).and_then(|o| o.word) {
//!             println!("{}", word);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod presence;
pub mod scheduler;
pub mod session;
pub mod store;

// Re-export main types
pub use error::SessionError;
pub use presence::{HeartbeatPresence, OfflinePresence, Presence, PresenceChannel};
pub use scheduler::{CeremonyScheduler, TickPulse};
pub use session::{resolve_config, Action, ConfigSource, SessionController, TickOutcome};
pub use store::{veil_home, SettingsStore};

//! The session controller.
//!
//! Owns the one mutable [`CeremonyConfig`] and every collaborator around it.
//! All mutations go through [`SessionController::apply`] or
//! [`SessionController::handle_pulse`]; after each one the configuration is
//! re-encoded into the share link and written to the settings store.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use veil_core::config::{clamp_channels, clamp_length, clamp_rate};
use veil_core::pattern::{sanitize_pattern, validate_pattern};
use veil_core::{codec, CeremonyConfig, CeremonyEngine, DigitGenerator, Lexicon, TickResult, VeilSource};

use crate::error::{Result, SessionError};
use crate::scheduler::{CeremonyScheduler, TickPulse};
use crate::store::SettingsStore;

/// A user control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetRate(u32),
    SetLength(usize),
    SetChannels(usize),
    AddPattern(String),
    RemovePattern(String),
    ClearLog,
    Start,
    Pause,
    Toggle,
}

/// What one accepted tick produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub result: TickResult,
    /// The uttered word, when the tick emitted and the index is in the lexicon.
    pub word: Option<String>,
}

/// Where the starting configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Link,
    Storage,
    Defaults,
}

/// Pick the starting configuration: link first, then storage, then defaults.
///
/// A link counts only if it carries at least one recognised field. The
/// chosen partial record is merged onto the defaults, so decoded garbage
/// never reaches the engine.
pub fn resolve_config(link: Option<&str>, store: &SettingsStore) -> (CeremonyConfig, ConfigSource) {
    let defaults = CeremonyConfig::default();

    if let Some(partial) = link.map(codec::decode).filter(|p| !p.is_empty()) {
        return (defaults.merged(partial), ConfigSource::Link);
    }
    if let Some(partial) = store.load().filter(|p| !p.is_empty()) {
        return (defaults.merged(partial), ConfigSource::Storage);
    }
    (defaults, ConfigSource::Defaults)
}

/// Foreground owner of a ceremony session.
#[derive(Debug)]
pub struct SessionController<S = DigitGenerator> {
    config: CeremonyConfig,
    lexicon: Lexicon,
    engine: CeremonyEngine<S>,
    scheduler: CeremonyScheduler,
    store: SettingsStore,
    last_veils: Vec<String>,
    link: String,
}

impl SessionController<DigitGenerator> {
    /// A session drawing veils from the thread-local RNG.
    pub fn new(
        config: CeremonyConfig,
        lexicon: Lexicon,
        store: SettingsStore,
        pulses: UnboundedSender<TickPulse>,
    ) -> Self {
        Self::with_source(config, lexicon, store, pulses, DigitGenerator::thread_local())
    }
}

impl<S: VeilSource> SessionController<S> {
    pub fn with_source(
        config: CeremonyConfig,
        lexicon: Lexicon,
        store: SettingsStore,
        pulses: UnboundedSender<TickPulse>,
        source: S,
    ) -> Self {
        let link = codec::encode(&config);
        Self {
            config,
            lexicon,
            engine: CeremonyEngine::new(source),
            scheduler: CeremonyScheduler::new(pulses),
            store,
            last_veils: Vec::new(),
            link,
        }
    }

    pub fn config(&self) -> &CeremonyConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Veils from the most recent accepted tick.
    pub fn last_veils(&self) -> &[String] {
        &self.last_veils
    }

    /// The current share link query string.
    pub fn share_link(&self) -> &str {
        &self.link
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// The log rendered as words.
    pub fn utterances(&self) -> Vec<String> {
        self.lexicon.render(&self.config.log)
    }

    /// Install a (late-loaded) lexicon. Ticks no-op until it is non-empty.
    pub fn set_lexicon(&mut self, lexicon: Lexicon) {
        info!("Lexicon ready: {} words", lexicon.len());
        self.lexicon = lexicon;
    }

    /// Apply a user control. Rejected input leaves the session untouched.
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SetRate(rate) => {
                self.config.rate = clamp_rate(rate);
                self.scheduler.reconfigure_rate(self.config.rate);
            }
            Action::SetLength(length) => {
                let length = clamp_length(length);
                self.config.length = length;
                let before = self.config.patterns.len();
                self.config.patterns.retain(|p| p.len() <= length);
                if self.config.patterns.len() < before {
                    info!(
                        "Aperture {} dropped {} pattern(s)",
                        length,
                        before - self.config.patterns.len()
                    );
                }
            }
            Action::SetChannels(channels) => {
                self.config.channels = clamp_channels(channels);
            }
            Action::AddPattern(raw) => {
                let pattern = validate_pattern(&raw, self.config.length)?;
                self.config.patterns.push(pattern);
            }
            Action::RemovePattern(raw) => {
                let pattern = sanitize_pattern(&raw);
                let idx = self
                    .config
                    .patterns
                    .iter()
                    .position(|p| *p == pattern)
                    .ok_or(SessionError::UnknownPattern(pattern))?;
                self.config.patterns.remove(idx);
            }
            Action::ClearLog => {
                self.config.log.clear();
            }
            Action::Start => {
                self.scheduler.start(self.config.rate);
                return Ok(());
            }
            Action::Pause => {
                self.scheduler.stop();
                return Ok(());
            }
            Action::Toggle => {
                if self.scheduler.is_running() {
                    self.scheduler.stop();
                } else {
                    self.scheduler.start(self.config.rate);
                }
                return Ok(());
            }
        }
        self.persist();
        Ok(())
    }

    /// Run one tick for a pulse, if the scheduler still vouches for it.
    pub fn handle_pulse(&mut self, pulse: TickPulse) -> Option<TickOutcome> {
        if !self.scheduler.accepts(&pulse) {
            debug!("Dropping stale pulse {:?}", pulse);
            return None;
        }
        Some(self.tick())
    }

    /// Run one tick now, regardless of the scheduler.
    pub fn tick(&mut self) -> TickOutcome {
        let result = self.engine.tick(&self.config, self.lexicon.len());
        self.last_veils.clone_from(&result.veils);

        let mut word = None;
        if let Some(index) = result.emitted {
            self.config.log.push(index);
            self.persist();
            word = self.lexicon.word(index as usize).map(str::to_string);
        }

        TickOutcome { result, word }
    }

    /// Stop ticking. Called when the host goes away; also runs on drop.
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }

    fn persist(&mut self) {
        self.link = codec::encode(&self.config);
        if let Err(e) = self.store.save(&self.config) {
            warn!("Settings not saved: {}", e);
        }
    }
}

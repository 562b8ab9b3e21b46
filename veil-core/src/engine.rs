//! One ceremony tick: generate, align, distill.

use tracing::{debug, trace};

use crate::config::CeremonyConfig;
use crate::distiller::distill;
use crate::generator::{DigitGenerator, VeilSource};
use crate::lexicon::MAX_LEXICON_SIZE;
use crate::pattern::all_aligned;

/// Outcome of a single tick.
///
/// `veils` are kept only for the diagnostic view and are empty when the
/// tick was skipped. `emitted` is the distilled lexicon index, present
/// only when every pattern occurred in every veil.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    pub veils: Vec<String>,
    pub emitted: Option<u16>,
}

impl TickResult {
    /// True when the tick did no generation (no patterns or no lexicon).
    pub fn is_skipped(&self) -> bool {
        self.veils.is_empty()
    }
}

/// Stateless tick executor over a [`VeilSource`].
///
/// The engine holds no configuration; every call receives the current
/// record, so the caller may change it freely between ticks.
///
/// # Example
///
/// ```rust
/// use veil_core::{CeremonyConfig, CeremonyEngine};
///
/// let mut engine = CeremonyEngine::random();
/// let config = CeremonyConfig {
///     patterns: vec!["0".into()],
///     ..Default::default()
/// };
/// let result = engine.tick(&config, 10_000);
/// assert_eq!(result.veils.len(), config.channels);
/// if let Some(index) = result.emitted {
///     assert!(index < 10_000);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CeremonyEngine<S = DigitGenerator> {
    source: S,
}

impl CeremonyEngine<DigitGenerator> {
    /// An engine drawing veils from the thread-local RNG.
    pub fn random() -> Self {
        Self::new(DigitGenerator::thread_local())
    }
}

impl Default for CeremonyEngine<DigitGenerator> {
    fn default() -> Self {
        Self::random()
    }
}

impl<S: VeilSource> CeremonyEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run one tick against `config` and a lexicon of `lexicon_size` words.
    ///
    /// Skips without generating anything when there are no patterns or the
    /// lexicon is empty. A `channels` value of zero is treated as one.
    /// Distillation always reads the first veil.
    pub fn tick(&mut self, config: &CeremonyConfig, lexicon_size: usize) -> TickResult {
        if lexicon_size == 0 || config.patterns.is_empty() {
            trace!("Tick skipped (lexicon={}, patterns={})", lexicon_size, config.patterns.len());
            return TickResult::default();
        }

        let channels = config.channels.max(1);
        let veils: Vec<String> = (0..channels)
            .map(|_| self.source.generate(config.length))
            .collect();

        if !all_aligned(&config.patterns, &veils) {
            return TickResult { veils, emitted: None };
        }

        let modulus = lexicon_size.min(MAX_LEXICON_SIZE) as u32;
        let emitted = distill(&veils[0], modulus).and_then(|index| u16::try_from(index).ok());
        debug!("Alignment across {} veils -> {:?}", channels, emitted);

        TickResult { veils, emitted }
    }

    /// Access the underlying veil source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

//! Random veil generation.
//!
//! A veil is a string of ASCII digits. Digits are harvested from the
//! fractional part of uniform `f64` draws until enough are available,
//! then truncated to the requested aperture.

use rand::rngs::ThreadRng;
use rand::Rng;

/// Decimal digits taken from one fractional draw.
const DIGITS_PER_DRAW: usize = 15;

/// `10^DIGITS_PER_DRAW`, the scale applied to a draw in `[0, 1)`.
const DRAW_SCALE: f64 = 1e15;

/// Anything that can produce veils for the engine.
///
/// The engine only needs "give me `length` digits"; tests plug in
/// scripted sources to drive exact scenarios.
pub trait VeilSource {
    /// Produce one veil of exactly `length` ASCII digits.
    fn generate(&mut self, length: usize) -> String;
}

/// Random digit generator backed by any [`rand::Rng`].
///
/// # Example
///
/// ```rust
/// use veil_core::{DigitGenerator, VeilSource};
///
/// let mut generator = DigitGenerator::thread_local();
/// let veil = generator.generate(12);
/// assert_eq!(veil.len(), 12);
/// assert!(veil.bytes().all(|b| b.is_ascii_digit()));
/// ```
#[derive(Debug, Clone)]
pub struct DigitGenerator<R = ThreadRng> {
    rng: R,
}

impl DigitGenerator<ThreadRng> {
    /// A generator over the thread-local RNG.
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl Default for DigitGenerator<ThreadRng> {
    fn default() -> Self {
        Self::thread_local()
    }
}

impl<R: Rng> DigitGenerator<R> {
    /// Wrap an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> VeilSource for DigitGenerator<R> {
    fn generate(&mut self, length: usize) -> String {
        let mut veil = String::with_capacity(length + DIGITS_PER_DRAW);
        while veil.len() < length {
            let draw: f64 = self.rng.gen();
            // Leading zeros are digits too; keep the width fixed.
            let digits = (draw * DRAW_SCALE) as u64;
            veil.push_str(&format!("{:0width$}", digits, width = DIGITS_PER_DRAW));
        }
        veil.truncate(length);
        veil
    }
}

/// Generate one veil from the thread-local RNG.
pub fn generate(length: usize) -> String {
    DigitGenerator::thread_local().generate(length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_length() {
        for length in [1, 6, 14, 15, 16, 30, 31, 100] {
            let veil = generate(length);
            assert_eq!(veil.len(), length);
            assert!(veil.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert!(generate(0).is_empty());
    }

    #[test]
    fn test_custom_rng() {
        let mut generator = DigitGenerator::new(StdRng::seed_from_u64(7));
        let veil = generator.generate(30);
        assert_eq!(veil.len(), 30);
    }

    #[test]
    fn test_all_digits_appear() {
        let mut generator = DigitGenerator::new(StdRng::seed_from_u64(42));
        let joined: String = (0..50).map(|_| generator.generate(30)).collect();
        for digit in '0'..='9' {
            assert!(joined.contains(digit), "digit {} never drawn", digit);
        }
    }
}

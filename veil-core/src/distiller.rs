//! Distillation: veil to lexicon index.

/// Number of trailing digits read from a veil.
pub const DISTILL_DIGITS: usize = 6;

/// Map the trailing six digits of `veil` into `[0, modulus)`.
///
/// Returns `None` for a veil shorter than six characters, trailing
/// characters that are not ASCII digits, or a zero modulus. Apertures are
/// clamped to at least six upstream, so the engine never sees those cases.
///
/// # Example
///
/// ```rust
/// use veil_core::distiller::distill;
///
/// assert_eq!(distill("1234528999", 10_000), Some(8999));
/// assert_eq!(distill("12345", 10_000), None);
/// ```
pub fn distill(veil: &str, modulus: u32) -> Option<u32> {
    if modulus == 0 || veil.len() < DISTILL_DIGITS {
        return None;
    }
    let tail = veil.get(veil.len() - DISTILL_DIGITS..)?;
    if !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u32 = tail.parse().ok()?;
    Some(value % modulus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_six_digits() {
        assert_eq!(distill("1234528999", 10_000), Some(8999));
        assert_eq!(distill("000000", 10_000), Some(0));
        assert_eq!(distill("999999", 10_000), Some(9999));
    }

    #[test]
    fn test_leading_zeros_in_tail() {
        assert_eq!(distill("99000042", 10_000), Some(42));
    }

    #[test]
    fn test_modulus_one() {
        assert_eq!(distill("123456", 1), Some(0));
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert_eq!(distill("12345", 10), None);
        assert_eq!(distill("123456", 0), None);
        assert_eq!(distill("12345a", 10), None);
        assert_eq!(distill("+12345", 10), None);
    }
}

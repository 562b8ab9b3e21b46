//! Property tests for the pure ceremony functions.

use proptest::prelude::*;

use veil_core::codec;
use veil_core::distiller::distill;
use veil_core::generator::generate;
use veil_core::pattern::all_aligned;
use veil_core::CeremonyConfig;

fn digits(min: usize, max: usize) -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[0-9]{{{},{}}}", min, max)).unwrap()
}

fn config_strategy() -> impl Strategy<Value = CeremonyConfig> {
    (1u32..=30, 6usize..=30, 1usize..=30)
        .prop_flat_map(|(rate, length, channels)| {
            (
                Just(rate),
                Just(length),
                Just(channels),
                prop::collection::vec(digits(1, length), 0..6),
                prop::collection::vec(0u16..10_000, 0..64),
            )
        })
        .prop_map(|(rate, length, channels, patterns, log)| CeremonyConfig {
            rate,
            length,
            channels,
            patterns,
            log,
        })
}

proptest! {
    #[test]
    fn generated_veils_have_exact_length(length in 1usize..200) {
        let veil = generate(length);
        prop_assert_eq!(veil.len(), length);
        prop_assert!(veil.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn alignment_is_substring_containment(
        patterns in prop::collection::vec(digits(1, 4), 1..4),
        veils in prop::collection::vec(digits(6, 20), 1..4),
    ) {
        let expected = patterns.iter().all(|p| veils.iter().all(|v| v.contains(p.as_str())));
        prop_assert_eq!(all_aligned(&patterns, &veils), expected);
    }

    #[test]
    fn embedded_patterns_always_align(prefix in digits(0, 5), pattern in digits(1, 6), suffix in digits(0, 5)) {
        let veil = format!("{}{}{}", prefix, pattern, suffix);
        prop_assert!(all_aligned(&[pattern.as_str()], &[veil.as_str()]));
    }

    #[test]
    fn distill_stays_in_range(veil in digits(6, 30), modulus in 1u32..100_000) {
        let index = distill(&veil, modulus).unwrap();
        prop_assert!(index < modulus);
        // only the trailing six digits matter
        let tail = &veil[veil.len() - 6..];
        prop_assert_eq!(distill(&format!("1{}", tail), modulus), Some(index));
    }

    #[test]
    fn codec_round_trips(config in config_strategy()) {
        let encoded = codec::encode(&config);
        let partial = codec::decode(&encoded);
        prop_assert_eq!(partial.rate, Some(config.rate));
        prop_assert_eq!(partial.length, Some(config.length));
        prop_assert_eq!(partial.channels, Some(config.channels));
        prop_assert_eq!(partial.patterns.unwrap_or_default(), config.patterns.clone());
        prop_assert_eq!(partial.log.unwrap_or_default(), config.log.clone());
    }

    #[test]
    fn codec_reencodes_identically(config in config_strategy()) {
        let first = codec::encode(&config);
        let again = codec::encode(&CeremonyConfig::default().merged(codec::decode(&first)));
        prop_assert_eq!(first, again);
    }

    #[test]
    fn log_field_is_url_safe(log in prop::collection::vec(any::<u16>(), 0..64)) {
        let encoded = codec::encode_log(&log);
        prop_assert!(!encoded.contains('+'));
        prop_assert!(!encoded.contains('/'));
        prop_assert!(!encoded.contains('='));
        prop_assert_eq!(codec::decode_log(&encoded), log);
    }

    #[test]
    fn decode_never_panics(input in ".{0,120}") {
        let _ = codec::decode(&input);
        let _ = codec::decode_log(&input);
    }
}

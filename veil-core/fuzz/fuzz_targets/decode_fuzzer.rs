#![no_main]
use libfuzzer_sys::fuzz_target;
use veil_core::codec;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decoding must never panic, whatever the query looks like
        let partial = codec::decode(s);
        let _ = codec::decode_log(s);

        // Whatever survived decoding must re-encode cleanly
        let config = veil_core::CeremonyConfig::default().merged(partial);
        let _ = codec::decode(&codec::encode(&config));
    }
});

#![no_main]
use bootstring::io::{decode_str, encode_str};
use bootstring::Config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Basic-only text encodes to itself and is not expected to round-trip.
    if !text.is_empty() && text.is_ascii() {
        return;
    }

    let cfg = Config::punycode();
    let encoded = encode_str(&cfg, text).unwrap();
    assert!(encoded.is_ascii());
    let decoded = decode_str(&cfg, &encoded).unwrap();
    assert_eq!(decoded, text);
});

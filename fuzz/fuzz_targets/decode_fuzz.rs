#![no_main]
use bootstring::{CodePoint, Config, decode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The decoder must never panic, only return errors.
    let cfg = Config::punycode();
    if let Ok(text) = std::str::from_utf8(data) {
        let input: Vec<CodePoint> = text.chars().map(CodePoint::from).collect();
        let _ = decode(&cfg, &input);
    }

    // Also feed raw 32-bit values, including non-scalar ones.
    let words: Vec<CodePoint> = data
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let _ = decode(&cfg, &words);
});

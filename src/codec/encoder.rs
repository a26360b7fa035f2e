// Bootstring encoder (RFC 3492, section 6.3).
//
// State progression: copy basic code points, emit the delimiter, then for
// each extended code point in ascending order (ties by position) emit one
// digit group counting the insertion slots skipped since the previous one.

use crate::CodePoint;
use crate::buffer::CodePointBuf;
use crate::config::Config;
use crate::error::{BootstringError, Result};

use super::bias::adapt;
use super::digits::{checked_add, checked_mul, encode_digits};

/// Encode `input` with the given scheme.
///
/// Input made only of basic code points comes back unchanged, without a
/// delimiter. Every extended code point must be at least `initial_n`.
pub fn encode(config: &Config, input: &[CodePoint]) -> Result<Vec<CodePoint>> {
    config.validate()?;

    let initial_n = config.initial_n;
    if let Some(pos) = input
        .iter()
        .position(|&c| !config.is_basic(c) && c < initial_n)
    {
        return Err(BootstringError::input(format!(
            "U+{:04X} at position {pos} is neither basic nor at least U+{initial_n:04X}",
            input[pos]
        )));
    }

    let mut out = CodePointBuf::with_capacity(input.len())?;

    for &c in input.iter().filter(|&&c| config.is_basic(c)) {
        out.push(c)?;
    }
    let basic_len = out.len();

    if basic_len == input.len() {
        log::debug!("encode: {basic_len} basic code points, nothing to extend");
        return Ok(out.into_vec());
    }
    if basic_len > 0 {
        out.append(&config.delimiter)?;
    }

    let mut n = initial_n as usize;
    let mut bias = config.initial_bias;
    let mut delta = 0usize;
    let mut processed = basic_len;

    while processed < input.len() {
        // Smallest extended code point not yet handled; one exists because
        // `processed` counts exactly the code points below `n` plus the basics.
        let Some(m) = input
            .iter()
            .map(|&c| c as usize)
            .filter(|&c| c >= n && !config.is_basic(c as CodePoint))
            .min()
        else {
            break;
        };

        delta = checked_add(delta, checked_mul(m - n, processed + 1)?)?;
        n = m;

        for &c in input {
            let extended = !config.is_basic(c);
            if (c as usize) < n || !extended {
                delta = checked_add(delta, 1)?;
            } else if c as usize == n {
                let written = encode_digits(config, delta, bias, &mut out)?;
                log::trace!(
                    "encode: U+{n:04X} delta {delta} bias {bias} -> {written} digits"
                );
                bias = adapt(config, delta, processed + 1, processed == basic_len);
                delta = 0;
                processed += 1;
            }
        }

        delta = checked_add(delta, 1)?;
        n += 1;
    }

    log::debug!(
        "encode: {} code points ({basic_len} basic) -> {} code points",
        input.len(),
        out.len()
    );
    Ok(out.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Below;
    use std::sync::Arc;

    fn cps(s: &str) -> Vec<CodePoint> {
        s.chars().map(CodePoint::from).collect()
    }

    fn puny(s: &str) -> String {
        encode(&Config::punycode(), &cps(s))
            .unwrap()
            .into_iter()
            .map(|c| char::from_u32(c).unwrap())
            .collect()
    }

    #[test]
    fn empty_input() {
        assert!(encode(&Config::punycode(), &[]).unwrap().is_empty());
    }

    #[test]
    fn basic_only_is_identity() {
        assert_eq!(puny("example"), "example");
        assert_eq!(puny("a-b"), "a-b");
    }

    #[test]
    fn single_extended_code_point() {
        assert_eq!(puny("ü"), "tda");
    }

    #[test]
    fn mixed_input() {
        assert_eq!(puny("bücher"), "bcher-kva");
        assert_eq!(puny("münchen"), "mnchen-3ya");
        assert_eq!(puny("a-bü"), "a-b-joa");
    }

    #[test]
    fn repeated_extended_code_points() {
        assert_eq!(puny("abüücd"), "abcd-1raa");
    }

    #[test]
    fn no_basic_prefix_means_no_delimiter() {
        assert_eq!(puny("點心"), "15tr81l");
        assert_eq!(puny("🌍"), "tg8h");
    }

    #[test]
    fn extended_below_initial_n_is_rejected() {
        let mut cfg = Config::punycode();
        cfg.basic = Arc::new(Below(0x41));
        // 'a' is neither basic (>= 0x41) nor >= initial_n (0x80).
        assert!(matches!(
            encode(&cfg, &cps("a")),
            Err(BootstringError::InvalidInput(_))
        ));
    }

    #[test]
    fn invalid_config_fails_before_output() {
        let mut cfg = Config::punycode();
        cfg.damp = 0;
        assert!(matches!(
            encode(&cfg, &cps("ü")),
            Err(BootstringError::InvalidConfig(_))
        ));
    }

    #[test]
    fn basic_code_points_above_initial_n_are_not_extended() {
        let mut cfg = Config::punycode();
        // Treat Latin-1 as basic too; only code points from U+0100 are extended.
        cfg.basic = Arc::new(Below(0x100));
        let out = encode(&cfg, &cps("üĀ")).unwrap();
        assert_eq!(&out[..2], &cps("ü-")[..]);
        assert!(out.len() > 2);
    }
}

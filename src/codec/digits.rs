// Generalized variable-length integers (RFC 3492, section 3.3).
//
// Little-endian mixed radix: the digit at offset k (k = base, 2*base, ...)
// has radix `base - t(k)` where `t(k)` is the bias-dependent threshold.
// A digit below its threshold terminates the group.
//
// Accumulators are `usize` but never exceed `MAX_VALUE` (isize::MAX), the
// platform's signed size limit.

use crate::CodePoint;
use crate::buffer::CodePointBuf;
use crate::config::Config;
use crate::error::{BootstringError, Result};

use super::bias::threshold;

/// Largest value any accumulator may hold.
pub const MAX_VALUE: usize = isize::MAX as usize;

// ---------------------------------------------------------------------------
// Checked arithmetic
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn checked_add(a: usize, b: usize) -> Result<usize> {
    a.checked_add(b)
        .filter(|&v| v <= MAX_VALUE)
        .ok_or(BootstringError::Overflow)
}

#[inline]
pub(crate) fn checked_mul(a: usize, b: usize) -> Result<usize> {
    a.checked_mul(b)
        .filter(|&v| v <= MAX_VALUE)
        .ok_or(BootstringError::Overflow)
}

fn no_room(t: usize, base: usize) -> BootstringError {
    BootstringError::config(format!(
        "threshold {t} leaves no digits in base {base}"
    ))
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Append the digit group for `value` to `out`.
/// Returns the number of symbols written (at least 1).
pub fn encode_digits(
    config: &Config,
    mut value: usize,
    bias: usize,
    out: &mut CodePointBuf,
) -> Result<usize> {
    let base = config.base();
    let mut offset = base;
    let mut written = 0;

    loop {
        let t = threshold(config, offset, bias);
        if value < t {
            break;
        }
        if t >= base {
            return Err(no_room(t, base));
        }
        let digit = t + (value - t) % (base - t);
        value = (value - t) / (base - t);
        out.push(config.alphabet[digit])?;
        written += 1;
        offset = offset.saturating_add(base);
    }

    // Only reachable out of range when tmax >= base on an unvalidated config.
    let last = config
        .alphabet
        .get(value)
        .copied()
        .ok_or_else(|| no_room(value, base))?;
    out.push(last)?;
    Ok(written + 1)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode one digit group from `input` starting at `pos`.
///
/// The group's value is added onto `seed` (the decoder's running insertion
/// state). Returns `(seed + value, position after the group)`.
pub fn decode_digits(
    config: &Config,
    input: &[CodePoint],
    mut pos: usize,
    bias: usize,
    seed: usize,
) -> Result<(usize, usize)> {
    let base = config.base();
    let mut state = seed;
    let mut weight = 1usize;
    let mut offset = base;

    loop {
        let Some(&symbol) = input.get(pos) else {
            return Err(BootstringError::input(format!(
                "digit group truncated at position {pos}"
            )));
        };
        let digit = config.digit_value(symbol).ok_or_else(|| {
            BootstringError::input(format!(
                "U+{symbol:04X} at position {pos} is not a digit symbol"
            ))
        })?;
        pos += 1;

        state = checked_add(state, checked_mul(digit, weight)?)?;

        let t = threshold(config, offset, bias);
        if digit < t {
            break;
        }
        weight = checked_mul(weight, base - t)?;
        offset = offset.saturating_add(base);
    }

    Ok((state, pos))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PUNYCODE_INITIAL_BIAS;

    fn cps(s: &str) -> Vec<CodePoint> {
        s.chars().map(CodePoint::from).collect()
    }

    fn encode_to_string(cfg: &Config, value: usize, bias: usize) -> String {
        let mut out = CodePointBuf::new();
        let written = encode_digits(cfg, value, bias, &mut out).unwrap();
        assert_eq!(written, out.len());
        out.as_slice()
            .iter()
            .map(|&c| char::from_u32(c).unwrap())
            .collect()
    }

    #[test]
    fn small_values_are_single_digits() {
        let cfg = Config::punycode();
        // With bias 0 the first threshold is tmax, so 0..26 fit in one digit.
        for value in 0..cfg.tmax {
            let s = encode_to_string(&cfg, value, 0);
            assert_eq!(s.chars().count(), 1, "value {value}");
        }
        assert_eq!(encode_to_string(&cfg, 0, 0), "a");
        assert_eq!(encode_to_string(&cfg, 25, 0), "z");
        assert_eq!(encode_to_string(&cfg, 26, 0).chars().count(), 2);
    }

    #[test]
    fn encodes_u_umlaut_delta() {
        // U+00FC alone: delta (0xFC - 0x80) * 1 = 124 at the initial bias.
        let cfg = Config::punycode();
        assert_eq!(encode_to_string(&cfg, 124, PUNYCODE_INITIAL_BIAS), "tda");
    }

    #[test]
    fn decodes_u_umlaut_delta() {
        let cfg = Config::punycode();
        let input = cps("tda");
        assert_eq!(
            decode_digits(&cfg, &input, 0, PUNYCODE_INITIAL_BIAS, 0).unwrap(),
            (124, 3)
        );
    }

    #[test]
    fn decode_stops_at_terminal_digit() {
        let cfg = Config::punycode();
        let input = cps("xxtdaqq");
        let (value, pos) = decode_digits(&cfg, &input, 2, PUNYCODE_INITIAL_BIAS, 0).unwrap();
        assert_eq!(value, 124);
        assert_eq!(pos, 5);
    }

    #[test]
    fn decode_adds_onto_seed() {
        let cfg = Config::punycode();
        let input = cps("tda");
        let (value, _) = decode_digits(&cfg, &input, 0, PUNYCODE_INITIAL_BIAS, 7).unwrap();
        assert_eq!(value, 131);
    }

    #[test]
    fn roundtrip_across_biases() {
        let cfg = Config::punycode();
        let values = [0usize, 1, 25, 26, 35, 36, 124, 745, 1_000, 65_535, 1 << 20, 1 << 40];
        for &bias in &[0usize, 1, 36, 72, 200] {
            for &value in &values {
                let mut out = CodePointBuf::new();
                let n = encode_digits(&cfg, value, bias, &mut out).unwrap();
                let (decoded, pos) = decode_digits(&cfg, out.as_slice(), 0, bias, 0).unwrap();
                assert_eq!(decoded, value, "value {value} bias {bias}");
                assert_eq!(pos, n);
            }
        }
    }

    #[test]
    fn truncated_group_is_invalid_input() {
        let cfg = Config::punycode();
        // '9' is digit 35, above every threshold, so the group never ends.
        let input = cps("99");
        assert!(matches!(
            decode_digits(&cfg, &input, 0, 0, 0),
            Err(BootstringError::InvalidInput(_))
        ));
        assert!(matches!(
            decode_digits(&cfg, &[], 0, 0, 0),
            Err(BootstringError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_symbol_is_invalid_input() {
        let cfg = Config::punycode();
        let input = cps("t!a");
        assert!(matches!(
            decode_digits(&cfg, &input, 0, PUNYCODE_INITIAL_BIAS, 0),
            Err(BootstringError::InvalidInput(_))
        ));
    }

    #[test]
    fn long_group_overflows() {
        let cfg = Config::punycode();
        let input = cps(&"9".repeat(40));
        assert_eq!(
            decode_digits(&cfg, &input, 0, 0, 0),
            Err(BootstringError::Overflow)
        );
    }

    #[test]
    fn seed_near_limit_overflows() {
        let cfg = Config::punycode();
        let input = cps("b");
        assert_eq!(
            decode_digits(&cfg, &input, 0, 0, MAX_VALUE),
            Err(BootstringError::Overflow)
        );
    }

    #[test]
    fn threshold_at_base_is_invalid_config() {
        let mut cfg = Config::punycode();
        cfg.tmax = cfg.base();
        let mut out = CodePointBuf::new();
        assert!(matches!(
            encode_digits(&cfg, 100, 0, &mut out),
            Err(BootstringError::InvalidConfig(_))
        ));
    }

    #[test]
    fn checked_helpers_cap_at_signed_max() {
        assert_eq!(checked_add(MAX_VALUE - 1, 1), Ok(MAX_VALUE));
        assert_eq!(checked_add(MAX_VALUE, 1), Err(BootstringError::Overflow));
        assert_eq!(checked_mul(MAX_VALUE / 2, 2), Ok(MAX_VALUE - 1));
        assert_eq!(checked_mul(MAX_VALUE, 2), Err(BootstringError::Overflow));
    }
}

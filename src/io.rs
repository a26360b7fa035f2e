// Text and file glue around the code-point core.
//
// The codec only sees `&[CodePoint]`. These helpers convert to and from
// UTF-8 strings, read input from a file or stdin, and cut input at the
// first newline the way the CLI expects.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::CodePoint;
use crate::codec;
use crate::config::Config;
use crate::error::{BootstringError, Result};

/// Code points of a string, in order.
pub fn to_code_points(s: &str) -> Vec<CodePoint> {
    s.chars().map(CodePoint::from).collect()
}

/// Assemble a string; fails on surrogates and values above U+10FFFF.
pub fn from_code_points(cps: &[CodePoint]) -> Result<String> {
    cps.iter()
        .map(|&cp| char::from_u32(cp).ok_or(BootstringError::InvalidCodePoint(cp)))
        .collect()
}

/// Encode a string with `config`.
pub fn encode_str(config: &Config, s: &str) -> Result<String> {
    from_code_points(&codec::encode(config, &to_code_points(s))?)
}

/// Decode a string with `config`.
pub fn decode_str(config: &Config, s: &str) -> Result<String> {
    from_code_points(&codec::decode(config, &to_code_points(s))?)
}

/// Everything before the first `\n`, without a trailing `\r`.
pub fn first_line(s: &str) -> &str {
    let line = s.split('\n').next().unwrap_or_default();
    line.strip_suffix('\r').unwrap_or(line)
}

/// Read all of `path`, or stdin when `path` is `None`, as UTF-8.
pub fn read_input(path: Option<&Path>) -> io::Result<String> {
    let bytes = match path {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn string_roundtrip() {
        let cfg = Config::punycode();
        assert_eq!(encode_str(&cfg, "münchen").unwrap(), "mnchen-3ya");
        assert_eq!(decode_str(&cfg, "mnchen-3ya").unwrap(), "münchen");
        assert_eq!(encode_str(&cfg, "").unwrap(), "");
    }

    #[test]
    fn surrogates_cannot_become_text() {
        assert_eq!(
            from_code_points(&[0x61, 0xD800]),
            Err(BootstringError::InvalidCodePoint(0xD800))
        );
        assert_eq!(
            from_code_points(&[0x11_0000]),
            Err(BootstringError::InvalidCodePoint(0x11_0000))
        );
    }

    #[test]
    fn decoding_to_a_surrogate_is_reported() {
        let cfg = Config::punycode();
        // Skip ahead from U+0080 straight to U+D800.
        let mut group = crate::CodePointBuf::new();
        codec::encode_digits(&cfg, 0xD800 - 0x80, cfg.initial_bias, &mut group).unwrap();
        let text = from_code_points(group.as_slice()).unwrap();
        assert_eq!(
            decode_str(&cfg, &text),
            Err(BootstringError::InvalidCodePoint(0xD800))
        );
    }

    #[test]
    fn first_line_cuts_at_newline() {
        assert_eq!(first_line("bücher\nrest"), "bücher");
        assert_eq!(first_line("bücher\r\n"), "bücher");
        assert_eq!(first_line("no newline"), "no newline");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("ü\n".as_bytes()).unwrap();
        assert_eq!(read_input(Some(file.path())).unwrap(), "ü\n");
    }

    #[test]
    fn read_input_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE]).unwrap();
        let err = read_input(Some(file.path())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}

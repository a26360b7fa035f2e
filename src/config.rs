// Bootstring parameter sets.
//
// A `Config` is plain data plus a `BasicSet` capability deciding which code
// points are copied verbatim. It is validated once at the start of every
// encode/decode call and never mutated by the codec.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::CodePoint;
use crate::error::{BootstringError, Result};

/// Punycode digit alphabet: `a`-`z` are 0-25, `0`-`9` are 26-35.
pub const PUNYCODE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Separator between the basic prefix and the encoded suffix.
pub const PUNYCODE_DELIMITER: &str = "-";

pub const PUNYCODE_TMIN: usize = 1;
pub const PUNYCODE_TMAX: usize = 26;
pub const PUNYCODE_SKEW: usize = 38;
pub const PUNYCODE_DAMP: usize = 700;
pub const PUNYCODE_INITIAL_BIAS: usize = 72;

/// First code point outside the ASCII basic set.
pub const PUNYCODE_INITIAL_N: CodePoint = 0x80;

/// Largest alphabet a scheme may use. Keeps every product in `adapt` well
/// inside 32 bits.
pub const MAX_BASE: usize = 1 << 10;

// ---------------------------------------------------------------------------
// Basic code point classification
// ---------------------------------------------------------------------------

/// Decides whether a code point is "basic" (passed through unchanged).
pub trait BasicSet: Send + Sync {
    fn is_basic(&self, cp: CodePoint) -> bool;
}

/// Code points below 0x80.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ascii;

impl BasicSet for Ascii {
    #[inline]
    fn is_basic(&self, cp: CodePoint) -> bool {
        cp < 0x80
    }
}

/// Code points strictly below the given limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Below(pub CodePoint);

impl BasicSet for Below {
    #[inline]
    fn is_basic(&self, cp: CodePoint) -> bool {
        cp < self.0
    }
}

impl<F> BasicSet for F
where
    F: Fn(CodePoint) -> bool + Send + Sync,
{
    #[inline]
    fn is_basic(&self, cp: CodePoint) -> bool {
        self(cp)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Complete parameter set for one Bootstring scheme.
///
/// Field names follow RFC 3492 section 5. `alphabet[i]` is the symbol for
/// digit value `i`, so `alphabet.len()` is the base.
#[derive(Clone)]
pub struct Config {
    /// Digit symbols, distinct, at least one.
    pub alphabet: Vec<CodePoint>,
    /// Basic code point classifier.
    pub basic: Arc<dyn BasicSet>,
    /// Non-empty separator emitted after the basic prefix.
    pub delimiter: Vec<CodePoint>,
    /// Lower bound on per-digit thresholds, `0 < tmin`.
    pub tmin: usize,
    /// Upper bound on per-digit thresholds, `tmin <= tmax < base`.
    pub tmax: usize,
    /// Bias decay skew, must be positive.
    pub skew: usize,
    /// Damping applied to the first delta, must be positive.
    pub damp: usize,
    pub initial_bias: usize,
    /// Lowest code point the extend loop considers.
    pub initial_n: CodePoint,
}

impl Config {
    /// The RFC 3492 Punycode scheme.
    pub fn punycode() -> Self {
        Self {
            alphabet: PUNYCODE_ALPHABET.chars().map(CodePoint::from).collect(),
            basic: Arc::new(Ascii),
            delimiter: PUNYCODE_DELIMITER.chars().map(CodePoint::from).collect(),
            tmin: PUNYCODE_TMIN,
            tmax: PUNYCODE_TMAX,
            skew: PUNYCODE_SKEW,
            damp: PUNYCODE_DAMP,
            initial_bias: PUNYCODE_INITIAL_BIAS,
            initial_n: PUNYCODE_INITIAL_N,
        }
    }

    /// Number of digit symbols.
    #[inline]
    pub fn base(&self) -> usize {
        self.alphabet.len()
    }

    #[inline]
    pub fn is_basic(&self, cp: CodePoint) -> bool {
        self.basic.is_basic(cp)
    }

    /// Digit value of `symbol`, if it belongs to the alphabet.
    #[inline]
    pub fn digit_value(&self, symbol: CodePoint) -> Option<usize> {
        self.alphabet.iter().position(|&s| s == symbol)
    }

    /// Check every structural bound. Runs at the start of encode and decode.
    pub fn validate(&self) -> Result<()> {
        let base = self.base();
        if base == 0 {
            return Err(BootstringError::config("alphabet is empty"));
        }
        if base > MAX_BASE {
            return Err(BootstringError::config(format!(
                "alphabet has {base} symbols, at most {MAX_BASE} are supported"
            )));
        }
        if self.tmin == 0 || self.tmin >= base {
            return Err(BootstringError::config(format!(
                "tmin {} must satisfy 0 < tmin < base ({base})",
                self.tmin
            )));
        }
        // adapt() divides by base - tmin until the delta shrinks.
        if base - self.tmin < 2 {
            return Err(BootstringError::config(format!(
                "tmin {} leaves base - tmin below 2 (base {base})",
                self.tmin
            )));
        }
        if self.tmax < self.tmin {
            return Err(BootstringError::config(format!(
                "tmax {} is below tmin {}",
                self.tmax, self.tmin
            )));
        }
        if self.tmax >= base {
            return Err(BootstringError::config(format!(
                "tmax {} must be below base ({base})",
                self.tmax
            )));
        }
        if self.delimiter.is_empty() {
            return Err(BootstringError::config("delimiter is empty"));
        }
        if self.damp == 0 {
            return Err(BootstringError::config("damp must be non-zero"));
        }
        if self.skew == 0 {
            return Err(BootstringError::config("skew must be non-zero"));
        }
        let mut seen = HashSet::with_capacity(base);
        for sym in &self.alphabet {
            if !seen.insert(*sym) {
                return Err(BootstringError::config(format!(
                    "alphabet repeats symbol U+{sym:04X}"
                )));
            }
            if self.delimiter.contains(sym) {
                return Err(BootstringError::config(format!(
                    "delimiter shares symbol U+{sym:04X} with the alphabet"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::punycode()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("alphabet", &self.alphabet)
            .field("delimiter", &self.delimiter)
            .field("tmin", &self.tmin)
            .field("tmax", &self.tmax)
            .field("skew", &self.skew)
            .field("damp", &self.damp)
            .field("initial_bias", &self.initial_bias)
            .field("initial_n", &self.initial_n)
            .finish_non_exhaustive()
    }
}

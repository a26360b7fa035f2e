// Bootstring decoder (RFC 3492, section 6.2).
//
// The basic prefix ends at the last delimiter. Each digit group after it is
// added onto the running insertion state `i`, which splits into a code point
// increment (`i / (len + 1)`) and an insertion position (`i % (len + 1)`).
//
// `Decoder` exposes the extend loop one insertion at a time; `decode` drives
// it to completion.

use crate::CodePoint;
use crate::buffer::CodePointBuf;
use crate::config::Config;
use crate::error::{BootstringError, Result};

use super::bias::adapt;
use super::digits::{checked_add, decode_digits};

/// One extended code point placed into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub code_point: CodePoint,
    /// Index in the output at the time of insertion.
    pub position: usize,
}

/// Step-wise decoder over one encoded input.
#[derive(Debug)]
pub struct Decoder<'a> {
    config: &'a Config,
    input: &'a [CodePoint],
    cursor: usize,
    out: CodePointBuf,
    n: usize,
    bias: usize,
    state: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    /// Validate the scheme, split off the basic prefix and copy it to the
    /// output.
    pub fn new(config: &'a Config, input: &'a [CodePoint]) -> Result<Self> {
        config.validate()?;

        let delimiter = config.delimiter.as_slice();
        let (basic_len, cursor) = match input
            .windows(delimiter.len())
            .rposition(|w| w == delimiter)
        {
            Some(0) | None => (0, 0),
            Some(pos) => (pos, pos + delimiter.len()),
        };

        let prefix = &input[..basic_len];
        if let Some(bad) = prefix.iter().position(|&c| !config.is_basic(c)) {
            return Err(BootstringError::input(format!(
                "non-basic U+{:04X} at position {bad} before the delimiter",
                prefix[bad]
            )));
        }

        let mut out = CodePointBuf::with_capacity(input.len())?;
        out.append(prefix)?;

        Ok(Self {
            config,
            input,
            cursor,
            out,
            n: config.initial_n as usize,
            bias: config.initial_bias,
            state: 0,
            failed: false,
        })
    }

    /// Output decoded so far.
    pub fn output(&self) -> &[CodePoint] {
        self.out.as_slice()
    }

    /// Decode the next digit group and insert its code point.
    /// Returns `Ok(None)` once the input is exhausted.
    pub fn next_insertion(&mut self) -> Result<Option<Insertion>> {
        if self.cursor >= self.input.len() {
            return Ok(None);
        }

        let (state, cursor) = decode_digits(
            self.config,
            self.input,
            self.cursor,
            self.bias,
            self.state,
        )?;
        let consumed = cursor - self.cursor;
        self.cursor = cursor;

        let slots = self.out.len() + 1;
        self.bias = adapt(self.config, state - self.state, slots, self.state == 0);
        self.n = checked_add(self.n, state / slots)?;
        let position = state % slots;

        let code_point = CodePoint::try_from(self.n).map_err(|_| BootstringError::Overflow)?;
        if self.config.is_basic(code_point) {
            return Err(BootstringError::input(format!(
                "digit group decodes to basic U+{code_point:04X}"
            )));
        }

        self.out.insert_at(position, code_point)?;
        self.state = position + 1;

        log::trace!(
            "decode: U+{code_point:04X} at {position} from {consumed} digits, bias {}",
            self.bias
        );
        Ok(Some(Insertion {
            code_point,
            position,
        }))
    }

    /// Decode whatever is left and return the full output.
    pub fn finish(mut self) -> Result<Vec<CodePoint>> {
        while self.next_insertion()?.is_some() {}
        Ok(self.out.into_vec())
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Insertion>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_insertion() {
            Ok(step) => step.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode `input` with the given scheme.
pub fn decode(config: &Config, input: &[CodePoint]) -> Result<Vec<CodePoint>> {
    let out = Decoder::new(config, input)?.finish()?;
    log::debug!(
        "decode: {} code points -> {} code points",
        input.len(),
        out.len()
    );
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

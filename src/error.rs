// Error type shared by every transcoding operation.
//
// All kinds are terminal for the call that raised them: nothing is retried
// internally. The CLI maps each kind to its own exit status.

use thiserror::Error;

use crate::CodePoint;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BootstringError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootstringError {
    /// A structural parameter of the [`Config`](crate::Config) is out of bounds.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The input violates structural expectations (malformed basic prefix,
    /// unknown or missing digit symbol, unrepresentable code point).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An intermediate value would exceed the platform's signed size limit,
    /// or a decoded code point would not fit in 32 bits.
    #[error("integer overflow")]
    Overflow,

    /// The output buffer could not grow to the requested capacity.
    #[error("out of memory: cannot reserve {requested} code points")]
    OutOfMemory { requested: usize },

    /// A code point is not a Unicode scalar value and cannot become text.
    #[error("invalid code point U+{0:04X}")]
    InvalidCodePoint(CodePoint),
}

impl BootstringError {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidConfig(_) => 2,
            Self::InvalidInput(_) => 3,
            Self::Overflow => 4,
            Self::OutOfMemory { .. } => 5,
            Self::InvalidCodePoint(_) => 6,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

//! Bootstring: a generalized RFC 3492 transcoder.
//!
//! Bootstring maps a sequence of code points to a restricted alphabet and
//! back, parameterized by a [`Config`]. [`Config::punycode`] is the scheme
//! used for internationalized domain name labels.
//!
//! The crate provides:
//! - The transcoding core (`codec`): digit groups, bias adaptation, encoder
//!   and decoder
//! - Scheme parameters and validation (`config`)
//! - Batch helpers, optionally parallel (`batch`)
//! - Text glue between `str` and code points (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use bootstring::Config;
//! use bootstring::io::{decode_str, encode_str};
//!
//! let punycode = Config::punycode();
//! let encoded = encode_str(&punycode, "bücher").unwrap();
//! assert_eq!(encoded, "bcher-kva");
//! assert_eq!(decode_str(&punycode, &encoded).unwrap(), "bücher");
//! ```

pub mod batch;
pub mod buffer;
pub mod codec;
pub mod config;
pub mod error;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

/// A Unicode scalar value, or any ordinal in a custom scheme.
pub type CodePoint = u32;

pub use buffer::CodePointBuf;
pub use codec::{decode, encode};
pub use config::{BasicSet, Config};
pub use error::{BootstringError, Result};

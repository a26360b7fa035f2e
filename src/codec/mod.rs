// Bootstring transcoding core (RFC 3492).
//
// # Modules
//
// - `bias`   : Bias adaptation and per-digit thresholds
// - `digits` : Generalized variable-length integer encode/decode
// - `encoder`: Code points to basic prefix + digit groups
// - `decoder`: Basic prefix + digit groups back to code points

pub mod bias;
pub mod decoder;
pub mod digits;
pub mod encoder;

pub use bias::{adapt, threshold};
pub use decoder::{Decoder, Insertion, decode};
pub use digits::{MAX_VALUE, decode_digits, encode_digits};
pub use encoder::encode;

// Bias adaptation and per-digit thresholds (RFC 3492, sections 3.3 and 3.4).
//
// Both digit codecs and both orchestrators go through these two functions.

use crate::config::Config;

/// Recompute the bias after a digit group.
///
/// `numpoints` is the number of code points handled so far including the one
/// just processed, and is always at least 1. `first` selects the `damp`
/// divisor, which only applies to the very first group of a call.
pub fn adapt(config: &Config, delta: usize, numpoints: usize, first: bool) -> usize {
    let base = config.base();
    let base_minus_tmin = base - config.tmin;

    let mut delta = if first {
        delta / config.damp.max(1)
    } else {
        delta / 2
    };
    delta += delta / numpoints.max(1);

    // Validated configs keep every product below 2^30; the saturating forms
    // and divisor floors only matter for configs that skipped validation.
    let limit = base_minus_tmin.saturating_mul(config.tmax) / 2;
    let mut k = 0usize;
    while delta > limit {
        delta /= base_minus_tmin.max(2);
        k = k.saturating_add(base);
    }
    k.saturating_add(
        (base_minus_tmin + 1).saturating_mul(delta) / delta.saturating_add(config.skew).max(1),
    )
}

/// Threshold for the digit at offset `offset` (`base`, `2 * base`, ...),
/// clamped to `[tmin, tmax]`.
#[inline]
pub fn threshold(config: &Config, offset: usize, bias: usize) -> usize {
    offset
        .saturating_sub(bias)
        .max(config.tmin)
        .min(config.tmax)
}

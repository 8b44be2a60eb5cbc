//! Pack-wide decimal precision handling.
//!
//! Every dimension, weight, position, and moment in the engine is a
//! [`rust_decimal::Decimal`]. Inputs are normalised once, at pack start, to a
//! configurable number of fractional digits; support thresholds and
//! center-of-gravity tolerances then compare exactly, so a pack reproduces
//! bit-for-bit across platforms. Values are never renormalised mid-pack.

use rust_decimal::Decimal;

/// Default number of fractional digits for normalisation.
pub const DEFAULT_DECIMALS: u32 = 3;

/// Maximum number of fractional digits a [`Decimal`] can carry.
pub const MAX_DECIMALS: u32 = 28;

/// Rounds a value to `decimals` fractional digits (banker's rounding).
pub fn quantize(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp(decimals)
}

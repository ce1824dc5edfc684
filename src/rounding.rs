use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round to the nearest whole number, halves away from zero.
///
/// Negative values saturate to zero and values past `u32::MAX` saturate to
/// `u32::MAX`: calorie, macro and volume figures are never negative.
pub fn round_whole(value: Decimal) -> u32 {
    if value.is_sign_negative() {
        return 0;
    }
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

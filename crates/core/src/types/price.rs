//! Price formatting and discount arithmetic using decimal amounts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Format an amount for display.
///
/// Whole amounts print without cents (`$120`), anything else with two
/// decimals (`$119.50`).
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    if amount.fract().is_zero() {
        format!("${}", amount.trunc().normalize())
    } else {
        format!("${amount:.2}")
    }
}

/// Percentage saved going from `original` to `discounted`, rounded to the
/// nearest whole point.
///
/// Returns `None` when the original price is not positive or the
/// discounted price is not below it.
#[must_use]
pub fn discount_percentage(original: Decimal, discounted: Decimal) -> Option<u32> {
    if original <= Decimal::ZERO || discounted <= Decimal::ZERO || discounted >= original {
        return None;
    }

    ((original - discounted) / original * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
}

//! Monetary helpers shared by the forecast engine and the CLI renderer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on emitted monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value to cents, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a value with a sign and two decimals, e.g. `+12.50` or `-3.00`.
pub fn format_signed(value: Decimal) -> String {
    let rounded = round_money(value);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{:.2}", rounded)
    } else {
        format!("+{:.2}", rounded)
    }
}

/// Formats a value with two decimals and no explicit plus sign.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

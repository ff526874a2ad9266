//! Presentation helpers. Nothing here affects grouping or ranking.

use chrono::Month;
use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount as `1,234.56`: two decimals (half-even), comma grouping
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}.{}", sign, grouped, fraction)
}

/// Upper-case English name of a month number, e.g. 1 -> "JANUARY"
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
    Some(match month {
        Month::January => "JANUARY",
        Month::February => "FEBRUARY",
        Month::March => "MARCH",
        Month::April => "APRIL",
        Month::May => "MAY",
        Month::June => "JUNE",
        Month::July => "JULY",
        Month::August => "AUGUST",
        Month::September => "SEPTEMBER",
        Month::October => "OCTOBER",
        Month::November => "NOVEMBER",
        Month::December => "DECEMBER",
    })
}

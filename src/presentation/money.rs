use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "¥";
pub const FREE_LABEL: &str = "Free";

/// Percentage of `goal` raised, rounded half away from zero and clamped to
/// `0..=100`. A missing or non-positive goal yields 0.
pub fn progress(current: Option<Decimal>, goal: Option<Decimal>) -> u8 {
    let goal = match goal {
        Some(goal) if goal > Decimal::ZERO => goal,
        _ => return 0,
    };
    let current = current.unwrap_or(Decimal::ZERO);

    let Some(ratio) = current
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(goal))
    else {
        return if current > Decimal::ZERO { 100 } else { 0 };
    };

    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .to_u8()
        .unwrap_or(0)
}

/// `Free` for a missing or zero amount, otherwise the currency symbol and the
/// amount with at most two fraction digits and comma grouping.
pub fn format_currency(amount: Option<Decimal>) -> String {
    match amount {
        Some(amount) if !amount.is_zero() => format!("{CURRENCY_SYMBOL}{}", group_digits(amount)),
        _ => FREE_LABEL.to_string(),
    }
}

fn group_digits(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Option<Decimal> {
        Some(value.parse().unwrap())
    }

    #[test]
    fn test_progress_without_goal_is_zero() {
        assert_eq!(progress(dec("500"), None), 0);
        assert_eq!(progress(dec("500"), dec("0")), 0);
        assert_eq!(progress(dec("500"), dec("-10")), 0);
        assert_eq!(progress(None, dec("1000")), 0);
    }

    #[test]
    fn test_progress_rounds_and_clamps() {
        assert_eq!(progress(dec("1234.56"), dec("5000")), 25);
        assert_eq!(progress(dec("125"), dec("1000")), 13);
        assert_eq!(progress(dec("124"), dec("1000")), 12);
        assert_eq!(progress(dec("7500"), dec("5000")), 100);
        assert_eq!(progress(dec("-50"), dec("100")), 0);
    }

    #[test]
    fn test_progress_stays_in_range() {
        let goals = ["0.01", "1", "3", "999.99", "100000"];
        let currents = ["0", "0.004", "1", "2.5", "1000", "99999999"];
        for goal in goals {
            for current in currents {
                let value = progress(dec(current), dec(goal));
                assert!(value <= 100, "progress({current}, {goal}) = {value}");
            }
        }
    }

    #[test]
    fn test_free_amounts() {
        assert_eq!(format_currency(None), "Free");
        assert_eq!(format_currency(dec("0")), "Free");
        assert_eq!(format_currency(dec("0.00")), "Free");
    }

    #[test]
    fn test_currency_grouping_and_fraction_digits() {
        assert_eq!(format_currency(dec("25")), "¥25");
        assert_eq!(format_currency(dec("25.00")), "¥25");
        assert_eq!(format_currency(dec("1234.5")), "¥1,234.5");
        assert_eq!(format_currency(dec("1234567.891")), "¥1,234,567.89");
        assert_eq!(format_currency(dec("999.995")), "¥1,000");
        assert_eq!(format_currency(dec("100")), "¥100");
    }
}

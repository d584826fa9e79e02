//! Display helpers shared by every caller that renders curve output.
//!
//! All renderings truncate, matching the curve arithmetic, so a value and
//! the one just below it never render on opposite sides of a rounding step.

use crate::math::Decimal;

/// Format a USD amount for display
///
/// Below one cent shows 6 places, below one dollar 4, everything else 3.
pub fn format_usd(amount: Decimal) -> String {
    let places = if amount < Decimal::from_ratio(1, 100).unwrap_or_default() {
        6
    } else if amount < Decimal::one() {
        4
    } else {
        3
    };
    format!("${}", to_format(amount, places))
}

/// Format a token amount for display
pub fn format_token_amount(amount: Decimal, decimals: usize) -> String {
    to_format(amount, decimals)
}

/// Percent with a fixed number of places and a trailing `%`.
pub fn format_percent(value: Decimal, decimals: usize) -> String {
    format!("{}%", to_format(value, decimals))
}

/// Compact reserve label: `$100`, `$10K`, `$1M`.
pub fn format_milestone_label(usd: u64) -> String {
    if usd >= 1_000_000 {
        format!("${}M", compact(usd, 1_000_000))
    } else if usd >= 1_000 {
        format!("${}K", compact(usd, 1_000))
    } else {
        format!("${}", usd)
    }
}

fn compact(value: u64, unit: u64) -> String {
    Decimal::from_ratio(value as u128, unit as u128)
        .unwrap_or_default()
        .to_string()
}

/// Fixed places with comma-grouped thousands.
fn to_format(amount: Decimal, places: usize) -> String {
    let fixed = amount.to_fixed(places);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}.{}", grouped, fraction),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_usd_tiers() {
        assert_eq!(format_usd(dec("0.000001234")), "$0.000001");
        assert_eq!(format_usd(dec("0.5")), "$0.5000");
        assert_eq!(format_usd(dec("1234.5")), "$1,234.500");
        assert_eq!(format_usd(Decimal::zero()), "$0.000000");
    }

    #[test]
    fn test_format_usd_is_stable_around_thresholds() {
        // Neighbours of each tier boundary
        assert_eq!(format_usd(dec("0.009999999")), "$0.009999");
        assert_eq!(format_usd(dec("0.01")), "$0.0100");
        assert_eq!(format_usd(dec("0.999999")), "$0.9999");
        assert_eq!(format_usd(dec("1")), "$1.000");

        // Adjacent values inside a tier truncate to the same string
        assert_eq!(format_usd(dec("12.3456")), format_usd(dec("12.3459")));
    }

    #[test]
    fn test_format_token_amount_grouping() {
        assert_eq!(format_token_amount(dec("21000000"), 4), "21,000,000.0000");
        assert_eq!(format_token_amount(dec("95858.123456"), 2), "95,858.12");
        assert_eq!(format_token_amount(dec("999"), 0), "999");
        assert_eq!(format_token_amount(dec("1000"), 0), "1,000");
        assert_eq!(format_token_amount(dec("123456.7"), 0), "123,456");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec("1.23789"), 2), "1.23%");
        assert_eq!(format_percent(Decimal::zero(), 0), "0%");
    }

    #[test]
    fn test_milestone_labels() {
        assert_eq!(format_milestone_label(100), "$100");
        assert_eq!(format_milestone_label(1_000), "$1K");
        assert_eq!(format_milestone_label(10_000), "$10K");
        assert_eq!(format_milestone_label(1_000_000), "$1M");
        assert_eq!(format_milestone_label(2_500_000), "$2.5M");
    }
}

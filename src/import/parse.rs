use crate::error::ImportError;

const HOURS_PER_DAY: u32 = 24;

/// Currency symbols dropped before parsing an amount
const CURRENCY_SYMBOLS: [char; 4] = ['$', '\u{20ac}', '\u{a3}', '\u{a5}'];

/// Parse a listed amount such as `"$1,250.00"`.
///
/// Currency symbols, thousands separators and whitespace are dropped; the rest
/// must be a finite, non-negative number.
pub fn parse_currency(text: &str) -> Result<f64, ImportError> {
    let number: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    let amount = number
        .parse::<f64>()
        .map_err(|_| ImportError::InvalidCurrency(text.to_string()))?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ImportError::InvalidCurrency(text.to_string()));
    }
    Ok(amount)
}

/// Parse a remaining time such as `"1 days 3 hours"` into whole hours.
///
/// Input is read as `<count> <unit>` pairs. Units starting with `d` count 24
/// hours, units starting with `h` count one hour and any other unit is skipped.
pub fn parse_duration_hours(text: &str) -> Result<u32, ImportError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut total: u32 = 0;

    for pair in tokens.chunks_exact(2) {
        let (count, unit) = (pair[0], pair[1]);
        let per_unit = match unit.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('d') => HOURS_PER_DAY,
            Some('h') => 1,
            _ => continue,
        };
        let count: u32 = count
            .parse()
            .map_err(|_| ImportError::InvalidDuration(text.to_string()))?;
        total = total.saturating_add(count.saturating_mul(per_unit));
    }

    Ok(total)
}

// region:    --- Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_strips_symbol_and_separators() {
        assert_eq!(parse_currency("$1,250.00").unwrap(), 1250.0);
        assert_eq!(parse_currency("$ 12,345,678.9").unwrap(), 12_345_678.9);
        assert_eq!(parse_currency("42").unwrap(), 42.0);
        assert_eq!(parse_currency("$0.99").unwrap(), 0.99);
    }

    #[test]
    fn currency_without_digits_is_rejected() {
        assert!(matches!(parse_currency("$"), Err(ImportError::InvalidCurrency(_))));
        assert!(matches!(parse_currency(""), Err(ImportError::InvalidCurrency(_))));
        assert!(matches!(parse_currency("1.2.3"), Err(ImportError::InvalidCurrency(_))));
        assert!(matches!(parse_currency("12 USD"), Err(ImportError::InvalidCurrency(_))));
    }

    #[test]
    fn currency_keeps_exponent() {
        assert_eq!(parse_currency("1.5e3").unwrap(), 1500.0);
        assert_eq!(parse_currency("$2E2").unwrap(), 200.0);
    }

    #[test]
    fn negative_or_non_finite_currency_is_rejected() {
        assert!(matches!(parse_currency("-$5.00"), Err(ImportError::InvalidCurrency(_))));
        assert!(matches!(parse_currency("$-5"), Err(ImportError::InvalidCurrency(_))));
        assert!(matches!(parse_currency("inf"), Err(ImportError::InvalidCurrency(_))));
        assert!(matches!(parse_currency("NaN"), Err(ImportError::InvalidCurrency(_))));
    }

    #[test]
    fn duration_sums_days_and_hours() {
        assert_eq!(parse_duration_hours("1 days 3 hours").unwrap(), 27);
        assert_eq!(parse_duration_hours("2 days").unwrap(), 48);
        assert_eq!(parse_duration_hours("5 hours").unwrap(), 5);
        assert_eq!(parse_duration_hours("1 day 1 hour").unwrap(), 25);
        assert_eq!(parse_duration_hours("").unwrap(), 0);
    }

    #[test]
    fn duration_units_ignore_case() {
        assert_eq!(parse_duration_hours("2 Days").unwrap(), 48);
        assert_eq!(parse_duration_hours("1 DAY 3 Hours").unwrap(), 27);
    }

    #[test]
    fn duration_ignores_unknown_units() {
        assert_eq!(parse_duration_hours("1 days 30 minutes 2 hours").unwrap(), 26);
        assert_eq!(parse_duration_hours("soon minutes").unwrap(), 0);
    }

    #[test]
    fn duration_ignores_dangling_count() {
        assert_eq!(parse_duration_hours("3 hours 7").unwrap(), 3);
    }

    #[test]
    fn duration_with_bad_count_is_rejected() {
        assert!(matches!(
            parse_duration_hours("many days"),
            Err(ImportError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_hours("-1 hours"),
            Err(ImportError::InvalidDuration(_))
        ));
    }

    #[test]
    fn duration_saturates() {
        assert_eq!(parse_duration_hours("4294967295 days 9 hours").unwrap(), u32::MAX);
    }
}
// endregion: --- Tests

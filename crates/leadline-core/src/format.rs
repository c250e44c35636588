use serde::Serialize;

/// Whole dollars with thousands separators: `$12,500`, `-$300`.
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyDisplay {
    pub abbreviated: String,
    pub full: String,
}

/// `$1.5M`, `$250K`, or the full amount below a thousand. Halves round up.
pub fn format_currency_abbreviated(amount: i64) -> CurrencyDisplay {
    let full = format_currency(amount);
    let wide = i128::from(amount);
    let abbreviated = if wide >= 1_000_000 {
        let tenths = (wide + 50_000) / 100_000;
        let whole = tenths / 10;
        match tenths % 10 {
            0 => format!("${whole}M"),
            fraction => format!("${whole}.{fraction}M"),
        }
    } else if wide >= 1_000 {
        format!("${}K", (wide + 500) / 1_000)
    } else {
        full.clone()
    };
    CurrencyDisplay { abbreviated, full }
}

#[cfg(test)]
mod tests {
    use super::{format_currency, format_currency_abbreviated};

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(950), "$950");
        assert_eq!(format_currency(12_500), "$12,500");
        assert_eq!(format_currency(1_250_000), "$1,250,000");
        assert_eq!(format_currency(-3_000), "-$3,000");
    }

    #[test]
    fn abbreviations() {
        assert_eq!(format_currency_abbreviated(1_500_000).abbreviated, "$1.5M");
        assert_eq!(format_currency_abbreviated(2_000_000).abbreviated, "$2M");
        assert_eq!(format_currency_abbreviated(1_049_999).abbreviated, "$1M");
        assert_eq!(format_currency_abbreviated(250_000).abbreviated, "$250K");
        assert_eq!(format_currency_abbreviated(1_500).abbreviated, "$2K");
        assert_eq!(format_currency_abbreviated(999).abbreviated, "$999");
        assert_eq!(format_currency_abbreviated(250_000).full, "$250,000");
    }

    #[test]
    fn extreme_amounts_do_not_overflow() {
        let max = format_currency_abbreviated(i64::MAX);
        assert_eq!(max.abbreviated, "$9223372036854.8M");
        assert_eq!(max.full, "$9,223,372,036,854,775,807");
        assert_eq!(format_currency(i64::MIN), "-$9,223,372,036,854,775,808");
    }
}

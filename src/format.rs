//! Display formatting for large currency amounts. Pure and deterministic.
//!
//! Three presentations share one scaling rule (divide by 1000 per tier):
//! compact letter suffixes for tight layouts, worded suffixes for the stats
//! panel, and a split value/suffix pair for layouts that style the two
//! parts differently. Past the largest defined suffix the formatters fall
//! back to exponential notation.

const COMPACT_SUFFIXES: [&str; 6] = ["", "K", "M", "B", "T", "Q"];

const WORD_SUFFIXES: [&str; 12] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
    "Sextillion",
    "Septillion",
    "Octillion",
    "Nonillion",
    "Decillion",
];

/// Scale `n` down by powers of 1000 until it fits below 1000 or the
/// suffix ladder runs out. Returns `(scaled, tier)`; `tier > max_tier`
/// means the caller should fall back to exponential notation.
fn scale(n: f64, max_tier: usize) -> (f64, usize) {
    let mut scaled = n.abs();
    let mut tier = 0;
    while scaled >= 1000.0 && tier <= max_tier {
        scaled /= 1000.0;
        tier += 1;
    }
    (scaled, tier)
}

/// Drop a trailing `.00` / `.0` / dangling zeros after the decimal point.
fn trim_decimals(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

/// Values under 1000 show as an integer or with one decimal place.
fn format_small(n: f64) -> String {
    if n == n.trunc() {
        format!("{}", n as i64)
    } else {
        trim_decimals(&format!("{n:.1}"))
    }
}

/// Precision depends on how much of the 1..1000 range the scaled value
/// uses: three digits get none, two digits one decimal, one digit two.
fn compact_value(scaled: f64) -> String {
    let s = if scaled >= 100.0 {
        format!("{scaled:.0}")
    } else if scaled >= 10.0 {
        format!("{scaled:.1}")
    } else {
        format!("{scaled:.2}")
    };
    trim_decimals(&s)
}

/// Compact suffix form: `1.5K`, `67.7B`, `123T`.
pub fn format_compact(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_compact(-n));
    }
    if n < 1000.0 {
        return format_small(n);
    }
    let (scaled, tier) = scale(n, COMPACT_SUFFIXES.len() - 1);
    if tier >= COMPACT_SUFFIXES.len() {
        return format!("{n:.2e}");
    }
    format!("{}{}", compact_value(scaled), COMPACT_SUFFIXES[tier])
}

/// Worded suffix form: `1.5 Thousand`, `67.67 Billion`.
pub fn format_word(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_word(-n));
    }
    if n < 1000.0 {
        return format_small(n);
    }
    let (scaled, tier) = scale(n, WORD_SUFFIXES.len() - 1);
    if tier >= WORD_SUFFIXES.len() {
        return format!("{n:.2e}");
    }
    format!(
        "{} {}",
        trim_decimals(&format!("{scaled:.2}")),
        WORD_SUFFIXES[tier]
    )
}

/// Value and suffix as separate strings for layouts that style them apart.
/// The numeric value matches `format_compact` for the same input.
pub fn format_split(n: f64) -> (String, String) {
    if n < 0.0 {
        let (value, suffix) = format_split(-n);
        return (format!("-{value}"), suffix);
    }
    if n < 1000.0 {
        return (format_small(n), String::new());
    }
    let (scaled, tier) = scale(n, COMPACT_SUFFIXES.len() - 1);
    if tier >= COMPACT_SUFFIXES.len() {
        return (format!("{n:.2e}"), String::new());
    }
    (compact_value(scaled), COMPACT_SUFFIXES[tier].to_string())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_no_panic_over_wide_range(n in -1e40f64..1e40) {
            let _ = format_compact(n);
            let _ = format_word(n);
            let _ = format_split(n);
        }

        #[test]
        fn prop_nonnegative_never_shows_minus(n in 0.0f64..1e30) {
            prop_assert!(!format_compact(n).starts_with('-'));
            prop_assert!(!format_word(n).starts_with('-'));
        }

        #[test]
        fn prop_negative_always_shows_minus(n in -1e30f64..-1.0) {
            prop_assert!(format_compact(n).starts_with('-'));
            prop_assert!(format_word(n).starts_with('-'));
        }

        #[test]
        fn prop_split_recombines_to_compact(n in 0.0f64..1e18) {
            let (value, suffix) = format_split(n);
            prop_assert_eq!(format!("{}{}", value, suffix), format_compact(n));
        }

        #[test]
        fn prop_word_and_compact_agree_on_value(n in 1000.0f64..1e15) {
            // Same scaling rule: the leading digits must match up to the
            // presentation-specific precision.
            let word = format_word(n);
            let compact = format_compact(n);
            let word_value: f64 = word.split(' ').next().unwrap().parse().unwrap();
            let compact_digits: String = compact
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            let compact_value: f64 = compact_digits.parse().unwrap();
            prop_assert!((word_value - compact_value).abs() / word_value.max(1.0) < 0.05,
                "word {} vs compact {}", word, compact);
        }
    }
}

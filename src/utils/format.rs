//! Display formatting shared by every screen.
//!
//! All formatters take `impl Into<Option<f64>>` so callers can pass either a
//! plain number or an optional backend field. Absent and non-finite inputs
//! render as [`PLACEHOLDER`], never as `NaN` or `inf`.

/// Rendered in place of a value the backend did not supply.
pub const PLACEHOLDER: &str = "—";

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;

fn finite(value: impl Into<Option<f64>>) -> Option<f64> {
    value.into().filter(|v| v.is_finite())
}

/// Compact rupee amount for aggregates such as total AUM.
///
/// Bands use inclusive lower bounds on the absolute value:
/// `>= 1,000,000` renders `₹1.50M`, `>= 1,000` renders `₹12K`, anything
/// smaller renders `₹999`. A value that rounds up to the next band's lower
/// bound is shown in that band, so `999.6` is `₹1K` and `999_999` is `₹1.00M`.
pub fn format_compact_inr(amount: impl Into<Option<f64>>) -> String {
    let Some(amount) = finite(amount) else {
        return PLACEHOLDER.to_string();
    };

    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    if abs >= MILLION || (abs >= THOUSAND && (abs / THOUSAND).round() >= THOUSAND) {
        format!("{sign}₹{:.2}M", abs / MILLION)
    } else if abs.round() >= THOUSAND {
        format!("{sign}₹{:.0}K", abs / THOUSAND)
    } else {
        format!("{sign}₹{abs:.0}")
    }
}

/// Full rupee amount with Indian digit grouping and no decimals.
///
/// `50000.0` renders `₹50,000`; `12345678.0` renders `₹1,23,45,678`.
pub fn format_inr(amount: impl Into<Option<f64>>) -> String {
    let Some(amount) = finite(amount) else {
        return PLACEHOLDER.to_string();
    };

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}₹{}", group_indian(&digits))
}

/// Groups a run of ASCII digits as 12,34,567.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// Percentage with a fixed number of decimals, e.g. `12.35%`.
pub fn format_percent(value: impl Into<Option<f64>>, decimals: usize) -> String {
    finite(value).map_or_else(
        || PLACEHOLDER.to_string(),
        |v| format!("{v:.decimals$}%"),
    )
}

/// Plain number with a fixed number of decimals.
pub fn format_fixed(value: impl Into<Option<f64>>, decimals: usize) -> String {
    finite(value).map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.decimals$}"))
}

/// Fund age or average maturity, e.g. `7.4 yrs`.
pub fn format_years(value: impl Into<Option<f64>>) -> String {
    finite(value).map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.1} yrs"))
}

/// Share of `part` in `total` as a one-decimal percentage.
///
/// A zero total has no meaningful share and renders the placeholder.
pub fn format_share(part: u64, total: u64) -> String {
    if total == 0 {
        return PLACEHOLDER.to_string();
    }
    format_percent(part as f64 / total as f64 * 100.0, 1)
}

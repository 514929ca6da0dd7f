//! Currency display helpers
//!
//! Kept apart from the engine: these only turn already-computed values into text.

/// Abbreviated dollar amount: `$1.2B`, `$159.4M`, `$21K`, `$950`
///
/// Negative amounts abbreviate by magnitude and keep the sign in front (`-$65K`).
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let n = amount.abs();

    if n >= 1_000_000_000.0 {
        format!("{}${:.1}B", sign, n / 1_000_000_000.0)
    } else if n >= 1_000_000.0 {
        format!("{}${:.1}M", sign, n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{}${:.0}K", sign, n / 1_000.0)
    } else {
        format!("{}${}", sign, group_thousands(n.round()))
    }
}

/// Whole-dollar amount with thousands separators: `$159,378,750`
pub fn format_usd_full(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs()))
}

/// Percentage with a fixed number of decimals: `94.6%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{:.0}", whole);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

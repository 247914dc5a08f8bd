//! Number formatting for axis ticks and annotations.

/// Plain, comma-grouped integer: `1234567.8` -> `1,234,568`.
pub fn format_thousands(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Percentage with one decimal place: `60.0%`.
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.1}%")
}

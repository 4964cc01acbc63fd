/// Formats an integer with `,` thousands separators (`1234567` → `"1,234,567"`).
pub fn fmt_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a float keeping at least one decimal (`8.0` → `"8.0"`, `8.53` → `"8.53"`).
pub fn fmt_decimal(value: f64) -> String {
    let s = value.to_string();
    if !value.is_finite() || s.contains('.') || s.contains('e') {
        s
    } else {
        format!("{s}.0")
    }
}

/// Truncates `text` to `max_chars` characters, appending `...` when shortened.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        text.to_owned()
    }
}

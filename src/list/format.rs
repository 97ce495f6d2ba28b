//! Display formatting for list rows and readouts

use chrono::{NaiveDate, NaiveDateTime};

/// Integer with thousands separators: `1234.4` → `"1,234"`
pub fn format_number(v: f64) -> String {
    let rounded = v.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Signed integer with thousands separators: `14` → `"+14"`, `-3` → `"-3"`
pub fn format_change(v: f64) -> String {
    let formatted = format_number(v);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{}", formatted)
    }
}

/// Day header, e.g. `"February 01, 2001"`
pub fn format_day(day: NaiveDate) -> String {
    day.format("%B %d, %Y").to_string()
}

/// Clock time, e.g. `"07:45 PM"`
pub fn format_time(ts: NaiveDateTime) -> String {
    ts.format("%I:%M %p").to_string()
}

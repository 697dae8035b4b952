//! Shared formatting helpers for table cells.
//!
//! All pure formatting functions (no ratatui styles, no layout) live here.
//! Every helper taking a `width` returns text exactly `width` terminal columns
//! wide, even when a malformed sample carries a value that would not normally
//! fit.

use std::cmp::Ordering;

use unicode_width::UnicodeWidthStr;

/// Placeholder shown when a metric has no data this cycle.
pub const PLACEHOLDER: &str = "--";

const KIB: f64 = 1024.0;

/// Format byte count as a human-readable size with 1024-based units.
///
/// `format_bytes(512, 1)` → `"512B"`, `format_bytes(1536, 1)` → `"1.5K"`,
/// `format_bytes(3 << 30, 1)` → `"3.0G"`.
pub fn format_bytes(bytes: u64, precision: usize) -> String {
    const UNITS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];
    if bytes < 1024 {
        return format!("{}B", bytes);
    }
    let mut value = bytes as f64 / KIB;
    let mut unit = 0;
    while value >= KIB && unit < UNITS.len() - 1 {
        value /= KIB;
        unit += 1;
    }
    format!("{:.prec$}{}", value, UNITS[unit], prec = precision)
}

/// Insert thousands separators: `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a number with a decimal magnitude suffix: `12_345_678.0` → `"12.3M"`.
pub fn format_scaled(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1e18 {
        format!("{:.1}E", v / 1e18)
    } else if abs >= 1e15 {
        format!("{:.1}P", v / 1e15)
    } else if abs >= 1e12 {
        format!("{:.1}T", v / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1}G", v / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", v / 1e3)
    } else {
        format!("{:.0}", v)
    }
}

// ---------------------------------------------------------------------------
// Fixed-width table cells
// ---------------------------------------------------------------------------

/// Terminal columns `s` occupies once control characters are blanked.
pub fn display_width(s: &str) -> usize {
    printable(s).width()
}

/// Control characters (newline, tab, escape) become a single space so a cell
/// never moves the cursor.
fn printable(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Clip `s` to at most `max_len` terminal columns, ending with `…` when cut.
///
/// Zero-width marks stay attached to their base character. A double-width
/// character that would straddle the limit is dropped, so the result may be
/// one column short; the `fit_*` helpers pad it back.
pub fn truncate(s: &str, max_len: usize) -> String {
    let clean = printable(s);
    if clean.width() <= max_len {
        return clean;
    }
    if max_len == 0 {
        return String::new();
    }
    let mut out = String::with_capacity(clean.len());
    for c in clean.chars() {
        out.push(c);
        if out.width() > max_len - 1 {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

/// Left-align `s` in exactly `width` terminal columns.
pub fn fit_left(s: &str, width: usize) -> String {
    let mut out = truncate(s, width);
    let fill = width.saturating_sub(out.width());
    out.extend(std::iter::repeat_n(' ', fill));
    out
}

/// Right-align `s` in exactly `width` terminal columns.
pub fn fit_right(s: &str, width: usize) -> String {
    let text = truncate(s, width);
    let fill = width.saturating_sub(text.width());
    let mut out = " ".repeat(fill);
    out.push_str(&text);
    out
}

/// Right-aligned numeric text; switches to a magnitude suffix when the plain
/// rendering is wider than the column.
fn numeric_cell(text: String, value: f64, width: usize) -> String {
    if text.width() <= width {
        return fit_right(&text, width);
    }
    fit_right(&format_scaled(value), width)
}

/// Format a plain integer count, right-aligned.
pub fn format_u64(v: u64, width: usize) -> String {
    numeric_cell(v.to_string(), v as f64, width)
}

/// Format a cumulative counter with thousands separators, right-aligned.
///
/// Falls back to a magnitude suffix (`"12.3G"`) when the grouped form is
/// wider than the column.
pub fn format_counter(v: u64, width: usize) -> String {
    numeric_cell(group_thousands(v), v as f64, width)
}

/// Format `Option<f64>` with width and precision, `"--"` for `None`.
pub fn format_opt_f64(v: Option<f64>, width: usize, precision: usize) -> String {
    match v {
        Some(v) => numeric_cell(format!("{:.prec$}", v, prec = precision), v, width),
        None => fit_right(PLACEHOLDER, width),
    }
}

/// Format a CPU percentage with magnitude-dependent precision.
///
/// `>= 100` → no decimals, `>= 10` → one decimal, otherwise two decimals.
pub fn format_cpu_percent(v: Option<f64>, width: usize) -> String {
    let precision = match v {
        Some(pct) if pct >= 100.0 => 0,
        Some(pct) if pct >= 10.0 => 1,
        _ => 2,
    };
    format_opt_f64(v, width, precision)
}

/// Format an optional byte count with one fractional digit, `"--"` for `None`.
pub fn format_opt_bytes(v: Option<u64>, width: usize) -> String {
    match v {
        Some(b) => fit_right(&format_bytes(b, 1), width),
        None => fit_right(PLACEHOLDER, width),
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Case-insensitive ordering of two strings.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Case-insensitive strict-less.
pub fn less_ignore_case(a: &str, b: &str) -> bool {
    cmp_ignore_case(a, b) == Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(0, 1), "0B");
        assert_eq!(format_bytes(512, 1), "512B");
        assert_eq!(format_bytes(1536, 1), "1.5K");
        assert_eq!(format_bytes(100 * 1024 * 1024 + 300 * 1024, 1), "100.3M");
        assert_eq!(format_bytes(2 * 1024 * 1024 * 1024, 1), "2.0G");
        assert_eq!(format_bytes(1 << 40, 1), "1.0T");
        assert_eq!(format_bytes(u64::MAX, 1), "16.0E");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_counter_falls_back_to_suffix() {
        assert_eq!(format_counter(0, 11), "          0");
        assert_eq!(format_counter(1_234_567, 11), "  1,234,567");
        // 15 chars grouped, does not fit 11
        assert_eq!(format_counter(12_345_678_901, 11), "      12.3G");
        assert_eq!(format_counter(u64::MAX, 11).chars().count(), 11);
    }

    #[test]
    fn test_cpu_precision_tiers() {
        assert_eq!(format_cpu_percent(Some(5.5), 6), "  5.50");
        assert_eq!(format_cpu_percent(Some(45.0), 6), "  45.0");
        assert_eq!(format_cpu_percent(Some(150.0), 6), "   150");
        assert_eq!(format_cpu_percent(None, 6), "    --");
    }

    #[test]
    fn test_oversize_values_keep_width() {
        assert_eq!(format_cpu_percent(Some(12_345_678.0), 6), " 12.3M");
        assert_eq!(format_opt_f64(Some(f64::NAN), 7, 1), "    NaN");
        assert_eq!(format_opt_f64(Some(1e300), 7, 1).chars().count(), 7);
        assert_eq!(format_u64(123_456_789, 7), " 123.5M");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        assert_eq!(fit_left("production", 6), "produ…");
        assert_eq!(fit_left("dev", 6), "dev   ");
        assert_eq!(fit_right("dev", 6), "   dev");
        assert_eq!(fit_left("éèêëē", 3), "éè…");
    }

    #[test]
    fn test_fit_blanks_control_characters() {
        assert_eq!(fit_left("a\nb", 5), "a b  ");
        assert_eq!(fit_right("tab\there", 9), " tab here");
        assert_eq!(fit_left("\x1b[31mred", 6), " [31m…");
        assert_eq!(display_width("a\nb"), 3);
    }

    #[test]
    fn test_fit_counts_combining_marks_as_zero_width() {
        let name = "e\u{301}quipe";
        assert_eq!(display_width(name), 6);
        assert_eq!(fit_left(name, 8), "e\u{301}quipe  ");
        assert_eq!(fit_right(name, 7), " e\u{301}quipe");
        // the accent stays on its base letter when clipping
        assert_eq!(fit_left(name, 3), "e\u{301}q…");
    }

    #[test]
    fn test_fit_counts_wide_characters_as_two_columns() {
        let name = "数据库服务";
        assert_eq!(display_width(name), 10);
        assert_eq!(fit_left(name, 12), "数据库服务  ");
        assert_eq!(fit_left(name, 10), name);
        // 9 columns: four ideographs do not fit beside the ellipsis
        assert_eq!(fit_left(name, 9), "数据库服…");
        // 8 columns: the fourth would straddle the ellipsis, padded instead
        assert_eq!(fit_left(name, 8), "数据库… ");
        assert_eq!(fit_right(name, 8), " 数据库…");
        assert_eq!(fit_left(name, 1), "…");
        assert_eq!(fit_left(name, 0), "");
    }

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("Alpha", "alpha"), Ordering::Equal);
        assert!(less_ignore_case("alpha", "Beta"));
        assert!(!less_ignore_case("Beta", "alpha"));
    }
}

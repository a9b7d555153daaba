//! Display helpers for file names and sizes.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const SIZE_BASE: u128 = 1024;

/// Formats a byte count with base-1024 units and at most two decimals.
///
/// Trailing zeros are dropped (`1536` is `"1.5 KB"`, `1024` is `"1 KB"`).
/// Halfway values round up. Sizes beyond the gigabyte range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let bytes = u128::from(bytes);
    let mut unit = 0;
    let mut divisor = 1u128;
    while unit + 1 < SIZE_UNITS.len() && bytes >= divisor * SIZE_BASE {
        divisor *= SIZE_BASE;
        unit += 1;
    }

    // Hundredths, rounded half up.
    let hundredths = (bytes * 200 + divisor) / (divisor * 2);
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    let number = match fraction {
        0 => whole.to_string(),
        f if f % 10 == 0 => format!("{whole}.{}", f / 10),
        f => format!("{whole}.{f:02}"),
    };

    format!("{number} {}", SIZE_UNITS[unit])
}

/// Escapes the five markup-significant characters.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
    }

    #[test]
    fn test_format_kilobytes() {
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1100), "1.07 KB");
    }

    #[test]
    fn test_format_rounds_half_up() {
        // 1152 / 1024 = 1.125 exactly
        assert_eq!(format_file_size(1152), "1.13 KB");
    }

    #[test]
    fn test_format_rounding_can_carry() {
        // 1048575 bytes is 1023.999 KB
        assert_eq!(format_file_size(1_048_575), "1024 KB");
    }

    #[test]
    fn test_format_larger_units() {
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(1024 * 1024 * 1024), "1 GB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_escape_html_all_special_characters() {
        assert_eq!(escape_html("<a>&'\""), "&lt;a&gt;&amp;&#039;&quot;");
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("report 2024.pdf"), "report 2024.pdf");
        assert_eq!(escape_html("отчёт.pdf"), "отчёт.pdf");
    }

    #[test]
    fn test_escape_html_escapes_existing_entities() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }
}

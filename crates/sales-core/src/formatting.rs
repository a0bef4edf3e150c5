/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..]; // ".50"
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a monetary amount in euros with two decimal places, thousands
/// separators and a trailing symbol.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_euro;
///
/// assert_eq!(format_euro(1234.56), "1,234.56 €");
/// assert_eq!(format_euro(0.0),     "0.00 €");
/// assert_eq!(format_euro(-9.99),   "-9.99 €");
/// ```
pub fn format_euro(amount: f64) -> String {
    format!("{} €", format_number(amount, 2))
}

/// Display rule for totals over the whole record set: rounded to whole units.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_whole_units;
///
/// assert_eq!(format_whole_units(254_891.45), "254,891");
/// assert_eq!(format_whole_units(3.5), "4");
/// ```
pub fn format_whole_units(value: f64) -> String {
    format_number(value, 0)
}

/// Display rule for totals restricted to the article selection: two decimals.
///
/// Kept separate from [`format_whole_units`]; the dashboard shows unfiltered
/// and filtered totals at different precisions.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_two_decimals;
///
/// assert_eq!(format_two_decimals(2.4), "2.40");
/// assert_eq!(format_two_decimals(12_345.678), "12,345.68");
/// ```
pub fn format_two_decimals(value: f64) -> String {
    format_number(value, 2)
}

/// Format a share in percent with one decimal, as shown on the share chart.
///
/// # Examples
///
/// ```
/// use sales_core::formatting::format_share;
///
/// assert_eq!(format_share(68.5714), "68.6%");
/// assert_eq!(format_share(0.0), "0.0%");
/// ```
pub fn format_share(percentage: f64) -> String {
    format!("{:.1}%", percentage)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

//! Wire-format number parsing and plain number rendering.

/// Converts a metrics value string into a finite number.
///
/// Blank markers (`""`, `" "`, `"\t"`) and anything that does not convert to a
/// finite number (`"abc"`, `"NaN"`, `"Infinity"`, `"123abc"`) yield `None`.
pub fn parse_string_into_number(value: &str) -> Option<f64> {
    if value.is_empty() || value == " " || value == "\t" {
        return None;
    }

    let number = convert_numeric_literal(value)?;
    number.is_finite().then_some(number)
}

// Numeric literal conversion with the leniency the metrics wire format allows:
// surrounding whitespace is ignored, an all-whitespace string is zero, and
// unsigned 0x/0o/0b integers are accepted.
fn convert_numeric_literal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .ok()
            .map(|n| n as f64);
    }

    // Rust also accepts "inf"/"nan" spellings; those are rejected as non-finite by the caller.
    trimmed.parse::<f64>().ok()
}

/// Reads the longest leading decimal literal of `value` the way JavaScript's `parseFloat`
/// does: leading whitespace is skipped, trailing characters are ignored (`"12abc"` is 12)
/// and a leading `Infinity` is accepted. `None` when no number starts the string.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Renders `value` with `digits` decimals like `Number.prototype.toFixed`: an exact tie
/// rounds away from zero (`0.125` -> `"0.13"`), where `{:.2}` would pick the even digit.
/// Non-ties are unaffected, so `1.005` (stored just below) stays `"1.00"`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let places = digits as i32;
    // Ties are exactly the odd multiples of 2^-(digits + 1).
    let halves = value * 2f64.powi(places + 1);
    let value = if halves.fract() == 0.0 && halves % 2.0 != 0.0 {
        let scale = 10f64.powi(places);
        (value * scale).round() / scale
    } else {
        value
    };
    format!("{value:.digits$}")
}

/// Renders a number with `,` thousands separators (en-US grouping, up to 3 fraction digits).
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let text = rounded.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

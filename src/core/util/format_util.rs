//! Unit-prefixed value formatting for chart tooltips and tables.

use crate::core::util::number_util::{group_thousands, to_fixed};

pub const KIB: f64 = 1024.0;
pub const KB: f64 = 1000.0;
pub const PERCENT: f64 = 100.0;
pub const DECIMAL_PLACES: usize = 2;

/// Base-1000 prefixes from yocto to yotta; index 8 is "no prefix".
pub const SI_PREFIX: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];
const SI_NO_PREFIX_INDEX: i32 = 8;

/// `1000^k` for each entry of [`SI_PREFIX`].
const SI_POWERS: [f64; 17] = [
    1e-24, 1e-21, 1e-18, 1e-15, 1e-12, 1e-9, 1e-6, 1e-3, 1.0, 1e3, 1e6, 1e9, 1e12, 1e15, 1e18,
    1e21, 1e24,
];

/// Base-1024 prefixes.
pub const BINARY_PREFIX: [&str; 9] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi", "Yi"];

/// Placeholder text used by the composite formatters for missing values.
pub const MISSING_VALUE: &str = "-";

fn fixed(value: f64) -> String {
    to_fixed(value, DECIMAL_PLACES)
}

// Keeps two decimals by truncation; whole numbers are rendered without decimals.
fn truncated(value: f64) -> String {
    let n = (value * 100.0).floor() / 100.0;
    if n.fract() == 0.0 {
        if n == 0.0 {
            "0".to_string()
        } else {
            format!("{n}")
        }
    } else {
        fixed(n)
    }
}

/// Picks the binary prefix whose magnitude fits `value`. Non-positive or NaN values get `""`.
pub fn value_to_binary_prefix(value: f64) -> &'static str {
    if value.is_nan() || value <= 0.0 {
        return "";
    }

    let unit_index = (value.log2() / 10.0).floor();
    if unit_index < 0.0 || unit_index >= BINARY_PREFIX.len() as f64 {
        return "";
    }
    BINARY_PREFIX[unit_index as usize]
}

/// Picks the SI prefix whose magnitude fits `|value|`. Zero, NaN and magnitudes outside
/// yocto..yotta get `""`.
pub fn value_to_si_prefix(value: f64) -> &'static str {
    let abs = value.abs();
    if abs.is_nan() || abs >= SI_POWERS[SI_POWERS.len() - 1] * KB {
        return "";
    }

    SI_POWERS
        .iter()
        .rposition(|power| abs >= *power)
        .map_or("", |index| SI_PREFIX[index])
}

/// Formats `value` expressed in the given binary prefix. Negative values and unknown
/// prefixes produce `""`.
pub fn format_by_binary_prefix(value: f64, prefix: &str) -> String {
    if value < 0.0 {
        return String::new();
    }

    match BINARY_PREFIX.iter().position(|p| *p == prefix) {
        None => String::new(),
        Some(0) => truncated(value),
        Some(index) => fixed(value / KIB.powi(index as i32)),
    }
}

/// Formats `value` expressed in the given SI prefix. Unknown prefixes produce `""`.
/// The sign of negative values is preserved.
pub fn format_by_si_prefix(value: f64, prefix: &str) -> String {
    let Some(index) = SI_PREFIX.iter().position(|p| *p == prefix) else {
        return String::new();
    };

    let index = index as i32;
    match index.cmp(&SI_NO_PREFIX_INDEX) {
        std::cmp::Ordering::Less => fixed(value * KB.powi(SI_NO_PREFIX_INDEX - index)),
        std::cmp::Ordering::Equal => truncated(value),
        std::cmp::Ordering::Greater => fixed(value / KB.powi(index - SI_NO_PREFIX_INDEX)),
    }
}

pub fn format_bytes_value(value: Option<f64>) -> String {
    let Some(value) = value else {
        return format!("{MISSING_VALUE} B");
    };

    let prefix = value_to_binary_prefix(value);
    let text = format_by_binary_prefix(value, prefix);
    if prefix.is_empty() {
        format!("{text} B")
    } else {
        format!("{text} {prefix}B")
    }
}

pub fn format_energy_value(value: Option<f64>) -> String {
    let Some(value) = value else {
        return format!("{MISSING_VALUE} Wh");
    };

    let prefix = value_to_si_prefix(value);
    format!("{} {prefix}Wh", format_by_si_prefix(value, prefix))
}

pub fn format_network_transfer_value(value: Option<f64>) -> String {
    let Some(value) = value else {
        return format!("{MISSING_VALUE} bit/s");
    };

    let prefix = value_to_binary_prefix(value);
    let text = format_by_binary_prefix(value, prefix);
    if prefix.is_empty() {
        format!("{text} bit/s")
    } else {
        format!("{text} {prefix}b/s")
    }
}

pub fn format_percent_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{} %", fixed(v)),
        None => format!("{MISSING_VALUE} %"),
    }
}

/// "1 resource", otherwise the grouped count followed by "resources".
pub fn format_number_of_resources(value: f64) -> String {
    if value == 1.0 {
        "1 resource".to_string()
    } else {
        format!("{} resources", group_thousands(value))
    }
}

/// `+` for positive, `±` for zero, empty for negative or missing values.
pub fn sign_of_the_number(value: Option<f64>) -> &'static str {
    match value {
        Some(v) if v > 0.0 => "+",
        Some(v) if v == 0.0 => "±",
        _ => "",
    }
}

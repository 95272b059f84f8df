use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::util::format_util::{
    format_bytes_value, format_energy_value, format_network_transfer_value,
    format_number_of_resources, format_percent_value, sign_of_the_number, MISSING_VALUE,
};

/// Value formatters exposed to chart tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    Bytes,
    Energy,
    Network,
    Percent,
    Resources,
    Sign,
}

impl FormatKind {
    pub const ALL: [FormatKind; 6] = [
        FormatKind::Bytes,
        FormatKind::Energy,
        FormatKind::Network,
        FormatKind::Percent,
        FormatKind::Resources,
        FormatKind::Sign,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FormatKind::Bytes => "bytes",
            FormatKind::Energy => "energy",
            FormatKind::Network => "network",
            FormatKind::Percent => "percent",
            FormatKind::Resources => "resources",
            FormatKind::Sign => "sign",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format kind: {0}")]
pub struct UnknownFormatKind(pub String);

impl FromStr for FormatKind {
    type Err = UnknownFormatKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownFormatKind(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedValue {
    pub kind: FormatKind,
    pub value: Option<f64>,
    pub text: String,
}

pub fn format_value(kind: FormatKind, value: Option<f64>) -> String {
    match kind {
        FormatKind::Bytes => format_bytes_value(value),
        FormatKind::Energy => format_energy_value(value),
        FormatKind::Network => format_network_transfer_value(value),
        FormatKind::Percent => format_percent_value(value),
        FormatKind::Resources => match value {
            Some(v) => format_number_of_resources(v),
            None => format!("{MISSING_VALUE} resources"),
        },
        FormatKind::Sign => sign_of_the_number(value).to_string(),
    }
}

pub async fn format(kind: String, value: Option<f64>) -> Result<FormattedValue> {
    let kind = kind.parse::<FormatKind>()?;
    Ok(FormattedValue {
        kind,
        value,
        text: format_value(kind, value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_kind() {
        assert_eq!(format_value(FormatKind::Bytes, Some(1024.0)), "1.00 KiB");
        assert_eq!(format_value(FormatKind::Energy, Some(1500.0)), "1.50 kWh");
        assert_eq!(format_value(FormatKind::Network, None), "- bit/s");
        assert_eq!(format_value(FormatKind::Percent, Some(12.3456)), "12.35 %");
        assert_eq!(format_value(FormatKind::Resources, Some(1.0)), "1 resource");
        assert_eq!(format_value(FormatKind::Resources, None), "- resources");
        assert_eq!(format_value(FormatKind::Sign, Some(0.0)), "±");
    }

    #[tokio::test]
    async fn parses_kind_from_path() {
        let formatted = format("bytes".into(), Some(512.0)).await.unwrap();
        assert_eq!(formatted.kind, FormatKind::Bytes);
        assert_eq!(formatted.text, "512 B");

        let err = format("volts".into(), Some(1.0)).await.unwrap_err();
        assert!(err.downcast_ref::<UnknownFormatKind>().is_some());
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_LOCALE: &str = "en";

/// Runtime settings read from `GRAPH_*` environment variables (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub default_locale: String,
    /// Display time zone of date labels, minutes east of UTC.
    pub tz_offset_minutes: i32,
    pub promql_url: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            default_locale: DEFAULT_LOCALE.to_string(),
            tz_offset_minutes: 0,
            promql_url: None,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> (Self, Vec<String>) {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Invalid values fall back to
    /// defaults and are reported in the returned list, since the config is read before
    /// the tracing subscriber exists.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        let mut rejected = Vec::new();

        let bind_addr = match get("GRAPH_BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                rejected.push(format!("invalid GRAPH_BIND_ADDR {raw:?}, using {DEFAULT_BIND_ADDR}"));
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let tz_offset_minutes = match get("GRAPH_TZ_OFFSET_MINUTES") {
            Some(raw) => match raw.parse::<i32>() {
                Ok(m) if m.abs() < 24 * 60 => m,
                _ => {
                    rejected.push(format!("invalid GRAPH_TZ_OFFSET_MINUTES {raw:?}, using UTC"));
                    defaults.tz_offset_minutes
                }
            },
            None => defaults.tz_offset_minutes,
        };

        let config = Self {
            bind_addr,
            default_locale: get("GRAPH_DEFAULT_LOCALE").unwrap_or(defaults.default_locale),
            tz_offset_minutes,
            promql_url: get("GRAPH_PROMQL_URL"),
            log_dir: get("GRAPH_LOG_DIR").map(PathBuf::from),
        };
        (config, rejected)
    }
}

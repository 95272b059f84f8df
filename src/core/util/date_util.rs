//! Date parsing, locale label rendering and the injectable clock.
//!
//! Everything time-related in the graph pipeline goes through [`DateLabelFormat`] and
//! [`Clock`] so the step, alignment and gap-fill logic can be tested with fixed inputs.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, SecondsFormat, TimeZone,
    Utc,
};

/// Locales with a dedicated label layout. Unknown tags fall back to [`Locale::En`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Ja,
}

impl Locale {
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("ja") {
            Locale::Ja
        } else {
            Locale::En
        }
    }

    fn pattern(self, style: DateLabelStyle) -> &'static str {
        match (self, style) {
            (Locale::En, DateLabelStyle::Full) => "%-m/%-d/%Y, %-I:%M:%S %p",
            (Locale::En, DateLabelStyle::Date) => "%-m/%-d/%Y",
            (Locale::En, DateLabelStyle::Time) => "%-I:%M:%S %p",
            (Locale::Ja, DateLabelStyle::Full) => "%Y/%-m/%-d %-H:%M:%S",
            (Locale::Ja, DateLabelStyle::Date) => "%Y/%-m/%-d",
            (Locale::Ja, DateLabelStyle::Time) => "%-H:%M:%S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateLabelStyle {
    #[default]
    Full,
    Date,
    Time,
}

/// Parsing and rendering of the instants that key graph rows.
pub trait DateLabelFormat: Send + Sync {
    /// Parses an ISO-8601 string or a previously rendered label. `None` when invalid.
    fn parse_instant(&self, raw: &str) -> Option<DateTime<Utc>>;

    /// Renders the full (date and time) label used as the x-axis key.
    fn format_local_date(&self, instant: DateTime<Utc>, locale: &str) -> String;
}

// Naive layouts interpreted in the labeler's offset.
const LOCAL_DATE_TIME_PATTERNS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
    "%Y/%m/%d %H:%M:%S",
];
const LOCAL_DATE_PATTERNS: [&str; 2] = ["%m/%d/%Y", "%Y/%m/%d"];

/// Renders labels in a fixed UTC offset (the dashboard's display time zone).
#[derive(Debug, Clone, Copy)]
pub struct DateLabeler {
    offset: FixedOffset,
}

impl Default for DateLabeler {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateLabeler {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Builds a labeler from an offset in minutes east of UTC. `None` beyond +-23:59.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::with_offset)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn format_local(&self, instant: DateTime<Utc>, locale: &str, style: DateLabelStyle) -> String {
        instant
            .with_timezone(&self.offset)
            .format(Locale::from_tag(locale).pattern(style))
            .to_string()
    }

    /// Calendar date of `instant` in the display time zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// UTC instant of local midnight on `date`.
    pub fn start_of_local_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        self.from_local(date.and_time(NaiveTime::MIN))
    }

    fn from_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl DateLabelFormat for DateLabeler {
    fn parse_instant(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        // Bare ISO dates are UTC midnight; every other naive layout is local time.
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.and_time(NaiveTime::MIN).and_utc());
        }

        for pattern in LOCAL_DATE_TIME_PATTERNS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
                return self.from_local(naive);
            }
        }

        for pattern in LOCAL_DATE_PATTERNS {
            if let Ok(date) = NaiveDate::parse_from_str(raw, pattern) {
                return self.start_of_local_day(date);
            }
        }

        None
    }

    fn format_local_date(&self, instant: DateTime<Utc>, locale: &str) -> String {
        self.format_local(instant, locale, DateLabelStyle::Full)
    }
}

/// Source of "now". Inject [`FixedClock`] in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// `YYYY-MM-DDTHH:MM:SS.sssZ`, the form the metrics backend expects for start/end.
pub fn to_iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

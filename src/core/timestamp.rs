//! Conversion of instants into display-ready `{date, time}` pairs.
//!
//! Two modes are supported:
//! - **iso**: the instant is shifted by the configured zone offset and split into
//!   `YYYY-MM-DD` and `HH:MM:SS`. Non-UTC zones are applied as a fixed offset for
//!   the instant being formatted; this is an offset shift, not full zone-aware
//!   formatting.
//! - **locale**: two [`LocaleFormatter`]s (date and time) built once when the
//!   configuration is resolved are applied to the instant.

use crate::core::error::{Result, StarlistError};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Locale, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub date: String,
    pub time: String,
}

impl Timestamp {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Time zone a timestamp is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneSetting {
    #[default]
    Utc,
    Fixed(FixedOffset),
    /// Any zone name that is not UTC or a numeric offset uses the host offset.
    Host,
}

impl TimeZoneSetting {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match value {
            "" | "UTC" | "utc" | "Z" | "Etc/UTC" | "GMT" => TimeZoneSetting::Utc,
            _ => match value.parse::<FixedOffset>() {
                Ok(offset) if offset.local_minus_utc() == 0 => TimeZoneSetting::Utc,
                Ok(offset) => TimeZoneSetting::Fixed(offset),
                Err(_) => {
                    log::debug!("time zone {value} is not an offset, using host offset");
                    TimeZoneSetting::Host
                }
            },
        }
    }

    pub fn is_utc(&self) -> bool {
        matches!(self, TimeZoneSetting::Utc)
    }

    /// The offset in effect for `instant` under this setting.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        match self {
            TimeZoneSetting::Utc => Utc.fix(),
            TimeZoneSetting::Fixed(offset) => *offset,
            TimeZoneSetting::Host => Local.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }
}

/// A strftime pattern bound to a locale and zone, validated once up front.
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    pattern: String,
    locale: Locale,
    zone: TimeZoneSetting,
}

impl LocaleFormatter {
    pub fn new(pattern: impl Into<String>, locale: Locale, zone: TimeZoneSetting) -> Result<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(StarlistError::config_error(format!(
                "invalid date/time format pattern: {pattern}"
            )));
        }

        Ok(Self {
            pattern,
            locale,
            zone,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        let offset = self.zone.offset_at(instant);
        instant
            .with_timezone(&offset)
            .format_localized(&self.pattern, self.locale)
            .to_string()
    }
}

#[derive(Debug, Clone)]
pub enum DateTimeConfig {
    Iso {
        time_zone: TimeZoneSetting,
    },
    Locale {
        date: LocaleFormatter,
        time: LocaleFormatter,
    },
}

impl Default for DateTimeConfig {
    fn default() -> Self {
        DateTimeConfig::Iso {
            time_zone: TimeZoneSetting::Utc,
        }
    }
}

/// Format `instant` (or the current time) under `config`.
pub fn timestamp(config: &DateTimeConfig, instant: Option<&DateTime<Utc>>) -> Timestamp {
    let now;
    let value = match instant {
        Some(value) => value,
        None => {
            now = Utc::now();
            &now
        }
    };

    match config {
        DateTimeConfig::Iso { time_zone } => format_iso(value, time_zone),
        DateTimeConfig::Locale { date, time } => Timestamp {
            date: date.format(value),
            time: time.format(value),
        },
    }
}

fn format_iso(instant: &DateTime<Utc>, time_zone: &TimeZoneSetting) -> Timestamp {
    let shifted = instant.with_timezone(&time_zone.offset_at(instant));
    Timestamp {
        date: shifted.format("%Y-%m-%d").to_string(),
        time: shifted.format("%H:%M:%S").to_string(),
    }
}

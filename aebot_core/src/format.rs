use std::time::Duration;

use chrono::Offset as _;
use chrono_tz::Tz;
use time::{format_description, OffsetDateTime, UtcOffset};
use tokio::time::Instant;

pub trait FormatTime {
    fn as_readable_time(&self) -> String;
}

impl FormatTime for Duration {
    fn as_readable_time(&self) -> String {
        let secs = self.as_secs();
        match (secs / 60, secs % 60) {
            (0, secs) => format!("{secs} seconds"),
            (mins, secs) => format!("{mins} minutes and {secs} seconds"),
        }
    }
}

/// When the session started.
#[derive(Copy, Clone, Debug)]
pub struct Uptime(Instant);

impl Uptime {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// A wall clock reading along with a label for its zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalTime {
    at: OffsetDateTime,
    zone: String,
}

impl LocalTime {
    /// Reads the clock in the host's zone.
    ///
    /// The zone comes from `TZ` when it names one, otherwise from the
    /// system's configured zone. If neither resolves, the local offset is
    /// used with a `UTC±HH:MM` label, and failing that, UTC.
    pub fn now() -> Self {
        let utc = OffsetDateTime::now_utc();
        if let Some(time) = zone_name().and_then(|zone| Self::in_zone(utc, &zone)) {
            return time;
        }

        match OffsetDateTime::now_local() {
            Ok(at) => Self::new(at),
            Err(err) => {
                log::trace!("local offset is unknown ({err}), using UTC");
                Self::new(utc)
            }
        }
    }

    /// Converts `at` into the named tz database zone, or `None` if the name
    /// isn't a known zone.
    pub fn in_zone(at: OffsetDateTime, zone: &str) -> Option<Self> {
        let tz = zone.parse::<Tz>().ok()?;
        let offset = chrono::DateTime::from_timestamp(at.unix_timestamp(), 0)?
            .with_timezone(&tz)
            .offset()
            .fix()
            .local_minus_utc();
        let offset = UtcOffset::from_whole_seconds(offset).ok()?;

        Some(Self {
            at: at.to_offset(offset),
            zone: tz.name().to_string(),
        })
    }

    pub fn new(at: OffsetDateTime) -> Self {
        Self {
            zone: zone_label(at.offset()),
            at,
        }
    }

    pub const fn at(&self) -> OffsetDateTime {
        self.at
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// `14:03:09`
    pub fn format_time(&self) -> anyhow::Result<String> {
        let f = format_description::parse("[hour]:[minute]:[second]")?;
        Ok(self.at.format(&f)?)
    }

    /// `Saturday, October 17, 2026`
    pub fn format_date(&self) -> anyhow::Result<String> {
        let f = format_description::parse("[weekday], [month repr:long] [day padding:none], [year]")?;
        Ok(self.at.format(&f)?)
    }
}

fn zone_name() -> Option<String> {
    let tz = std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').trim().to_string())
        // a path like `/etc/localtime` names a file, not a zone
        .filter(|tz| !tz.is_empty() && !tz.starts_with('/'));
    if tz.is_some() {
        return tz;
    }

    iana_time_zone::get_timezone()
        .map_err(|err| log::trace!("cannot look up the system zone: {err}"))
        .ok()
}

fn zone_label(offset: UtcOffset) -> String {
    if offset.is_utc() {
        return String::from("UTC");
    }
    let (hours, minutes, _) = offset.as_hms();
    let sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "UTC{sign}{:02}:{:02}",
        hours.unsigned_abs(),
        minutes.unsigned_abs()
    )
}

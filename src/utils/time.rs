//! IDMEF date-time and NTP stamp conversions.
//!
//! A date-time is read with the grammar `date "T" time ("Z" | sign hh ":" mm)`.
//! The wall-clock part is always interpreted as if it were UTC, and a non-zero
//! offset is kept next to it so the original notation can be written back.

use std::fmt::Write;

use jiff::Timestamp;

use crate::err::ValueError;
use crate::model::Operator;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch.
const NTP_UNIX_OFFSET: i64 = 2_208_988_800;
const NTP_ERA_SECONDS: i64 = 1 << 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDateTime {
    pub utc_millis: i64,
    pub operator: Option<Operator>,
    pub adjusted_time: i64,
}

pub fn parse_date_time(text: &str) -> Result<ParsedDateTime, ValueError> {
    let invalid = |reason: &str| ValueError::InvalidTimestamp {
        value: text.to_owned(),
        reason: reason.to_owned(),
    };

    let time_start = text
        .find(['T', 't'])
        .ok_or_else(|| invalid("missing `T` between date and time"))?;

    let (wall_clock, operator, adjusted_time) = match text.strip_suffix(['Z', 'z']) {
        Some(wall_clock) => (wall_clock, None, 0),
        None => {
            // Only the time part is searched, the date carries its own hyphens.
            let sign_at = text[time_start..]
                .rfind(['+', '-'])
                .map(|pos| time_start + pos)
                .ok_or_else(|| invalid("missing `Z` or UTC offset"))?;

            let (wall_clock, offset) = text.split_at(sign_at);
            let operator = if offset.starts_with('+') {
                Operator::Plus
            } else {
                Operator::Minus
            };
            (wall_clock, Some(operator), parse_offset(&offset[1..])?)
        }
    };

    let instant: Timestamp = format!("{wall_clock}Z")
        .parse()
        .map_err(|e: jiff::Error| invalid(&e.to_string()))?;

    Ok(ParsedDateTime {
        utc_millis: instant.as_millisecond(),
        operator: operator.filter(|_| adjusted_time != 0),
        adjusted_time,
    })
}

fn parse_offset(text: &str) -> Result<i64, ValueError> {
    let invalid = || ValueError::InvalidTimeOffset {
        value: text.to_owned(),
    };

    let (hours, minutes) = text.split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| -> Option<i64> {
        if part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse().ok()
        } else {
            None
        }
    };

    let hours = two_digits(hours).filter(|h| *h < 24).ok_or_else(invalid)?;
    let minutes = two_digits(minutes).filter(|m| *m < 60).ok_or_else(invalid)?;

    Ok(hours * MILLIS_PER_HOUR + minutes * MILLIS_PER_MINUTE)
}

/// Renders the wall-clock instant, followed by `Z` or by the recorded offset.
///
/// Seconds are always present; milliseconds only when non-zero.
pub fn format_date_time(
    utc_millis: i64,
    operator: Option<Operator>,
    adjusted_time: i64,
) -> Result<String, ValueError> {
    let instant =
        Timestamp::from_millisecond(utc_millis).map_err(|e| ValueError::InvalidTimestamp {
            value: utc_millis.to_string(),
            reason: e.to_string(),
        })?;

    let mut out = instant.strftime("%Y-%m-%dT%H:%M:%S").to_string();

    let millis = utc_millis.rem_euclid(1000);
    if millis != 0 {
        let _ = write!(out, ".{millis:03}");
    }

    if adjusted_time == 0 {
        out.push('Z');
    } else {
        let magnitude = adjusted_time.abs();
        if magnitude >= 24 * MILLIS_PER_HOUR || magnitude % MILLIS_PER_MINUTE != 0 {
            return Err(ValueError::InvalidTimeOffset {
                value: format!("{adjusted_time}ms"),
            });
        }
        let hours = magnitude / MILLIS_PER_HOUR;
        let minutes = (magnitude / MILLIS_PER_MINUTE) % 60;
        let sign = operator.unwrap_or(Operator::Plus).symbol();
        let _ = write!(out, "{sign}{hours:02}:{minutes:02}");
    }

    Ok(out)
}

/// Splits an instant into NTP seconds and fraction.
pub fn ntp_parts_from_timestamp(instant: Timestamp) -> (u32, u32) {
    let seconds = (instant.as_second() + NTP_UNIX_OFFSET).rem_euclid(NTP_ERA_SECONDS) as u32;
    let nanos = instant.subsec_nanosecond().max(0) as u64;
    let fraction = ((nanos << 32) / 1_000_000_000) as u32;
    (seconds, fraction)
}

/// Resolves NTP seconds and fraction to an instant.
///
/// Stamps with the high bit clear are taken from the era starting in 2036, which
/// covers the years 1968 to 2104.
pub fn ntp_parts_to_timestamp(seconds: u32, fraction: u32) -> Result<Timestamp, ValueError> {
    let mut ntp_seconds = i64::from(seconds);
    if seconds & 0x8000_0000 == 0 {
        ntp_seconds += NTP_ERA_SECONDS;
    }

    let nanos = ((u64::from(fraction) * 1_000_000_000) >> 32) as i32;
    Timestamp::new(ntp_seconds - NTP_UNIX_OFFSET, nanos).map_err(|e| {
        ValueError::InvalidNtpStamp {
            value: format!("0x{seconds:08x}.0x{fraction:08x}: {e}"),
        }
    })
}

use std::fmt;

use jiff::Timestamp;
use serde::Serialize;

use crate::err::ValueError;
use crate::utils::{
    format_date_time, ntp_parts_from_timestamp, ntp_parts_to_timestamp, parse_date_time,
};

/// Direction of the UTC offset a time was written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
        }
    }
}

/// A validated `0x<8 hex>.0x<8 hex>` NTP timestamp.
///
/// The original spelling is kept, so a stamp is written back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NtpStamp {
    text: String,
    seconds: u32,
    fraction: u32,
}

impl NtpStamp {
    pub fn new(text: &str) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidNtpStamp {
            value: text.to_owned(),
        };

        let (seconds, fraction) = text.split_once('.').ok_or_else(invalid)?;
        let seconds = parse_ntp_half(seconds).ok_or_else(invalid)?;
        let fraction = parse_ntp_half(fraction).ok_or_else(invalid)?;

        Ok(NtpStamp {
            text: text.to_owned(),
            seconds,
            fraction,
        })
    }

    pub fn from_parts(seconds: u32, fraction: u32) -> Self {
        NtpStamp {
            text: format!("0x{seconds:08x}.0x{fraction:08x}"),
            seconds,
            fraction,
        }
    }

    pub fn from_timestamp(instant: Timestamp) -> Self {
        let (seconds, fraction) = ntp_parts_from_timestamp(instant);
        Self::from_parts(seconds, fraction)
    }

    pub fn to_timestamp(&self) -> Result<Timestamp, ValueError> {
        ntp_parts_to_timestamp(self.seconds, self.fraction)
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn fraction(&self) -> u32 {
        self.fraction
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

fn parse_ntp_half(text: &str) -> Option<u32> {
    let digits = text.strip_prefix("0x")?;
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

impl fmt::Display for NtpStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for NtpStamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

/// An IDMEF date-time.
///
/// `utc_millis` holds the wall-clock value read as if it were UTC. When the wire
/// value carried a non-zero offset, `operator` and `adjusted_time` record it so
/// the same notation is written back. `to_timestamp` applies the offset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdmefTime {
    pub utc_millis: i64,
    pub operator: Option<Operator>,
    /// Offset magnitude in milliseconds, `0` for UTC.
    pub adjusted_time: i64,
    pub ntp_stamp: Option<NtpStamp>,
}

impl IdmefTime {
    /// Parses the text content of a time element.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let parsed = parse_date_time(text)?;
        Ok(IdmefTime {
            utc_millis: parsed.utc_millis,
            operator: parsed.operator,
            adjusted_time: parsed.adjusted_time,
            ntp_stamp: None,
        })
    }

    /// A UTC time with a matching NTP stamp, truncated to milliseconds.
    pub fn from_timestamp(instant: Timestamp) -> Self {
        IdmefTime {
            utc_millis: instant.as_millisecond(),
            operator: None,
            adjusted_time: 0,
            ntp_stamp: Some(NtpStamp::from_timestamp(instant)),
        }
    }

    pub fn with_ntp_stamp(mut self, stamp: NtpStamp) -> Self {
        self.ntp_stamp = Some(stamp);
        self
    }

    /// The instant this time denotes once the recorded offset is applied.
    pub fn to_timestamp(&self) -> Result<Timestamp, ValueError> {
        let offset = match self.operator {
            Some(Operator::Minus) => -self.adjusted_time,
            _ => self.adjusted_time,
        };
        let millis = self.utc_millis - offset;
        Timestamp::from_millisecond(millis).map_err(|e| ValueError::InvalidTimestamp {
            value: millis.to_string(),
            reason: e.to_string(),
        })
    }

    /// The wire text: seconds always, milliseconds when non-zero, then `Z` or the offset.
    pub fn to_wire(&self) -> Result<String, ValueError> {
        format_date_time(self.utc_millis, self.operator, self.adjusted_time)
    }
}

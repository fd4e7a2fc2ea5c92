//! Time keeping module for PineTime
//!
//! The clock is a wall-clock reference plus the monotonic time elapsed since
//! the reference was taken.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use embassy_time::Instant;

/// Length of a Current Time Service characteristic value
pub const CTS_LEN: usize = 10;

pub struct TimeReference {
    /// Local clock time in microseconds since the Unix epoch
    epoch_micros: i64,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Reference at boot, before any time is known
    pub const fn boot() -> Self {
        Self {
            epoch_micros: 0,
            instant: Instant::from_ticks(0),
        }
    }

    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime) -> Self {
        Self {
            epoch_micros: time.and_utc().timestamp_micros(),
            instant: Instant::now(),
        }
    }

    /// Create new time reference from Current Time Service data
    ///
    /// Layout: year (u16 LE), month, day, hours, minutes, seconds,
    /// day of week, fractions of 1/256 s, adjust reason.
    pub fn from_cts_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < CTS_LEN {
            return Err(Error::InvalidLength);
        }

        let year = u16::from_le_bytes([bytes[0], bytes[1]]) as i32;
        let month = bytes[2] as u32;
        let day = bytes[3] as u32;
        let hour = bytes[4] as u32;
        let minute = bytes[5] as u32;
        let second = bytes[6] as u32;
        let milli = bytes[8] as u32 * 1000 / 256;

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(Error::InvalidTime)?;
        let time =
            NaiveTime::from_hms_milli_opt(hour, minute, second, milli).ok_or(Error::InvalidTime)?;

        Ok(Self::from_datetime(NaiveDateTime::new(date, time)))
    }
}

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    pub const fn new() -> Self {
        Self {
            reference: TimeReference::boot(),
        }
    }

    /// Get current local time
    pub fn get_time(&self) -> NaiveDateTime {
        let elapsed = Instant::now()
            .duration_since(self.reference.instant)
            .as_micros() as i64;

        DateTime::from_timestamp_micros(self.reference.epoch_micros + elapsed)
            .map(|time| time.naive_utc())
            .unwrap_or_default()
    }

    /// Update time reference
    pub fn set_time(&mut self, reference: TimeReference) {
        self.reference = reference;
    }
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    /// Current Time Service value is too short
    InvalidLength,
    /// Date or time fields out of range
    InvalidTime,
}

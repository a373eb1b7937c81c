// Copyright (c) 2026 Intel Corporation
//
// SPDX-License-Identifier: Apache-2.0 or MIT

//! Certificate validity times.
//!
//! Both ASN.1 time types are accepted:
//! - UTCTime `YYMMDDhhmm[ss]` where the two-digit year always maps to 20YY
//! - GeneralizedTime `YYYYMMDDhhmm[ss]`
//!
//! followed by `Z` or a `+hhmm`/`-hhmm` offset from UTC.
//!
//! Parsing only checks that each component lies in a sane range. Calendar
//! validity (February 30th, hour 24) is checked when a time is converted to
//! an instant, which happens only when validity periods are enforced.

use core::time::Duration;

use crate::error::{EncodingError, Error, Result};
use crate::tlv::{tag, Cursor};

/// Slack allowed before `notBefore`, for clock drift between issuer and verifier.
pub const NOT_BEFORE_GRACE: Duration = Duration::from_secs(120);

const MIN_YEAR: u16 = 2000;
/// Last accepted year, inclusive.
const MAX_YEAR: u16 = 2136;

/// ASN.1 type a [`Time`] was encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    UtcTime,
    GeneralizedTime,
}

/// A decoded certificate time, exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub format: TimeFormat,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset of the written local time from UTC, in minutes
    pub utc_offset_minutes: i16,
}

impl Time {
    /// Instant this time denotes, as a duration since the UNIX epoch.
    pub fn to_unix_duration(&self) -> Result<Duration> {
        let local = der::DateTime::new(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )?
        .unix_duration();
        let offset = Duration::from_secs(u64::from(self.utc_offset_minutes.unsigned_abs()) * 60);
        let utc = if self.utc_offset_minutes >= 0 {
            local.checked_sub(offset)
        } else {
            local.checked_add(offset)
        };
        utc.ok_or(Error::encoding(EncodingError::InvalidTime))
    }
}

/// Certificate validity period.
///
/// ```text
/// Validity ::= SEQUENCE {
///     notBefore      Time,
///     notAfter       Time
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

impl Validity {
    /// Checks `notBefore - grace <= now <= notAfter`.
    pub fn check(&self, now: &der::DateTime) -> Result<()> {
        let now = now.unix_duration();
        let not_before = self.not_before.to_unix_duration()?;
        let not_after = self.not_after.to_unix_duration()?;
        if now.saturating_add(NOT_BEFORE_GRACE) < not_before || now > not_after {
            log::error!("certificate is outside its validity period");
            return Err(Error::ExpiredCertificate);
        }
        Ok(())
    }
}

struct Digits<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Digits<'a> {
    fn byte(&mut self) -> Result<u8> {
        let b = *self
            .bytes
            .get(self.pos)
            .ok_or(Error::encoding(EncodingError::InvalidTime))?;
        self.pos += 1;
        Ok(b)
    }

    fn digit(&mut self) -> Result<u8> {
        match self.byte()? {
            b @ b'0'..=b'9' => Ok(b - b'0'),
            _ => Err(Error::encoding(EncodingError::InvalidTime)),
        }
    }

    fn two(&mut self) -> Result<u8> {
        Ok(self.digit()? * 10 + self.digit()?)
    }

    fn four(&mut self) -> Result<u16> {
        Ok(u16::from(self.two()?) * 100 + u16::from(self.two()?))
    }

    fn next_is_digit(&self) -> bool {
        matches!(self.bytes.get(self.pos), Some(b'0'..=b'9'))
    }
}

fn in_range<T: PartialOrd>(value: T, low: T, high: T) -> Result<T> {
    if value < low || value > high {
        return Err(Error::encoding(EncodingError::InvalidTime));
    }
    Ok(value)
}

/// Read one UTCTime or GeneralizedTime element.
pub fn parse_time(cursor: &mut Cursor<'_>) -> Result<Time> {
    let found = cursor
        .peek_tag()
        .ok_or(Error::encoding(EncodingError::UnexpectedEnd))?;
    let format = match found {
        tag::UTC_TIME => TimeFormat::UtcTime,
        tag::GENERALIZED_TIME => TimeFormat::GeneralizedTime,
        other => return Err(Error::unexpected_tag(tag::UTC_TIME, other)),
    };
    let value = cursor.read(found)?;
    let mut digits = Digits {
        bytes: value,
        pos: 0,
    };

    let year = match format {
        TimeFormat::UtcTime => MIN_YEAR + u16::from(digits.two()?),
        TimeFormat::GeneralizedTime => digits.four()?,
    };
    let month = digits.two()?;
    let day = digits.two()?;
    let hour = digits.two()?;
    let minute = digits.two()?;
    let second = if digits.next_is_digit() {
        digits.two()?
    } else {
        0
    };

    let utc_offset_minutes = match digits.byte()? {
        b'Z' => 0,
        sign @ (b'+' | b'-') => {
            let hours = in_range(digits.two()?, 0, 24)?;
            let minutes = in_range(digits.two()?, 0, 60)?;
            let offset = i16::from(hours) * 60 + i16::from(minutes);
            if sign == b'-' {
                -offset
            } else {
                offset
            }
        }
        _ => return Err(Error::encoding(EncodingError::InvalidTime)),
    };

    if digits.pos != value.len() {
        return Err(Error::encoding(EncodingError::InvalidTime));
    }

    Ok(Time {
        format,
        year: in_range(year, MIN_YEAR, MAX_YEAR)?,
        month: in_range(month, 1, 12)?,
        day: in_range(day, 1, 31)?,
        hour: in_range(hour, 0, 24)?,
        minute: in_range(minute, 0, 60)?,
        second: in_range(second, 0, 60)?,
        utc_offset_minutes,
    })
}

/// Read the Validity SEQUENCE.
pub fn parse_validity(cursor: &mut Cursor<'_>) -> Result<Validity> {
    let mut seq = cursor.read_nested(tag::SEQUENCE)?;
    let not_before = parse_time(&mut seq)?;
    let not_after = parse_time(&mut seq)?;
    seq.finish()?;
    Ok(Validity {
        not_before,
        not_after,
    })
}

/// Get current system time as a DateTime.
#[cfg(feature = "std")]
pub fn current_time() -> Result<der::DateTime> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_err(|_| Error::Internal("system clock is before the UNIX epoch"))?;
    Ok(der::DateTime::from_unix_duration(now)?)
}

//! Post deadlines.
//!
//! Clients send either a calendar date (`2025-03-01`) or an RFC 3339
//! timestamp. Both are normalized to a UTC timestamp rendered as
//! `YYYY-MM-DDTHH:MM:SSZ`, whose lexical order is its chronological order.
//! Store backends sort the raw JSON string, so that property matters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const STORED: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Deadline must be a date (YYYY-MM-DD) or an RFC 3339 timestamp, got {0:?}")]
pub struct DeadlineError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(OffsetDateTime);

impl Deadline {
    pub fn parse(raw: &str) -> Result<Self, DeadlineError> {
        let trimmed = raw.trim();

        let at = if let Ok(at) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            at.to_offset(UtcOffset::UTC)
        } else if let Ok(date) = Date::parse(trimmed, DATE_ONLY) {
            date.midnight().assume_utc()
        } else {
            return Err(DeadlineError(raw.to_string()));
        };

        // Four-digit years only; anything else would break lexical ordering.
        if !(0..=9999).contains(&at.year()) {
            return Err(DeadlineError(raw.to_string()));
        }

        // Sub-second precision is not part of the stored form.
        Ok(Self(at.replace_nanosecond(0).map_err(|_| DeadlineError(raw.to_string()))?))
    }
}

impl FromStr for Deadline {
    type Err = DeadlineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.format(STORED).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Deadline::parse(&raw).map_err(serde::de::Error::custom)
    }
}

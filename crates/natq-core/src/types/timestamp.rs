use crate::{traits::FieldValue, types::Date, value::Value};
use derive_more::{Add, AddAssign, Display, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

///
/// Timestamp
/// (in seconds)
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    Sub,
    SubAssign,
)]
#[repr(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(u64::MIN);
    pub const MIN: Self = Self(u64::MIN);
    pub const MAX: Self = Self(u64::MAX);

    /// Construct from seconds.
    #[must_use]
    pub const fn from_seconds(secs: u64) -> Self {
        Self(secs)
    }

    /// Construct from milliseconds (truncate to seconds).
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms / 1_000)
    }

    #[allow(clippy::cast_sign_loss)]
    pub fn parse_rfc3339(s: &str) -> Result<Self, String> {
        let dt = OffsetDateTime::parse(s, &Rfc3339)
            .map_err(|e| format!("timestamp parse error: {e}"))?;
        let ts = dt.unix_timestamp();
        if ts < 0 {
            return Err("timestamp before epoch".to_string());
        }

        Ok(Self(ts as u64))
    }

    pub fn parse_flexible(s: &str) -> Result<Self, String> {
        // Try integer seconds
        if let Ok(n) = s.parse::<u64>() {
            return Ok(Self(n));
        }

        // Try RFC3339
        Self::parse_rfc3339(s)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Calendar date of this instant (UTC).
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn date(self) -> Date {
        Date::from_days((self.0 / SECS_PER_DAY) as i32)
    }

    /// Returns the year component (e.g. 2025)
    #[must_use]
    pub fn year(self) -> i32 {
        self.date().year()
    }

    /// Returns the month component (1–12)
    #[must_use]
    pub fn month(self) -> u8 {
        self.date().month()
    }

    /// Returns the day-of-month component (1–31)
    #[must_use]
    pub fn day(self) -> u8 {
        self.date().day()
    }

    /// Returns the day of the week, 1 (Sunday) through 7 (Saturday).
    #[must_use]
    pub fn week_day(self) -> u8 {
        self.date().week_day()
    }

    /// Returns the hour component (0–23)
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn hour(self) -> u8 {
        ((self.0 % SECS_PER_DAY) / SECS_PER_HOUR) as u8
    }

    /// Returns the minute component (0–59)
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn minute(self) -> u8 {
        ((self.0 % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8
    }

    /// Returns the second component (0–59)
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn second(self) -> u8 {
        (self.0 % SECS_PER_MINUTE) as u8
    }
}

impl FieldValue for Timestamp {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<u64> for Timestamp {
    fn from(u: u64) -> Self {
        Self(u)
    }
}

///
/// TESTS
///

use crate::{traits::FieldValue, value::Value};
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::{
    str::FromStr,
    sync::{LazyLock, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use thiserror::Error as ThisError;
use ulid::Ulid as WrappedUlid;

///
/// UlidError
///

#[derive(Debug, ThisError)]
pub enum UlidError {
    #[error("invalid ulid string")]
    InvalidString,

    #[error("monotonic error - overflow")]
    GeneratorOverflow,
}

///
/// Ulid
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Ulid(WrappedUlid);

impl Ulid {
    pub const MIN: Self = Self::from_bytes([0x00; 16]);
    pub const MAX: Self = Self::from_bytes([0xFF; 16]);

    #[must_use]
    pub const fn nil() -> Self {
        Self(WrappedUlid::nil())
    }

    #[must_use]
    pub const fn from_parts(timestamp_ms: u64, random: u128) -> Self {
        Self(WrappedUlid::from_parts(timestamp_ms, random))
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(WrappedUlid::from_bytes(bytes))
    }

    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(WrappedUlid::from_bytes(n.to_be_bytes()))
    }

    /// Generate a ULID with the current timestamp and a fresh random value.
    /// Falls back to nil on generator overflow.
    #[must_use]
    pub fn generate() -> Self {
        Self::try_generate().unwrap_or_else(|_| Self::nil())
    }

    /// Fallible ULID generation preserving error type (e.g., overflow).
    pub fn try_generate() -> Result<Self, UlidError> {
        let mut generator = GENERATOR.lock().expect("ULID generator mutex poisoned");

        generator.generate()
    }

    /// Monotonic increment; returns `None` on overflow.
    #[must_use]
    pub fn increment(&self) -> Option<Self> {
        self.0.increment().map(Self)
    }
}

impl FieldValue for Ulid {
    fn to_value(&self) -> Value {
        Value::Ulid(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Ulid(v) => Some(*v),
            _ => None,
        }
    }
}

impl Default for Ulid {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<WrappedUlid> for Ulid {
    fn from(ulid: WrappedUlid) -> Self {
        Self(ulid)
    }
}

impl FromStr for Ulid {
    type Err = UlidError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        WrappedUlid::from_string(encoded)
            .map(Self)
            .map_err(|_| UlidError::InvalidString)
    }
}

impl Serialize for Ulid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ulid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(|_| serde::de::Error::custom(format!("invalid ulid: {s}")))
    }
}

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state to make sure key order is maintained
///

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::new()));

///
/// Generator
///
/// hacked from <https://github.com/dylanhart/ulid-rs/blob/master/src/generator.rs>
/// as the ulid crate doesn't support a no-std generator
///

struct Generator {
    previous: Ulid,
    state: u64,
}

impl Generator {
    fn new() -> Self {
        Self {
            previous: Ulid::nil(),
            state: now_nanos(),
        }
    }

    /// Monotonic ULID generation; increments within the same millisecond.
    fn generate(&mut self) -> Result<Ulid, UlidError> {
        let last_ts = self.previous.timestamp_ms();
        let ts = now_millis();

        // maybe time went backward, or it is the same ms.
        // increment instead of generating a new random so that it is monotonic
        if ts <= last_ts {
            if let Some(next) = self.previous.increment() {
                self.previous = next;

                return Ok(self.previous);
            }

            return Err(UlidError::GeneratorOverflow);
        }

        let rand = self.next_u128();
        let ulid = Ulid::from_parts(ts, rand);

        self.previous = ulid;

        Ok(ulid)
    }

    fn next_u128(&mut self) -> u128 {
        let hi = splitmix64(&mut self.state);
        let lo = splitmix64(&mut self.state);

        (u128::from(hi) << 64) | u128::from(lo)
    }
}

// splitmix64; fast seedable randomness for key material, not cryptography.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);

    z ^ (z >> 31)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_nanos() & u128::from(u64::MAX)).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

///
/// TESTS
///

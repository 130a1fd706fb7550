//! System-assigned record identifier.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Primary key of a stored QR record.
///
/// Assigned by the store on insert (a `BIGSERIAL` in PostgreSQL, a
/// monotonically increasing counter in memory) and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wraps a raw key value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw key value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_path_segment() {
        assert_eq!("42".parse::<RecordId>().ok(), Some(RecordId::new(42)));
    }

    #[test]
    fn rejects_non_numeric_segment() {
        assert!("abc".parse::<RecordId>().is_err());
        assert!("".parse::<RecordId>().is_err());
        assert!("1.5".parse::<RecordId>().is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&RecordId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));
    }
}

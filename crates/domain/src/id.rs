//! External light identifier.
//!
//! The bridge API addresses lights by their 1-based position in the
//! registry (`/api/{user}/lights/1`). [`LightId`] can only hold a positive
//! value; whether it names an existing light is decided by the registry.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ResolutionError;

/// 1-based identifier of a light as seen by API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightId(NonZeroU64);

impl LightId {
    /// Build an identifier from its numeric value, `None` for zero.
    #[must_use]
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    /// Identifier of the light stored at the 0-based `index`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        let value = u64::try_from(index)
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        // `saturating_add(1)` on an unsigned value is at least 1.
        Self(NonZeroU64::new(value).unwrap_or(NonZeroU64::MIN))
    }

    /// The numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The 0-based storage index, `None` when it does not fit in `usize`.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0.get() - 1).ok()
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LightId {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .parse()
            .map_err(|_| ResolutionError::NotANumber(s.to_string()))?;
        u64::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(ResolutionError::NotPositive(value))
    }
}

impl Serialize for LightId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_positive_identifier() {
        let id: LightId = "3".parse().unwrap();
        assert_eq!(id.get(), 3);
        assert_eq!(id.index(), Some(2));
    }

    #[test]
    fn should_reject_zero() {
        assert_eq!(
            "0".parse::<LightId>(),
            Err(ResolutionError::NotPositive(0))
        );
    }

    #[test]
    fn should_reject_negative() {
        assert_eq!(
            "-2".parse::<LightId>(),
            Err(ResolutionError::NotPositive(-2))
        );
    }

    #[test]
    fn should_reject_non_numeric() {
        assert_eq!(
            "kitchen".parse::<LightId>(),
            Err(ResolutionError::NotANumber("kitchen".to_string()))
        );
        assert!(matches!(
            "".parse::<LightId>(),
            Err(ResolutionError::NotANumber(_))
        ));
        assert!(matches!(
            "1.5".parse::<LightId>(),
            Err(ResolutionError::NotANumber(_))
        ));
    }

    #[test]
    fn should_map_index_to_one_based_identifier() {
        assert_eq!(LightId::from_index(0).get(), 1);
        assert_eq!(LightId::from_index(9).get(), 10);
    }

    #[test]
    fn should_display_and_serialize_as_decimal_string() {
        let id = LightId::new(12).unwrap();
        assert_eq!(id.to_string(), "12");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
    }
}

//! Core type definitions for GameDex.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a game as returned by the search provider.
///
/// External IDs are the local unique key of the catalog and never change
/// once an entry exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalId(pub u64);

impl ExternalId {
    /// Creates a new external ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rawg:{}", self.0)
    }
}

/// Identifier assigned by the remote catalog service on first persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(pub u64);

impl RemoteId {
    /// Creates a new remote ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A star rating stored on the doubled scale.
///
/// Five stars map to `0, 2, 4, 6, 8, 10`. Odd values and anything above
/// [`Rating::MAX`] cannot be constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// The highest doubled value.
    pub const MAX: u8 = 10;

    /// The highest star count.
    pub const MAX_STARS: u8 = 5;

    /// An unrated entry.
    pub const ZERO: Rating = Rating(0);

    /// Creates a rating from a doubled value.
    pub fn new(value: u8) -> CoreResult<Self> {
        if value > Self::MAX || value % 2 != 0 {
            return Err(CoreError::InvalidRating { value });
        }
        Ok(Self(value))
    }

    /// Creates a rating from a star count.
    pub fn from_stars(stars: u8) -> CoreResult<Self> {
        if stars > Self::MAX_STARS {
            return Err(CoreError::InvalidStars { stars });
        }
        Ok(Self(stars * 2))
    }

    /// Returns the doubled value sent over the wire.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the number of filled stars.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self.0 / 2
    }
}

impl TryFrom<u8> for Rating {
    type Error = CoreError;

    fn try_from(value: u8) -> CoreResult<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Rating::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = usize::from(self.stars());
        let empty = usize::from(Self::MAX_STARS) - filled;
        write!(f, "{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rating_accepts_doubled_scale() {
        for value in [0u8, 2, 4, 6, 8, 10] {
            assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }

    #[test]
    fn rating_rejects_odd_and_out_of_range() {
        assert_eq!(Rating::new(3), Err(CoreError::InvalidRating { value: 3 }));
        assert_eq!(Rating::new(12), Err(CoreError::InvalidRating { value: 12 }));
        assert!(Rating::from_stars(6).is_err());
    }

    #[test]
    fn rating_stars() {
        let rating = Rating::from_stars(4).unwrap();
        assert_eq!(rating.value(), 8);
        assert_eq!(rating.stars(), 4);
        assert_eq!(rating.to_string(), "★★★★☆");
    }

    #[test]
    fn rating_deserialize_validates() {
        let rating: Rating = serde_json::from_str("6").unwrap();
        assert_eq!(rating.value(), 6);
        assert!(serde_json::from_str::<Rating>("7").is_err());
    }

    #[test]
    fn external_id_display() {
        assert_eq!(ExternalId::new(42).to_string(), "rawg:42");
        assert_eq!(RemoteId::new(900).to_string(), "900");
    }

    proptest! {
        #[test]
        fn any_constructed_rating_is_on_scale(value in any::<u8>()) {
            if let Ok(rating) = Rating::new(value) {
                prop_assert!(rating.value() <= Rating::MAX);
                prop_assert_eq!(rating.value() % 2, 0);
            }
        }

        #[test]
        fn stars_map_onto_scale(stars in 0u8..=5) {
            let rating = Rating::from_stars(stars).unwrap();
            prop_assert_eq!(rating.stars(), stars);
            prop_assert!([0u8, 2, 4, 6, 8, 10].contains(&rating.value()));
        }
    }
}

//! Spot domain types and the grouping/filter engine
//!
//! This module handles:
//! - The `Spot` record and its creation payload
//! - Coordinate validation
//! - Partitioning spots into co-located groups
//! - Comment-based filtering and tag suggestions

pub mod filter;
pub mod group;

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Bit-level grouping key. Two spots land in the same group iff their
    /// coordinate pairs are exactly equal; -0.0 is folded into 0.0 so the
    /// key agrees with `==` on f64.
    pub(crate) fn key(&self) -> (u64, u64) {
        fn bits(v: f64) -> u64 {
            if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
        }
        (bits(self.lat), bits(self.lng))
    }
}

/// A diary entry pinned to a map location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    /// Unique stable identifier
    pub id: String,

    /// Display name
    pub title: String,

    /// Short free-text tag/caption, also the filter key
    pub comment: String,

    /// Long-form text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL of an uploaded image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub latitude: f64,
    pub longitude: f64,

    /// Id of the user who created the spot
    pub owner_id: String,

    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

impl Spot {
    /// The spot's coordinate pair
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Payload for creating a new spot
///
/// Deserialized at the API boundary; `validate` returns a tagged
/// `InvalidInput` instead of panicking on bad data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotInput {
    pub title: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl SpotInput {
    /// Validate the payload
    ///
    /// Title must be non-empty after trimming; coordinates must be in range.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::error::Error::InvalidInput(
                "Title must not be empty".to_string(),
            ));
        }
        Coordinates::new(self.lat, self.lng)
            .validate()
            .map_err(|e| crate::error::Error::InvalidInput(e.to_string()))?;
        Ok(())
    }
}

/// Derive the board shown on the map
///
/// Applies the active filter, partitions the result into co-located groups,
/// and counts tag suggestions over the *unfiltered* list so the top tags do
/// not shift while the user narrows the map.
pub fn derive(
    spots: &[Spot],
    active_filter: Option<&str>,
) -> (Vec<group::SpotGroup>, Vec<filter::TagSuggestion>) {
    let filtered = filter::filter(spots, active_filter);
    let groups = group::group(&filtered);
    let suggestions = filter::suggestions(spots);
    (groups, suggestions)
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::Spot;
    use chrono::{TimeZone, Utc};

    /// Build a spot at a fixed coordinate with the given comment
    pub(crate) fn spot_at(id: &str, lat: f64, lng: f64, comment: &str) -> Spot {
        Spot {
            id: id.to_string(),
            title: format!("spot {}", id),
            comment: comment.to_string(),
            description: None,
            image_url: None,
            latitude: lat,
            longitude: lng,
            owner_id: "u1".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(Coordinates::new(35.6895, 139.6917).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(-91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, 181.0).validate().is_err());
        assert!(Coordinates::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_coordinate_key_negative_zero() {
        assert_eq!(
            Coordinates::new(0.0, -0.0).key(),
            Coordinates::new(-0.0, 0.0).key()
        );
    }

    #[test]
    fn test_input_requires_title() {
        let input = SpotInput {
            title: "  ".to_string(),
            comment: "cafe".to_string(),
            description: None,
            image_url: None,
            lat: 10.0,
            lng: 20.0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_input_rejects_out_of_range() {
        let input = SpotInput {
            title: "Pier".to_string(),
            comment: "view".to_string(),
            description: None,
            image_url: None,
            lat: 123.0,
            lng: 20.0,
        };
        assert!(matches!(
            input.validate(),
            Err(crate::error::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_derive_filters_groups_but_not_suggestions() {
        use super::tests_support::spot_at;

        let spots = vec![
            spot_at("1", 10.0, 20.0, "cafe"),
            spot_at("2", 10.0, 20.0, "cafe"),
            spot_at("3", 30.0, 40.0, "bar"),
        ];

        let (groups, suggestions) = derive(&spots, Some("bar"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].spots[0].id, "3");

        // Suggestions still reflect the full corpus
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].tag, "cafe");
        assert_eq!(suggestions[0].count, 2);
    }

    #[test]
    fn test_input_allows_empty_comment() {
        let input = SpotInput {
            title: "Pier".to_string(),
            comment: String::new(),
            description: None,
            image_url: None,
            lat: 10.0,
            lng: 20.0,
        };
        assert!(input.validate().is_ok());
    }
}

//! Coordinate grouping
//!
//! Partitions a flat spot list into groups of exactly co-located spots.
//! Groups are derived on every pass and never persisted; their identity is
//! positional in the returned list.

use super::{Coordinates, Spot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A set of spots sharing one exact coordinate pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotGroup {
    /// The shared coordinate
    pub coordinate: Coordinates,

    /// Member spots, in input order
    pub spots: Vec<Spot>,
}

impl SpotGroup {
    /// Number of spots in the group
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Groups are never constructed empty, but keep the pair complete
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

/// Partition spots by exact coordinate equality
///
/// Group order follows the first occurrence of each distinct coordinate in
/// the input; within a group, spots keep input order. Every spot belongs to
/// exactly one group.
pub fn group(spots: &[Spot]) -> Vec<SpotGroup> {
    let mut groups: Vec<SpotGroup> = Vec::new();
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();

    for spot in spots {
        let coordinate = spot.coordinates();
        match index.get(&coordinate.key()) {
            Some(&i) => groups[i].spots.push(spot.clone()),
            None => {
                index.insert(coordinate.key(), groups.len());
                groups.push(SpotGroup {
                    coordinate,
                    spots: vec![spot.clone()],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spot::tests_support::spot_at;

    #[test]
    fn test_empty_list() {
        assert!(group(&[]).is_empty());
    }

    #[test]
    fn test_scenario_two_groups() {
        let spots = vec![
            spot_at("1", 10.0, 20.0, "cafe"),
            spot_at("2", 10.0, 20.0, "cafe"),
            spot_at("3", 30.0, 40.0, "bar"),
        ];

        let groups = group(&spots);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].spots[0].id, "1");
        assert_eq!(groups[0].spots[1].id, "2");
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1].spots[0].id, "3");
    }

    #[test]
    fn test_group_order_is_first_occurrence() {
        let spots = vec![
            spot_at("a", 30.0, 40.0, "bar"),
            spot_at("b", 10.0, 20.0, "cafe"),
            spot_at("c", 30.0, 40.0, "bar"),
        ];

        let groups = group(&spots);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].coordinate, Coordinates::new(30.0, 40.0));
        assert_eq!(groups[0].spots[0].id, "a");
        assert_eq!(groups[0].spots[1].id, "c");
        assert_eq!(groups[1].spots[0].id, "b");
    }

    #[test]
    fn test_partition_is_exact() {
        let spots: Vec<_> = (0..20)
            .map(|i| spot_at(&i.to_string(), (i % 4) as f64, (i % 3) as f64, "t"))
            .collect();

        let groups = group(&spots);

        // Union of members equals the input set
        let mut ids: Vec<String> = groups
            .iter()
            .flat_map(|g| g.spots.iter().map(|s| s.id.clone()))
            .collect();
        ids.sort();
        let mut expected: Vec<String> = spots.iter().map(|s| s.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);

        // Every member shares the group coordinate, and no coordinate
        // appears in two groups
        let mut seen = std::collections::HashSet::new();
        for g in &groups {
            assert!(!g.is_empty());
            assert!(seen.insert(g.coordinate.key()));
            for s in &g.spots {
                assert_eq!(s.coordinates().key(), g.coordinate.key());
            }
        }
    }

    #[test]
    fn test_nearby_but_unequal_stays_apart() {
        let spots = vec![
            spot_at("1", 10.0, 20.0, "cafe"),
            spot_at("2", 10.000001, 20.0, "cafe"),
        ];
        assert_eq!(group(&spots).len(), 2);
    }
}

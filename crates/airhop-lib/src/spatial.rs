//! Static KD-tree over airport coordinates.
//!
//! The tree is built once from an ordered slice of locations and answers
//! circular region queries in degree space. Results are positional indices
//! into the slice the index was built from, so callers keep that slice around
//! to translate hits back into airports.
//!
//! A kiddo leaf cannot split more than `BUCKET_SIZE` items at exactly the
//! same point, so each distinct coordinate is inserted once and the tree item
//! refers to the group of input positions sharing it.

use std::collections::HashMap;

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;

use crate::geo::Location;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Longitude span of the plane the tree is built over.
const FULL_TURN_DEGREES: f64 = 360.0;

/// Two-dimensional (latitude, longitude) index returning input positions.
pub struct SpatialIndex {
    /// Item type is a slot in `groups`.
    tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
    /// Input positions per distinct coordinate.
    groups: Vec<Vec<usize>>,
    len: usize,
}

impl SpatialIndex {
    /// Build the index from locations in input order.
    ///
    /// Locations with a non-finite coordinate are counted but never returned.
    pub fn build<I>(locations: I) -> Self
    where
        I: IntoIterator<Item = Location>,
    {
        let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut slots: HashMap<[u64; 2], usize> = HashMap::new();
        let mut len = 0;

        for (position, location) in locations.into_iter().enumerate() {
            len += 1;
            let point = [location.latitude, location.longitude];
            if !point.iter().all(|coordinate| coordinate.is_finite()) {
                continue;
            }

            // Adding zero folds -0.0 into 0.0 so both share a slot.
            let key = point.map(|coordinate| (coordinate + 0.0).to_bits());
            let slot = *slots.entry(key).or_insert_with(|| {
                let slot = groups.len();
                tree.add(&point, slot);
                groups.push(Vec::new());
                slot
            });
            groups[slot].push(position);
        }

        Self { tree, groups, len }
    }

    /// Number of indexed locations.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Positions of every location within `radius_degrees` of `center`.
    ///
    /// Circles that cross the ±180° meridian are also queried at the
    /// longitude-shifted centre so neighbours across the date line are found.
    /// The returned positions are sorted and unique.
    pub fn within(&self, center: Location, radius_degrees: f64) -> Vec<usize> {
        if radius_degrees < 0.0 || self.is_empty() {
            return Vec::new();
        }

        let squared_radius = radius_degrees * radius_degrees;
        let mut positions = self.query(center.latitude, center.longitude, squared_radius);

        if center.longitude - radius_degrees < -180.0 {
            positions.extend(self.query(
                center.latitude,
                center.longitude + FULL_TURN_DEGREES,
                squared_radius,
            ));
        }
        if center.longitude + radius_degrees > 180.0 {
            positions.extend(self.query(
                center.latitude,
                center.longitude - FULL_TURN_DEGREES,
                squared_radius,
            ));
        }

        positions.sort_unstable();
        positions.dedup();
        positions
    }

    fn query(&self, latitude: f64, longitude: f64, squared_radius: f64) -> Vec<usize> {
        self.tree
            .within::<SquaredEuclidean>(&[latitude, longitude], squared_radius)
            .into_iter()
            .flat_map(|neighbour| self.groups[neighbour.item].iter().copied())
            .collect()
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.len)
            .field("points", &self.groups.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(points: &[(f64, f64)]) -> SpatialIndex {
        SpatialIndex::build(
            points
                .iter()
                .map(|&(latitude, longitude)| Location::new(latitude, longitude)),
        )
    }

    #[test]
    fn test_build_empty() {
        let index = SpatialIndex::build(Vec::<Location>::new());
        assert!(index.is_empty());
        assert!(index.within(Location::new(0.0, 0.0), 10.0).is_empty());
    }

    #[test]
    fn test_within_returns_input_positions() {
        let index = index(&[(0.0, 0.0), (0.5, 0.5), (5.0, 5.0), (0.0, -0.9)]);
        assert_eq!(index.len(), 4);

        let hits = index.within(Location::new(0.0, 0.0), 1.0);
        assert_eq!(hits, vec![0, 1, 3]);
    }

    #[test]
    fn test_negative_radius_is_empty() {
        let index = index(&[(0.0, 0.0)]);
        assert!(index.within(Location::new(0.0, 0.0), -1.0).is_empty());
    }

    #[test]
    fn test_within_wraps_the_antimeridian() {
        // Fiji-ish pair straddling the date line.
        let index = index(&[(-17.0, 179.8), (-17.0, -179.9), (-17.0, 170.0)]);

        let east = index.within(Location::new(-17.0, 179.8), 1.0);
        assert_eq!(east, vec![0, 1]);

        let west = index.within(Location::new(-17.0, -179.9), 1.0);
        assert_eq!(west, vec![0, 1]);
    }

    #[test]
    fn test_duplicate_coordinates_are_all_returned() {
        let index = index(&[(1.0, 1.0); 9]);
        let hits = index.within(Location::new(1.0, 1.0), 0.5);
        assert_eq!(hits, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_more_identical_coordinates_than_a_bucket_holds() {
        let mut points = vec![(0.0, 0.0); 100];
        points.push((0.25, 0.25));
        points.push((-0.0, 0.0));
        let index = index(&points);
        assert_eq!(index.len(), 102);

        let hits = index.within(Location::new(0.0, 0.0), 0.1);
        let mut expected: Vec<usize> = (0..100).collect();
        expected.push(101);
        assert_eq!(hits, expected);

        let wide = index.within(Location::new(0.0, 0.0), 1.0);
        assert_eq!(wide, (0..102).collect::<Vec<_>>());
    }

    #[test]
    fn test_non_finite_locations_are_never_returned() {
        let index = index(&[(f64::NAN, 0.0), (0.0, f64::INFINITY), (0.0, 0.0)]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.within(Location::new(0.0, 0.0), 1000.0), vec![2]);
    }
}

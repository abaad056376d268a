//! Sparse hash grid for neighbor queries among patrolling drones

use ahash::AHashMap;

use crate::core::types::{DroneId, LngLat, EPSILON};

/// Sparse hash grid for O(1) neighbor queries
///
/// With a cell size equal to the interaction radius, the 3x3 neighborhood
/// of a cell holds every drone that can be within that radius.
pub struct SparseHashGrid {
    cell_size: f64,
    cells: AHashMap<(i64, i64), Vec<(DroneId, LngLat)>>,
}

impl SparseHashGrid {
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(EPSILON),
            cells: AHashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    fn cell_coord(&self, pos: LngLat) -> (i64, i64) {
        (
            (pos.lng / self.cell_size).floor() as i64,
            (pos.lat / self.cell_size).floor() as i64,
        )
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, drone: DroneId, pos: LngLat) {
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push((drone, pos));
    }

    /// Query all drones in neighboring cells (3x3 neighborhood)
    pub fn query_neighbors(&self, pos: LngLat) -> impl Iterator<Item = (DroneId, LngLat)> + '_ {
        let (cx, cy) = self.cell_coord(pos);

        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                self.cells
                    .get(&(cx + dx, cy + dy))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }

    /// Drones strictly closer than `radius` to `center`, with their distance
    pub fn query_radius(&self, center: LngLat, radius: f64) -> Vec<(DroneId, LngLat, f64)> {
        self.query_neighbors(center)
            .filter_map(|(drone, pos)| {
                let distance = center.distance(&pos);
                (distance < radius).then_some((drone, pos, distance))
            })
            .collect()
    }

    /// Rebuild grid from positions
    pub fn rebuild(&mut self, drones: impl Iterator<Item = (DroneId, LngLat)>) {
        self.clear();
        for (drone, pos) in drones {
            self.insert(drone, pos);
        }
    }
}

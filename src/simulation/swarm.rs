//! Swarm spacing field
//!
//! Spreads patrolling drones over the patrol area using only local, pairwise
//! repulsion. Every candidate position is computed from the same snapshot of
//! the previous tick and committed together afterwards, so the result does
//! not depend on iteration order.

use std::f64::consts::TAU;

use ordered_float::OrderedFloat;
use rand::Rng;

use crate::core::config::SwarmConfig;
use crate::core::types::{DroneId, LngLat, EPSILON};
use crate::fleet::{DroneMode, Fleet};
use crate::spatial::{PatrolArea, SparseHashGrid};

/// Outcome of one spacing update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpacingReport {
    pub patrolling: usize,
    pub desired_spacing: f64,
    /// Drones whose candidate left the polygon and were pulled toward the centroid
    pub fallbacks: usize,
}

/// Target inter-drone distance for `patrolling` drones in `area`
///
/// Area is estimated from the bounding box; with fewer than two drones
/// there is nothing to space out and the configured default applies.
pub fn desired_spacing(area: &PatrolArea, patrolling: usize, config: &SwarmConfig) -> f64 {
    if patrolling < 2 {
        return config.default_spacing;
    }
    let area = area.bounding_area().max(EPSILON);
    config.spacing_factor * (area / patrolling as f64).sqrt()
}

/// Reposition every patrolling drone for one tick of `dt` seconds
pub fn apply<R: Rng>(
    fleet: &mut Fleet,
    area: &PatrolArea,
    config: &SwarmConfig,
    dt: f64,
    rng: &mut R,
) -> SpacingReport {
    let Some(centroid) = area.centroid() else {
        return SpacingReport::default();
    };

    // Read-only view of the previous tick
    let snapshot: Vec<(DroneId, LngLat)> = fleet
        .iter()
        .filter(|d| d.mode == DroneMode::Patrol)
        .map(|d| (d.id, d.position))
        .collect();
    if snapshot.is_empty() {
        return SpacingReport::default();
    }

    let desired = desired_spacing(area, snapshot.len(), config);
    let cutoff = config.cutoff_factor * desired;
    let max_step = config.max_speed * dt;

    let mut grid = SparseHashGrid::new(cutoff);
    grid.rebuild(snapshot.iter().copied());

    let mut fallbacks = 0;
    let mut next = Vec::with_capacity(snapshot.len());
    for &(id, position) in &snapshot {
        let push = repulsion(id, position, &grid, cutoff, config.neighbor_count)
            * (config.repulsion_gain * desired);
        let wobble = jitter(rng, config.jitter * max_step);
        let pull = (centroid - position) * (config.centroid_gain * dt);

        let step = (push + wobble + pull).clamp_length(max_step);
        let candidate = position + step;

        if area.contains(candidate) {
            next.push((id, candidate));
        } else {
            fallbacks += 1;
            next.push((id, position.lerp(&centroid, 0.5)));
        }
    }

    for (id, position) in next {
        if let Some(drone) = fleet.get_mut(id) {
            drone.position = position;
        }
    }

    SpacingReport {
        patrolling: snapshot.len(),
        desired_spacing: desired,
        fallbacks,
    }
}

/// Sum of unit vectors away from the `k` nearest neighbors inside `cutoff`,
/// each weighted linearly from 1 (touching) to 0 (at the cutoff)
fn repulsion(id: DroneId, position: LngLat, grid: &SparseHashGrid, cutoff: f64, k: usize) -> LngLat {
    let mut neighbors = grid.query_radius(position, cutoff);
    neighbors.retain(|(other, _, _)| *other != id);
    neighbors.sort_unstable_by_key(|(other, _, distance)| (OrderedFloat(*distance), *other));
    neighbors.truncate(k);

    neighbors
        .iter()
        .fold(LngLat::default(), |acc, &(_, other, distance)| {
            // Coincident drones have no direction to push along; jitter separates them
            if distance <= EPSILON {
                return acc;
            }
            let weight = (cutoff - distance) / cutoff;
            acc + (position - other) * (weight / distance)
        })
}

/// Uniform direction, magnitude uniform in [0, magnitude]
fn jitter<R: Rng>(rng: &mut R, magnitude: f64) -> LngLat {
    if magnitude <= 0.0 {
        return LngLat::default();
    }
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen::<f64>() * magnitude;
    LngLat::new(angle.cos() * radius, angle.sin() * radius)
}

//! Randomized suspicious-activity reports from patrolling drones
//!
//! Each patrolling drone reports independently as a Poisson process with
//! the configured rate. No drone is singled out; which drones report is
//! decided entirely by the injected random source.

use rand::Rng;

use crate::core::types::{DroneId, LngLat};
use crate::fleet::{DroneMode, Fleet};

/// A report raised this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sighting {
    pub drone_id: DroneId,
    pub position: LngLat,
}

/// Probability of at least one report within `dt` seconds
pub fn report_probability(rate: f64, dt: f64) -> f64 {
    if rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    1.0 - (-rate * dt).exp()
}

/// Roll for a report from every patrolling drone, in id order
pub fn roll<R: Rng>(fleet: &Fleet, rate: f64, dt: f64, rng: &mut R) -> Vec<Sighting> {
    let p = report_probability(rate, dt);
    if p <= 0.0 {
        return Vec::new();
    }

    fleet
        .iter()
        .filter(|d| d.mode == DroneMode::Patrol)
        .filter(|_| rng.gen::<f64>() < p)
        .map(|d| Sighting { drone_id: d.id, position: d.position })
        .collect()
}

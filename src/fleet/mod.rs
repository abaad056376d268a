//! Drone pool and home base
//!
//! The fleet is a fixed-size arena: drones are created once, indexed by
//! their id, and never reordered or removed.

pub mod drone;

use serde::{Deserialize, Serialize};

pub use drone::{Drone, DroneMode};

use crate::core::types::{DroneId, LngLat};

/// Singleton launch and recovery site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeBase {
    pub id: String,
    pub position: LngLat,
}

impl HomeBase {
    pub fn new(position: LngLat) -> Self {
        Self { id: "home-1".to_string(), position }
    }
}

/// Fixed-capacity arena of drones
#[derive(Debug, Clone)]
pub struct Fleet {
    drones: Vec<Drone>,
}

impl Fleet {
    /// Create `size` drones parked at `home`
    pub fn new(size: usize, home: LngLat) -> Self {
        let drones = (0..size as u32).map(|i| Drone::new(DroneId(i), home)).collect();
        Self { drones }
    }

    pub fn len(&self) -> usize {
        self.drones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drones.is_empty()
    }

    pub fn get(&self, id: DroneId) -> Option<&Drone> {
        self.drones.get(id.index())
    }

    pub fn get_mut(&mut self, id: DroneId) -> Option<&mut Drone> {
        self.drones.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drone> {
        self.drones.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Drone> {
        self.drones.iter_mut()
    }

    pub fn as_slice(&self) -> &[Drone] {
        &self.drones
    }

    /// Drones in transit, on patrol or returning
    pub fn active_count(&self) -> usize {
        self.drones.iter().filter(|d| d.is_active()).count()
    }

    pub fn count_in(&self, mode: DroneMode) -> usize {
        self.drones.iter().filter(|d| d.mode == mode).count()
    }

    /// Lowest-id drone parked and ready to launch
    pub fn first_idle(&self) -> Option<DroneId> {
        self.drones
            .iter()
            .find(|d| d.mode == DroneMode::IdleAtBase)
            .map(|d| d.id)
    }

    /// Ids of patrolling drones in ascending order
    pub fn patrolling(&self) -> Vec<DroneId> {
        self.drones
            .iter()
            .filter(|d| d.mode == DroneMode::Patrol)
            .map(|d| d.id)
            .collect()
    }

    /// Park every drone at home with a full battery
    pub fn reset_to_base(&mut self, home: LngLat) {
        for drone in &mut self.drones {
            drone.reset_to_base(home);
        }
    }
}

//! Read-only view of the engine handed to the presentation layer

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{DroneId, LngLat, Side};
use crate::fleet::{Drone, DroneMode, HomeBase};
use crate::simulation::events::Event;

/// Per-drone state as exposed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneState {
    pub id: DroneId,
    pub position: LngLat,
    pub battery: f64,
    pub mode: DroneMode,
    pub phase_progress: f64,
    pub side: Side,
}

impl From<&Drone> for DroneState {
    fn from(drone: &Drone) -> Self {
        Self {
            id: drone.id,
            position: drone.position,
            battery: drone.battery(),
            mode: drone.mode,
            phase_progress: drone.phase_progress,
            side: drone.side,
        }
    }
}

/// Complete world state at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sim_time: f64,
    pub target_active: usize,
    pub drones: Vec<DroneState>,
    pub home_base: HomeBase,
    /// Oldest first
    pub recent_events: Vec<Event>,
}

impl Snapshot {
    pub fn count_in(&self, mode: DroneMode) -> usize {
        self.drones.iter().filter(|d| d.mode == mode).count()
    }

    pub fn active_count(&self) -> usize {
        self.drones.iter().filter(|d| d.mode.is_active()).count()
    }

    pub fn drone(&self, id: DroneId) -> Option<&DroneState> {
        self.drones.get(id.index())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let modes = DroneMode::all()
            .iter()
            .map(|mode| format!("{:?}={}", mode, self.count_in(*mode)))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "t={:.1}s active {}/{} | {} | {} recent events",
            self.sim_time,
            self.active_count(),
            self.target_active,
            modes,
            self.recent_events.len(),
        )
    }
}

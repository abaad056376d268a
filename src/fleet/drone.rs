//! Drone records and lifecycle modes

use serde::{Deserialize, Serialize};

use crate::core::types::{DroneId, LngLat, Side};

/// Lifecycle mode of a drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DroneMode {
    /// Parked at home, fully charged, eligible for launch
    IdleAtBase,
    /// Flying from home toward the patrol area
    TransitToArea,
    /// Inside the patrol area, positioned by the spacing field
    Patrol,
    /// Flying home on low battery
    Returning,
    /// Parked at home, recharging
    Charging,
    /// Battery ran out in the air; terminal
    Lost,
}

impl DroneMode {
    /// Transit, patrol and return count toward the launch target
    pub fn is_active(&self) -> bool {
        matches!(self, DroneMode::TransitToArea | DroneMode::Patrol | DroneMode::Returning)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DroneMode::Lost)
    }

    pub fn all() -> [DroneMode; 6] {
        [
            DroneMode::IdleAtBase,
            DroneMode::TransitToArea,
            DroneMode::Patrol,
            DroneMode::Returning,
            DroneMode::Charging,
            DroneMode::Lost,
        ]
    }
}

/// A single drone in the fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub id: DroneId,
    pub position: LngLat,
    battery: f64,
    pub mode: DroneMode,
    /// Completion of the current timed phase (transit or charging), 0.0-1.0
    pub phase_progress: f64,
    pub side: Side,
}

impl Drone {
    pub fn new(id: DroneId, home: LngLat) -> Self {
        Self {
            id,
            position: home,
            battery: 1.0,
            mode: DroneMode::IdleAtBase,
            phase_progress: 0.0,
            side: Side::Friendly,
        }
    }

    pub fn battery(&self) -> f64 {
        self.battery
    }

    /// Set battery level, clamped to [0, 1]; NaN reads as empty
    pub fn set_battery(&mut self, level: f64) {
        self.battery = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
    }

    /// Drain battery by `amount`, floored at zero; returns the new level
    pub fn drain(&mut self, amount: f64) -> f64 {
        self.set_battery(self.battery - amount.max(0.0));
        self.battery
    }

    /// Switch mode and restart phase progress for the new mode
    pub fn transition(&mut self, mode: DroneMode) {
        self.mode = mode;
        self.phase_progress = 0.0;
    }

    /// Advance phase progress by `delta`, clamped to 1.0; returns the new value
    pub fn advance_progress(&mut self, delta: f64) -> f64 {
        self.phase_progress = (self.phase_progress + delta.max(0.0)).min(1.0);
        self.phase_progress
    }

    /// Park at home with a full battery
    pub fn reset_to_base(&mut self, home: LngLat) {
        self.position = home;
        self.battery = 1.0;
        self.transition(DroneMode::IdleAtBase);
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }
}

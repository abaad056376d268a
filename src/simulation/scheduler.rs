//! Launch scheduler
//!
//! Keeps the number of active drones topped up to the operator's target,
//! launching at most one drone per tick and never two within the launch
//! interval, so arrivals in the patrol area are staggered.

use crate::core::types::DroneId;
use crate::fleet::{DroneMode, Fleet};

#[derive(Debug, Clone)]
pub struct LaunchScheduler {
    interval: f64,
    last_launch: Option<f64>,
}

impl LaunchScheduler {
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            last_launch: None,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Simulation time of the most recent launch
    pub fn last_launch(&self) -> Option<f64> {
        self.last_launch
    }

    /// Forget the last launch so the next tick may launch immediately
    pub fn reset(&mut self) {
        self.last_launch = None;
    }

    /// How many more active drones the target calls for
    pub fn shortage(fleet: &Fleet, target_active: usize) -> usize {
        target_active.saturating_sub(fleet.active_count())
    }

    fn interval_elapsed(&self, now: f64) -> bool {
        match self.last_launch {
            Some(last) => now - last >= self.interval,
            None => true,
        }
    }

    /// Launch the lowest-id idle drone if the target and interval allow it
    ///
    /// Returns the launched drone. When no drone is idle the shortage simply
    /// persists until one finishes charging.
    pub fn tick(&mut self, fleet: &mut Fleet, target_active: usize, now: f64) -> Option<DroneId> {
        if Self::shortage(fleet, target_active) == 0 || !self.interval_elapsed(now) {
            return None;
        }

        let id = fleet.first_idle()?;
        let drone = fleet.get_mut(id)?;
        drone.transition(DroneMode::TransitToArea);
        self.last_launch = Some(now);
        Some(id)
    }
}

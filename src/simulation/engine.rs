//! Patrol engine - orchestrates simulation updates
//!
//! Each call to `step` runs one tick to completion:
//! launch scheduling -> lifecycle for every drone -> sightings -> swarm spacing
//!
//! The engine owns all drone and event state. It does no I/O and owns no
//! threads; callers that share it across threads must serialize access.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::EngineConfig;
use crate::core::error::Result;
use crate::core::types::{DroneId, LngLat};
use crate::fleet::{Drone, Fleet, HomeBase};
use crate::simulation::events::{EventCategory, EventLog};
use crate::simulation::lifecycle::{self, PhaseContext};
use crate::simulation::scheduler::LaunchScheduler;
use crate::simulation::sighting;
use crate::simulation::snapshot::{DroneState, Snapshot};
use crate::simulation::swarm;
use crate::spatial::PatrolArea;

/// The patrol simulation
///
/// Generic over its random source so tests can inject a fixed sequence;
/// the default is a seeded ChaCha8 generator.
pub struct PatrolEngine<R: Rng = ChaCha8Rng> {
    config: EngineConfig,
    home_base: HomeBase,
    fleet: Fleet,
    area: Option<PatrolArea>,
    target_active: usize,
    scheduler: LaunchScheduler,
    events: EventLog,
    sim_time: f64,
    /// Set by the first `set_patrol_area` after construction or reset
    area_assigned: bool,
    rng: R,
}

impl PatrolEngine<ChaCha8Rng> {
    /// Build an engine seeded from `config.seed`
    pub fn new(config: EngineConfig) -> Result<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }
}

impl Default for PatrolEngine<ChaCha8Rng> {
    fn default() -> Self {
        let config = EngineConfig::default();
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::build(config, rng)
    }
}

impl<R: Rng> PatrolEngine<R> {
    /// Build an engine around an injected random source
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: EngineConfig, rng: R) -> Self {
        let home_base = HomeBase::new(config.home_position);
        Self {
            fleet: Fleet::new(config.pool_size, config.home_position),
            scheduler: LaunchScheduler::new(config.launch_interval),
            events: EventLog::new(config.event_capacity),
            home_base,
            area: None,
            target_active: 0,
            sim_time: 0.0,
            area_assigned: false,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn target_active(&self) -> usize {
        self.target_active
    }

    pub fn home_base(&self) -> &HomeBase {
        &self.home_base
    }

    pub fn patrol_area(&self) -> Option<&PatrolArea> {
        self.area.as_ref()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Direct fleet access for scenario setup in tests and demos
    ///
    /// Not part of the caller contract; battery writes stay clamped.
    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    pub fn drone(&self, id: DroneId) -> Option<&Drone> {
        self.fleet.get(id)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Simulation time of the most recent launch
    pub fn last_launch(&self) -> Option<f64> {
        self.scheduler.last_launch()
    }

    /// Replace the patrol polygon and the target number of active drones
    ///
    /// The first call after construction or `reset` parks the whole fleet,
    /// restarts the clock and clears the event log. Later calls only swap
    /// the polygon; drones adapt on the next tick.
    pub fn set_patrol_area(&mut self, polygon: Vec<LngLat>, target_active: usize) {
        let area = PatrolArea::new(polygon);

        if area.is_usable() {
            for issue in area.issues() {
                tracing::warn!(?issue, "Patrol polygon accepted with problem");
            }
        } else {
            tracing::warn!(
                vertices = area.vertices().len(),
                issues = ?area.issues(),
                "Patrol polygon unusable; stepping paused until a valid polygon is set"
            );
        }

        if !self.area_assigned {
            self.restart();
            self.area_assigned = true;
        }

        tracing::info!(
            vertices = area.vertices().len(),
            target_active,
            centroid = ?area.centroid(),
            "Patrol area set"
        );

        self.area = Some(area);
        self.target_active = target_active;
    }

    /// Return to the freshly constructed state
    ///
    /// The patrol area is forgotten, so the next `set_patrol_area` acts
    /// as a first call again.
    pub fn reset(&mut self) {
        self.restart();
        self.area = None;
        self.target_active = 0;
        self.area_assigned = false;
    }

    fn restart(&mut self) {
        self.fleet.reset_to_base(self.home_base.position);
        self.sim_time = 0.0;
        self.events.clear();
        self.scheduler.reset();
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// Non-positive or non-finite `dt` and a missing or unusable patrol
    /// area leave every piece of state untouched.
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let Some(area) = self.area.as_ref().filter(|a| a.is_usable()) else {
            return;
        };

        self.sim_time += dt;
        let now = self.sim_time;

        // 1. Launch
        if let Some(id) = self.scheduler.tick(&mut self.fleet, self.target_active, now) {
            tracing::info!(drone = %id, sim_time = now, "Launched");
        }

        // 2. Lifecycle
        let ctx = PhaseContext {
            home: self.home_base.position,
            area,
            config: &self.config,
        };
        for drone in self.fleet.iter_mut() {
            if let Some(event) = lifecycle::advance(drone, &ctx, dt) {
                self.events
                    .record(drone.id, event.category, drone.position, event.message, now);
            }
        }

        // 3. Sightings
        for found in sighting::roll(&self.fleet, self.config.sighting_rate, dt, &mut self.rng) {
            tracing::info!(drone = %found.drone_id, "Suspicious activity reported");
            self.events.record(
                found.drone_id,
                EventCategory::Suspicious,
                found.position,
                format!("{} reports suspicious activity", found.drone_id),
                now,
            );
        }

        // 4. Spacing
        let report = swarm::apply(&mut self.fleet, area, &self.config.swarm, dt, &mut self.rng);
        if report.fallbacks > 0 {
            tracing::debug!(
                fallbacks = report.fallbacks,
                patrolling = report.patrolling,
                "Spacing candidates left the patrol area"
            );
        }
    }

    /// Read-only copy of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sim_time: self.sim_time,
            target_active: self.target_active,
            drones: self.fleet.iter().map(DroneState::from).collect(),
            home_base: self.home_base.clone(),
            recent_events: self.events.to_vec(),
        }
    }
}

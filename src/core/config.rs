//! Engine configuration with documented constants
//!
//! All tunables are collected here with explanations of their purpose
//! and how they interact with each other. Distances and speeds are in
//! degrees of longitude/latitude, durations in simulated seconds.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{PatrolError, Result};
use crate::core::types::LngLat;

/// Configuration for the patrol simulation
///
/// Every field has a default, so a TOML file only needs to name the
/// values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === FLEET ===
    /// Number of drones in the pool (fixed for the engine's lifetime)
    pub pool_size: usize,

    /// Position of the home base; origin of transit, destination of returns
    pub home_position: LngLat,

    // === LAUNCH ===
    /// Minimum simulated time between two launches (seconds)
    ///
    /// Throttles burst launches so drones arrive staggered.
    pub launch_interval: f64,

    /// Time to fly from home to the patrol-area centroid (seconds)
    pub time_to_area: f64,

    // === BATTERY ===
    /// Battery fraction drained per second while patrolling
    ///
    /// At 0.002 a full battery reaches the low threshold (0.2) in 400s.
    pub patrol_drain_rate: f64,

    /// Battery fraction drained per second while returning
    ///
    /// Must not exceed `patrol_drain_rate`.
    pub return_drain_rate: f64,

    /// Battery level below which a patrolling drone is recalled
    pub low_battery_threshold: f64,

    /// Time to recharge from any level to full (seconds)
    pub charge_time: f64,

    // === FLIGHT ===
    /// Straight-line speed of a returning drone (degrees per second)
    pub return_speed: f64,

    // === EVENTS ===
    /// Number of recent events kept in the log
    pub event_capacity: usize,

    /// Suspicious-activity reports per patrolling drone per second
    ///
    /// Zero disables sightings entirely.
    pub sighting_rate: f64,

    /// Seed for the default random source
    pub seed: u64,

    // === SWARM ===
    pub swarm: SwarmConfig,
}

/// Tunables of the swarm spacing field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Number of nearest neighbors considered per drone
    pub neighbor_count: usize,

    /// Desired spacing = spacing_factor * sqrt(area / n)
    pub spacing_factor: f64,

    /// Neighbors beyond cutoff_factor * desired spacing exert no force
    pub cutoff_factor: f64,

    /// Desired spacing used while fewer than two drones patrol
    pub default_spacing: f64,

    /// Scale of the repulsive displacement, as a fraction of desired spacing
    ///
    /// Positive values push neighbors apart.
    pub repulsion_gain: f64,

    /// Maximum repositioning speed inside the patrol area (degrees per second)
    pub max_speed: f64,

    /// Jitter magnitude as a fraction of one tick's maximum step
    pub jitter: f64,

    /// Pull toward the centroid, fraction of the offset per second
    ///
    /// Off by default; spread is driven by repulsion alone.
    pub centroid_gain: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: 20,
            home_position: LngLat::new(36.3694, 47.5931),

            launch_interval: 5.0,
            time_to_area: 30.0,

            // Patrol drains twice as fast as the flight home
            patrol_drain_rate: 0.002,
            return_drain_rate: 0.001,
            low_battery_threshold: 0.2,
            charge_time: 120.0,

            return_speed: 0.0012,

            event_capacity: 50,
            sighting_rate: 0.0,
            seed: 0x5eed_0f_d12e,

            swarm: SwarmConfig::default(),
        }
    }
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            neighbor_count: 5,
            spacing_factor: 0.5,
            cutoff_factor: 1.5,
            default_spacing: 0.001,
            repulsion_gain: 1.0,
            max_speed: 0.0002,
            jitter: 0.1,
            centroid_gain: 0.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(PatrolError::InvalidConfig(msg));

        if self.pool_size == 0 {
            return invalid("pool_size must be at least 1".into());
        }
        if !self.home_position.is_finite() {
            return invalid("home_position must be finite".into());
        }

        // Durations divide dt, so they must be strictly positive
        if !(self.time_to_area > 0.0) || !(self.charge_time > 0.0) {
            return invalid(format!(
                "time_to_area ({}) and charge_time ({}) must be positive",
                self.time_to_area, self.charge_time
            ));
        }
        if !(self.launch_interval >= 0.0) {
            return invalid(format!("launch_interval ({}) must be >= 0", self.launch_interval));
        }

        if !(self.patrol_drain_rate >= 0.0) || !(self.return_drain_rate >= 0.0) {
            return invalid("Drain rates must be non-negative".into());
        }
        if self.return_drain_rate > self.patrol_drain_rate {
            return invalid(format!(
                "return_drain_rate ({}) should be <= patrol_drain_rate ({})",
                self.return_drain_rate, self.patrol_drain_rate
            ));
        }
        if !(self.low_battery_threshold > 0.0 && self.low_battery_threshold < 1.0) {
            return invalid(format!(
                "low_battery_threshold ({}) must be in (0, 1)",
                self.low_battery_threshold
            ));
        }
        if !(self.return_speed > 0.0) {
            return invalid(format!("return_speed ({}) must be positive", self.return_speed));
        }

        if self.event_capacity == 0 {
            return invalid("event_capacity must be at least 1".into());
        }
        if !(self.sighting_rate >= 0.0) {
            return invalid(format!("sighting_rate ({}) must be >= 0", self.sighting_rate));
        }

        self.swarm.validate()
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighbor_count == 0 {
            return Err(PatrolError::InvalidConfig(
                "swarm.neighbor_count must be at least 1".into(),
            ));
        }
        if !(self.spacing_factor > 0.0)
            || !(self.cutoff_factor > 0.0)
            || !(self.default_spacing > 0.0)
        {
            return Err(PatrolError::InvalidConfig(
                "swarm spacing factors must be positive".into(),
            ));
        }
        if !(self.max_speed > 0.0) {
            return Err(PatrolError::InvalidConfig(format!(
                "swarm.max_speed ({}) must be positive",
                self.max_speed
            )));
        }
        if !(self.jitter >= 0.0) || !(self.centroid_gain >= 0.0) || !self.repulsion_gain.is_finite() {
            return Err(PatrolError::InvalidConfig(
                "swarm.jitter and swarm.centroid_gain must be >= 0, repulsion_gain finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            pool_size = 8
            launch_interval = 2.5

            [swarm]
            centroid_gain = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.pool_size, 8);
        assert_eq!(config.launch_interval, 2.5);
        assert_eq!(config.swarm.centroid_gain, 0.05);
        assert_eq!(config.swarm.neighbor_count, 5);
        assert_eq!(config.charge_time, 120.0);
    }

    #[test]
    fn test_home_position_from_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            [home_position]
            lng = 10.0
            lat = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(config.home_position, LngLat::new(10.0, 20.0));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = EngineConfig::from_toml_str(include_str!("../../config/default.toml")).unwrap();
        assert_eq!(config.event_capacity, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = EngineConfig::from_toml_str("pool_size = \"many\"").unwrap_err();
        assert!(matches!(err, PatrolError::TomlError(_)));
    }

    #[test]
    fn test_return_drain_must_not_exceed_patrol_drain() {
        let config = EngineConfig {
            return_drain_rate: 0.01,
            patrol_drain_rate: 0.001,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(PatrolError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_durations_rejected() {
        let config = EngineConfig { charge_time: 0.0, ..EngineConfig::default() };
        assert!(config.validate().is_err());

        let config = EngineConfig { time_to_area: f64::NAN, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_bounds() {
        let config = EngineConfig { low_battery_threshold: 1.0, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_swarm_requires_neighbors() {
        let mut config = EngineConfig::default();
        config.swarm.neighbor_count = 0;
        assert!(config.validate().is_err());
    }
}

//! Patrol Swarm - autonomous patrol drone fleet simulation

pub mod core;
pub mod fleet;
pub mod simulation;
pub mod spatial;

pub use crate::core::config::{EngineConfig, SwarmConfig};
pub use crate::core::error::{PatrolError, Result};
pub use crate::core::types::{DroneId, EventId, LngLat, Side};
pub use fleet::{Drone, DroneMode, Fleet, HomeBase};
pub use simulation::{Event, EventCategory, PatrolEngine, Snapshot};
pub use spatial::PatrolArea;

//! Patrol simulation: scheduling, lifecycle, spacing and events

pub mod engine;
pub mod events;
pub mod lifecycle;
pub mod scheduler;
pub mod sighting;
pub mod snapshot;
pub mod swarm;

pub use engine::PatrolEngine;
pub use events::{Event, EventCategory, EventLog, DEFAULT_EVENT_CAPACITY};
pub use scheduler::LaunchScheduler;
pub use snapshot::{DroneState, Snapshot};
pub use swarm::{desired_spacing, SpacingReport};

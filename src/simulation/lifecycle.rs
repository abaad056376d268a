//! Per-drone lifecycle state machine
//!
//! IDLE_AT_BASE -> TRANSIT_TO_AREA -> PATROL -> RETURNING -> CHARGING -> IDLE_AT_BASE,
//! with PATROL and RETURNING able to end in LOST when the battery runs out.
//! Patrol positions are owned by the swarm field, not this module.

use crate::core::config::EngineConfig;
use crate::core::types::LngLat;
use crate::fleet::{Drone, DroneMode};
use crate::simulation::events::EventCategory;
use crate::spatial::PatrolArea;

/// Everything a drone needs to know about the world for one step
pub struct PhaseContext<'a> {
    pub home: LngLat,
    pub area: &'a PatrolArea,
    pub config: &'a EngineConfig,
}

/// Notable transition to be written to the event log
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseEvent {
    pub category: EventCategory,
    pub message: String,
}

/// Advance one drone by `dt` seconds
pub fn advance(drone: &mut Drone, ctx: &PhaseContext<'_>, dt: f64) -> Option<PhaseEvent> {
    match drone.mode {
        DroneMode::IdleAtBase | DroneMode::Lost => None,
        DroneMode::TransitToArea => {
            advance_transit(drone, ctx, dt);
            None
        }
        DroneMode::Patrol => advance_patrol(drone, ctx.config, dt),
        DroneMode::Returning => advance_return(drone, ctx, dt),
        DroneMode::Charging => {
            advance_charging(drone, ctx.config, dt);
            None
        }
    }
}

fn advance_transit(drone: &mut Drone, ctx: &PhaseContext<'_>, dt: f64) {
    // Centroid follows the current polygon, so a replaced area redirects transit
    let Some(target) = ctx.area.centroid() else {
        return;
    };

    let t = drone.advance_progress(dt / ctx.config.time_to_area);
    drone.position = ctx.home.lerp(&target, t);

    if ctx.area.contains(drone.position) || t >= 1.0 {
        tracing::debug!(drone = %drone.id, progress = t, "Entered patrol area");
        drone.transition(DroneMode::Patrol);
    }
}

fn advance_patrol(drone: &mut Drone, config: &EngineConfig, dt: f64) -> Option<PhaseEvent> {
    let battery = drone.drain(config.patrol_drain_rate * dt);

    if battery <= 0.0 {
        return Some(lose(drone));
    }

    if battery < config.low_battery_threshold {
        drone.transition(DroneMode::Returning);
        tracing::info!(drone = %drone.id, battery, "Recalled for recharge");
        return Some(PhaseEvent {
            category: EventCategory::RechargeReturn,
            message: format!(
                "{} returning to recharge (battery {:.0}%)",
                drone.id,
                battery * 100.0
            ),
        });
    }

    None
}

fn advance_return(drone: &mut Drone, ctx: &PhaseContext<'_>, dt: f64) -> Option<PhaseEvent> {
    let battery = drone.drain(ctx.config.return_drain_rate * dt);
    if battery <= 0.0 {
        // No movement on the tick the battery dies
        return Some(lose(drone));
    }

    let travel = ctx.config.return_speed * dt;
    let offset = ctx.home - drone.position;
    let remaining = offset.length();

    if remaining <= travel {
        drone.position = ctx.home;
        drone.transition(DroneMode::Charging);
        tracing::debug!(drone = %drone.id, battery, "Landed at home base");
    } else {
        drone.position += offset * (travel / remaining);
    }

    None
}

fn advance_charging(drone: &mut Drone, config: &EngineConfig, dt: f64) {
    if drone.advance_progress(dt / config.charge_time) >= 1.0 {
        drone.set_battery(1.0);
        drone.transition(DroneMode::IdleAtBase);
        tracing::debug!(drone = %drone.id, "Recharged");
    }
}

fn lose(drone: &mut Drone) -> PhaseEvent {
    drone.transition(DroneMode::Lost);
    tracing::warn!(
        drone = %drone.id,
        lng = drone.position.lng,
        lat = drone.position.lat,
        "Drone lost, battery drained"
    );
    PhaseEvent {
        category: EventCategory::Lost,
        message: format!("{} lost: battery drained", drone.id),
    }
}

//! Property tests for engine invariants over arbitrary tick sequences

use std::collections::HashMap;

use proptest::prelude::*;

use patrol_swarm::{DroneId, DroneMode, EngineConfig, LngLat, PatrolEngine, SwarmConfig};

fn unit_square() -> Vec<LngLat> {
    vec![
        LngLat::new(0.0, 0.0),
        LngLat::new(1.0, 0.0),
        LngLat::new(1.0, 1.0),
        LngLat::new(0.0, 1.0),
    ]
}

/// Aggressive drains and a slow return so losses actually happen
fn harsh_config(seed: u64, patrol_drain: f64, return_drain: f64, capacity: usize) -> EngineConfig {
    EngineConfig {
        pool_size: 6,
        home_position: LngLat::new(0.5, -1.0),
        launch_interval: 2.0,
        time_to_area: 10.0,
        patrol_drain_rate: patrol_drain,
        return_drain_rate: return_drain,
        low_battery_threshold: 0.2,
        charge_time: 15.0,
        return_speed: 0.02,
        event_capacity: capacity,
        sighting_rate: 0.05,
        seed,
        swarm: SwarmConfig {
            max_speed: 0.05,
            default_spacing: 0.01,
            ..SwarmConfig::default()
        },
    }
}

fn tick_lengths() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            8 => 0.05f64..3.0,
            1 => -2.0f64..=0.0,
            1 => 3.0f64..40.0,
        ],
        1..250,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_battery_stays_in_unit_interval(
        dts in tick_lengths(),
        target in 0usize..8,
        seed in any::<u64>(),
        patrol_drain in 0.001f64..0.05,
    ) {
        let mut engine = PatrolEngine::new(harsh_config(seed, patrol_drain, patrol_drain / 2.0, 20)).unwrap();
        engine.set_patrol_area(unit_square(), target);

        for dt in dts {
            engine.step(dt);
            for drone in engine.fleet().iter() {
                prop_assert!((0.0..=1.0).contains(&drone.battery()));
            }
        }
    }

    #[test]
    fn test_lost_drones_never_move_or_revive(
        dts in tick_lengths(),
        target in 1usize..7,
        seed in any::<u64>(),
        patrol_drain in 0.01f64..0.08,
    ) {
        let mut engine = PatrolEngine::new(harsh_config(seed, patrol_drain, patrol_drain, 20)).unwrap();
        engine.set_patrol_area(unit_square(), target);

        let mut lost_at: HashMap<DroneId, LngLat> = HashMap::new();
        for dt in dts {
            engine.step(dt);
            for drone in engine.fleet().iter() {
                if let Some(position) = lost_at.get(&drone.id) {
                    prop_assert_eq!(drone.mode, DroneMode::Lost);
                    prop_assert_eq!(drone.position, *position);
                } else if drone.mode == DroneMode::Lost {
                    lost_at.insert(drone.id, drone.position);
                }
            }
        }
    }

    #[test]
    fn test_event_log_is_bounded_and_ordered(
        dts in tick_lengths(),
        capacity in 1usize..12,
        seed in any::<u64>(),
    ) {
        let mut engine = PatrolEngine::new(harsh_config(seed, 0.03, 0.02, capacity)).unwrap();
        engine.set_patrol_area(unit_square(), 5);

        for dt in dts {
            engine.step(dt);
            let events = engine.events();
            prop_assert!(events.len() <= capacity);

            let ids: Vec<u64> = events.iter().map(|e| e.id.0).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            let times: Vec<f64> = events.iter().map(|e| e.timestamp).collect();
            prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_launches_respect_interval_and_target(
        dts in tick_lengths(),
        target in 0usize..8,
        seed in any::<u64>(),
    ) {
        let mut engine = PatrolEngine::new(harsh_config(seed, 0.02, 0.01, 20)).unwrap();
        engine.set_patrol_area(unit_square(), target);
        let interval = engine.config().launch_interval;

        let mut previous: Vec<DroneMode> = engine.fleet().iter().map(|d| d.mode).collect();
        let mut last_launch: Option<f64> = None;
        for dt in dts {
            let active_before = engine.fleet().active_count();
            engine.step(dt);
            let now = engine.sim_time();

            let launched = engine
                .fleet()
                .iter()
                .zip(&previous)
                .filter(|(drone, before)| **before == DroneMode::IdleAtBase && drone.mode != DroneMode::IdleAtBase)
                .count();
            prop_assert!(launched <= 1);

            if launched == 1 {
                prop_assert!(active_before < target);
                if let Some(last) = last_launch {
                    prop_assert!(now - last >= interval);
                }
                last_launch = Some(now);
            }

            prop_assert!(engine.fleet().active_count() <= target);
            previous = engine.fleet().iter().map(|d| d.mode).collect();
        }
    }

    #[test]
    fn test_patrolling_drones_stay_inside_convex_area(
        dts in tick_lengths(),
        target in 1usize..7,
        seed in any::<u64>(),
        jitter in 0.0f64..1.0,
    ) {
        let mut config = harsh_config(seed, 0.005, 0.002, 20);
        config.swarm.jitter = jitter;
        let mut engine = PatrolEngine::new(config).unwrap();
        engine.set_patrol_area(unit_square(), target);

        for dt in dts {
            engine.step(dt);
            let area = engine.patrol_area().unwrap();
            for drone in engine.fleet().iter().filter(|d| d.mode == DroneMode::Patrol) {
                prop_assert!(area.contains(drone.position), "{} escaped to {:?}", drone.id, drone.position);
            }
        }
    }
}

//! Bounded log of notable occurrences
//!
//! Sightings, recalls and losses land here for the presentation layer.
//! Only the most recent events are kept; the oldest are evicted first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{DroneId, EventId, LngLat};

/// Default number of events retained
pub const DEFAULT_EVENT_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventCategory {
    /// Suspicious activity reported by a patrolling drone
    Suspicious,
    /// Patrolling drone recalled on low battery
    RechargeReturn,
    /// Drone ran out of battery in the air
    Lost,
}

/// A notable occurrence, stamped with simulation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub drone_id: DroneId,
    pub category: EventCategory,
    pub position: LngLat,
    pub message: String,
    pub timestamp: f64,
}

/// Ring buffer of recent events
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<Event>,
    capacity: usize,
    next_id: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an event, evicting the oldest when full
    pub fn record(
        &mut self,
        drone_id: DroneId,
        category: EventCategory,
        position: LngLat,
        message: String,
        timestamp: f64,
    ) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;

        if self.events.len() >= self.capacity {
            self.events.pop_front(); // Remove oldest
        }
        self.events.push_back(Event {
            id,
            drone_id,
            category,
            position,
            message,
            timestamp,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn latest(&self) -> Option<&Event> {
        self.events.back()
    }

    /// Events newer than `id`, oldest first
    pub fn since(&self, id: EventId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.id > id)
    }

    pub fn events_by_drone(&self, drone_id: DroneId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.drone_id == drone_id)
    }

    /// Drop all retained events; ids keep counting up
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn to_vec(&self) -> Vec<Event> {
        self.events.iter().cloned().collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(log: &mut EventLog, drone: u32, timestamp: f64) -> EventId {
        log.record(
            DroneId(drone),
            EventCategory::Suspicious,
            LngLat::default(),
            format!("sighting at {}", timestamp),
            timestamp,
        )
    }

    #[test]
    fn test_event_log_ring() {
        let mut log = EventLog::new(3); // Small for testing
        push(&mut log, 0, 1.0);
        push(&mut log, 1, 2.0);
        push(&mut log, 2, 3.0);
        assert_eq!(log.len(), 3);

        // Push fourth - oldest should be evicted
        push(&mut log, 3, 4.0);
        assert_eq!(log.len(), 3);
        let timestamps: Vec<f64> = log.iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut log = EventLog::new(2);
        let ids: Vec<EventId> = (0..5).map(|i| push(&mut log, 0, i as f64)).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(log.latest().map(|e| e.id), Some(EventId(4)));
    }

    #[test]
    fn test_clear_keeps_id_sequence() {
        let mut log = EventLog::new(5);
        push(&mut log, 0, 0.0);
        push(&mut log, 0, 1.0);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(push(&mut log, 0, 2.0), EventId(2));
    }

    #[test]
    fn test_since() {
        let mut log = EventLog::new(10);
        let first = push(&mut log, 0, 0.0);
        push(&mut log, 1, 1.0);
        push(&mut log, 2, 2.0);

        let newer: Vec<DroneId> = log.since(first).map(|e| e.drone_id).collect();
        assert_eq!(newer, vec![DroneId(1), DroneId(2)]);
    }

    #[test]
    fn test_events_by_drone() {
        let mut log = EventLog::new(10);
        push(&mut log, 1, 0.0);
        push(&mut log, 2, 1.0);
        push(&mut log, 1, 2.0);

        let mine: Vec<_> = log.events_by_drone(DroneId(1)).collect();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|e| e.drone_id == DroneId(1)));
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(EventLog::default().capacity(), 50);
        assert_eq!(EventLog::new(0).capacity(), 1);
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        let json = serde_json::to_string(&EventCategory::RechargeReturn).unwrap();
        assert_eq!(json, "\"recharge-return\"");
    }
}

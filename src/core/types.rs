//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distances below this are treated as zero
pub const EPSILON: f64 = 1e-9;

/// Unique identifier for drones
///
/// Doubles as the drone's index in the fleet arena, so it stays stable for
/// the lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DroneId(pub u32);

impl DroneId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DroneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drone-{}", self.0)
    }
}

/// Unique, monotonically increasing event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt-{}", self.0)
    }
}

/// Affiliation tag carried by every drone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Friendly,
    Enemy,
}

/// Geographic position (longitude, latitude)
///
/// Patrol areas are small, so coordinates are treated as a flat Euclidean
/// plane for every distance and force computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.lng - other.lng;
        let dy = self.lat - other.lat;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.lng * self.lng + self.lat * self.lat).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > EPSILON {
            Self { lng: self.lng / len, lat: self.lat / len }
        } else {
            Self::default()
        }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1)
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            lng: self.lng + (other.lng - self.lng) * t,
            lat: self.lat + (other.lat - self.lat) * t,
        }
    }

    /// Scale the vector down so its length does not exceed `max`, keeping direction
    pub fn clamp_length(&self, max: f64) -> Self {
        let len = self.length();
        if len > max && len > EPSILON {
            *self * (max / len)
        } else {
            *self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self { lng, lat }
    }
}

impl std::ops::Add for LngLat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { lng: self.lng + rhs.lng, lat: self.lat + rhs.lat }
    }
}

impl std::ops::AddAssign for LngLat {
    fn add_assign(&mut self, rhs: Self) {
        self.lng += rhs.lng;
        self.lat += rhs.lat;
    }
}

impl std::ops::Sub for LngLat {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { lng: self.lng - rhs.lng, lat: self.lat - rhs.lat }
    }
}

impl std::ops::Mul<f64> for LngLat {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self { lng: self.lng * rhs, lat: self.lat * rhs }
    }
}

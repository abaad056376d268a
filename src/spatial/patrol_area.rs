//! Operator-defined patrol polygon and its derived centroid

use serde::{Deserialize, Serialize};

use super::polygon::{bounding_box_area, centroid, point_in_polygon};
use super::validation::{PolygonIssue, PolygonValidator};
use crate::core::types::LngLat;

/// Patrol polygon as drawn by the operator
///
/// Vertices form an open ring: the closing edge from the last vertex back
/// to the first is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolArea {
    vertices: Vec<LngLat>,
    centroid: Option<LngLat>,
    #[serde(skip)]
    issues: Vec<PolygonIssue>,
}

impl PatrolArea {
    pub fn new(vertices: Vec<LngLat>) -> Self {
        let centroid = centroid(&vertices);
        let issues = PolygonValidator::validate(&vertices);
        Self { vertices, centroid, issues }
    }

    pub fn vertices(&self) -> &[LngLat] {
        &self.vertices
    }

    /// Mean of the vertices; `None` only for an empty polygon
    pub fn centroid(&self) -> Option<LngLat> {
        self.centroid
    }

    pub fn issues(&self) -> &[PolygonIssue] {
        &self.issues
    }

    /// Usable for containment, spacing and launches
    pub fn is_usable(&self) -> bool {
        self.centroid.is_some() && !PolygonValidator::is_degenerate(&self.issues)
    }

    pub fn contains(&self, point: LngLat) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// Area estimate used for spacing: bounding-box width x height
    pub fn bounding_area(&self) -> f64 {
        bounding_box_area(&self.vertices)
    }
}

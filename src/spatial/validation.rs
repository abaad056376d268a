//! Sanity checks for operator-drawn patrol polygons
//!
//! None of these reject a polygon. The engine accepts whatever the operator
//! draws and reports problems so the presentation layer can surface them.

use geo::{Area, Coord, Intersects, Line};

use super::polygon::to_geo_polygon;
use crate::core::types::{LngLat, EPSILON};

/// Problems found in a patrol polygon
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonIssue {
    InsufficientVertices { count: usize, minimum: usize },
    SelfIntersecting { first_edge: usize, second_edge: usize },
    ZeroArea,
    NonFiniteVertex { index: usize },
    Clockwise,
}

pub struct PolygonValidator;

impl PolygonValidator {
    /// Validate a vertex ring (no duplicated closing vertex)
    pub fn validate(vertices: &[LngLat]) -> Vec<PolygonIssue> {
        let mut issues = Vec::new();

        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            issues.push(PolygonIssue::NonFiniteVertex { index });
            return issues;
        }

        if vertices.len() < 3 {
            issues.push(PolygonIssue::InsufficientVertices {
                count: vertices.len(),
                minimum: 3,
            });
            return issues; // Can't do further checks
        }

        if Self::is_collinear(vertices) {
            issues.push(PolygonIssue::ZeroArea);
            return issues;
        }

        if let Some((first_edge, second_edge)) = Self::first_crossing(vertices) {
            issues.push(PolygonIssue::SelfIntersecting { first_edge, second_edge });
        }

        // geo reports counter-clockwise rings with positive signed area
        if to_geo_polygon(vertices).signed_area() < 0.0 {
            issues.push(PolygonIssue::Clockwise);
        }

        issues
    }

    /// Whether any of the issues makes containment unreliable
    pub fn is_degenerate(issues: &[PolygonIssue]) -> bool {
        issues.iter().any(|issue| {
            matches!(
                issue,
                PolygonIssue::InsufficientVertices { .. }
                    | PolygonIssue::ZeroArea
                    | PolygonIssue::NonFiniteVertex { .. }
            )
        })
    }

    /// All vertices on one line (or one point)
    ///
    /// Signed area alone can't tell this apart from a bowtie whose lobes cancel.
    fn is_collinear(vertices: &[LngLat]) -> bool {
        let origin = vertices[0];
        let far = vertices
            .iter()
            .copied()
            .fold(origin, |best, v| if v.distance(&origin) > best.distance(&origin) { v } else { best });
        let dir = far - origin;
        let len = dir.length();
        if len <= EPSILON {
            return true;
        }
        vertices.iter().all(|v| {
            let r = *v - origin;
            (dir.lng * r.lat - dir.lat * r.lng).abs() / len <= EPSILON
        })
    }

    /// First pair of non-adjacent edges that touch or cross
    fn first_crossing(vertices: &[LngLat]) -> Option<(usize, usize)> {
        let n = vertices.len();
        if n < 4 {
            return None; // Triangle can't self-intersect
        }

        let edge = |i: usize| {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            Line::new(Coord { x: a.lng, y: a.lat }, Coord { x: b.lng, y: b.lat })
        };

        for i in 0..n {
            for j in (i + 2)..n {
                // Last edge shares a vertex with the first
                if i == 0 && j == n - 1 {
                    continue;
                }
                if edge(i).intersects(&edge(j)) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

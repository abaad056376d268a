//! Planar polygon helpers: containment, centroid and bounding box

use geo::{BoundingRect, Coord, LineString, Polygon};

use crate::core::types::{LngLat, EPSILON};

/// Ray-casting parity test
///
/// Casts a ray toward +lng and counts edge crossings. The epsilon in the
/// denominator keeps horizontal edges from dividing by zero; such edges
/// never satisfy the straddle check anyway.
pub fn point_in_polygon(point: LngLat, vertices: &[LngLat]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        if (a.lat > point.lat) != (b.lat > point.lat) {
            let crossing = (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat + EPSILON) + a.lng;
            if point.lng < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Arithmetic mean of the vertices, `None` for an empty ring
pub fn centroid(vertices: &[LngLat]) -> Option<LngLat> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (lng, lat) = vertices
        .iter()
        .fold((0.0, 0.0), |(lng, lat), v| (lng + v.lng, lat + v.lat));
    Some(LngLat::new(lng / n, lat / n))
}

/// Convert a vertex ring into a `geo` polygon (closing it implicitly)
pub fn to_geo_polygon(vertices: &[LngLat]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = vertices.iter().map(|v| Coord { x: v.lng, y: v.lat }).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Width x height of the axis-aligned bounding box
pub fn bounding_box_area(vertices: &[LngLat]) -> f64 {
    to_geo_polygon(vertices)
        .bounding_rect()
        .map(|rect| rect.width() * rect.height())
        .unwrap_or(0.0)
}

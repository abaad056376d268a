//! Planar geometry for the patrol area

pub mod patrol_area;
pub mod polygon;
pub mod sparse_hash;
pub mod validation;

pub use patrol_area::PatrolArea;
pub use polygon::{bounding_box_area, centroid, point_in_polygon};
pub use sparse_hash::SparseHashGrid;
pub use validation::{PolygonIssue, PolygonValidator};

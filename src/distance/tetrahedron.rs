use crate::geometry::Tetrahedron;
use crate::math::barycentric::safe_tetrahedron_barycentric_coordinates;
use crate::math::mensuration::tetrahedron_volume;
use crate::math::{Point3, GLOBAL_EPSILON3};

use super::triangle::point_triangle_distance;

/// Distance from a point to a solid tetrahedron, with the closest point.
///
/// Points inside (all barycentric coordinates non-negative) are at
/// distance zero and are their own closest point. Otherwise every facet
/// facing the point is measured and the nearest one wins. A flat
/// tetrahedron has no interior and is measured against all four facets.
#[must_use]
pub fn point_tetrahedron_distance(point: &Point3, tetra: &Tetrahedron) -> (f64, Point3) {
    if tetrahedron_volume(tetra) <= GLOBAL_EPSILON3 {
        return nearest_facet(point, tetra, 0..4);
    }
    let coordinates = safe_tetrahedron_barycentric_coordinates(point, tetra);
    if coordinates.iter().all(|c| *c >= 0.0) {
        return (0.0, *point);
    }

    let mut facing: Vec<usize> = (0..4).filter(|&f| coordinates[f] < 0.0).collect();
    facing.sort_by(|a, b| coordinates[*a].total_cmp(&coordinates[*b]));

    nearest_facet(point, tetra, facing)
}

fn nearest_facet(
    point: &Point3,
    tetra: &Tetrahedron,
    facets: impl IntoIterator<Item = usize>,
) -> (f64, Point3) {
    let mut best = (f64::INFINITY, *point);
    for facet in facets {
        let candidate = point_triangle_distance(point, &tetra.facet(facet));
        if candidate.0 < best.0 {
            best = candidate;
        }
    }
    best
}

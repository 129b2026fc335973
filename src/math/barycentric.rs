//! Barycentric coordinates of a point relative to a simplex.
//!
//! Coordinates are returned in vertex order and sum to one. A point
//! outside the simplex gets at least one negative coordinate.

use tracing::trace;

use crate::error::{GeometryError, Result};
use crate::geometry::{Segment, Tetrahedron, Triangle};

use super::mensuration::{tetrahedron_signed_volume, triangle_signed_area, triangle_signed_area_2d};
use super::{Point, Point2, Point3, GLOBAL_EPSILON, GLOBAL_EPSILON2, GLOBAL_EPSILON3};

/// Coordinates of `point` projected on the segment line.
///
/// # Errors
///
/// Returns an error if the segment is degenerate.
pub fn segment_barycentric_coordinates<const D: usize>(
    point: &Point<D>,
    segment: &Segment<D>,
) -> Result<[f64; 2]> {
    let [v0, v1] = segment.vertices();
    let direction = segment.normalized_direction()?;
    let length = segment.length();
    let along0 = (point - v0).dot(&direction) / length;
    let along1 = (v1 - point).dot(&direction) / length;
    let sum = along0 + along1;
    if sum.abs() <= GLOBAL_EPSILON {
        return Err(GeometryError::Degenerate("segment barycentric coordinates".into()).into());
    }
    Ok([along1 / sum, along0 / sum])
}

/// Coordinates of a point in the plane of a 2D triangle.
///
/// # Errors
///
/// Returns an error if the triangle area is below the tolerance.
pub fn triangle_barycentric_coordinates_2d(point: &Point2, triangle: &Triangle<2>) -> Result<[f64; 3]> {
    let [v0, v1, v2] = *triangle.vertices();
    let areas = [
        triangle_signed_area_2d(&Triangle::new(v1, v2, *point)),
        triangle_signed_area_2d(&Triangle::new(v2, v0, *point)),
        triangle_signed_area_2d(&Triangle::new(v0, v1, *point)),
    ];
    normalize_weights(areas, GLOBAL_EPSILON2, "triangle barycentric coordinates")
}

/// Coordinates of the projection of `point` on the plane of a 3D triangle.
///
/// # Errors
///
/// Returns an error if the triangle is degenerate.
pub fn triangle_barycentric_coordinates(point: &Point3, triangle: &Triangle<3>) -> Result<[f64; 3]> {
    let normal = triangle
        .normal()
        .ok_or_else(|| GeometryError::Degenerate("triangle has no normal".into()))?;
    let [v0, v1, v2] = *triangle.vertices();
    let areas = [
        triangle_signed_area(&Triangle::new(v1, v2, *point), &normal),
        triangle_signed_area(&Triangle::new(v2, v0, *point), &normal),
        triangle_signed_area(&Triangle::new(v0, v1, *point), &normal),
    ];
    normalize_weights(areas, GLOBAL_EPSILON2, "triangle barycentric coordinates")
}

/// Coordinates of `point` relative to a tetrahedron.
///
/// # Errors
///
/// Returns an error if the tetrahedron volume is below the tolerance.
pub fn tetrahedron_barycentric_coordinates(point: &Point3, tetra: &Tetrahedron) -> Result<[f64; 4]> {
    normalize_weights(
        facet_volumes(point, tetra),
        GLOBAL_EPSILON3,
        "tetrahedron barycentric coordinates",
    )
}

/// Like [`tetrahedron_barycentric_coordinates`], but never fails.
///
/// For a flat tetrahedron the sub-volumes are scaled by the sum of their
/// magnitudes instead of the signed total, which keeps their signs
/// meaningful for inside/outside decisions.
#[must_use]
pub fn safe_tetrahedron_barycentric_coordinates(point: &Point3, tetra: &Tetrahedron) -> [f64; 4] {
    let volumes = facet_volumes(point, tetra);
    let total: f64 = volumes.iter().sum();
    if total.abs() > GLOBAL_EPSILON3 {
        return volumes.map(|v| v / total);
    }
    trace!(total, "flat tetrahedron, scaling barycentric coordinates by absolute volumes");
    let magnitude: f64 = volumes.iter().map(|v| v.abs()).sum();
    if magnitude > 0.0 {
        volumes.map(|v| v / magnitude)
    } else {
        [0.25; 4]
    }
}

fn facet_volumes(point: &Point3, tetra: &Tetrahedron) -> [f64; 4] {
    let vertices = tetra.vertices();
    Tetrahedron::FACET_VERTICES.map(|[a, b, c]| {
        tetrahedron_signed_volume(&Tetrahedron::new(vertices[a], vertices[b], vertices[c], *point))
    })
}

fn normalize_weights<const N: usize>(
    weights: [f64; N],
    tolerance: f64,
    what: &str,
) -> Result<[f64; N]> {
    let total: f64 = weights.iter().sum();
    if total.abs() <= tolerance {
        return Err(GeometryError::Degenerate(format!("{what}: simplex measure {total:e}")).into());
    }
    Ok(weights.map(|w| w / total))
}

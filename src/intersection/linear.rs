//! Lines and segments against planes and triangles.

use crate::distance::{point_line_distance, point_plane_distance, point_segment_distance};
use crate::error::Result;
use crate::geometry::{InfiniteLine, Plane, Segment, Triangle};
use crate::math::{Point3, GLOBAL_EPSILON};

use super::{point_witness, segment_projection, triangle_projection, CorrectnessInfo, IntersectionResult};

/// Intersection point of a line and a plane.
///
/// [`IntersectionResult::Parallel`] when the line direction is within
/// tolerance of the plane.
#[must_use]
pub fn line_plane_intersection(line: &InfiniteLine<3>, plane: &Plane) -> IntersectionResult<Point3> {
    let dot_directions = line.direction().dot(plane.normal());
    if dot_directions.abs() < GLOBAL_EPSILON {
        return IntersectionResult::Parallel;
    }
    let signed_distance = plane.normal().dot(&line.origin().coords) + plane.plane_constant();
    let result = line.origin() - line.direction() * (signed_distance / dot_directions);
    let correctness = CorrectnessInfo {
        first: point_witness(&result, point_line_distance(&result, line).1),
        second: point_witness(&result, point_plane_distance(&result, plane).1),
    };
    IntersectionResult::intersect(result, correctness)
}

/// Intersection point of a segment and a plane.
///
/// # Errors
///
/// Returns an error if the segment is degenerate.
pub fn segment_plane_intersection(segment: &Segment<3>, plane: &Plane) -> Result<IntersectionResult<Point3>> {
    let line = InfiniteLine::from_segment(segment)?;
    Ok(match line_plane_intersection(&line, plane) {
        IntersectionResult::Intersect { result, correctness } => {
            if point_segment_distance(&result, segment).0 > GLOBAL_EPSILON {
                return Ok(IntersectionResult::None);
            }
            let correctness = CorrectnessInfo {
                first: point_witness(&result, segment_projection(&result, segment)?),
                second: correctness.second,
            };
            IntersectionResult::intersect(result, correctness)
        }
        other => other,
    })
}

/// Intersection point of a segment and a triangle.
///
/// Solves `Q + t D = b1 E1 + b2 E2` with `Q` the offset of the segment
/// center from the first vertex, rejecting on `b1 < 0`, `b2 < 0`,
/// `b1 + b2 > 1` and `|t| > length / 2` before any division.
///
/// # Errors
///
/// Returns an error if the segment is degenerate.
#[allow(clippy::similar_names)]
pub fn segment_triangle_intersection(
    segment: &Segment<3>,
    triangle: &Triangle<3>,
) -> Result<IntersectionResult<Point3>> {
    let direction = segment.normalized_direction()?;
    let center = segment.barycenter();
    let [v0, v1, v2] = triangle.vertices();
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let normal = edge1.cross(&edge2);

    let Some((sign, d_dot_n)) = oriented_dot(direction.dot(&normal)) else {
        return Ok(IntersectionResult::Parallel);
    };

    let diff = center - v0;
    let d_dot_q_x_e2 = sign * direction.dot(&diff.cross(&edge2));
    if d_dot_q_x_e2 < 0.0 {
        return Ok(IntersectionResult::None);
    }
    let d_dot_e1_x_q = sign * direction.dot(&edge1.cross(&diff));
    if d_dot_e1_x_q < 0.0 || d_dot_q_x_e2 + d_dot_e1_x_q > d_dot_n {
        return Ok(IntersectionResult::None);
    }
    let q_dot_n = -sign * diff.dot(&normal);
    let extent = segment.length() * d_dot_n / 2.0;
    if q_dot_n < -extent || q_dot_n > extent {
        return Ok(IntersectionResult::None);
    }

    let result = center + direction * (q_dot_n / d_dot_n);
    let correctness = CorrectnessInfo {
        first: point_witness(&result, segment_projection(&result, segment)?),
        second: point_witness(&result, triangle_projection(&result, triangle)),
    };
    Ok(IntersectionResult::intersect(result, correctness))
}

/// Intersection point of a line and a triangle.
///
/// Same rejection sequence as [`segment_triangle_intersection`], without
/// the extent test.
#[must_use]
#[allow(clippy::similar_names)]
pub fn line_triangle_intersection(line: &InfiniteLine<3>, triangle: &Triangle<3>) -> IntersectionResult<Point3> {
    let direction = line.direction();
    let [v0, v1, v2] = triangle.vertices();
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let normal = edge1.cross(&edge2);

    let Some((sign, d_dot_n)) = oriented_dot(direction.dot(&normal)) else {
        return IntersectionResult::Parallel;
    };

    let diff = line.origin() - v0;
    let d_dot_q_x_e2 = sign * direction.dot(&diff.cross(&edge2));
    if d_dot_q_x_e2 < 0.0 {
        return IntersectionResult::None;
    }
    let d_dot_e1_x_q = sign * direction.dot(&edge1.cross(&diff));
    if d_dot_e1_x_q < 0.0 || d_dot_q_x_e2 + d_dot_e1_x_q > d_dot_n {
        return IntersectionResult::None;
    }
    let q_dot_n = -sign * diff.dot(&normal);

    let result = line.point_at(q_dot_n / d_dot_n);
    let correctness = CorrectnessInfo {
        first: point_witness(&result, point_line_distance(&result, line).1),
        second: point_witness(&result, triangle_projection(&result, triangle)),
    };
    IntersectionResult::intersect(result, correctness)
}

/// Splits `D . N` into its sign and magnitude; `None` when exactly zero.
fn oriented_dot(d_dot_n: f64) -> Option<(f64, f64)> {
    if d_dot_n > 0.0 {
        Some((1.0, d_dot_n))
    } else if d_dot_n < 0.0 {
        Some((-1.0, -d_dot_n))
    } else {
        None
    }
}

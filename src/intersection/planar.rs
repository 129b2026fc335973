//! Line and segment intersections in the plane.

use crate::distance::{point_line_distance, point_segment_distance};
use crate::error::Result;
use crate::geometry::{InfiniteLine, Segment};
use crate::math::{dot_perpendicular, Point2, GLOBAL_EPSILON};

use super::{point_witness, segment_projection, CorrectnessInfo, IntersectionResult};

/// Intersection point of two 2D lines.
///
/// Solves `P0 + s0 D0 = P1 + s1 D1`: with `Q = P1 - P0`,
/// `s0 = perp(Q, D1) / perp(D0, D1)`. The lines are parallel when
/// `perp(D0, D1)` is within tolerance of zero.
#[must_use]
pub fn line_line_intersection(line0: &InfiniteLine<2>, line1: &InfiniteLine<2>) -> IntersectionResult<Point2> {
    let d0_perp_d1 = dot_perpendicular(line0.direction(), line1.direction());
    if d0_perp_d1.abs() < GLOBAL_EPSILON {
        return IntersectionResult::Parallel;
    }
    let diff = line1.origin() - line0.origin();
    let s0 = dot_perpendicular(&diff, line1.direction()) / d0_perp_d1;
    let result = line0.point_at(s0);
    let correctness = CorrectnessInfo {
        first: point_witness(&result, point_line_distance(&result, line0).1),
        second: point_witness(&result, point_line_distance(&result, line1).1),
    };
    IntersectionResult::intersect(result, correctness)
}

/// Intersection point of two 2D segments.
///
/// # Errors
///
/// Returns an error if either segment is degenerate.
pub fn segment_segment_intersection(
    segment0: &Segment<2>,
    segment1: &Segment<2>,
) -> Result<IntersectionResult<Point2>> {
    let line0 = InfiniteLine::from_segment(segment0)?;
    let line1 = InfiniteLine::from_segment(segment1)?;
    Ok(match line_line_intersection(&line0, &line1) {
        IntersectionResult::Intersect { result, .. } => {
            if point_segment_distance(&result, segment0).0 > GLOBAL_EPSILON
                || point_segment_distance(&result, segment1).0 > GLOBAL_EPSILON
            {
                return Ok(IntersectionResult::None);
            }
            let correctness = CorrectnessInfo {
                first: point_witness(&result, segment_projection(&result, segment0)?),
                second: point_witness(&result, segment_projection(&result, segment1)?),
            };
            IntersectionResult::intersect(result, correctness)
        }
        other => other,
    })
}

/// Intersection point of a 2D segment and a 2D line.
///
/// # Errors
///
/// Returns an error if the segment is degenerate.
pub fn segment_line_intersection(
    segment: &Segment<2>,
    line: &InfiniteLine<2>,
) -> Result<IntersectionResult<Point2>> {
    let supporting = InfiniteLine::from_segment(segment)?;
    Ok(match line_line_intersection(&supporting, line) {
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

//! Predicate-only intersection tests.
//!
//! These answer whether two primitives meet, and where on each of them,
//! without computing the intersection itself. Every decision comes from
//! the sign of an exact predicate.

use crate::geometry::{InfiniteLine, Plane, Segment, Triangle};
use crate::math::predicates::{orient_3d, Sign};
use crate::position::{
    point_segment_position_2d, point_side_to_line, point_side_to_plane, point_side_to_segment,
    point_side_to_triangle, position_from_edge_sides, Position, Side,
};

use super::IntersectionType;

/// Outcome of a predicate-only intersection test.
///
/// A located intersection is never [`Position::Outside`]; disjoint
/// primitives are reported as [`Detection::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Detection<T> {
    /// The primitives are disjoint.
    None,
    /// The primitives lie on a common line or plane.
    Parallel,
    /// The primitives meet at the given position(s).
    Intersect(T),
}

impl<T> Detection<T> {
    /// Returns the kind of outcome.
    #[must_use]
    pub fn kind(&self) -> IntersectionType {
        match self {
            Self::None => IntersectionType::None,
            Self::Parallel => IntersectionType::Parallel,
            Self::Intersect(_) => IntersectionType::Intersect,
        }
    }

    #[must_use]
    pub fn has_intersection(&self) -> bool {
        matches!(self, Self::Intersect(_))
    }

    /// Drops the payload type of a result without an intersection.
    fn map_none<U>(self) -> Detection<U> {
        match self {
            Self::Parallel => Detection::Parallel,
            Self::None | Self::Intersect(_) => Detection::None,
        }
    }
}

/// Position of the crossing on each of two segments, in argument order.
pub type SegmentSegmentDetection = Detection<(Position, Position)>;

/// Position of the crossing on the segment, then on the triangle.
pub type SegmentTriangleDetection = Detection<(Position, Position)>;

/// Where two 2D segments cross.
///
/// Collinear segments are [`Detection::Parallel`] whether they overlap or
/// not; see [`colinear_segment_segment_intersection_detection`].
#[must_use]
pub fn segment_segment_intersection_detection(
    segment0: &Segment<2>,
    segment1: &Segment<2>,
) -> SegmentSegmentDetection {
    let [a0, a1] = segment0.vertices();
    let [b0, b1] = segment1.vertices();
    let a0_side = point_side_to_segment(a0, segment1);
    let a1_side = point_side_to_segment(a1, segment1);
    let b0_side = point_side_to_segment(b0, segment0);
    let b1_side = point_side_to_segment(b1, segment0);

    if a0_side == a1_side || b0_side == b1_side {
        if a0_side == Side::Zero && b0_side == Side::Zero {
            return Detection::Parallel;
        }
        return Detection::None;
    }
    let first = segment_crossing(a0_side, a1_side);
    let second = segment_crossing(b0_side, b1_side);
    Detection::Intersect((first, second))
}

/// Where two collinear 2D segments touch.
///
/// Segments sharing a single endpoint and nothing else meet at that
/// vertex; overlapping or identical segments are [`Detection::Parallel`].
#[must_use]
pub fn colinear_segment_segment_intersection_detection(
    segment0: &Segment<2>,
    segment1: &Segment<2>,
) -> SegmentSegmentDetection {
    debug_assert_eq!(
        segment_segment_intersection_detection(segment0, segment1),
        Detection::Parallel,
        "segments are not collinear"
    );
    let [a0, a1] = segment0.vertices();
    let [b0, b1] = segment1.vertices();
    let a_on_b = [point_segment_position_2d(a0, segment1), point_segment_position_2d(a1, segment1)];
    let b_on_a = [point_segment_position_2d(b0, segment0), point_segment_position_2d(b1, segment0)];
    if a_on_b.contains(&Position::Inside) || b_on_a.contains(&Position::Inside) {
        return Detection::Parallel;
    }

    // Without interior contact the segments can only share endpoints.
    let mut shared = a_on_b.iter().enumerate().filter_map(|(i, position)| match position {
        Position::Vertex(j) => Some((i, *j)),
        _ => None,
    });
    match (shared.next(), shared.next()) {
        (None, _) => Detection::None,
        (Some((i, j)), None) => Detection::Intersect((Position::Vertex(i), Position::Vertex(j))),
        (Some(_), Some(_)) => Detection::Parallel,
    }
}

/// Where a 2D segment crosses a line, as a position on the segment.
#[must_use]
pub fn segment_line_intersection_detection(segment: &Segment<2>, line: &InfiniteLine<2>) -> Detection<Position> {
    let [v0, v1] = segment.vertices();
    sides_crossing(point_side_to_line(v0, line), point_side_to_line(v1, line))
}

/// Where a line crosses a triangle, as a position on the triangle.
#[must_use]
pub fn line_triangle_intersection_detection(line: &InfiniteLine<3>, triangle: &Triangle<3>) -> Detection<Position> {
    let [v0, v1, v2] = triangle.vertices();
    if orient_3d(&(v0 + line.direction()), v0, v1, v2) == Sign::Zero {
        if point_side_to_triangle(line.origin(), triangle) == Side::Zero {
            return Detection::Parallel;
        }
        return Detection::None;
    }
    let origin = line.origin();
    let other = origin + line.direction();
    triangle_crossing([
        orient_3d(origin, v0, v1, &other),
        orient_3d(origin, v1, v2, &other),
        orient_3d(origin, v2, v0, &other),
    ])
}

/// Where a segment crosses a triangle: the position on the segment, then
/// the position on the triangle.
#[must_use]
pub fn segment_triangle_intersection_detection(
    segment: &Segment<3>,
    triangle: &Triangle<3>,
) -> SegmentTriangleDetection {
    let [s0, s1] = segment.vertices();
    let side0 = point_side_to_triangle(s0, triangle);
    let side1 = point_side_to_triangle(s1, triangle);
    if side0 == side1 {
        if side0 == Side::Zero {
            return Detection::Parallel;
        }
        return Detection::None;
    }

    let [v0, v1, v2] = triangle.vertices();
    let on_triangle = triangle_crossing([
        orient_3d(s0, v0, v1, s1),
        orient_3d(s0, v1, v2, s1),
        orient_3d(s0, v2, v0, s1),
    ]);
    match on_triangle {
        Detection::Intersect(position) => Detection::Intersect((segment_crossing(side0, side1), position)),
        other => other.map_none(),
    }
}

/// Where a segment crosses a plane, as a position on the segment.
#[must_use]
pub fn segment_plane_intersection_detection(segment: &Segment<3>, plane: &Plane) -> Detection<Position> {
    let [v0, v1] = segment.vertices();
    sides_crossing(point_side_to_plane(v0, plane), point_side_to_plane(v1, plane))
}

/// Crossing of a segment whose endpoints lie on the given sides of a
/// hyperplane.
fn sides_crossing(side0: Side, side1: Side) -> Detection<Position> {
    if side0 == side1 {
        if side0 == Side::Zero {
            return Detection::Parallel;
        }
        return Detection::None;
    }
    Detection::Intersect(segment_crossing(side0, side1))
}

/// Position on a segment known to cross the hyperplane.
fn segment_crossing(side0: Side, side1: Side) -> Position {
    match (side0, side1) {
        (Side::Zero, _) => Position::Vertex(0),
        (_, Side::Zero) => Position::Vertex(1),
        _ => Position::Inside,
    }
}

/// Position on a triangle from the orientations of a line against its three
/// edges.
fn triangle_crossing(signs: [Sign; 3]) -> Detection<Position> {
    match position_from_edge_sides(signs.map(Side::from)) {
        Position::Outside => Detection::None,
        position => Detection::Intersect(position),
    }
}
